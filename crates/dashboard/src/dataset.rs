//! Spreadsheet loader for the rental delay dataset.
//!
//! Reads the first worksheet of an `.xlsx`/`.xls`/`.ods` file with a header
//! row. Columns are located by name so their order does not matter.

use std::path::{Path, PathBuf};

use calamine::{open_workbook_auto, Data, Range, Reader};
use getaround_core::delay::{DelayDataset, RentalRecord};

pub const CHECKIN_TYPE: &str = "checkin_type";
pub const DELAY: &str = "delay_at_checkout_in_minutes";
pub const GAP: &str = "time_delta_with_previous_rental_in_minutes";

const RENTAL_ID: &str = "rental_id";
const CAR_ID: &str = "car_id";
const STATE: &str = "state";

static EMPTY: Data = Data::Empty;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("dataset not found at {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to open dataset: {0}")]
    Open(#[from] calamine::Error),

    #[error("dataset has no worksheet")]
    NoSheet,

    #[error("dataset has no header row")]
    NoHeader,

    #[error("dataset is missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("invalid value '{value}' in column '{column}' at row {row}")]
    InvalidCell {
        row: usize,
        column: &'static str,
        value: String,
    },
}

/// Read and validate the dataset at `path`.
pub fn load(path: &Path) -> Result<DelayDataset, DatasetError> {
    if !path.exists() {
        return Err(DatasetError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(DatasetError::NoSheet)??;

    Ok(DelayDataset::new(records_from_range(&range)?))
}

/// Column positions resolved from the header row.
struct Columns {
    checkin_type: usize,
    delay: usize,
    gap: usize,
    rental_id: Option<usize>,
    car_id: Option<usize>,
    state: Option<usize>,
}

impl Columns {
    fn resolve(header: &[Data]) -> Result<Self, DatasetError> {
        let names: Vec<String> = header.iter().map(|c| c.to_string().trim().to_string()).collect();
        let find = |name: &str| names.iter().position(|n| n == name);
        let require = |name: &'static str| find(name).ok_or(DatasetError::MissingColumn(name));

        Ok(Self {
            checkin_type: require(CHECKIN_TYPE)?,
            delay: require(DELAY)?,
            gap: require(GAP)?,
            rental_id: find(RENTAL_ID),
            car_id: find(CAR_ID),
            state: find(STATE),
        })
    }
}

/// Convert a worksheet (header row first) into rental records.
///
/// Rows without a checkin type cannot be categorised and are skipped.
pub fn records_from_range(range: &Range<Data>) -> Result<Vec<RentalRecord>, DatasetError> {
    let mut rows = range.rows();
    let header = rows.next().ok_or(DatasetError::NoHeader)?;
    let columns = Columns::resolve(header)?;

    let mut records = Vec::with_capacity(range.height().saturating_sub(1));
    let mut skipped = 0usize;

    // Sheet rows are 1-based and the header occupies the first one.
    for (row, cells) in (2..).zip(rows) {
        let cell = |idx: usize| cells.get(idx).unwrap_or(&EMPTY);
        let optional = |idx: Option<usize>| idx.map_or(&EMPTY, cell);

        let Some(checkin_type) = text(cell(columns.checkin_type)) else {
            skipped += 1;
            continue;
        };

        records.push(RentalRecord {
            rental_id: integer(optional(columns.rental_id), row, RENTAL_ID)?,
            car_id: integer(optional(columns.car_id), row, CAR_ID)?,
            checkin_type,
            state: text(optional(columns.state)),
            delay_at_checkout_in_minutes: number(cell(columns.delay), row, DELAY)?,
            time_delta_with_previous_rental_in_minutes: number(cell(columns.gap), row, GAP)?,
        });
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Rows without a checkin type skipped");
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Cell conversion
// ---------------------------------------------------------------------------

fn text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        other => {
            let value = other.to_string();
            let value = value.trim();
            (!value.is_empty()).then(|| value.to_string())
        }
    }
}

fn number(cell: &Data, row: usize, column: &'static str) -> Result<Option<f64>, DatasetError> {
    match cell {
        Data::Empty | Data::Error(_) => Ok(None),
        Data::Int(i) => Ok(Some(*i as f64)),
        Data::Float(f) if f.is_nan() => Ok(None),
        Data::Float(f) => Ok(Some(*f)),
        Data::String(s) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("nan") {
                return Ok(None);
            }
            s.parse()
                .map(Some)
                .map_err(|_| invalid(row, column, s.to_string()))
        }
        other => Err(invalid(row, column, other.to_string())),
    }
}

fn integer(cell: &Data, row: usize, column: &'static str) -> Result<Option<i64>, DatasetError> {
    match cell {
        Data::Int(i) => Ok(Some(*i)),
        Data::Float(f) if f.fract() == 0.0 => Ok(Some(*f as i64)),
        Data::String(s) if s.trim().parse::<i64>().is_ok() => Ok(s.trim().parse().ok()),
        other => match number(other, row, column)? {
            None => Ok(None),
            Some(_) => Err(invalid(row, column, other.to_string())),
        },
    }
}

fn invalid(row: usize, column: &'static str, value: String) -> DatasetError {
    DatasetError::InvalidCell { row, column, value }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn sheet(rows: &[&[Data]]) -> Range<Data> {
        let width = rows.iter().map(|r| r.len()).max().unwrap_or(1);
        let mut range = Range::new((0, 0), (rows.len() as u32 - 1, width as u32 - 1));
        for (r, row) in rows.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                range.set_value((r as u32, c as u32), value.clone());
            }
        }
        range
    }

    fn s(value: &str) -> Data {
        Data::String(value.to_string())
    }

    fn header() -> Vec<Data> {
        [RENTAL_ID, CAR_ID, CHECKIN_TYPE, STATE, DELAY, "previous_ended_rental_id", GAP]
            .into_iter()
            .map(s)
            .collect()
    }

    #[test]
    fn reads_typed_cells() {
        let range = sheet(&[
            &header()[..],
            &[
                Data::Int(505000),
                Data::Int(363965),
                s("mobile"),
                s("canceled"),
                Data::Empty,
                Data::Empty,
                Data::Empty,
            ],
            &[
                Data::Float(511639.0),
                Data::Int(370585),
                s("connect"),
                s("ended"),
                Data::Float(-15.0),
                Data::Int(563782),
                Data::Float(570.0),
            ],
        ]);

        let records = records_from_range(&range).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].rental_id, Some(505000));
        assert_eq!(records[0].delay_at_checkout_in_minutes, None);
        assert_eq!(records[1].rental_id, Some(511639));
        assert_eq!(records[1].checkin_type, "connect");
        assert_eq!(records[1].state.as_deref(), Some("ended"));
        assert_eq!(records[1].delay_at_checkout_in_minutes, Some(-15.0));
        assert_eq!(records[1].time_delta_with_previous_rental_in_minutes, Some(570.0));
    }

    #[test]
    fn columns_are_found_by_name() {
        let range = sheet(&[
            &[s(GAP), s(CHECKIN_TYPE), s(DELAY)],
            &[s("30"), s(" mobile "), s("nan")],
        ]);

        let records = records_from_range(&range).unwrap();
        assert_eq!(records[0].checkin_type, "mobile");
        assert_eq!(records[0].gap(), Some(30.0));
        assert_eq!(records[0].delay_at_checkout_in_minutes, None);
        assert_eq!(records[0].rental_id, None);
    }

    #[test]
    fn rows_without_checkin_type_are_skipped() {
        let range = sheet(&[
            &[s(CHECKIN_TYPE), s(DELAY), s(GAP)],
            &[Data::Empty, Data::Int(10), Data::Empty],
            &[s("connect"), Data::Int(5), Data::Empty],
        ]);
        assert_eq!(records_from_range(&range).unwrap().len(), 1);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let range = sheet(&[&[s(CHECKIN_TYPE), s(DELAY)], &[s("mobile"), Data::Int(1)]]);
        assert_matches!(
            records_from_range(&range),
            Err(DatasetError::MissingColumn(GAP))
        );
    }

    #[test]
    fn unparsable_number_reports_sheet_row() {
        let range = sheet(&[
            &[s(CHECKIN_TYPE), s(DELAY), s(GAP)],
            &[s("mobile"), Data::Int(1), Data::Empty],
            &[s("mobile"), s("late"), Data::Empty],
        ]);
        assert_matches!(
            records_from_range(&range),
            Err(DatasetError::InvalidCell { row: 3, column: DELAY, .. })
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.xlsx");
        assert_matches!(load(&path), Err(DatasetError::NotFound { .. }));
    }

    #[test]
    fn non_spreadsheet_file_fails_to_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delays.xlsx");
        std::fs::write(&path, b"not a zip archive").unwrap();
        assert_matches!(load(&path), Err(DatasetError::Open(_)));
    }
}
