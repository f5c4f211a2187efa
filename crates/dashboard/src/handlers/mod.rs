pub mod analytics;
pub mod meta;
