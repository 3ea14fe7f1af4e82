pub mod confirm;
pub mod report;
