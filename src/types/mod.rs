pub mod report;
pub mod search;
