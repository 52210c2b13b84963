mod json;

pub use json::BuildReport;
