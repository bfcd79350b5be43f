pub mod diagnostic;
pub mod file_processor;
pub mod run_report;

pub use diagnostic::{Diagnostic, Severity};
pub use file_processor::{FileProcessor, FileReport};
pub use run_report::RunReport;
