//! File uploads: batches of parsed transactions awaiting approval.

pub mod export;
pub mod types;

pub use export::{export_csv, export_file_name};
pub use types::{FileUpload, NewFileUpload, SUPPORTED_EXTENSIONS, is_supported_file};
