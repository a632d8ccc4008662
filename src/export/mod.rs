//! Export of a finished analysis to xlsx, CSV or JSON files
//!
//! Every file of one export shares a `%Y%m%d_%H%M%S` stamp.

pub mod backend;
pub mod csv_writer;
pub mod excel_writer;
pub mod json_writer;
pub mod writer;

pub use backend::{ExportBundle, ExportError, ExportTarget, ReportWriterBackend};
pub use writer::{ExportFormat, ReportWriter};
