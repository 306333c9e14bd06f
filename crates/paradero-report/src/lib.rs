//! Paradero Report - Word report rendering
//!
//! Builds the inspection report as `.docx` bytes: cover, running header and
//! footer, five numbered chapters with figures and tables. Pictures and the
//! spreadsheet are fetched through the [`paradero_store::FileStore`] port.

pub mod builder;
pub mod elements;
pub mod layout;
pub mod numbering;
pub mod picture;
pub mod spreadsheet;
pub mod styles;
pub mod table;

pub use builder::{ReportBuilder, ReportRequest};
pub use numbering::Numbering;
pub use table::{NormalizedTable, TableInput};

/// Media type of the generated document
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
