mod drafts;
mod folders;
mod images;
mod report;

pub use drafts::DraftService;
pub use folders::FolderService;
pub use images::ImageService;
pub use report::{content_disposition, merge_draft, ReportService};
