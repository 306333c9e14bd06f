mod drafts;
mod health;
mod images;
mod report;
mod table;

pub use drafts::{create_draft, get_draft, save_description};
pub use health::{gem_health, health_check};
pub use images::{analyze_image, list_images};
pub use report::generate_report;
pub use table::fill_table;
