pub mod analysis;
pub mod drive;
pub mod project;
pub mod rubric;
pub mod stop;

pub use analysis::{
    merge_saved, missing_baseline, AnalysisEntry, AnalysisMap, Category, Draft, DraftId,
};
pub use drive::{DriveFile, DriveFileIds, Lookup, SearchScope, WellKnownFile};
pub use project::ProjectInfo;
pub use rubric::{Characteristic, RUBRIC};
pub use stop::{CharacteristicRow, StopRecord};
