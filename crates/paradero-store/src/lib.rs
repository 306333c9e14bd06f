//! Paradero Store - Storage ports and adapters
//!
//! This crate defines the file-storage and draft ports and provides the
//! Google Drive adapter plus in-memory implementations.

pub mod drive;
pub mod memory;
pub mod ports;
pub mod query;
pub mod resolve;

pub use drive::DriveGateway;
pub use memory::{MemoryDraftStore, MemoryFileStore};
pub use ports::{AccessInfo, DraftStore, FileStore};
