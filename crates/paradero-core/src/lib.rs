//! Paradero Core - Domain models, rubric, errors and configuration
//!
//! This crate contains the inspection domain shared by the storage, AI,
//! report and API crates. It performs no network I/O.

pub mod config;
pub mod error;
pub mod models;

pub use error::{ParaderoError, Result};
