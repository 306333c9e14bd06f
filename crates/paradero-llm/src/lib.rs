//! Paradero LLM - Generation port, Gemini adapter and inspection prompts
//!
//! Photo description and rubric extraction are built on the [`Generator`]
//! port so both can run against a scripted generator in tests.

pub mod describe;
pub mod extraction;
pub mod gemini;
pub mod media;
pub mod mock;
pub mod ports;
pub mod prompts;

// Re-export main types
pub use describe::{describe, is_failed_description};
pub use extraction::{compose_context, extract_fields};
pub use gemini::GeminiClient;
pub use mock::MockGenerator;
pub use ports::{Generator, ImageInput};
