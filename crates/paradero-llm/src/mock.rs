//! Scripted generator for development and testing.
//!
//! Uses `Mutex::unwrap()` for the same reason as the in-memory stores: a
//! poisoned lock means a test already panicked.

use crate::ports::{Generator, ImageInput};
use async_trait::async_trait;
use paradero_core::error::{ParaderoError, Result};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// One recorded `generate` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub images: usize,
}

/// Generator that answers from a queue of canned replies.
///
/// The last reply is repeated once the queue has a single entry left.
#[derive(Debug, Clone)]
pub struct MockGenerator {
    replies: Arc<Mutex<VecDeque<std::result::Result<String, String>>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
    configured: bool,
}

impl MockGenerator {
    pub fn replying(text: impl Into<String>) -> Self {
        Self::scripted(vec![Ok(text.into())])
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self::scripted(vec![Err(reason.into())])
    }

    pub fn scripted(replies: Vec<std::result::Result<String, String>>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(replies.into())),
            calls: Arc::default(),
            configured: true,
        }
    }

    /// Report no API key, as a client without credentials would
    pub fn unconfigured(mut self) -> Self {
        self.configured = false;
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for MockGenerator {
    async fn generate(&self, prompt: &str, images: &[ImageInput]) -> Result<String> {
        self.calls.lock().unwrap().push(RecordedCall {
            prompt: prompt.to_string(),
            images: images.len(),
        });

        let mut replies = self.replies.lock().unwrap();
        let reply = if replies.len() > 1 {
            replies.pop_front()
        } else {
            replies.front().cloned()
        };

        match reply {
            Some(Ok(text)) => Ok(text),
            Some(Err(reason)) => Err(ParaderoError::upstream("Gemini", reason)),
            None => Err(ParaderoError::upstream("Gemini", "no scripted reply")),
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}
