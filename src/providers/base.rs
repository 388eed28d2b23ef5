use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::models::message::Message;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Usage {
    pub input_tokens: Option<i32>,
    pub output_tokens: Option<i32>,
    pub total_tokens: Option<i32>,
}

impl Usage {
    pub fn new(
        input_tokens: Option<i32>,
        output_tokens: Option<i32>,
        total_tokens: Option<i32>,
    ) -> Self {
        Self {
            input_tokens,
            output_tokens,
            total_tokens,
        }
    }
}

/// Base trait for completion providers (OpenAI and compatible services)
pub trait Provider: Send + Sync {
    /// Generate the next reply for the given conversation.
    ///
    /// Messages are forwarded as-is, so any system message must already be
    /// part of `messages`.
    fn complete(&self, model: &str, messages: &[Message]) -> Result<(String, Usage)>;
}
