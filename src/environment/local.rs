use anyhow::Result;
use tracing::{debug, info};

use super::Environment;
use crate::models::message::Message;
use crate::providers::base::Provider;

/// An in-process host: history lives in memory and completions go straight
/// to a provider.
///
/// Replies are appended to the history and queued until the caller drains
/// them with [`LocalEnvironment::take_replies`].
pub struct LocalEnvironment<P: Provider> {
    provider: P,
    model: String,
    history: Vec<Message>,
    replies: Vec<String>,
    awaiting_input: bool,
}

impl<P: Provider> LocalEnvironment<P> {
    pub fn new<S: Into<String>>(provider: P, model: S) -> Self {
        Self {
            provider,
            model: model.into(),
            history: Vec::new(),
            replies: Vec::new(),
            awaiting_input: false,
        }
    }

    /// Start from an existing conversation
    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn add_user_message<S: Into<String>>(&mut self, text: S) {
        self.history.push(Message::user(text));
        self.awaiting_input = false;
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn awaiting_input(&self) -> bool {
        self.awaiting_input
    }

    pub fn take_replies(&mut self) -> Vec<String> {
        std::mem::take(&mut self.replies)
    }
}

impl<P: Provider> Environment for LocalEnvironment<P> {
    fn list_messages(&self) -> Result<Vec<Message>> {
        Ok(self.history.clone())
    }

    fn completion(&self, messages: &[Message]) -> Result<String> {
        let (text, usage) = self.provider.complete(&self.model, messages)?;
        info!(
            model = %self.model,
            input_tokens = ?usage.input_tokens,
            output_tokens = ?usage.output_tokens,
            total_tokens = ?usage.total_tokens,
            "completion finished"
        );
        Ok(text)
    }

    fn add_reply(&mut self, reply: String) -> Result<()> {
        self.history.push(Message::assistant(reply.clone()));
        self.replies.push(reply);
        Ok(())
    }

    fn request_user_input(&mut self) -> Result<()> {
        debug!("waiting for user input");
        self.awaiting_input = true;
        Ok(())
    }
}
