use anyhow::Result;

use crate::models::message::Message;

pub mod local;

/// The capabilities a host runtime lends to the agent for one turn.
///
/// The agent never looks behind this trait: history storage, the completion
/// backend and the way replies reach the user are all the host's concern.
/// Errors returned here are passed back to the host untouched.
pub trait Environment {
    /// Snapshot of the conversation so far, oldest first
    fn list_messages(&self) -> Result<Vec<Message>>;

    /// Generate a completion for the given prompt
    fn completion(&self, messages: &[Message]) -> Result<String>;

    /// Publish the agent's output for this turn
    fn add_reply(&mut self, reply: String) -> Result<()>;

    /// Mark the turn finished; the agent expects more user input before it runs again
    fn request_user_input(&mut self) -> Result<()>;
}
