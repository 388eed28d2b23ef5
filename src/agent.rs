use anyhow::Result;
use tracing::debug;

use crate::environment::Environment;
use crate::models::message::Message;

/// Content of the system message that opens every prompt
pub const SYSTEM_PROMPT: &str = "gh-upload-test";

/// The system message prepended to the conversation
pub fn system_prompt() -> Message {
    Message::system(SYSTEM_PROMPT)
}

/// Run a single turn against the environment.
///
/// The prompt is the system message followed by the current history. The
/// completion is published as the reply, then the environment is told the
/// agent is waiting for the user. Any failure stops the turn where it happens.
pub fn run<E: Environment + ?Sized>(env: &mut E) -> Result<()> {
    let mut messages = vec![system_prompt()];
    messages.extend(env.list_messages()?);
    debug!(messages = messages.len(), "requesting completion");

    let result = env.completion(&messages)?;
    debug!(bytes = result.len(), "publishing reply");

    env.add_reply(result)?;
    env.request_user_input()
}
