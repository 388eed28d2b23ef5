//! Conversation records shared by the agent, its environment and the providers.
//!
//! Messages mirror the chat format the completion services accept: a role and
//! a block of text. They are converted into provider payloads at the edge, in
//! `providers::utils`.
pub mod message;
