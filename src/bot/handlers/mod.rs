//! Gateway event handlers
//!
//! Non-command Discord events land here; currently that is only the message
//! relay, which answers plain channel messages without a slash command.

/// Message-creation relay handler
pub mod message;

pub use message::handle_event;
