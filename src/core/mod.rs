//! Core relay logic, independent of any Discord framework types.

/// Splitting long replies into Discord-sized chunks
pub mod chunk;
/// Per-user conversation history and system instructions
pub mod conversation;
/// The relay operation tying conversations to the Gemini client
pub mod relay;
