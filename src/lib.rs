//! `GemBot` - A Discord bot that relays messages to Google's Gemini API
//!
//! This crate provides a small conversational relay: messages and `/ask`
//! questions are forwarded to the Generative Language API and the completion
//! is posted back to the originating channel. Conversations keep a bounded
//! per-user history and an optional per-user system instruction, all held in
//! process memory.

// Deny the most critical lints that could lead to bugs or security issues
#![deny(
    // Security and correctness
    unsafe_code,
    unsafe_op_in_unsafe_fn,

    // Code quality - things that are almost always bugs
    unreachable_code,
    unreachable_patterns,
    unused_must_use,

    // Documentation - broken links are bugs
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warn on things that should be fixed but aren't necessarily bugs
#![warn(
    missing_docs,

    // Clippy categories for overall code quality
    clippy::all,
    clippy::pedantic,

    // Correctness
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::exit,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,

    // Style consistency
    clippy::enum_glob_use,
    clippy::semicolon_if_nothing_returned,
    clippy::wildcard_imports,

    // Future compatibility
    future_incompatible,
    rust_2018_idioms,
)]
// Allow some pedantic lints that are too noisy or not applicable
#![allow(
    clippy::module_name_repetitions,  // Common pattern in Rust
    clippy::missing_errors_doc,       // Will add gradually
)]

/// Discord bot interface - commands, event handlers, and bot context
pub mod bot;
/// Configuration loaded from the environment at startup
pub mod config;
/// Framework-agnostic relay logic - conversations, chunking, and the relay loop
pub mod core;
/// Unified error types and result handling
pub mod errors;
/// HTTP client for the Generative Language API
pub mod gemini;

#[cfg(test)]
pub mod test_utils;
