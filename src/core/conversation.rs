//! Per-user conversation state - bounded history and system instructions.
//!
//! Everything here lives in process memory only. A conversation is keyed by
//! Discord user id, holds at most [`MAX_HISTORY_TURNS`] user/model exchanges
//! in the Gemini wire format, and may carry one custom system instruction.

use crate::config::{MAX_HISTORY_TURNS, SYSTEM_INSTRUCTION_MAX_LENGTH};
use crate::errors::{Error, Result};
use crate::gemini::{Content, Role};
use std::collections::HashMap;

/// Discord user id, the key for all per-user state.
pub type UserId = u64;

/// Characters of each history entry shown by `render_history`.
const RENDER_ENTRY_LIMIT: usize = 500;

/// What a user turn looks like to the relay: the full request contents plus
/// the instruction to attach, captured while the store lock is held.
#[derive(Debug, Clone)]
pub struct TurnSnapshot {
    /// Conversation so far, oldest first, ending with the new user turn.
    pub contents: Vec<Content>,
    /// The user's system instruction, if one is set.
    pub instruction: Option<String>,
}

/// Outcome of a `/forget` request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Forgotten {
    /// A full user/model exchange was removed; carries the forgotten question.
    Exchange {
        /// Text of the removed user turn.
        question: String,
    },
    /// Only a dangling user message existed and was removed.
    OnlyUserMessage,
    /// There was nothing to forget.
    Nothing,
}

/// In-memory store of every user's conversation state.
#[derive(Debug, Default)]
pub struct ConversationStore {
    histories: HashMap<UserId, Vec<Content>>,
    instructions: HashMap<UserId, String>,
}

impl ConversationStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a user turn, trims the history to the configured bound, and
    /// returns the request snapshot for the API call.
    pub fn begin_turn(&mut self, user: UserId, text: &str) -> TurnSnapshot {
        let history = self.histories.entry(user).or_default();
        history.push(Content::user(text));

        let cap = MAX_HISTORY_TURNS * 2;
        let excess = history.len().saturating_sub(cap);
        if excess > 0 {
            history.drain(..excess);
        }

        TurnSnapshot {
            contents: history.clone(),
            instruction: self.instructions.get(&user).cloned(),
        }
    }

    /// Records the model's reply for the user's pending turn.
    pub fn commit_reply(&mut self, user: UserId, text: &str) {
        self.histories
            .entry(user)
            .or_default()
            .push(Content::model(text));
    }

    /// Removes the trailing user turn, used when the prompt was blocked or
    /// the API call failed so failed prompts never poison the history.
    pub fn rollback_turn(&mut self, user: UserId) {
        if let Some(history) = self.histories.get_mut(&user) {
            if history.last().is_some_and(|turn| turn.role == Role::User) {
                history.pop();
            }
            if history.is_empty() {
                self.histories.remove(&user);
            }
        }
    }

    /// Drops the user's entire history. Returns whether any existed.
    pub fn reset(&mut self, user: UserId) -> bool {
        self.histories.remove(&user).is_some()
    }

    /// Removes the most recent exchange from the user's history.
    pub fn forget_last(&mut self, user: UserId) -> Forgotten {
        let Some(history) = self.histories.get_mut(&user) else {
            return Forgotten::Nothing;
        };

        let result = if history.len() >= 2 {
            let last = history.pop();
            let second_last = history.pop();
            // Identify the question in either ordering, in case the trailing
            // turn is a dangling user message.
            let question = [second_last, last]
                .into_iter()
                .flatten()
                .find(|turn| turn.role == Role::User)
                .map(|turn| turn.text().to_string())
                .unwrap_or_default();
            Forgotten::Exchange { question }
        } else if history.pop().is_some() {
            Forgotten::OnlyUserMessage
        } else {
            Forgotten::Nothing
        };

        if history.is_empty() {
            self.histories.remove(&user);
        }
        result
    }

    /// Sets the user's system instruction, enforcing the length cap.
    pub fn set_instruction(&mut self, user: UserId, instruction: &str) -> Result<()> {
        if instruction.chars().count() > SYSTEM_INSTRUCTION_MAX_LENGTH {
            return Err(Error::Config {
                message: format!(
                    "system instruction is too long (max {SYSTEM_INSTRUCTION_MAX_LENGTH} characters)"
                ),
            });
        }
        self.instructions.insert(user, instruction.to_string());
        Ok(())
    }

    /// Clears the user's system instruction. Returns whether one was set.
    pub fn clear_instruction(&mut self, user: UserId) -> bool {
        self.instructions.remove(&user).is_some()
    }

    /// The user's current system instruction, if any.
    #[must_use]
    pub fn instruction(&self, user: UserId) -> Option<&str> {
        self.instructions.get(&user).map(String::as_str)
    }

    /// Number of history entries (turns, not exchanges) for a user.
    #[must_use]
    pub fn history_len(&self, user: UserId) -> usize {
        self.histories.get(&user).map_or(0, Vec::len)
    }

    /// Renders the user's history as a readable transcript, or `None` when
    /// there is nothing to show.
    #[must_use]
    pub fn render_history(&self, user: UserId) -> Option<String> {
        let history = self.histories.get(&user).filter(|h| !h.is_empty())?;

        let turns = history.len().div_ceil(2);
        let mut out = format!(
            "**Conversation history (approx. last {turns}/{MAX_HISTORY_TURNS} exchanges):**\n\n"
        );

        let mut exchange = 0usize;
        for entry in history {
            match entry.role {
                Role::User => {
                    exchange += 1;
                    out.push_str(&format!("**{exchange}. You:**\n"));
                }
                Role::Model => out.push_str("**Me:**\n"),
            }

            let text = entry.text();
            let shown: String = text.chars().take(RENDER_ENTRY_LIMIT).collect();
            let suffix = if shown.len() < text.len() { "..." } else { "" };
            out.push_str(&format!("```\n{shown}{suffix}\n```\n"));
        }

        Some(out)
    }
}
