//! Slash command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// The `/ask` conversation command
pub mod chat;

/// General utility commands (ping, help)
pub mod general;

/// History management commands (reset, forget, show)
pub mod history;

/// System instruction commands (set, reset)
pub mod prompt;

use crate::{bot::BotData, errors::Error, errors::Result};

/// Sends a reply only the invoking user can see.
pub(crate) async fn say_ephemeral(
    ctx: poise::Context<'_, BotData, Error>,
    text: impl Into<String>,
) -> Result<()> {
    ctx.send(
        poise::CreateReply::default()
            .content(text.into())
            .ephemeral(true),
    )
    .await?;
    Ok(())
}

// Export commands
pub use chat::*;
pub use general::*;
pub use history::*;
pub use prompt::*;
