//! History management commands - `/reset_history`, `/forget`, `/show_history`.
//!
//! All three operate on the caller's own conversation only and answer
//! ephemerally, so other channel members never see someone's transcript.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::say_ephemeral},
        core::conversation::Forgotten,
        errors::{Error, Result},
    };
    use tracing::info;

    /// Resets your conversation history with the AI.
    #[poise::command(slash_command)]
    pub async fn reset_history(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = ctx.author().id.get();

        if ctx.data().relay.reset_history(user).await {
            info!(user, "reset conversation history");
            say_ephemeral(ctx, "🧹 Your chat history with me has been cleared.").await
        } else {
            say_ephemeral(ctx, "You don't have any chat history with me yet.").await
        }
    }

    /// Removes the last question and AI answer from your history.
    #[poise::command(slash_command)]
    pub async fn forget(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = ctx.author().id.get();

        match ctx.data().relay.forget_last(user).await {
            Forgotten::Exchange { question } => {
                info!(user, "forgot last exchange");
                let preview: String = question.chars().take(50).collect();
                say_ephemeral(
                    ctx,
                    format!(
                        "Okay, I've forgotten our last exchange \
                         (your question starting with \"{preview}...\" and my response)."
                    ),
                )
                .await
            }
            Forgotten::OnlyUserMessage => {
                say_ephemeral(
                    ctx,
                    "Okay, I've forgotten your last message (there was no response from me yet).",
                )
                .await
            }
            Forgotten::Nothing => {
                say_ephemeral(ctx, "There's nothing in our recent history for me to forget!")
                    .await
            }
        }
    }

    /// Shows the recent conversation history I remember (only visible to you).
    #[poise::command(slash_command)]
    pub async fn show_history(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = ctx.author().id.get();

        match ctx.data().relay.render_history(user).await {
            Some(transcript) => {
                ctx.defer_ephemeral().await?;
                // Transcripts can exceed one message; each chunk stays ephemeral.
                for chunk in crate::core::chunk::split_message(
                    &transcript,
                    crate::config::MAX_RESPONSE_LENGTH,
                ) {
                    say_ephemeral(ctx, chunk).await?;
                }
                Ok(())
            }
            None => say_ephemeral(ctx, "You don't have any chat history with me yet.").await,
        }
    }
}

// Re-export all commands
pub use inner::*;
