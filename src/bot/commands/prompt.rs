//! System instruction commands - `/set_prompt` and `/reset_prompt`.
//!
//! A system instruction shapes the AI's behavior for one user's
//! conversation; it rides along as the `systemInstruction` field on every
//! completion request until reset.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::say_ephemeral},
        config::SYSTEM_INSTRUCTION_MAX_LENGTH,
        errors::{Error, Result},
    };
    use tracing::info;

    /// Sets a custom system prompt/instruction for the AI in this chat.
    #[poise::command(slash_command)]
    pub async fn set_prompt(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Instructions for the AI's behavior (max 1000 chars)"]
        instruction: String,
    ) -> Result<()> {
        let user = ctx.author().id.get();

        if ctx
            .data()
            .relay
            .set_instruction(user, &instruction)
            .await
            .is_err()
        {
            say_ephemeral(
                ctx,
                format!(
                    "Error: system instruction is too long \
                     (max {SYSTEM_INSTRUCTION_MAX_LENGTH} characters). Please shorten it."
                ),
            )
            .await?;
            return Ok(());
        }

        info!(user, "set system instruction");
        say_ephemeral(
            ctx,
            format!(
                "✅ Understood! I will now try to follow these instructions for our \
                 conversation:\n```\n{instruction}\n```\nUse `/reset_prompt` to clear this."
            ),
        )
        .await
    }

    /// Resets the custom AI system prompt/instruction for this chat.
    #[poise::command(slash_command)]
    pub async fn reset_prompt(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let user = ctx.author().id.get();

        if ctx.data().relay.clear_instruction(user).await {
            info!(user, "cleared system instruction");
            say_ephemeral(
                ctx,
                "My custom system instruction for our chat has been reset to default.",
            )
            .await
        } else {
            say_ephemeral(ctx, "You haven't set a custom system instruction with me yet.").await
        }
    }
}

// Re-export all commands
pub use inner::*;
