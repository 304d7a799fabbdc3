//! The `/ask` command - the slash-command entry to the relay.
//!
//! Equivalent to posting a plain message in a channel the bot watches, but
//! usable where the bot has no message-content access, and with the reply
//! attached to the interaction.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        config::MAX_RESPONSE_LENGTH,
        core::chunk::split_message,
        errors::{Error, Result},
    };
    use tracing::{error, info};

    /// Asks the AI a question (maintains conversation history).
    ///
    /// The interaction is deferred first since completions routinely exceed
    /// Discord's three-second acknowledgement window. Long replies go out as
    /// multiple follow-up messages.
    #[poise::command(slash_command)]
    pub async fn ask(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Your question for the AI"] question: String,
    ) -> Result<()> {
        ctx.defer().await?;

        let user = ctx.author().id.get();
        info!(user, chars = question.len(), "processing /ask");

        match ctx.data().relay.respond(user, &question).await {
            Ok(reply) => {
                for chunk in split_message(&reply, MAX_RESPONSE_LENGTH) {
                    ctx.say(chunk).await?;
                }
            }
            Err(err) => {
                error!(user, "completion request failed: {err}");
                ctx.say("Sorry, I couldn't reach the AI service. Please try again later.")
                    .await?;
            }
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
