//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't touch conversation state
//! and provide basic bot functionality and user assistance.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Checks the bot's responsiveness and gateway latency.
    #[poise::command(slash_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let latency = ctx.ping().await;
        ctx.say(format!(
            "Pong! My latency to Discord is {:.2} ms.",
            latency.as_secs_f64() * 1000.0
        ))
        .await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**GemBot Help**\n\
        I answer any message you post in a channel I can read, and I also \
        support these commands:\n\n\
        **Conversation**\n\
        • `/ask <question>` - Ask the AI a question (keeps per-user history).\n\
        • `/show_history` - View the conversation I remember (only you see it).\n\
        • `/forget` - Remove the last question/answer pair from your history.\n\
        • `/reset_history` - Clear your whole conversation history.\n\n\
        **Behavior**\n\
        • `/set_prompt <instruction>` - Give me a standing instruction for your chats.\n\
        • `/reset_prompt` - Remove your standing instruction.\n\n\
        **Utility**\n\
        • `/ping` - Check if I'm responsive.\n\
        • `/help` - Show this message.\n\n\
        Conversations keep history unless reset with `/reset_history`.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
