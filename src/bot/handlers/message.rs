//! Relay handler for plain message-creation events.
//!
//! Every non-bot message with text content is treated as one unit of work:
//! relayed to Gemini once, with the chunked completion posted back to the
//! originating channel. Processing happens inline in the handler, so replies
//! within a channel keep the order of the messages that triggered them.

use crate::bot::BotData;
use crate::config::MAX_RESPONSE_LENGTH;
use crate::core::chunk::split_message;
use crate::errors::{Error, Result};
use poise::serenity_prelude as serenity;
use tracing::{error, info};

/// Dispatches gateway events to their handlers.
pub async fn handle_event(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, BotData, Error>,
    data: &BotData,
) -> Result<()> {
    if let serenity::FullEvent::Message { new_message } = event {
        let bot_id = ctx.cache.current_user().id;
        handle_message(ctx, bot_id, data, new_message).await?;
    }
    Ok(())
}

/// Explicit author-identity check applied before any processing.
///
/// The bot must never answer its own messages (or another bot's), or the
/// relay would feed on itself indefinitely. Messages without text content
/// (bare attachments, embeds) are also skipped.
fn should_relay(
    author_id: serenity::UserId,
    author_is_bot: bool,
    content: &str,
    bot_id: serenity::UserId,
) -> bool {
    author_id != bot_id && !author_is_bot && !content.trim().is_empty()
}

async fn handle_message(
    ctx: &serenity::Context,
    bot_id: serenity::UserId,
    data: &BotData,
    message: &serenity::Message,
) -> Result<()> {
    if !should_relay(
        message.author.id,
        message.author.bot,
        &message.content,
        bot_id,
    ) {
        return Ok(());
    }

    let user = message.author.id.get();
    info!(
        user,
        channel = %message.channel_id,
        chars = message.content.len(),
        "relaying message"
    );

    match data.relay.respond(user, &message.content).await {
        Ok(reply) => {
            for chunk in split_message(&reply, MAX_RESPONSE_LENGTH) {
                message.channel_id.say(&ctx.http, chunk).await?;
            }
        }
        // Transient per-message failure: log it and skip the reply rather
        // than crash; the next message is processed normally.
        Err(err) => error!(user, "completion request failed: {err}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOT: serenity::UserId = serenity::UserId::new(999);

    #[test]
    fn test_relays_ordinary_user_message() {
        assert!(should_relay(serenity::UserId::new(1), false, "hello", BOT));
    }

    #[test]
    fn test_never_relays_own_messages() {
        assert!(!should_relay(BOT, true, "hello", BOT));
        // Even if the bot flag were somehow unset, the id check holds.
        assert!(!should_relay(BOT, false, "hello", BOT));
    }

    #[test]
    fn test_never_relays_other_bots() {
        assert!(!should_relay(serenity::UserId::new(2), true, "hello", BOT));
    }

    #[test]
    fn test_skips_messages_without_text() {
        assert!(!should_relay(serenity::UserId::new(1), false, "", BOT));
        assert!(!should_relay(serenity::UserId::new(1), false, "   \n", BOT));
    }
}
