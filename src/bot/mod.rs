//! Bot layer - Discord-specific interface built on poise/serenity.
//!
//! Holds the shared command context, the framework/gateway setup, and the
//! top-level error hook. Everything Discord-flavored lives under this
//! module; the relay logic itself is framework-agnostic in [`crate::core`].

/// Slash command implementations (ask, history, prompt, general)
pub mod commands;
/// Gateway event handlers (message relay)
pub mod handlers;

use crate::config::AppConfig;
use crate::core::relay::Relay;
use crate::errors::{Error, Result};
use crate::gemini::GeminiClient;
use poise::serenity_prelude as serenity;
use tracing::{error, info};

/// Shared data available to all bot commands and event handlers.
pub struct BotData {
    /// The relay: Gemini client plus all per-user conversation state.
    pub relay: Relay,
}

impl BotData {
    /// Creates the shared context handed to poise during setup.
    #[must_use]
    pub const fn new(relay: Relay) -> Self {
        Self { relay }
    }
}

/// Command context alias used by all slash commands.
pub type Context<'a> = poise::Context<'a, BotData, Error>;

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            // Startup must not proceed past a failed setup.
            #[allow(clippy::panic)]
            {
                panic!("failed to start bot: {error:?}");
            }
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("error in command `{}`: {error}", ctx.command().name);
            if let Err(e) = ctx
                .say("Sorry, something went wrong handling that command.")
                .await
            {
                error!("failed to send error message: {e}");
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("error while handling error: {e}");
            }
        }
    }
}

/// Connects to the Discord gateway and runs until externally terminated.
///
/// Registers all slash commands globally once the gateway session is ready.
/// Returns an error if the handshake is rejected (bad token, missing
/// intents); transient per-message failures never propagate this far.
pub async fn run_bot(config: AppConfig) -> Result<()> {
    let gemini = GeminiClient::new(config.gemini_api_key.clone(), config.model.clone())?;
    let relay = Relay::new(gemini);

    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: vec![
                commands::ask(),
                commands::reset_history(),
                commands::forget(),
                commands::show_history(),
                commands::set_prompt(),
                commands::reset_prompt(),
                commands::ping(),
                commands::help(),
            ],
            event_handler: |ctx, event, framework, data| {
                Box::pin(handlers::handle_event(ctx, event, framework, data))
            },
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(move |ctx, ready, framework| {
            Box::pin(async move {
                info!("logged in as {} (id {})", ready.user.name, ready.user.id);
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                info!("slash commands registered globally");
                Ok(BotData::new(relay))
            })
        })
        .build();

    // MESSAGE_CONTENT is a privileged intent; it must also be enabled for
    // the application in the Discord developer portal.
    let intents = serenity::GatewayIntents::GUILD_MESSAGES
        | serenity::GatewayIntents::DIRECT_MESSAGES
        | serenity::GatewayIntents::MESSAGE_CONTENT;

    info!("setting up serenity client for poise framework");
    let mut client = serenity::ClientBuilder::new(&config.discord_token, intents)
        .framework(framework)
        .await?;

    client.start().await?;
    Ok(())
}
