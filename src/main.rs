use dotenvy::dotenv;
use gembot::bot;
use gembot::config::AppConfig;
use gembot::errors::Result;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the configuration; a missing credential is fatal here,
    //    before any network connection is attempted
    let config = AppConfig::from_env()
        .inspect_err(|e| error!("Critical error loading configuration: {e}"))?;
    info!(model = %config.model, "Successfully processed application configuration.");

    // 4. Run the bot until externally terminated
    bot::run_bot(config)
        .await
        .inspect_err(|e| error!("Bot terminated with error: {e}"))?;

    Ok(())
}
