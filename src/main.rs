use inventory_buddy::{
    bot::{self, BotData},
    config::{database, settings},
    core::category,
    errors::{Error, Result},
};
use dotenvy::dotenv;
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load settings (defaults when no file exists)
    let app_settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {}", e))?;
    info!(
        "Settings loaded: low-stock threshold {}, bottom {}%",
        app_settings.stock.low_stock_threshold, app_settings.stock.bottom_percent
    );

    // 4. Connect and make sure the tables exist
    let db = database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    // 5. Seed configured categories
    let seeded = category::seed_categories(&db, &app_settings.categories)
        .await
        .inspect_err(|e| error!("Failed to seed categories: {}", e))?;
    info!("Seeded {} new categories.", seeded);

    // 6. Run the bot; the token is read right before use and never stored
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {}", e))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(db, app_settings)).await
}
