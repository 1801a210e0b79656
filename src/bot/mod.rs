//! Bot layer - Discord-specific interface and command handlers
//!
//! This module provides the Discord interface for `InventoryBuddy`: slash
//! commands, autocomplete handlers, shared bot context and the client runner.
//! Commands only translate between Discord and [`crate::core`]; they hold no
//! business rules of their own.

/// Discord command implementations (category, product, stock, inventory, general)
pub mod commands;
/// Discord interaction handlers (autocomplete, etc.)
pub mod handlers;

use crate::{
    config::settings::Settings,
    errors::{Error, Result},
};
use poise::serenity_prelude as serenity;
use sea_orm::DatabaseConnection;
use tracing::{error, info, instrument};

/// Shared data available to all bot commands.
/// This structure holds the database connection and the loaded settings.
pub struct BotData {
    /// Database connection for all database operations
    pub database: DatabaseConnection,
    /// Settings loaded at startup
    pub settings: Settings,
}

impl BotData {
    /// Creates a new `BotData` instance.
    #[must_use]
    pub const fn new(database: DatabaseConnection, settings: Settings) -> Self {
        Self { database, settings }
    }
}

async fn on_error(error: poise::FrameworkError<'_, BotData, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command `{}`: {:?}", ctx.command().name, error);
            if let Err(e) = ctx
                .say(format!("An error occurred ({}): {}", error.kind(), error))
                .await
            {
                error!("Failed to send error message: {}", e);
            }
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                error!("Error while handling error: {}", e);
            }
        }
    }
}

/// Builds the poise framework, registers commands globally and runs the client
/// until it stops.
///
/// # Errors
/// Returns an error if the client cannot be created or the gateway connection fails.
#[instrument(skip_all)]
pub async fn run_bot(token: String, data: BotData) -> Result<()> {
    let framework = poise::Framework::builder()
        .options(poise::FrameworkOptions {
            commands: commands::all(),
            on_error: |error| Box::pin(on_error(error)),
            ..Default::default()
        })
        .setup(|ctx, ready, framework| {
            Box::pin(async move {
                info!("Logged in as {}", ready.user.name);
                info!("Registering commands globally...");
                poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                Ok(data)
            })
        })
        .build();

    // Slash commands need no privileged intents
    let intents = serenity::GatewayIntents::non_privileged();

    info!("Setting up Serenity client for Poise framework...");
    let mut client = serenity::ClientBuilder::new(token, intents)
        .framework(framework)
        .await
        .inspect_err(|e| error!("Error creating client: {:?}", e))?;

    info!("Starting bot client...");
    client
        .start()
        .await
        .inspect_err(|e| error!("Client error: {:?}", e))?;
    Ok(())
}

pub use commands::*;
pub use handlers::*;
