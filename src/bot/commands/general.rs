//! General Discord commands - ping, help, and other utility commands.
//! This module contains simple commands that don't require database operations.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        errors::{Error, Result},
    };

    /// Responds with "Pong!" to test bot connectivity.
    #[poise::command(slash_command, prefix_command)]
    pub async fn ping(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        ctx.say("Pong!").await?;
        Ok(())
    }

    /// Displays help information about available commands.
    #[poise::command(slash_command, prefix_command)]
    pub async fn help(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "**InventoryBuddy Help**\n\
        Here is a summary of all available commands.\n\n\
        **Categories**\n\
        • `/category add <name> [description]` - Creates a category.\n\
        • `/category list` - Lists categories with their product counts.\n\
        • `/category delete <category>` - Deletes a category; its products become uncategorised.\n\n\
        **Products**\n\
        • `/product add <name> <quantity> <price> <category>` - Adds a product.\n\
        • `/product list` - Lists all products with stock indicators.\n\
        • `/product update <product> [new_name] [quantity] [price] [category]` - Edits a product.\n\
        • `/product delete <product>` - Deletes a product.\n\n\
        **Stock**\n\
        • `/stock low [threshold]` - Products with quantity below the threshold.\n\
        • `/stock bottom [percent]` - The lowest-stocked share of products.\n\
        • `/stock summary` - Totals for the whole inventory.\n\n\
        **Bulk**\n\
        • `/inventory export` - Downloads the product table as CSV.\n\
        • `/inventory edit_sheet` - Downloads an editable sheet with product ids.\n\
        • `/inventory apply <sheet>` - Uploads an edited sheet and applies every change.\n\n\
        **Utility**\n\
        • `/ping` - Checks if the bot is responsive.\n\
        • `/help` - Shows this help message.";

        ctx.say(help_text).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
