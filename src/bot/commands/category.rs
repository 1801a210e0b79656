//! Category Discord commands - `/category add|list|delete`.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::more_note,
            handlers::{autocomplete, lookup},
        },
        core::{category, product},
        errors::{Error, ErrorKind, Result},
    };
    use poise::serenity_prelude as serenity;
    use std::collections::HashMap;

    /// Discord embed field limit
    const MAX_EMBED_FIELDS: usize = 25;

    /// Parent command for managing product categories.
    #[poise::command(
        slash_command,
        subcommands("category_add", "category_list", "category_delete")
    )]
    pub async fn category(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Category management command. Available subcommands:\n\
            `/category add` - Add a new category\n\
            `/category list` - List all categories\n\
            `/category delete` - Delete a category";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Adds a new category.
    #[poise::command(slash_command, rename = "add")]
    pub async fn category_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the category (e.g., 'Beverages')"] name: String,
        #[description = "Optional description"] description: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        match category::create_category(db, name, description).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Category '{}' added (ID {}).",
                    created.name, created.id
                ))
                .await?;
            }
            Err(e) if e.kind() == ErrorKind::Validation => {
                ctx.say(format!("❌ {e}")).await?;
            }
            Err(e) => {
                ctx.say("❌ Failed to add the category. Please try again later.")
                    .await?;
                return Err(e);
            }
        }
        Ok(())
    }

    /// Lists all categories with the number of products in each.
    #[poise::command(slash_command, rename = "list")]
    pub async fn category_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let categories = category::get_all_categories(db).await?;
        if categories.is_empty() {
            ctx.say("No categories yet. Use `/category add` to create one!")
                .await?;
            return Ok(());
        }

        let mut product_counts: HashMap<i64, usize> = HashMap::new();
        for prod in product::get_all_products(db).await? {
            if let Some(category_id) = prod.category_id {
                *product_counts.entry(category_id).or_default() += 1;
            }
        }

        let embed_fields: Vec<(String, String, bool)> = categories
            .iter()
            .take(MAX_EMBED_FIELDS)
            .map(|cat| {
                let count = product_counts.get(&cat.id).copied().unwrap_or(0);
                let description = cat.description.as_deref().unwrap_or("—");
                (
                    lookup::record_label(&cat.name, cat.id),
                    format!("{description}\nProducts: {count}"),
                    false,
                )
            })
            .collect();

        let mut list_embed = serenity::CreateEmbed::default()
            .title(format!("**Categories** ({})", categories.len()))
            .color(0x0058_65F2)
            .fields(embed_fields);
        if let Some(note) = more_note(categories.len(), MAX_EMBED_FIELDS) {
            list_embed = list_embed.footer(serenity::CreateEmbedFooter::new(note));
        }

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }

    /// Deletes a category. Its products stay and become uncategorised.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn category_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Category to delete"]
        #[autocomplete = "autocomplete::autocomplete_category_name"]
        category: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let found = match lookup::resolve_category(db, &category).await {
            Ok(found) => found,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let name = lookup::record_label(&found.name, found.id);

        let orphaned = product::get_all_products(db)
            .await?
            .iter()
            .filter(|p| p.category_id == Some(found.id))
            .count();

        match category::delete_category(db, found.id).await {
            Ok(_) if orphaned > 0 => {
                ctx.say(format!(
                    "✅ Category '{name}' deleted. {orphaned} product(s) are now uncategorised."
                ))
                .await?;
            }
            Ok(_) => {
                ctx.say(format!("✅ Category '{name}' deleted.")).await?;
            }
            Err(e) => {
                ctx.say(format!("❌ Failed to delete category '{name}'."))
                    .await?;
                return Err(e);
            }
        }
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
