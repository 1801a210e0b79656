//! Product Discord commands - `/product add|list|update|delete`.
//!
//! Products and categories are addressed by the `"name (ID n)"` labels that
//! autocomplete offers, or by a bare id. A plain name picks the oldest record
//! with that name.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{
            BotData,
            commands::join_lines_capped,
            handlers::{autocomplete, lookup},
        },
        core::{
            category,
            product::{self, NewProduct, ProductChanges},
            report,
        },
        errors::{Error, ErrorKind, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for managing products.
    #[poise::command(
        slash_command,
        subcommands("product_add", "product_list", "product_update", "product_delete")
    )]
    pub async fn product(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Product management command. Available subcommands:\n\
            `/product add` - Add a new product\n\
            `/product list` - List all products\n\
            `/product update` - Change a product's name, quantity, price or category\n\
            `/product delete` - Delete a product";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Replies with the error when it is the user's to fix, otherwise propagates it.
    async fn reply_or_propagate(
        ctx: poise::Context<'_, BotData, Error>,
        error: Error,
        failure_message: String,
    ) -> Result<()> {
        match error.kind() {
            ErrorKind::Validation | ErrorKind::NotFound => {
                ctx.say(format!("❌ {error}")).await?;
                Ok(())
            }
            _ => {
                ctx.say(failure_message).await?;
                Err(error)
            }
        }
    }

    /// Adds a new product to a category.
    #[poise::command(slash_command, rename = "add")]
    pub async fn product_add(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Name of the product (e.g., 'Sparkling Water 0.5l')"] name: String,
        #[description = "Units in stock"]
        quantity: i64,
        #[description = "Unit price (e.g., 1.99)"]
        price: f64,
        #[description = "Category the product belongs to"]
        #[autocomplete = "autocomplete::autocomplete_category_name"]
        category_name: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        if category::get_all_categories(db).await?.is_empty() {
            ctx.say("❌ There are no categories yet. Create one with `/category add` first.")
                .await?;
            return Ok(());
        }

        let target = match lookup::resolve_category(db, &category_name).await {
            Ok(target) => target,
            Err(e) => {
                return reply_or_propagate(ctx, e, "❌ Failed to look up the category.".to_string())
                    .await;
            }
        };

        let new = NewProduct {
            name: name.clone(),
            quantity,
            price,
            category_id: target.id,
        };
        match product::create_product(db, new).await {
            Ok(created) => {
                ctx.say(format!(
                    "✅ Product '{}' added: {} in stock at **{}** each, category '{}'.",
                    created.name,
                    created.quantity,
                    report::format_price(created.price),
                    target.name
                ))
                .await?;
                Ok(())
            }
            Err(e) => {
                reply_or_propagate(ctx, e, format!("❌ Failed to add product '{name}'.")).await
            }
        }
    }

    /// Lists all products with their stock indicators.
    #[poise::command(slash_command, rename = "list")]
    pub async fn product_list(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let threshold = ctx.data().settings.stock.low_stock_threshold;

        let rows = product::get_products_joined(db).await?;
        if rows.is_empty() {
            ctx.say("No products yet. Use `/product add` to create some!")
                .await?;
            return Ok(());
        }

        let lines: Vec<String> = rows
            .iter()
            .map(|row| report::format_stock_line(row, threshold))
            .collect();

        let list_embed = serenity::CreateEmbed::default()
            .title(format!("**Products** ({})", rows.len()))
            .color(0x0058_65F2)
            .description(join_lines_capped(&lines))
            .footer(serenity::CreateEmbedFooter::new(format!(
                "🟡 below {threshold} · 🔴 out of stock"
            )));

        ctx.send(poise::CreateReply::default().embed(list_embed))
            .await?;
        Ok(())
    }

    /// Updates an existing product. Only the options you fill in are changed.
    #[poise::command(slash_command, rename = "update")]
    pub async fn product_update(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to update"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
        #[description = "New name"] new_name: Option<String>,
        #[description = "New quantity in stock"] quantity: Option<i64>,
        #[description = "New unit price"] price: Option<f64>,
        #[description = "New category"]
        #[autocomplete = "autocomplete::autocomplete_category_name"]
        category_name: Option<String>,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let existing = match lookup::resolve_product(db, &product).await {
            Ok(existing) => existing,
            Err(e) => {
                return reply_or_propagate(ctx, e, "❌ Failed to look up the product.".to_string())
                    .await;
            }
        };

        let category_id = match category_name {
            Some(category_name) => match lookup::resolve_category(db, &category_name).await {
                Ok(target) => Some(target.id),
                Err(e) => {
                    return reply_or_propagate(
                        ctx,
                        e,
                        "❌ Failed to look up the category.".to_string(),
                    )
                    .await;
                }
            },
            None => None,
        };

        let changes = ProductChanges {
            name: new_name,
            quantity,
            price,
            category_id,
        };
        if changes.is_empty() {
            ctx.say("Nothing to update. Provide at least one new value.")
                .await?;
            return Ok(());
        }

        match product::update_product(db, existing.id, changes).await {
            Ok(updated) => {
                ctx.say(format!(
                    "✅ Product '{}' updated: {} in stock at **{}** each.",
                    updated.name,
                    updated.quantity,
                    report::format_price(updated.price)
                ))
                .await?;
                Ok(())
            }
            Err(e) => {
                let failure = format!("❌ Failed to update product '{}'.", existing.name);
                reply_or_propagate(ctx, e, failure).await
            }
        }
    }

    /// Deletes a product.
    #[poise::command(slash_command, rename = "delete")]
    pub async fn product_delete(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Product to delete"]
        #[autocomplete = "autocomplete::autocomplete_product_name"]
        product: String,
    ) -> Result<()> {
        let db = &ctx.data().database;

        let existing = match lookup::resolve_product(db, &product).await {
            Ok(existing) => existing,
            Err(e) => {
                return reply_or_propagate(ctx, e, "❌ Failed to look up the product.".to_string())
                    .await;
            }
        };
        let label = lookup::record_label(&existing.name, existing.id);

        match product::delete_product(db, existing.id).await {
            Ok(_) => {
                ctx.say(format!("✅ Product '{label}' has been deleted."))
                    .await?;
                Ok(())
            }
            Err(e) => {
                ctx.say(format!("❌ Failed to delete product '{label}'."))
                    .await?;
                Err(e)
            }
        }
    }
}

// Re-export all commands
pub use inner::*;
