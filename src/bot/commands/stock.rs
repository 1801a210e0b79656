//! Stock Discord commands - low-stock views and the inventory summary.

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::{BotData, commands::join_lines_capped},
        core::{
            product,
            report,
            stock::{LowStockPolicy, bottom_count},
        },
        errors::{Error, Result},
    };
    use poise::serenity_prelude as serenity;

    /// Parent command for stock views.
    #[poise::command(
        slash_command,
        subcommands("stock_low", "stock_bottom", "stock_summary")
    )]
    pub async fn stock(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Stock command. Available subcommands:\n\
            `/stock low` - Products below a quantity threshold\n\
            `/stock bottom` - The lowest-stocked share of products\n\
            `/stock summary` - Inventory totals";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Fetches a fresh snapshot, applies the policy and replies with the result.
    async fn send_low_stock(
        ctx: poise::Context<'_, BotData, Error>,
        policy: LowStockPolicy,
    ) -> Result<()> {
        let db = &ctx.data().database;
        let badge_threshold = match policy {
            LowStockPolicy::Threshold(threshold) => threshold,
            LowStockPolicy::BottomPercent(_) => ctx.data().settings.stock.low_stock_threshold,
        };

        let rows = product::get_products_joined(db).await?;
        let low = policy.classify(&rows);

        if low.is_empty() {
            ctx.say(format!("✅ No products match: {policy}.")).await?;
            return Ok(());
        }

        let lines: Vec<String> = low
            .iter()
            .map(|row| report::format_stock_line(row, badge_threshold))
            .collect();

        let embed = serenity::CreateEmbed::default()
            .title(format!("⚠️ Low stock ({policy})"))
            .color(0x00ED_4245) // Discord red
            .description(join_lines_capped(&lines))
            .footer(serenity::CreateEmbedFooter::new(format!(
                "{} of {} products",
                low.len(),
                rows.len()
            )));

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }

    /// Lists products whose quantity is below a threshold.
    #[poise::command(slash_command, rename = "low")]
    pub async fn stock_low(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Quantity threshold (defaults to the configured value)"] threshold: Option<
            u32,
        >,
    ) -> Result<()> {
        let policy = threshold.map_or_else(
            || ctx.data().settings.stock.threshold_policy(),
            LowStockPolicy::Threshold,
        );
        send_low_stock(ctx, policy).await
    }

    /// Lists the lowest-stocked share of products.
    #[poise::command(slash_command, rename = "bottom")]
    pub async fn stock_bottom(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "Percentage of products to show (defaults to the configured value)"]
        percent: Option<u32>,
    ) -> Result<()> {
        let policy = match percent {
            Some(0 | 101..) => {
                ctx.say("❌ Percent must be between 1 and 100.").await?;
                return Ok(());
            }
            Some(percent) => LowStockPolicy::BottomPercent(percent),
            None => ctx.data().settings.stock.bottom_policy(),
        };
        send_low_stock(ctx, policy).await
    }

    /// Shows inventory totals.
    #[poise::command(slash_command, rename = "summary")]
    pub async fn stock_summary(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;
        let stock_settings = &ctx.data().settings.stock;

        let rows = product::get_products_joined(db).await?;
        let summary = report::summarize(&rows, stock_settings.low_stock_threshold);
        let bottom = bottom_count(rows.len(), stock_settings.bottom_percent);

        let embed = serenity::CreateEmbed::default()
            .title("📦 Inventory summary")
            .color(0x0058_65F2)
            .field("Products", summary.product_count.to_string(), true)
            .field("Units in stock", summary.total_units.to_string(), true)
            .field(
                "Stock value",
                report::format_price(summary.total_value),
                true,
            )
            .field(
                format!("Below {}", stock_settings.low_stock_threshold),
                summary.low_stock_count.to_string(),
                true,
            )
            .field(
                format!("Bottom {}%", stock_settings.bottom_percent),
                format!("{bottom} product(s)"),
                true,
            )
            .field(
                "Uncategorised",
                summary.uncategorized_count.to_string(),
                true,
            );

        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;
