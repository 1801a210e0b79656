//! Inventory Discord commands - CSV export and bulk editing.
//!
//! Bulk editing is a round trip: `/inventory edit_sheet` sends the current table
//! with ids, the user edits it in a spreadsheet, and `/inventory apply` sends it
//! back. Every changed row is applied as its own update and failures are listed
//! per row.

use crate::{
    bot::commands::{join_lines_capped, more_note},
    core::reconcile::{ReconcileOutcome, ReconcileReport},
};

// Inner module to suppress missing_docs warnings for poise macro-generated code
mod inner {
    #![allow(missing_docs)]

    use crate::{
        bot::BotData,
        core::{export, product, reconcile},
        errors::{Error, ErrorKind, Result},
    };
    use poise::serenity_prelude as serenity;
    use tracing::info;

    /// Uploaded sheets larger than this are rejected before downloading.
    const MAX_SHEET_BYTES: u32 = 1024 * 1024;

    /// Parent command for export and bulk editing.
    #[poise::command(
        slash_command,
        subcommands("inventory_export", "inventory_edit_sheet", "inventory_apply")
    )]
    pub async fn inventory(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let help_text = "Inventory command. Available subcommands:\n\
            `/inventory export` - Download the product table as CSV\n\
            `/inventory edit_sheet` - Download an editable sheet\n\
            `/inventory apply` - Upload an edited sheet";

        ctx.say(help_text).await?;
        Ok(())
    }

    /// Downloads the product table as CSV.
    #[poise::command(slash_command, rename = "export")]
    pub async fn inventory_export(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let rows = product::get_products_joined(db).await?;
        let csv = export::export_csv(&rows)?;

        let reply = poise::CreateReply::default()
            .content(format!("📄 Exported {} product(s).", rows.len()))
            .attachment(serenity::CreateAttachment::bytes(
                csv.into_bytes(),
                "products.csv",
            ));
        ctx.send(reply).await?;
        Ok(())
    }

    /// Downloads an editable sheet (id, name, quantity, price).
    #[poise::command(slash_command, rename = "edit_sheet")]
    pub async fn inventory_edit_sheet(ctx: poise::Context<'_, BotData, Error>) -> Result<()> {
        let db = &ctx.data().database;

        let rows = product::get_products_joined(db).await?;
        let sheet = export::edit_sheet_csv(&rows)?;

        let reply = poise::CreateReply::default()
            .content(
                "✏️ Edit names, quantities or prices, keep the `id` column as it is, \
                 then upload the file with `/inventory apply`.",
            )
            .attachment(serenity::CreateAttachment::bytes(
                sheet.into_bytes(),
                "inventory_edit_sheet.csv",
            ));
        ctx.send(reply).await?;
        Ok(())
    }

    /// Applies an edited sheet. Each changed row is updated on its own.
    #[poise::command(slash_command, rename = "apply")]
    pub async fn inventory_apply(
        ctx: poise::Context<'_, BotData, Error>,
        #[description = "The edited sheet (CSV)"] sheet: serenity::Attachment,
    ) -> Result<()> {
        if sheet.size > MAX_SHEET_BYTES {
            ctx.say("❌ That file is too large to be an edit sheet.")
                .await?;
            return Ok(());
        }

        ctx.defer().await?;
        let bytes = sheet.download().await?;
        let sheet_rows = match export::parse_edit_sheet(&bytes) {
            Ok(rows) => rows,
            Err(e) if e.kind() == ErrorKind::Validation => {
                ctx.say(format!("❌ {e}")).await?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let db = &ctx.data().database;
        let baseline = product::get_products_joined(db).await?;
        let (candidate, ignored) = reconcile::align_sheet(&baseline, &sheet_rows);
        let report = reconcile::reconcile(db, &baseline, &candidate).await;
        info!(
            "Sheet '{}' applied: {} updated, {} failed, {} ignored",
            sheet.filename,
            report.updated_count(),
            report.failures().len(),
            ignored.len()
        );

        let (title, color, description) = super::apply_summary(&report, &ignored);
        let mut embed = serenity::CreateEmbed::default().title(title).color(color);
        if !description.is_empty() {
            embed = embed.description(description);
        }
        ctx.send(poise::CreateReply::default().embed(embed)).await?;
        Ok(())
    }
}

// Re-export all commands
pub use inner::*;

/// Ignored ids listed individually before the rest are only counted.
const MAX_IGNORED_LISTED: usize = 50;

/// Title, colour and embed text describing an applied sheet.
///
/// The text stays within one embed description however many rows failed.
fn apply_summary(report: &ReconcileReport, ignored: &[i64]) -> (String, u32, String) {
    let (title, color, mut lines) = match report.outcome() {
        ReconcileOutcome::Success { updated } => (
            format!(
                "✅ Saved. {updated} product(s) updated, {} unchanged.",
                report.unchanged_count()
            ),
            0x0057_F287, // Discord green
            Vec::new(),
        ),
        ReconcileOutcome::PartialFailure { failures } => (
            format!(
                "⚠️ {} product(s) updated, {} failed",
                report.updated_count(),
                failures.len()
            ),
            0x00ED_4245, // Discord red
            failures
                .iter()
                .map(|(id, failure)| format!("• ID {id}: {} ({})", failure.message, failure.kind))
                .collect(),
        ),
    };

    if !ignored.is_empty() {
        let mut ids: Vec<String> = ignored
            .iter()
            .take(MAX_IGNORED_LISTED)
            .map(ToString::to_string)
            .collect();
        if let Some(note) = more_note(ignored.len(), MAX_IGNORED_LISTED) {
            ids.push(note);
        }
        lines.push(format!("Ignored rows with unknown ids: {}", ids.join(", ")));
    }

    (title, color, join_lines_capped(&lines))
}
