//! Autocomplete handlers for Discord slash command parameters.
//!
//! Suggests existing categories and products as the user types. Each
//! suggestion carries the record id, so records sharing a name stay apart.

use crate::{
    bot::{BotData, handlers::lookup::record_label},
    core::{category, product},
    errors::Error,
};

/// Discord autocomplete limit
const MAX_SUGGESTIONS: usize = 25;

fn matching_labels(
    records: impl IntoIterator<Item = (String, i64)>,
    partial: &str,
) -> Vec<String> {
    let partial_lower = partial.to_lowercase();
    let mut matching: Vec<(String, i64)> = records
        .into_iter()
        .filter(|(name, _)| name.to_lowercase().contains(&partial_lower))
        .collect();

    // Alphabetical, then oldest first among equal names
    matching.sort();
    matching.truncate(MAX_SUGGESTIONS);
    matching
        .into_iter()
        .map(|(name, id)| record_label(&name, id))
        .collect()
}

/// Provides autocomplete suggestions for categories.
///
/// # Arguments
/// * `ctx` - The poise context containing the database connection
/// * `partial` - The partial string the user has typed so far
pub async fn autocomplete_category_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;
    let Ok(categories) = category::get_all_categories(db).await else {
        return Vec::new();
    };
    matching_labels(categories.into_iter().map(|c| (c.name, c.id)), partial)
}

/// Provides autocomplete suggestions for products.
///
/// # Arguments
/// * `ctx` - The poise context containing the database connection
/// * `partial` - The partial string the user has typed so far
pub async fn autocomplete_product_name(
    ctx: poise::Context<'_, BotData, Error>,
    partial: &str,
) -> Vec<String> {
    let db = &ctx.data().database;
    let Ok(products) = product::get_all_products(db).await else {
        return Vec::new();
    };
    matching_labels(products.into_iter().map(|p| (p.name, p.id)), partial)
}
