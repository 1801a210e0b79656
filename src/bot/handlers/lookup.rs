//! Resolves the category/product references typed into slash commands.
//!
//! Autocomplete offers `"name (ID n)"` labels, so records that share a name
//! stay addressable. A bare id is accepted too, and plain names fall back to
//! the oldest record with that name.

use crate::{
    core::{category, product},
    entities,
    errors::{Error, Result},
};
use sea_orm::DatabaseConnection;

/// A parsed command argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordRef<'a> {
    /// Explicit identifier, from a label or a bare number
    Id(i64),
    /// Anything else, matched against names as typed
    Name(&'a str),
}

/// Label shown in autocomplete and listings.
#[must_use]
pub fn record_label(name: &str, id: i64) -> String {
    format!("{name} (ID {id})")
}

/// Parses `"name (ID n)"`, a bare id, or a plain name.
#[must_use]
pub fn parse_record_ref(input: &str) -> RecordRef<'_> {
    if let Ok(id) = input.trim().parse::<i64>() {
        return RecordRef::Id(id);
    }
    input
        .strip_suffix(')')
        .and_then(|rest| rest.rsplit_once(" (ID "))
        .and_then(|(_, id)| id.parse().ok())
        .map_or(RecordRef::Name(input), RecordRef::Id)
}

/// Finds the category a command argument refers to.
///
/// # Errors
/// Returns `Error::CategoryNotFound` if nothing matches, or a database error.
pub async fn resolve_category(
    db: &DatabaseConnection,
    input: &str,
) -> Result<entities::category::Model> {
    let found = match parse_record_ref(input) {
        RecordRef::Id(id) => match category::get_category_by_id(db, id).await? {
            Some(found) => Some(found),
            None => category::get_category_by_name(db, input).await?,
        },
        RecordRef::Name(name) => category::get_category_by_name(db, name).await?,
    };
    found.ok_or_else(|| Error::CategoryNotFound {
        id: input.to_string(),
    })
}

/// Finds the product a command argument refers to.
///
/// # Errors
/// Returns `Error::ProductNotFound` if nothing matches, or a database error.
pub async fn resolve_product(
    db: &DatabaseConnection,
    input: &str,
) -> Result<entities::product::Model> {
    let found = match parse_record_ref(input) {
        RecordRef::Id(id) => match product::get_product_by_id(db, id).await? {
            Some(found) => Some(found),
            None => product::get_product_by_name(db, input).await?,
        },
        RecordRef::Name(name) => product::get_product_by_name(db, name).await?,
    };
    found.ok_or_else(|| Error::ProductNotFound {
        id: input.to_string(),
    })
}
