//! Product business logic - Handles all product-related operations.
//!
//! This module provides functions for creating, retrieving, updating and deleting
//! products, plus the joined listing that pairs every product with its category
//! name. Field validation always runs before the first database call, so a
//! rejected request never reaches the store.

use crate::{
    entities::{Category, Product, product},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info, instrument};

/// Label shown for products with no category or a deleted one.
pub const UNCATEGORIZED_LABEL: &str = "none";

/// A product joined with the name of its category.
///
/// Built fresh on every fetch and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    /// Product identifier
    pub id: i64,
    /// Product name
    pub name: String,
    /// Units in stock
    pub quantity: i64,
    /// Unit price
    pub price: f64,
    /// Raw category reference, possibly dangling
    pub category_id: Option<i64>,
    /// Resolved category name, `None` when the reference is absent or dangling
    pub category_name: Option<String>,
}

impl ProductRow {
    /// Joins a product with a lookup table of category names.
    #[must_use]
    pub fn from_model(model: product::Model, category_names: &HashMap<i64, String>) -> Self {
        let category_name = model
            .category_id
            .and_then(|id| category_names.get(&id).cloned());
        Self {
            id: model.id,
            name: model.name,
            quantity: model.quantity,
            price: model.price,
            category_id: model.category_id,
            category_name,
        }
    }

    /// Category name for display, falling back to [`UNCATEGORIZED_LABEL`].
    #[must_use]
    pub fn category_label(&self) -> &str {
        self.category_name.as_deref().unwrap_or(UNCATEGORIZED_LABEL)
    }

    /// True when the row has no resolvable category.
    #[must_use]
    pub const fn is_uncategorized(&self) -> bool {
        self.category_name.is_none()
    }
}

/// Fields for a new product.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Product name, stored as typed
    pub name: String,
    /// Initial stock
    pub quantity: i64,
    /// Unit price
    pub price: f64,
    /// Category the product is filed under; must exist
    pub category_id: i64,
}

/// A partial update. Only fields that are `Some` are validated and written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    /// New name
    pub name: Option<String>,
    /// New quantity
    pub quantity: Option<i64>,
    /// New unit price
    pub price: Option<f64>,
    /// New category; must exist
    pub category_id: Option<i64>,
}

impl ProductChanges {
    /// True when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.quantity.is_none()
            && self.price.is_none()
            && self.category_id.is_none()
    }

    /// Sets the new name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the new quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Sets the new price.
    #[must_use]
    pub const fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the new category.
    #[must_use]
    pub const fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    fn validate(&self) -> Result<()> {
        if let Some(name) = &self.name {
            validate_name(name)?;
        }
        if let Some(quantity) = self.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(price) = self.price {
            validate_price(price)?;
        }
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::InvalidName { entity: "Product" });
    }
    Ok(())
}

const fn validate_quantity(quantity: i64) -> Result<()> {
    if quantity < 0 {
        return Err(Error::InvalidQuantity { quantity });
    }
    Ok(())
}

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidPrice { price });
    }
    Ok(())
}

async fn ensure_category_exists(db: &DatabaseConnection, category_id: i64) -> Result<()> {
    if Category::find_by_id(category_id).one(db).await?.is_none() {
        return Err(Error::UnknownCategory { id: category_id });
    }
    Ok(())
}

/// Retrieves all products in creation order.
pub async fn get_all_products(db: &DatabaseConnection) -> Result<Vec<product::Model>> {
    Product::find()
        .order_by_asc(product::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all products in creation order, each joined with its category name.
///
/// Categories are loaded once and resolved by id, so a dangling reference simply
/// yields no name.
pub async fn get_products_joined(db: &DatabaseConnection) -> Result<Vec<ProductRow>> {
    let category_names: HashMap<i64, String> = Category::find()
        .all(db)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();

    let rows: Vec<ProductRow> = get_all_products(db)
        .await?
        .into_iter()
        .map(|p| ProductRow::from_model(p, &category_names))
        .collect();
    debug!("Fetched {} joined product rows", rows.len());
    Ok(rows)
}

/// Retrieves a specific product by its unique ID.
pub async fn get_product_by_id(
    db: &DatabaseConnection,
    product_id: i64,
) -> Result<Option<product::Model>> {
    Product::find_by_id(product_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the oldest product with exactly this name.
pub async fn get_product_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<product::Model>> {
    Product::find()
        .filter(product::Column::Name.eq(name))
        .order_by_asc(product::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new product.
///
/// # Errors
/// Returns an error if:
/// - The product name is empty or whitespace-only
/// - The quantity is negative
/// - The price is negative or not finite (NaN, infinity)
/// - The category does not exist
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_product(db: &DatabaseConnection, new: NewProduct) -> Result<product::Model> {
    validate_name(&new.name)?;
    validate_quantity(new.quantity)?;
    validate_price(new.price)?;
    ensure_category_exists(db, new.category_id).await?;

    let now = chrono::Utc::now().naive_utc();
    let product = product::ActiveModel {
        name: Set(new.name),
        quantity: Set(new.quantity),
        price: Set(new.price),
        category_id: Set(Some(new.category_id)),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let created = product.insert(db).await?;
    info!(
        "Added product '{}' (ID: {}) qty {} price {} in category {}",
        created.name, created.id, created.quantity, created.price, new.category_id
    );
    Ok(created)
}

/// Applies a partial update to an existing product.
///
/// Only the fields present in `changes` are validated and written. An empty
/// change set returns the stored product untouched.
///
/// # Errors
/// Returns an error if:
/// - A supplied name, quantity or price violates the same rules as [`create_product`]
/// - A supplied category does not exist
/// - The product does not exist
/// - The database update operation fails
#[instrument(skip(db))]
pub async fn update_product(
    db: &DatabaseConnection,
    product_id: i64,
    changes: ProductChanges,
) -> Result<product::Model> {
    changes.validate()?;

    let existing = Product::find_by_id(product_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::ProductNotFound {
            id: product_id.to_string(),
        })?;

    if changes.is_empty() {
        debug!("No changes for product ID {}", product_id);
        return Ok(existing);
    }

    if let Some(category_id) = changes.category_id {
        ensure_category_exists(db, category_id).await?;
    }

    let mut product: product::ActiveModel = existing.into();
    if let Some(name) = changes.name {
        product.name = Set(name);
    }
    if let Some(quantity) = changes.quantity {
        product.quantity = Set(quantity);
    }
    if let Some(price) = changes.price {
        product.price = Set(price);
    }
    if let Some(category_id) = changes.category_id {
        product.category_id = Set(Some(category_id));
    }
    product.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = product.update(db).await?;
    info!("Updated product '{}' (ID: {})", updated.name, updated.id);
    Ok(updated)
}

/// Deletes a product by ID.
///
/// Deleting an id that does not exist is not an error. Returns `true` when a row
/// was actually removed.
#[instrument(skip(db))]
pub async fn delete_product(db: &DatabaseConnection, product_id: i64) -> Result<bool> {
    let result = Product::delete_by_id(product_id).exec(db).await?;
    let removed = result.rows_affected > 0;
    if removed {
        info!("Deleted product ID {}", product_id);
    } else {
        debug!("Product ID {} was already gone", product_id);
    }
    Ok(removed)
}
