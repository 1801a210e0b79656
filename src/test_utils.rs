//! Shared test utilities for `InventoryBuddy`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{
        category,
        product::{self, NewProduct, ProductRow},
    },
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test category with no description.
pub async fn create_test_category(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::category::Model> {
    category::create_category(db, name.to_string(), None).await
}

/// Creates a test product with sensible defaults.
///
/// # Defaults
/// * quantity: 10
/// * price: 10.0
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
    category_id: i64,
) -> Result<entities::product::Model> {
    create_custom_product(db, name, 10, category_id).await
}

/// Creates a test product with a custom quantity and a price of 10.0.
pub async fn create_custom_product(
    db: &DatabaseConnection,
    name: &str,
    quantity: i64,
    category_id: i64,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        NewProduct {
            name: name.to_string(),
            quantity,
            price: 10.0,
            category_id,
        },
    )
    .await
}

/// Sets up a test environment with one category.
/// Returns (db, category) for common test scenarios.
pub async fn setup_with_category() -> Result<(DatabaseConnection, entities::category::Model)> {
    let db = setup_test_db().await?;
    let category = create_test_category(&db, "Test Category").await?;
    Ok((db, category))
}

/// Sets up a test environment with a category and a product in it.
/// Returns (db, category, product) for product-related tests.
pub async fn setup_with_product() -> Result<(
    DatabaseConnection,
    entities::category::Model,
    entities::product::Model,
)> {
    let (db, category) = setup_with_category().await?;
    let product = create_test_product(&db, "Test Product", category.id).await?;
    Ok((db, category, product))
}

/// Builds a joined row without a database, for pure-function tests.
///
/// The row sits in category 1 ("Test Category") with a price of 10.0.
#[must_use]
pub fn row(id: i64, name: &str, quantity: i64) -> ProductRow {
    ProductRow {
        id,
        name: name.to_string(),
        quantity,
        price: 10.0,
        category_id: Some(1),
        category_name: Some("Test Category".to_string()),
    }
}
