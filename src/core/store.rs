//! Data access trait.
//!
//! [`InventoryStore`] is the handle the bulk reconciler and other store-agnostic
//! code work against. The production implementation is `SeaORM`'s
//! [`DatabaseConnection`], which forwards to the functions in
//! [`crate::core::category`] and [`crate::core::product`]. Tests wrap it to inject
//! failures.

use crate::{
    core::{
        category,
        product::{self, NewProduct, ProductChanges, ProductRow},
    },
    entities,
    errors::Result,
};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;

/// Read/insert/update/delete access to categories and products.
///
/// Every failure is returned to the caller; implementations must not swallow errors.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// All categories in creation order.
    async fn list_categories(&self) -> Result<Vec<entities::category::Model>>;

    /// Creates a category. Fails with a validation error when the name is empty.
    async fn create_category(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<entities::category::Model>;

    /// Deletes a category. Missing ids succeed with `false`.
    async fn delete_category(&self, id: i64) -> Result<bool>;

    /// All products in creation order, joined with their category names.
    async fn list_products_joined(&self) -> Result<Vec<ProductRow>>;

    /// Creates a product after validating every field and the category reference.
    async fn create_product(&self, new: NewProduct) -> Result<entities::product::Model>;

    /// Applies a partial update to one product.
    async fn update_product(
        &self,
        id: i64,
        changes: ProductChanges,
    ) -> Result<entities::product::Model>;

    /// Deletes a product. Missing ids succeed with `false`.
    async fn delete_product(&self, id: i64) -> Result<bool>;
}

#[async_trait]
impl InventoryStore for DatabaseConnection {
    async fn list_categories(&self) -> Result<Vec<entities::category::Model>> {
        category::get_all_categories(self).await
    }

    async fn create_category(
        &self,
        name: String,
        description: Option<String>,
    ) -> Result<entities::category::Model> {
        category::create_category(self, name, description).await
    }

    async fn delete_category(&self, id: i64) -> Result<bool> {
        category::delete_category(self, id).await
    }

    async fn list_products_joined(&self) -> Result<Vec<ProductRow>> {
        product::get_products_joined(self).await
    }

    async fn create_product(&self, new: NewProduct) -> Result<entities::product::Model> {
        product::create_product(self, new).await
    }

    async fn update_product(
        &self,
        id: i64,
        changes: ProductChanges,
    ) -> Result<entities::product::Model> {
        product::update_product(self, id, changes).await
    }

    async fn delete_product(&self, id: i64) -> Result<bool> {
        product::delete_product(self, id).await
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::errors::ErrorKind;
    use crate::test_utils::setup_test_db;

    /// Drives the whole adapter contract through the trait object.
    async fn exercise(store: &dyn InventoryStore) -> Result<()> {
        let empty = store.create_category(String::new(), None).await;
        assert_eq!(empty.unwrap_err().kind(), ErrorKind::Validation);

        let drinks = store
            .create_category("Drinks".to_string(), Some("Cold".to_string()))
            .await?;
        assert_eq!(store.list_categories().await?, vec![drinks.clone()]);

        let cola = store
            .create_product(NewProduct {
                name: "Cola".to_string(),
                quantity: 7,
                price: 1.5,
                category_id: drinks.id,
            })
            .await?;

        let updated = store
            .update_product(cola.id, ProductChanges::default().with_quantity(8))
            .await?;
        assert_eq!(updated.quantity, 8);

        let rows = store.list_products_joined().await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].category_label(), "Drinks");

        assert!(store.delete_category(drinks.id).await?);
        assert!(!store.delete_category(drinks.id).await?);
        assert!(store.list_products_joined().await?[0].is_uncategorized());

        assert!(store.delete_product(cola.id).await?);
        assert!(!store.delete_product(cola.id).await?);
        assert!(store.list_products_joined().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_database_connection_implements_contract() -> Result<()> {
        let db = setup_test_db().await?;
        exercise(&db).await
    }
}
