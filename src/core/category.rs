//! Category business logic - Handles category creation, listing and deletion.
//!
//! Deleting a category never touches products. Products that pointed at it keep
//! the stale id and show up as uncategorised in joined listings.

use crate::{
    config::settings::CategorySeed,
    entities::{Category, category},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use tracing::{debug, info, instrument};

/// Retrieves all categories in creation order.
pub async fn get_all_categories(db: &DatabaseConnection) -> Result<Vec<category::Model>> {
    Category::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a category by its unique ID.
pub async fn get_category_by_id(
    db: &DatabaseConnection,
    category_id: i64,
) -> Result<Option<category::Model>> {
    Category::find_by_id(category_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds the oldest category with exactly this name.
///
/// Names are not unique, so this is only a convenience for name-based commands.
pub async fn get_category_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<category::Model>> {
    Category::find()
        .filter(category::Column::Name.eq(name))
        .order_by_asc(category::Column::Id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new category.
///
/// The name is stored as typed and must not be blank. A blank description is stored as `None`.
///
/// # Errors
/// Returns an error if:
/// - The category name is empty or whitespace-only
/// - The database insert operation fails
#[instrument(skip(db))]
pub async fn create_category(
    db: &DatabaseConnection,
    name: String,
    description: Option<String>,
) -> Result<category::Model> {
    if name.trim().is_empty() {
        return Err(Error::InvalidName { entity: "Category" });
    }

    let description = description.filter(|d| !d.trim().is_empty());

    let category = category::ActiveModel {
        name: Set(name),
        description: Set(description),
        created_at: Set(chrono::Utc::now().naive_utc()),
        ..Default::default()
    };
    let created = category.insert(db).await?;
    info!("Added category '{}' (ID: {})", created.name, created.id);
    Ok(created)
}

/// Deletes a category by ID.
///
/// Deleting an id that does not exist is not an error. Returns `true` when a row
/// was actually removed.
#[instrument(skip(db))]
pub async fn delete_category(db: &DatabaseConnection, category_id: i64) -> Result<bool> {
    let result = Category::delete_by_id(category_id).exec(db).await?;
    let removed = result.rows_affected > 0;
    if removed {
        info!("Deleted category ID {}", category_id);
    } else {
        debug!("Category ID {} was already gone", category_id);
    }
    Ok(removed)
}

/// Creates every seed category whose name is not present yet.
///
/// Returns the number of categories created.
pub async fn seed_categories(db: &DatabaseConnection, seeds: &[CategorySeed]) -> Result<usize> {
    let mut created = 0;
    for seed in seeds {
        if get_category_by_name(db, &seed.name).await?.is_some() {
            debug!("Seed category '{}' already exists", seed.name);
            continue;
        }
        create_category(db, seed.name.clone(), seed.description.clone()).await?;
        created += 1;
    }
    Ok(created)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_create_category_validation() -> Result<()> {
        let db = MockDatabase::new(DatabaseBackend::Sqlite).into_connection();

        let result = create_category(&db, String::new(), None).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidName { entity: "Category" }
        ));

        let result = create_category(&db, "   ".to_string(), Some("desc".to_string())).await;
        assert!(matches!(result.unwrap_err(), Error::InvalidName { .. }));

        assert!(db.into_transaction_log().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_create_category_integration() -> Result<()> {
        let db = setup_test_db().await?;

        let category = create_category(
            &db,
            " Beverages ".to_string(),
            Some("Cold drinks".to_string()),
        )
        .await?;
        assert_eq!(category.name, " Beverages ");
        assert_eq!(category.description.as_deref(), Some("Cold drinks"));

        let blank = create_category(&db, "Snacks".to_string(), Some("  ".to_string())).await?;
        assert!(blank.description.is_none());

        let fetched = get_all_categories(&db).await?;
        assert_eq!(fetched, vec![category, blank]);
        Ok(())
    }

    #[tokio::test]
    async fn test_get_all_categories_in_creation_order() -> Result<()> {
        let db = setup_test_db().await?;

        let zeta = create_test_category(&db, "Zeta").await?;
        let alpha = create_test_category(&db, "Alpha").await?;

        let categories = get_all_categories(&db).await?;
        assert_eq!(categories, vec![zeta, alpha]);
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicate_names_are_allowed() -> Result<()> {
        let db = setup_test_db().await?;

        let first = create_test_category(&db, "Tools").await?;
        let second = create_test_category(&db, "Tools").await?;
        assert_ne!(first.id, second.id);

        let found = get_category_by_name(&db, "Tools").await?.unwrap();
        assert_eq!(found.id, first.id);
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_is_idempotent() -> Result<()> {
        let (db, category) = setup_with_category().await?;

        assert!(delete_category(&db, category.id).await?);
        assert!(!delete_category(&db, category.id).await?);
        assert!(!delete_category(&db, 999).await?);

        assert!(get_category_by_id(&db, category.id).await?.is_none());
        Ok(())
    }

    #[tokio::test]
    async fn test_delete_category_orphans_products() -> Result<()> {
        let (db, category, product) = setup_with_product().await?;

        delete_category(&db, category.id).await?;

        let still_there = crate::core::product::get_product_by_id(&db, product.id)
            .await?
            .unwrap();
        assert_eq!(still_there.category_id, Some(category.id));
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_categories_skips_existing() -> Result<()> {
        let db = setup_test_db().await?;
        create_test_category(&db, "Beverages").await?;

        let seeds = vec![
            CategorySeed {
                name: "Beverages".to_string(),
                description: None,
            },
            CategorySeed {
                name: "Snacks".to_string(),
                description: Some("Chips and such".to_string()),
            },
        ];

        assert_eq!(seed_categories(&db, &seeds).await?, 1);
        assert_eq!(seed_categories(&db, &seeds).await?, 0);

        let names: Vec<String> = get_all_categories(&db)
            .await?
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Beverages", "Snacks"]);
        Ok(())
    }
}
