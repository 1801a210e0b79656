//! Category entity - Groups products for display and filtering.
//!
//! Categories are created and deleted explicitly and never otherwise modified.
//! Name uniqueness is not enforced.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    /// Unique identifier for the category
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the category (e.g., "Beverages")
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// When the category was created
    pub created_at: DateTime,
}

/// Products point at categories through a plain id column with no foreign key,
/// so deleting a category leaves its products orphaned instead of failing.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
