//! Product entity - A stocked item with a quantity, unit price and category.
//!
//! `category_id` is a logical reference only. It may be `None`, or point at a
//! category that has since been deleted; both cases render as uncategorised.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Product database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Unique identifier for the product
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Name of the product (e.g., "Sparkling Water 0.5l")
    pub name: String,
    /// Units in stock, never negative
    pub quantity: i64,
    /// Unit price, currency-agnostic
    pub price: f64,
    /// Category this product is filed under, if any
    pub category_id: Option<i64>,
    /// When the product was created
    pub created_at: DateTime,
    /// When the product was last modified
    pub updated_at: DateTime,
}

/// No declared relations; the category name is resolved by lookup at fetch time.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
