//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables. Each entity has a Model
//! struct for data and an Entity struct for operations.

pub mod category;
pub mod product;

// Re-export specific types to avoid conflicts
pub use category::{Column as CategoryColumn, Entity as Category, Model as CategoryModel};
pub use product::{Column as ProductColumn, Entity as Product, Model as ProductModel};
