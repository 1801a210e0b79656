//! Core business logic - framework-agnostic inventory operations.
//!
//! Nothing in here knows about Discord. Command handlers call these functions
//! with an explicitly passed database handle and render whatever comes back.

/// Category create/list/delete and startup seeding
pub mod category;
/// CSV export and bulk-edit sheet parsing
pub mod export;
/// Product CRUD and the joined product listing
pub mod product;
/// Applying an edited product table back to the store row by row
pub mod reconcile;
/// Inventory summary figures and display formatting
pub mod report;
/// Low-stock classification policies
pub mod stock;
/// The data access trait consumed by the reconciler
pub mod store;
