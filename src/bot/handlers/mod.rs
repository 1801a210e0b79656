//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for category and product names
pub mod autocomplete;

/// Resolution of typed category/product references
pub mod lookup;
