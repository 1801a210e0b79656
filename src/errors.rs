//! Unified error types for `InventoryBuddy`.
//!
//! Every variant belongs to one [`ErrorKind`]. Callers that only care about the
//! broad class of failure (bulk reconciliation reports, user-facing replies)
//! match on [`Error::kind`] instead of individual variants.

use std::fmt;
use thiserror::Error;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A caller-supplied field violates a documented constraint. Not retryable.
    Validation,
    /// A referenced identifier does not exist at call time. Not retryable.
    NotFound,
    /// Transport or store-side failure. Possibly transient, never retried here.
    Backend,
    /// Startup configuration problem (config file, environment).
    Configuration,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Validation => "validation error",
            Self::NotFound => "not found",
            Self::Backend => "backend error",
            Self::Configuration => "configuration error",
        };
        f.write_str(label)
    }
}

/// All errors produced by the crate.
#[derive(Debug, Error)]
pub enum Error {
    /// Name is empty or whitespace-only.
    #[error("{entity} name cannot be empty")]
    InvalidName {
        /// Which kind of record was being named ("Product", "Category")
        entity: &'static str,
    },

    /// Quantity is negative.
    #[error("Invalid quantity: {quantity} (must be zero or greater)")]
    InvalidQuantity {
        /// The rejected quantity
        quantity: i64,
    },

    /// Price is negative, NaN or infinite.
    #[error("Invalid price: {price} (must be a finite, non-negative number)")]
    InvalidPrice {
        /// The rejected price
        price: f64,
    },

    /// A product refers to a category that does not exist.
    #[error("Category {id} does not exist")]
    UnknownCategory {
        /// The unresolved category id
        id: i64,
    },

    /// An uploaded edit sheet could not be parsed.
    #[error("Invalid edit sheet: {message}")]
    InvalidSheet {
        /// What was wrong with the sheet
        message: String,
    },

    /// No product with this identifier.
    #[error("Product not found: {id}")]
    ProductNotFound {
        /// Identifier (or name) that failed to resolve
        id: String,
    },

    /// No category with this identifier.
    #[error("Category not found: {id}")]
    CategoryNotFound {
        /// Identifier (or name) that failed to resolve
        id: String,
    },

    /// Database failure reported by `SeaORM`.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// CSV serialisation failure.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Discord framework failure.
    #[error("Serenity/Poise framework error: {0}")]
    Framework(Box<poise::serenity_prelude::Error>),

    /// Configuration file could not be read or parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration problem
        message: String,
    },

    /// Required environment variable is missing or malformed.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Returns the broad class this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidName { .. }
            | Self::InvalidQuantity { .. }
            | Self::InvalidPrice { .. }
            | Self::UnknownCategory { .. }
            | Self::InvalidSheet { .. } => ErrorKind::Validation,
            Self::ProductNotFound { .. } | Self::CategoryNotFound { .. } => ErrorKind::NotFound,
            Self::Database(_) | Self::Csv(_) | Self::Io(_) | Self::Framework(_) => {
                ErrorKind::Backend
            }
            Self::Config { .. } | Self::EnvVar(_) => ErrorKind::Configuration,
        }
    }
}

impl From<poise::serenity_prelude::Error> for Error {
    fn from(value: poise::serenity_prelude::Error) -> Self {
        Self::Framework(Box::new(value))
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_variants_map_to_validation_kind() {
        let errors = [
            Error::InvalidName { entity: "Product" },
            Error::InvalidQuantity { quantity: -1 },
            Error::InvalidPrice { price: -0.5 },
            Error::UnknownCategory { id: 7 },
            Error::InvalidSheet {
                message: "bad header".to_string(),
            },
        ];
        for error in errors {
            assert_eq!(error.kind(), ErrorKind::Validation, "{error}");
        }
    }

    #[test]
    fn test_not_found_and_backend_kinds() {
        let missing = Error::ProductNotFound {
            id: "3".to_string(),
        };
        assert_eq!(missing.kind(), ErrorKind::NotFound);

        let backend = Error::Database(sea_orm::DbErr::Custom("connection reset".to_string()));
        assert_eq!(backend.kind(), ErrorKind::Backend);
        assert!(backend.to_string().contains("connection reset"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ErrorKind::Backend.to_string(), "backend error");
        assert_eq!(ErrorKind::NotFound.to_string(), "not found");
    }
}
