//! Domain error model.

use thiserror::Error;

use crate::id::ProductCode;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (missing entries,
/// guard violations). Parse and IO concerns belong elsewhere.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// The requested product is not in the catalog.
    #[error("product {0} does not exist")]
    NotFound(ProductCode),

    /// Deletion guard: the product still has units in stock.
    #[error("product {0} still has stock")]
    StockRemains(ProductCode),

    /// Combine guard: both sides resolve to the same product.
    #[error("product {0} cannot be combined with itself")]
    SameProduct(ProductCode),

    /// Combine guard: the two products belong to different categories.
    #[error("cannot combine categories '{0}' and '{1}'")]
    CategoryMismatch(String, String),

    /// Combine guard: the two products are priced differently.
    #[error("cannot combine prices {0:.2}€ and {1:.2}€")]
    PriceMismatch(f64, f64),
}
