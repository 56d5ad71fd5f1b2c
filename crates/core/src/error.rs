//! Ledger error model.

use thiserror::Error;

use crate::id::ProductId;

/// Result type used across the ledger crates.
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-level error.
///
/// Every variant describes a deterministic business failure. An operation that
/// returns one of these has left the ledger exactly as it found it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// A record looked up by id does not exist (update/delete on unknown id).
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// A sale referenced a product id that is not in the catalog.
    #[error("unknown product: {0}")]
    UnknownProduct(ProductId),

    /// A sale asked for more units than the product has in stock.
    #[error("insufficient stock for product {product_id} (requested: {requested}, available: {available})")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// A value failed validation (e.g. a zero quantity sale).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A money amount does not fit in a `Decimal`.
    #[error("amount overflow: {0}")]
    Overflow(String),
}

impl LedgerError {
    pub fn product_not_found(id: ProductId) -> Self {
        Self::NotFound {
            entity: "product",
            id: id.get(),
        }
    }

    pub fn insufficient_stock(product_id: ProductId, requested: u32, available: u32) -> Self {
        Self::InsufficientStock {
            product_id,
            requested,
            available,
        }
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }

    /// True for the "record does not exist" family (`NotFound`, `UnknownProduct`).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::UnknownProduct(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = LedgerError::product_not_found(ProductId::from_raw(7));
        assert_eq!(err.to_string(), "product 7 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn insufficient_stock_message_carries_quantities() {
        let err = LedgerError::insufficient_stock(ProductId::from_raw(2), 5, 3);
        assert_eq!(
            err.to_string(),
            "insufficient stock for product 2 (requested: 5, available: 3)"
        );
        assert!(!err.is_not_found());
    }

    #[test]
    fn overflow_message_names_the_amount() {
        let err = LedgerError::overflow("sale total");
        assert_eq!(err.to_string(), "amount overflow: sale total");
        assert!(!err.is_not_found());
    }
}
