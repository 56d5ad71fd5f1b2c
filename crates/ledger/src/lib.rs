//! `aroma-ledger` — the in-process inventory and sales ledger.
//!
//! [`InventoryLedger`] owns the product catalog and the sale history and is the
//! only thing that mutates them. [`SharedLedger`] puts one lock around it for
//! callers that need concurrent access.

pub mod config;
pub mod ledger;
pub mod shared;
pub mod summary;

pub use config::LedgerConfig;
pub use ledger::InventoryLedger;
pub use shared::SharedLedger;
pub use summary::InventorySummary;

pub use aroma_core::{
    Clock, Entity, FixedClock, LedgerError, LedgerResult, ProductId, SaleId,
    SystemClock,
};
pub use aroma_products::{NewProduct, Product, ProductPatch};
pub use aroma_sales::{Sale, SaleDefaults, SaleRequest, SalesStatistics};
