//! Thread-safe handle around an [`InventoryLedger`].
//!
//! One `RwLock` guards the whole ledger: mutations (add/update/delete/sale)
//! take the write lock, reads take the read lock and hand back owned copies.
//! A poisoned lock is recovered: every ledger operation either completes or
//! returns an error before mutating, so a panic in a caller's closure can only
//! leave behind the operations that already finished.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;

use aroma_core::{LedgerResult, ProductId};
use aroma_products::{NewProduct, Product, ProductPatch};
use aroma_sales::{Sale, SaleRequest, SalesStatistics};

use crate::ledger::InventoryLedger;
use crate::summary::InventorySummary;

#[derive(Debug, Clone)]
pub struct SharedLedger {
    inner: Arc<RwLock<InventoryLedger>>,
}

impl SharedLedger {
    pub fn new(ledger: InventoryLedger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, InventoryLedger> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, InventoryLedger> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_product(&self, input: NewProduct) -> Product {
        self.write().add_product(input)
    }

    pub fn update_product(&self, id: ProductId, patch: ProductPatch) -> LedgerResult<Product> {
        self.write().update_product(id, patch)
    }

    pub fn delete_product(&self, id: ProductId) -> LedgerResult<Product> {
        self.write().delete_product(id)
    }

    pub fn record_sale(&self, request: SaleRequest) -> LedgerResult<Sale> {
        self.write().record_sale(request)
    }

    pub fn get_product(&self, id: ProductId) -> Option<Product> {
        self.read().get_product(id).cloned()
    }

    pub fn list_products(&self, category: Option<&str>, search: Option<&str>) -> Vec<Product> {
        self.read()
            .list_products(category, search)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn list_sales(
        &self,
        search: Option<&str>,
        channel: Option<&str>,
        payment: Option<&str>,
    ) -> Vec<Sale> {
        self.read()
            .list_sales(search, channel, payment)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn total_stock_units(&self) -> u64 {
        self.read().total_stock_units()
    }

    pub fn total_inventory_value(&self) -> LedgerResult<Decimal> {
        self.read().total_inventory_value()
    }

    pub fn sales_statistics(&self) -> LedgerResult<SalesStatistics> {
        self.read().sales_statistics()
    }

    pub fn inventory_summary(&self) -> LedgerResult<InventorySummary> {
        self.read().inventory_summary()
    }

    /// Run `f` with shared access to the ledger.
    pub fn with_ledger<R>(&self, f: impl FnOnce(&InventoryLedger) -> R) -> R {
        f(&self.read())
    }

    /// Run `f` with exclusive access, e.g. to apply several operations
    /// without another writer interleaving.
    pub fn with_ledger_mut<R>(&self, f: impl FnOnce(&mut InventoryLedger) -> R) -> R {
        f(&mut self.write())
    }
}

impl From<InventoryLedger> for SharedLedger {
    fn from(ledger: InventoryLedger) -> Self {
        Self::new(ledger)
    }
}
