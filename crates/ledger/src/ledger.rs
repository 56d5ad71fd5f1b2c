use rust_decimal::Decimal;

use aroma_core::{
    Clock, Entity, IdSequence, LedgerError, LedgerResult, ProductId, SaleId, SearchTerm,
    SystemClock, active_filter, position_of,
};
use aroma_products::{NewProduct, Product, ProductPatch};
use aroma_sales::{Sale, SaleRequest, SalesStatistics};

use crate::config::LedgerConfig;
use crate::summary::InventorySummary;

/// Product catalog plus sale history.
///
/// Both collections keep insertion order. Ids come from two independent
/// sequences starting at 1 and are never reused. Every failing operation
/// returns an error and leaves the ledger unchanged.
#[derive(Debug)]
pub struct InventoryLedger {
    config: LedgerConfig,
    clock: Box<dyn Clock>,
    products: Vec<Product>,
    sales: Vec<Sale>,
    product_ids: IdSequence,
    sale_ids: IdSequence,
}

impl InventoryLedger {
    /// Empty ledger with default configuration and the local system clock.
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        Self {
            config,
            clock: Box::new(SystemClock),
            products: Vec::new(),
            sales: Vec::new(),
            product_ids: IdSequence::new(),
            sale_ids: IdSequence::new(),
        }
    }

    /// Replace the time source (sale timestamps and "today").
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// All products in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// All sales in recording order.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn add_product(&mut self, input: NewProduct) -> Product {
        let id = ProductId::from_raw(self.product_ids.advance());
        let product = Product::create(id, input);
        tracing::info!(
            product_id = %id,
            product_name = product.name(),
            stock = product.stock_quantity(),
            "product added"
        );
        self.products.push(product.clone());
        product
    }

    /// Overwrite the fields present in `patch`. An empty patch returns the
    /// product unchanged.
    pub fn update_product(&mut self, id: ProductId, patch: ProductPatch) -> LedgerResult<Product> {
        let product = self
            .products
            .iter_mut()
            .find(|p| p.id() == id)
            .ok_or_else(|| LedgerError::product_not_found(id))?;

        let touched = product.apply_patch(patch);
        tracing::info!(product_id = %id, fields = ?touched, "product updated");
        Ok(product.clone())
    }

    /// Remove and return the product. Sales that reference it keep their
    /// snapshot and the now dangling id.
    pub fn delete_product(&mut self, id: ProductId) -> LedgerResult<Product> {
        let index =
            position_of(&self.products, id).ok_or_else(|| LedgerError::product_not_found(id))?;
        let product = self.products.remove(index);
        tracing::info!(product_id = %id, product_name = product.name(), "product deleted");
        Ok(product)
    }

    pub fn get_product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id() == id)
    }

    /// Products in the given category (exact match) whose name or brand
    /// contains `search` (case-insensitive). Sentinel, empty or absent filters
    /// match everything.
    pub fn list_products(&self, category: Option<&str>, search: Option<&str>) -> Vec<&Product> {
        let category = active_filter(category, &self.config.filter_sentinels);
        let search = SearchTerm::parse(search);
        tracing::debug!(?category, search = ?search.as_ref().map(SearchTerm::as_str), "listing products");

        self.products
            .iter()
            .filter(|p| p.matches(category, search.as_ref()))
            .collect()
    }

    /// Record a sale and take its units out of stock.
    ///
    /// Fails with `UnknownProduct`, `InsufficientStock`, `Overflow` (total
    /// does not fit) or `Validation` (zero quantity/installments) without
    /// touching stock, the sale history or the sale id sequence.
    pub fn record_sale(&mut self, request: SaleRequest) -> LedgerResult<Sale> {
        let product_id = request.product_id;
        if let Err(err) = request.validate() {
            tracing::warn!(product_id = %product_id, error = %err, "sale rejected: invalid request");
            return Err(err);
        }

        let Some(index) = position_of(&self.products, product_id) else {
            tracing::warn!(product_id = %product_id, "sale rejected: unknown product");
            return Err(LedgerError::UnknownProduct(product_id));
        };

        let id = SaleId::from_raw(self.sale_ids.peek());
        let sale = match Sale::record(
            id,
            &self.products[index],
            request,
            &self.config.sale_defaults,
            self.clock.now(),
        ) {
            Ok(sale) => sale,
            Err(err) => {
                tracing::warn!(product_id = %product_id, error = %err, "sale rejected: total overflow");
                return Err(err);
            }
        };

        let product = &mut self.products[index];
        if let Err(err) = product.take_stock(sale.quantity()) {
            tracing::warn!(
                product_id = %product_id,
                requested = sale.quantity(),
                available = product.stock_quantity(),
                "sale rejected: insufficient stock"
            );
            return Err(err);
        }
        self.sale_ids.advance();

        tracing::info!(
            sale_id = %id,
            product_id = %product_id,
            quantity = sale.quantity(),
            total = %sale.total(),
            remaining_stock = product.stock_quantity(),
            "sale recorded"
        );

        self.sales.push(sale.clone());
        Ok(sale)
    }

    /// Sales matching channel and payment method (exact, sentinel-aware) and a
    /// case-insensitive search over customer or product name.
    pub fn list_sales(
        &self,
        search: Option<&str>,
        channel: Option<&str>,
        payment: Option<&str>,
    ) -> Vec<&Sale> {
        let channel = active_filter(channel, &self.config.filter_sentinels);
        let payment = active_filter(payment, &self.config.filter_sentinels);
        let search = SearchTerm::parse(search);
        tracing::debug!(?channel, ?payment, search = ?search.as_ref().map(SearchTerm::as_str), "listing sales");

        self.sales
            .iter()
            .filter(|s| s.matches(channel, payment, search.as_ref()))
            .collect()
    }

    /// Units on hand across the catalog.
    pub fn total_stock_units(&self) -> u64 {
        self.products
            .iter()
            .map(|p| u64::from(p.stock_quantity()))
            .sum()
    }

    /// Sum of `price × stock` across the catalog. Fails with `Overflow` when
    /// the value does not fit in a `Decimal`.
    pub fn total_inventory_value(&self) -> LedgerResult<Decimal> {
        self.products.iter().try_fold(Decimal::ZERO, |acc, product| {
            acc.checked_add(product.stock_value()?)
                .ok_or_else(|| LedgerError::overflow("total inventory value"))
        })
    }

    pub fn sales_statistics(&self) -> LedgerResult<SalesStatistics> {
        SalesStatistics::compute(&self.sales, self.clock.today())
    }

    pub fn inventory_summary(&self) -> LedgerResult<InventorySummary> {
        Ok(InventorySummary {
            product_count: self.products.len(),
            total_stock_units: self.total_stock_units(),
            total_inventory_value: self.total_inventory_value()?,
        })
    }
}

impl Default for InventoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aroma_core::FixedClock;
    use chrono::DateTime;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn clock() -> FixedClock {
        FixedClock::new(DateTime::parse_from_rfc3339("2024-07-15T10:30:00-03:00").unwrap())
    }

    fn ledger() -> InventoryLedger {
        InventoryLedger::new().with_clock(clock())
    }

    fn chanel() -> NewProduct {
        NewProduct::new("Chanel N°5", "Chanel", dec!(450.00), 12, 100, "Feminino")
    }

    fn sauvage() -> NewProduct {
        NewProduct::new("Sauvage", "Dior", dec!(380.00), 8, 100, "Masculino")
    }

    fn stocked() -> InventoryLedger {
        let mut ledger = ledger();
        ledger.add_product(chanel());
        ledger.add_product(sauvage());
        ledger
    }

    fn id(raw: u64) -> ProductId {
        ProductId::from_raw(raw)
    }

    #[test]
    fn add_product_assigns_sequential_ids_from_one() {
        let mut ledger = ledger();
        let a = ledger.add_product(chanel());
        let b = ledger.add_product(sauvage());

        assert_eq!(a.id(), id(1));
        assert_eq!(b.id(), id(2));
        assert_eq!(ledger.products().len(), 2);
        assert_eq!(ledger.get_product(id(2)), Some(&b));
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut ledger = ledger();
        ledger.add_product(chanel());
        ledger.add_product(sauvage());
        ledger.delete_product(id(2)).unwrap();

        let next = ledger.add_product(chanel());

        assert_eq!(next.id(), id(3));
    }

    #[test]
    fn update_with_empty_patch_returns_record_unchanged() {
        let mut ledger = stocked();
        let before = ledger.get_product(id(1)).cloned().unwrap();

        let after = ledger.update_product(id(1), ProductPatch::new()).unwrap();

        assert_eq!(after, before);
        assert_eq!(ledger.get_product(id(1)), Some(&before));
    }

    #[test]
    fn update_overwrites_supplied_fields_including_zero() {
        let mut ledger = stocked();

        let updated = ledger
            .update_product(id(2), ProductPatch::new().stock_quantity(0).brand("Christian Dior"))
            .unwrap();

        assert_eq!(updated.stock_quantity(), 0);
        assert_eq!(updated.brand(), "Christian Dior");
        assert_eq!(updated.name(), "Sauvage");
        assert_eq!(ledger.get_product(id(2)), Some(&updated));
    }

    #[test]
    fn update_unknown_product_is_not_found() {
        let mut ledger = stocked();
        let err = ledger
            .update_product(id(99), ProductPatch::new().name("x"))
            .unwrap_err();
        assert_eq!(err, LedgerError::product_not_found(id(99)));
    }

    #[test]
    fn delete_returns_record_and_keeps_order() {
        let mut ledger = stocked();
        ledger.add_product(NewProduct::new("Good Girl", "Carolina Herrera", dec!(520.00), 5, 80, "Feminino"));

        let removed = ledger.delete_product(id(2)).unwrap();

        assert_eq!(removed.name(), "Sauvage");
        let ids: Vec<ProductId> = ledger.products().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![id(1), id(3)]);
        assert!(ledger.get_product(id(2)).is_none());
        assert!(ledger.delete_product(id(2)).unwrap_err().is_not_found());
    }

    #[test]
    fn list_products_filters_by_category_and_sentinel() {
        let ledger = stocked();

        let masculine: Vec<&str> = ledger
            .list_products(Some("Masculino"), None)
            .into_iter()
            .map(Product::name)
            .collect();
        assert_eq!(masculine, vec!["Sauvage"]);

        assert_eq!(ledger.list_products(Some("Todos"), None).len(), 2);
        assert_eq!(ledger.list_products(Some("All"), None).len(), 2);
        assert_eq!(ledger.list_products(None, None).len(), 2);
        assert!(ledger.list_products(Some("Unissex"), None).is_empty());
    }

    #[test]
    fn list_products_searches_name_or_brand() {
        let ledger = stocked();

        assert_eq!(ledger.list_products(None, Some("dior"))[0].name(), "Sauvage");
        assert_eq!(ledger.list_products(None, Some("N°5"))[0].brand(), "Chanel");
        assert!(ledger.list_products(Some("Masculino"), Some("chanel")).is_empty());
    }

    #[test]
    fn record_sale_decrements_stock_and_appends() {
        let mut ledger = stocked();

        let sale = ledger
            .record_sale(SaleRequest::new(id(1), 3, dec!(430.00), "Ana"))
            .unwrap();

        assert_eq!(sale.id(), SaleId::from_raw(1));
        assert_eq!(sale.total(), dec!(1290.00));
        assert_eq!(sale.product_name(), "Chanel N°5");
        assert_eq!(sale.product_brand(), "Chanel");
        assert_eq!(sale.date(), clock().now());
        assert_eq!(ledger.get_product(id(1)).unwrap().stock_quantity(), 9);
        assert_eq!(ledger.sales(), &[sale]);
    }

    #[test]
    fn record_sale_uses_configured_defaults() {
        let mut config = LedgerConfig::default();
        config.sale_defaults.sales_channel = "Loja".to_string();
        let mut ledger = InventoryLedger::with_config(config).with_clock(clock());
        ledger.add_product(chanel());

        let sale = ledger
            .record_sale(SaleRequest::new(id(1), 1, dec!(450.00), "Ana"))
            .unwrap();

        assert_eq!(sale.sales_channel(), "Loja");
        assert_eq!(sale.payment_method(), "PIX");
    }

    #[test]
    fn record_sale_with_insufficient_stock_changes_nothing() {
        let mut ledger = stocked();
        let before = ledger.products().to_vec();

        let err = ledger
            .record_sale(SaleRequest::new(id(2), 9, dec!(380.00), "Ana"))
            .unwrap_err();

        assert_eq!(err, LedgerError::insufficient_stock(id(2), 9, 8));
        assert_eq!(ledger.products(), before.as_slice());
        assert!(ledger.sales().is_empty());
    }

    #[test]
    fn record_sale_for_unknown_product_fails() {
        let mut ledger = stocked();

        let err = ledger
            .record_sale(SaleRequest::new(id(42), 1, dec!(1), "Ana"))
            .unwrap_err();

        assert_eq!(err, LedgerError::UnknownProduct(id(42)));
        assert!(ledger.sales().is_empty());
    }

    #[test]
    fn record_sale_rejects_zero_quantity() {
        let mut ledger = stocked();
        let err = ledger
            .record_sale(SaleRequest::new(id(1), 0, dec!(1), "Ana"))
            .unwrap_err();
        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(ledger.get_product(id(1)).unwrap().stock_quantity(), 12);
    }

    #[test]
    fn record_sale_rejects_zero_installments_without_side_effects() {
        let mut ledger = stocked();
        let before = ledger.products().to_vec();

        let err = ledger
            .record_sale(SaleRequest::new(id(1), 1, dec!(450.00), "Ana").with_installments(0))
            .unwrap_err();

        assert!(matches!(err, LedgerError::Validation(_)));
        assert_eq!(ledger.products(), before.as_slice());
        assert!(ledger.sales().is_empty());
    }

    #[test]
    fn overflowing_sale_total_changes_nothing() {
        let mut ledger = stocked();
        let before = ledger.products().to_vec();

        let err = ledger
            .record_sale(SaleRequest::new(id(1), 2, Decimal::MAX, "Ana"))
            .unwrap_err();

        assert_eq!(err, LedgerError::overflow("sale total"));
        assert_eq!(ledger.products(), before.as_slice());
        assert_eq!(ledger.get_product(id(1)).unwrap().stock_quantity(), 12);
        assert!(ledger.sales().is_empty());

        let next = ledger
            .record_sale(SaleRequest::new(id(1), 1, dec!(450.00), "Ana"))
            .unwrap();
        assert_eq!(next.id(), SaleId::from_raw(1));
    }

    #[test]
    fn failed_sale_does_not_consume_a_sale_id() {
        let mut ledger = stocked();
        ledger
            .record_sale(SaleRequest::new(id(2), 100, dec!(1), "Ana"))
            .unwrap_err();

        let sale = ledger
            .record_sale(SaleRequest::new(id(2), 1, dec!(380.00), "Ana"))
            .unwrap();

        assert_eq!(sale.id(), SaleId::from_raw(1));
    }

    #[test]
    fn sale_survives_product_deletion() {
        let mut ledger = stocked();
        ledger
            .record_sale(SaleRequest::new(id(2), 1, dec!(380.00), "Ana"))
            .unwrap();

        ledger.delete_product(id(2)).unwrap();

        let sale = &ledger.sales()[0];
        assert_eq!(sale.product_id(), id(2));
        assert_eq!(sale.product_name(), "Sauvage");
        assert!(ledger.get_product(sale.product_id()).is_none());
    }

    #[test]
    fn list_sales_filters_channel_payment_and_search() {
        let mut ledger = stocked();
        ledger
            .record_sale(SaleRequest::new(id(1), 1, dec!(450.00), "Ana Lima"))
            .unwrap();
        ledger
            .record_sale(
                SaleRequest::new(id(2), 1, dec!(380.00), "Bruno")
                    .with_channel("WhatsApp")
                    .with_payment("Dinheiro"),
            )
            .unwrap();

        assert_eq!(ledger.list_sales(None, None, None).len(), 2);
        assert_eq!(ledger.list_sales(None, Some("Todos"), Some("Todos")).len(), 2);
        assert_eq!(ledger.list_sales(None, Some("WhatsApp"), None)[0].customer_name(), "Bruno");
        assert_eq!(ledger.list_sales(None, None, Some("PIX"))[0].customer_name(), "Ana Lima");
        assert_eq!(ledger.list_sales(Some("LIMA"), None, None).len(), 1);
        assert_eq!(ledger.list_sales(Some("sauvage"), None, None)[0].customer_name(), "Bruno");
        assert!(ledger.list_sales(Some("ana"), Some("WhatsApp"), None).is_empty());
    }

    #[test]
    fn totals_match_the_sample_catalog() {
        let ledger = stocked();

        assert_eq!(ledger.total_stock_units(), 20);
        assert_eq!(ledger.total_inventory_value().unwrap(), dec!(8440.00));
        assert_eq!(
            ledger.inventory_summary().unwrap(),
            InventorySummary {
                product_count: 2,
                total_stock_units: 20,
                total_inventory_value: dec!(8440.00),
            }
        );
    }

    #[test]
    fn empty_ledger_totals_are_zero() {
        let ledger = ledger();
        assert_eq!(ledger.total_stock_units(), 0);
        assert_eq!(ledger.total_inventory_value().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn inventory_value_overflow_is_an_error() {
        let mut ledger = ledger();
        ledger.add_product(NewProduct::new("Raro", "Casa", Decimal::MAX, 1, 50, "Unissex"));
        ledger.add_product(NewProduct::new("Raro II", "Casa", Decimal::MAX, 1, 50, "Unissex"));

        assert_eq!(
            ledger.total_inventory_value().unwrap_err(),
            LedgerError::overflow("total inventory value")
        );
        assert!(matches!(ledger.inventory_summary(), Err(LedgerError::Overflow(_))));
        assert_eq!(ledger.total_stock_units(), 2);
    }

    #[test]
    fn inventory_value_reports_a_single_product_overflow() {
        let mut ledger = ledger();
        ledger.add_product(NewProduct::new("Raro", "Casa", Decimal::MAX, 2, 50, "Unissex"));

        assert!(matches!(ledger.total_inventory_value(), Err(LedgerError::Overflow(_))));
    }

    #[test]
    fn sales_statistics_overflow_is_an_error() {
        let mut ledger = ledger();
        ledger.add_product(NewProduct::new("Raro", "Casa", Decimal::MAX, 2, 50, "Unissex"));
        ledger
            .record_sale(SaleRequest::new(id(1), 1, Decimal::MAX, "Ana"))
            .unwrap();
        ledger
            .record_sale(SaleRequest::new(id(1), 1, Decimal::MAX, "Bia"))
            .unwrap();

        assert_eq!(
            ledger.sales_statistics().unwrap_err(),
            LedgerError::overflow("total sales")
        );
        assert_eq!(ledger.sales().len(), 2);
    }

    #[test]
    fn sales_statistics_counts_repeat_customers_once() {
        let mut ledger = stocked();
        ledger
            .record_sale(SaleRequest::new(id(1), 2, dec!(450.00), "Ana"))
            .unwrap();
        ledger
            .record_sale(SaleRequest::new(id(2), 1, dec!(380.00), "Ana"))
            .unwrap();
        ledger
            .record_sale(SaleRequest::new(id(2), 1, dec!(380.00), "Bruno"))
            .unwrap();

        let stats = ledger.sales_statistics().unwrap();

        assert_eq!(stats.today_sales, dec!(1660.00));
        assert_eq!(stats.total_sales, dec!(1660.00));
        assert_eq!(stats.items_sold, 4);
        assert_eq!(stats.unique_customers, 2);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: ids are 1..=N in order of creation regardless of
        /// interleaved deletions.
        #[test]
        fn product_ids_are_sequential_despite_deletes(
            ops in prop::collection::vec(any::<bool>(), 1..60)
        ) {
            let mut ledger = ledger();
            let mut issued = Vec::new();

            for add in ops {
                if add || ledger.products().is_empty() {
                    issued.push(ledger.add_product(chanel()).id().get());
                } else {
                    let first = ledger.products()[0].id();
                    ledger.delete_product(first).unwrap();
                }
            }

            let expected: Vec<u64> = (1..=issued.len() as u64).collect();
            prop_assert_eq!(issued, expected);
        }

        /// Property: a sale either takes exactly `quantity` units and appends
        /// one record, or changes nothing.
        #[test]
        fn record_sale_is_all_or_nothing(stock in 0u32..50, quantity in 1u32..60) {
            let mut ledger = ledger();
            ledger.add_product(NewProduct::new("P", "B", dec!(99.90), stock, 50, "Feminino"));

            let result = ledger.record_sale(SaleRequest::new(id(1), quantity, dec!(99.90), "Ana"));
            let remaining = ledger.get_product(id(1)).unwrap().stock_quantity();

            if quantity <= stock {
                let sale = result.unwrap();
                prop_assert_eq!(remaining, stock - quantity);
                prop_assert_eq!(sale.total(), dec!(99.90) * Decimal::from(quantity));
                prop_assert_eq!(ledger.sales().len(), 1);
            } else {
                prop_assert!(result.is_err());
                prop_assert_eq!(remaining, stock);
                prop_assert!(ledger.sales().is_empty());
            }
        }
    }
}
