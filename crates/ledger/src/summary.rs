use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog-wide stock figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventorySummary {
    pub product_count: usize,
    pub total_stock_units: u64,
    pub total_inventory_value: Decimal,
}
