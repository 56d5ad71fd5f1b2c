use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use aroma_core::{LedgerError, LedgerResult};

use crate::sale::Sale;

/// Aggregate sales figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesStatistics {
    /// Sum of totals of sales recorded on `today`.
    pub today_sales: Decimal,
    /// Sum of all sale totals.
    pub total_sales: Decimal,
    /// Sum of all sale quantities.
    pub items_sold: u64,
    /// Distinct non-empty customer names.
    pub unique_customers: usize,
}

impl SalesStatistics {
    /// Fold `sales` into the aggregate figures. Money sums that do not fit in
    /// a `Decimal` fail with `Overflow`.
    pub fn compute(sales: &[Sale], today: NaiveDate) -> LedgerResult<Self> {
        let mut today_sales = Decimal::ZERO;
        let mut total_sales = Decimal::ZERO;
        let mut items_sold = 0u64;
        let mut customers: HashSet<&str> = HashSet::new();

        for sale in sales {
            total_sales = total_sales
                .checked_add(sale.total())
                .ok_or_else(|| LedgerError::overflow("total sales"))?;
            items_sold = items_sold.saturating_add(u64::from(sale.quantity()));
            if sale.day() == today {
                today_sales = today_sales
                    .checked_add(sale.total())
                    .ok_or_else(|| LedgerError::overflow("today's sales"))?;
            }
            if !sale.customer_name().is_empty() {
                customers.insert(sale.customer_name());
            }
        }

        Ok(Self {
            today_sales,
            total_sales,
            items_sold,
            unique_customers: customers.len(),
        })
    }
}
