use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use aroma_core::{Entity, LedgerError, LedgerResult, ProductId, SaleId, SearchTerm};
use aroma_products::Product;

use crate::request::{SaleDefaults, SaleRequest};

/// Immutable record of a completed sale.
///
/// Product name and brand are snapshots taken when the sale was recorded;
/// `product_id` is not kept in sync with the catalog and may dangle after the
/// product is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    id: SaleId,
    product_id: ProductId,
    product_name: String,
    product_brand: String,
    quantity: u32,
    unit_price: Decimal,
    total: Decimal,
    customer_name: String,
    customer_phone: Option<String>,
    customer_instagram: Option<String>,
    customer_email: Option<String>,
    posted_instagram: String,
    sales_channel: String,
    delivery_location: String,
    payment_method: String,
    installments: u32,
    card_fee: Decimal,
    sale_notes: Option<String>,
    date: DateTime<FixedOffset>,
}

impl Sale {
    /// Build the sale record for `request` against `product` as it is now.
    ///
    /// Stock bookkeeping is the caller's job; this only snapshots and prices.
    /// Fails with `Overflow` when `unit_price × quantity` does not fit.
    pub fn record(
        id: SaleId,
        product: &Product,
        request: SaleRequest,
        defaults: &SaleDefaults,
        date: DateTime<FixedOffset>,
    ) -> LedgerResult<Self> {
        let total = request
            .unit_price
            .checked_mul(Decimal::from(request.quantity))
            .ok_or_else(|| LedgerError::overflow("sale total"))?;
        Ok(Self {
            id,
            product_id: product.id(),
            product_name: product.name().to_string(),
            product_brand: product.brand().to_string(),
            quantity: request.quantity,
            unit_price: request.unit_price,
            total,
            customer_name: request.customer_name,
            customer_phone: request.customer_phone,
            customer_instagram: request.customer_instagram,
            customer_email: request.customer_email,
            posted_instagram: request
                .posted_instagram
                .unwrap_or_else(|| defaults.posted_instagram.clone()),
            sales_channel: request
                .sales_channel
                .unwrap_or_else(|| defaults.sales_channel.clone()),
            delivery_location: request
                .delivery_location
                .unwrap_or_else(|| defaults.delivery_location.clone()),
            payment_method: request
                .payment_method
                .unwrap_or_else(|| defaults.payment_method.clone()),
            installments: request.installments.unwrap_or(defaults.installments),
            card_fee: request.card_fee.unwrap_or(defaults.card_fee),
            sale_notes: request.sale_notes,
            date,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn product_name(&self) -> &str {
        &self.product_name
    }

    pub fn product_brand(&self) -> &str {
        &self.product_brand
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn customer_phone(&self) -> Option<&str> {
        self.customer_phone.as_deref()
    }

    pub fn customer_instagram(&self) -> Option<&str> {
        self.customer_instagram.as_deref()
    }

    pub fn customer_email(&self) -> Option<&str> {
        self.customer_email.as_deref()
    }

    pub fn posted_instagram(&self) -> &str {
        &self.posted_instagram
    }

    pub fn sales_channel(&self) -> &str {
        &self.sales_channel
    }

    pub fn delivery_location(&self) -> &str {
        &self.delivery_location
    }

    pub fn payment_method(&self) -> &str {
        &self.payment_method
    }

    pub fn installments(&self) -> u32 {
        self.installments
    }

    pub fn card_fee(&self) -> Decimal {
        self.card_fee
    }

    pub fn sale_notes(&self) -> Option<&str> {
        self.sale_notes.as_deref()
    }

    pub fn date(&self) -> DateTime<FixedOffset> {
        self.date
    }

    /// Calendar day the sale was recorded on, in its own offset.
    pub fn day(&self) -> NaiveDate {
        self.date.date_naive()
    }

    /// Listing predicate: exact channel and payment matches (when active) and
    /// a case-insensitive search over customer or product name.
    pub fn matches(
        &self,
        channel: Option<&str>,
        payment: Option<&str>,
        search: Option<&SearchTerm>,
    ) -> bool {
        if channel.is_some_and(|c| c != self.sales_channel) {
            return false;
        }
        if payment.is_some_and(|p| p != self.payment_method) {
            return false;
        }
        search.is_none_or(|term| {
            term.matches_any(&[self.customer_name.as_str(), self.product_name.as_str()])
        })
    }
}

impl Entity for Sale {
    type Id = SaleId;

    fn id(&self) -> SaleId {
        self.id
    }
}
