use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use aroma_core::{LedgerError, LedgerResult, ProductId};

/// Values used for sale fields the caller leaves unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleDefaults {
    pub posted_instagram: String,
    pub sales_channel: String,
    pub delivery_location: String,
    pub payment_method: String,
    pub installments: u32,
    pub card_fee: Decimal,
}

impl Default for SaleDefaults {
    fn default() -> Self {
        Self {
            posted_instagram: "Não".to_string(),
            sales_channel: "Instagram".to_string(),
            delivery_location: "Retirada na Loja".to_string(),
            payment_method: "PIX".to_string(),
            installments: 1,
            card_fee: Decimal::ZERO,
        }
    }
}

/// Request to record a sale.
///
/// Required: product, quantity, unit price and customer name. Everything
/// else is optional; fields with a shop default fall back to
/// [`SaleDefaults`] when left `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub product_id: ProductId,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub customer_instagram: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub posted_instagram: Option<String>,
    #[serde(default)]
    pub sales_channel: Option<String>,
    #[serde(default)]
    pub delivery_location: Option<String>,
    #[serde(default)]
    pub payment_method: Option<String>,
    #[serde(default)]
    pub installments: Option<u32>,
    #[serde(default)]
    pub card_fee: Option<Decimal>,
    #[serde(default)]
    pub sale_notes: Option<String>,
}

impl SaleRequest {
    pub fn new(
        product_id: ProductId,
        quantity: u32,
        unit_price: Decimal,
        customer_name: impl Into<String>,
    ) -> Self {
        Self {
            product_id,
            quantity,
            unit_price,
            customer_name: customer_name.into(),
            customer_phone: None,
            customer_instagram: None,
            customer_email: None,
            posted_instagram: None,
            sales_channel: None,
            delivery_location: None,
            payment_method: None,
            installments: None,
            card_fee: None,
            sale_notes: None,
        }
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.customer_phone = Some(phone.into());
        self
    }

    pub fn with_instagram(mut self, handle: impl Into<String>) -> Self {
        self.customer_instagram = Some(handle.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.customer_email = Some(email.into());
        self
    }

    pub fn with_posted_instagram(mut self, posted: impl Into<String>) -> Self {
        self.posted_instagram = Some(posted.into());
        self
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.sales_channel = Some(channel.into());
        self
    }

    pub fn with_delivery(mut self, location: impl Into<String>) -> Self {
        self.delivery_location = Some(location.into());
        self
    }

    pub fn with_payment(mut self, method: impl Into<String>) -> Self {
        self.payment_method = Some(method.into());
        self
    }

    pub fn with_installments(mut self, installments: u32) -> Self {
        self.installments = Some(installments);
        self
    }

    pub fn with_card_fee(mut self, fee: Decimal) -> Self {
        self.card_fee = Some(fee);
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.sale_notes = Some(notes.into());
        self
    }

    /// Reject requests no shop would record: zero units, zero installments.
    pub fn validate(&self) -> LedgerResult<()> {
        if self.quantity == 0 {
            return Err(LedgerError::validation("quantity must be greater than zero"));
        }
        if self.installments == Some(0) {
            return Err(LedgerError::validation("installments must be at least 1"));
        }
        Ok(())
    }
}
