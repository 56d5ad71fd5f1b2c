//! Ledger configuration.
//!
//! Defaults reproduce the shop's conventions. [`LedgerConfig::from_env`]
//! overlays `AROMA_*` environment variables on top of them.

use serde::{Deserialize, Serialize};

use aroma_core::DEFAULT_SENTINELS;
use aroma_sales::SaleDefaults;

pub const ENV_FILTER_SENTINELS: &str = "AROMA_FILTER_SENTINELS";
pub const ENV_DEFAULT_CHANNEL: &str = "AROMA_DEFAULT_CHANNEL";
pub const ENV_DEFAULT_PAYMENT: &str = "AROMA_DEFAULT_PAYMENT";
pub const ENV_DEFAULT_DELIVERY: &str = "AROMA_DEFAULT_DELIVERY";
pub const ENV_DEFAULT_INSTALLMENTS: &str = "AROMA_DEFAULT_INSTALLMENTS";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LedgerConfig {
    /// Filter values meaning "no filter" (exact match).
    pub filter_sentinels: Vec<String>,
    /// Values for sale fields left unset by the caller.
    pub sale_defaults: SaleDefaults,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            filter_sentinels: DEFAULT_SENTINELS.iter().map(|s| s.to_string()).collect(),
            sale_defaults: SaleDefaults::default(),
        }
    }
}

impl LedgerConfig {
    /// Defaults overlaid with the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overlaid with values from `lookup`. Malformed values are
    /// logged and ignored.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_FILTER_SENTINELS) {
            let sentinels: Vec<String> = raw
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
            if sentinels.is_empty() {
                tracing::warn!(var = ENV_FILTER_SENTINELS, "no sentinel values given; keeping defaults");
            } else {
                config.filter_sentinels = sentinels;
            }
        }

        if let Some(channel) = non_blank(lookup(ENV_DEFAULT_CHANNEL)) {
            config.sale_defaults.sales_channel = channel;
        }
        if let Some(payment) = non_blank(lookup(ENV_DEFAULT_PAYMENT)) {
            config.sale_defaults.payment_method = payment;
        }
        if let Some(delivery) = non_blank(lookup(ENV_DEFAULT_DELIVERY)) {
            config.sale_defaults.delivery_location = delivery;
        }

        if let Some(raw) = lookup(ENV_DEFAULT_INSTALLMENTS) {
            match raw.trim().parse::<u32>() {
                Ok(n) if n >= 1 => config.sale_defaults.installments = n,
                _ => tracing::warn!(
                    var = ENV_DEFAULT_INSTALLMENTS,
                    value = %raw,
                    "invalid installments default; keeping {}",
                    config.sale_defaults.installments
                ),
            }
        }

        config
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
