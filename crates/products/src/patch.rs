use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Partial update of a [`crate::Product`].
///
/// `None` means "leave the field alone". `Some(v)` overwrites, including when
/// `v` is a zero value (`0`, `""`). The image reference is itself optional, so
/// its patch slot is `Option<Option<String>>`: `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub price: Option<Decimal>,
    pub stock_quantity: Option<u32>,
    pub volume_ml: Option<u32>,
    pub category: Option<String>,
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<Option<String>>,
}

impl ProductPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stock_quantity(mut self, stock_quantity: u32) -> Self {
        self.stock_quantity = Some(stock_quantity);
        self
    }

    pub fn volume_ml(mut self, volume_ml: u32) -> Self {
        self.volume_ml = Some(volume_ml);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(Some(image_ref.into()));
        self
    }

    pub fn clear_image(mut self) -> Self {
        self.image_ref = Some(None);
        self
    }

    /// True when no field is supplied.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Serde adapter keeping "key absent" and "key is null" apart for
/// `Option<Option<T>>`: absent → `None`, `null` → `Some(None)`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<T, S>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Serialize,
        S: Serializer,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
