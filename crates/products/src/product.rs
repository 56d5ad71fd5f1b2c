use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use aroma_core::{Entity, LedgerError, LedgerResult, ProductId, SearchTerm};

use crate::patch::ProductPatch;

/// Input for adding a product to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub brand: String,
    pub price: Decimal,
    pub stock_quantity: u32,
    pub volume_ml: u32,
    pub category: String,
    pub image_ref: Option<String>,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        brand: impl Into<String>,
        price: Decimal,
        stock_quantity: u32,
        volume_ml: u32,
        category: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            brand: brand.into(),
            price,
            stock_quantity,
            volume_ml,
            category: category.into(),
            image_ref: None,
        }
    }

    pub fn with_image(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }
}

/// A sellable catalog item.
///
/// The id is fixed at creation. Stock only moves through [`Product::take_stock`]
/// (sales) or an explicit [`ProductPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    id: ProductId,
    name: String,
    brand: String,
    price: Decimal,
    stock_quantity: u32,
    volume_ml: u32,
    category: String,
    image_ref: Option<String>,
}

impl Product {
    pub fn create(id: ProductId, input: NewProduct) -> Self {
        Self {
            id,
            name: input.name,
            brand: input.brand,
            price: input.price,
            stock_quantity: input.stock_quantity,
            volume_ml: input.volume_ml,
            category: input.category,
            image_ref: input.image_ref,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn price(&self) -> Decimal {
        self.price
    }

    pub fn stock_quantity(&self) -> u32 {
        self.stock_quantity
    }

    pub fn volume_ml(&self) -> u32 {
        self.volume_ml
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }

    /// Value of the units on hand (`price × stock`).
    pub fn stock_value(&self) -> LedgerResult<Decimal> {
        self.price
            .checked_mul(Decimal::from(self.stock_quantity))
            .ok_or_else(|| LedgerError::overflow(format!("stock value of product {}", self.id)))
    }

    pub fn has_stock_for(&self, quantity: u32) -> bool {
        self.stock_quantity >= quantity
    }

    /// Remove `quantity` units from stock.
    ///
    /// Fails without touching the product when fewer units are on hand.
    pub fn take_stock(&mut self, quantity: u32) -> LedgerResult<()> {
        if !self.has_stock_for(quantity) {
            return Err(LedgerError::insufficient_stock(
                self.id,
                quantity,
                self.stock_quantity,
            ));
        }
        self.stock_quantity -= quantity;
        Ok(())
    }

    /// Overwrite every field present in `patch`. Returns the names of the
    /// fields that were supplied.
    pub fn apply_patch(&mut self, patch: ProductPatch) -> Vec<&'static str> {
        let mut touched = Vec::new();
        if let Some(name) = patch.name {
            self.name = name;
            touched.push("name");
        }
        if let Some(brand) = patch.brand {
            self.brand = brand;
            touched.push("brand");
        }
        if let Some(price) = patch.price {
            self.price = price;
            touched.push("price");
        }
        if let Some(stock) = patch.stock_quantity {
            self.stock_quantity = stock;
            touched.push("stockQuantity");
        }
        if let Some(volume) = patch.volume_ml {
            self.volume_ml = volume;
            touched.push("volumeMl");
        }
        if let Some(category) = patch.category {
            self.category = category;
            touched.push("category");
        }
        if let Some(image_ref) = patch.image_ref {
            self.image_ref = image_ref;
            touched.push("imageRef");
        }
        touched
    }

    /// Listing predicate: exact category match (when a category filter is
    /// active) and a case-insensitive search over name or brand.
    pub fn matches(&self, category: Option<&str>, search: Option<&SearchTerm>) -> bool {
        if let Some(category) = category {
            if self.category != category {
                return false;
            }
        }
        match search {
            Some(term) => term.matches_any(&[self.name.as_str(), self.brand.as_str()]),
            None => true,
        }
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}
