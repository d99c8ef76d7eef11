//! Purchasable products.

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// A product that can be placed in the cart.
///
/// Products are built from menu lines and never change afterwards; a price
/// edit in the admin produces a product with a different id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    #[serde(default)]
    description: String,
    price: Price,
    category: String,
}

impl Product {
    /// Create a product, deriving its id from `category`, `name`, and `price`.
    #[must_use]
    pub fn new(category: impl Into<String>, name: impl Into<String>, price: Price) -> Self {
        let category = category.into();
        let name = name.into();
        Self {
            id: ProductId::derive(&category, &name, price),
            name,
            description: String::new(),
            price,
            category,
        }
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub const fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_derives_id() {
        let product = Product::new("بيتزا", "بيتزا مشكلة كبيرة", Price::new(24000));
        assert_eq!(product.id().as_str(), "بيتزا:بيتزا مشكلة كبيرة:24000");
        assert_eq!(product.description(), "");
    }

    #[test]
    fn test_snapshot_without_description_loads() {
        let json = r#"{"id":"عصائر:عصير برتقال:1000","name":"عصير برتقال","price":1000,"category":"عصائر"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name(), "عصير برتقال");
        assert_eq!(product.price(), Price::new(1000));
    }
}
