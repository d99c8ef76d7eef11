//! Menu line records.
//!
//! Each category stores one record shape. [`MenuLine`] is the sum type used
//! when code needs to handle any category uniformly (editing, offers).

use serde::{Deserialize, Serialize};

use super::category::{MenuCategory, PriceArity, PriceTier};
use crate::product::Product;
use crate::types::Price;

/// Name given to lines freshly added in the admin editor.
pub const PLACEHOLDER_NAME: &str = "جديد";

/// A line with one price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleLine {
    pub name: String,
    pub price: Price,
}

/// A line with regular and jumbo sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualLine {
    pub name: String,
    pub regular: Price,
    pub jumbo: Price,
}

/// A line with small, medium, and large sizes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripleLine {
    pub name: String,
    pub small: Price,
    pub medium: Price,
    pub large: Price,
}

/// Any menu line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MenuLine {
    Single(SingleLine),
    Dual(DualLine),
    Triple(TripleLine),
}

/// A single-field edit of a menu line.
///
/// Serialized as `{"field": "small", "value": 15000}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum LineField {
    Name(String),
    Price(Price),
    Regular(Price),
    Jumbo(Price),
    Small(Price),
    Medium(Price),
    Large(Price),
}

impl LineField {
    /// Field name as it appears in the record.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Name(_) => "name",
            Self::Price(_) => "price",
            Self::Regular(_) => "regular",
            Self::Jumbo(_) => "jumbo",
            Self::Small(_) => "small",
            Self::Medium(_) => "medium",
            Self::Large(_) => "large",
        }
    }
}

/// A purchasable size of a menu line, ready to add to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuOffer {
    pub tier: PriceTier,
    pub product: Product,
}

impl MenuLine {
    /// A zero-priced placeholder with the given shape.
    #[must_use]
    pub fn placeholder(arity: PriceArity) -> Self {
        let name = PLACEHOLDER_NAME.to_owned();
        match arity {
            PriceArity::Single => Self::Single(SingleLine {
                name,
                price: Price::ZERO,
            }),
            PriceArity::Dual => Self::Dual(DualLine {
                name,
                regular: Price::ZERO,
                jumbo: Price::ZERO,
            }),
            PriceArity::Triple => Self::Triple(TripleLine {
                name,
                small: Price::ZERO,
                medium: Price::ZERO,
                large: Price::ZERO,
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Single(line) => &line.name,
            Self::Dual(line) => &line.name,
            Self::Triple(line) => &line.name,
        }
    }

    #[must_use]
    pub const fn arity(&self) -> PriceArity {
        match self {
            Self::Single(_) => PriceArity::Single,
            Self::Dual(_) => PriceArity::Dual,
            Self::Triple(_) => PriceArity::Triple,
        }
    }

    /// Price of each tier, in display order.
    #[must_use]
    pub fn prices(&self) -> Vec<(PriceTier, Price)> {
        match self {
            Self::Single(line) => vec![(PriceTier::Single, line.price)],
            Self::Dual(line) => vec![
                (PriceTier::Regular, line.regular),
                (PriceTier::Jumbo, line.jumbo),
            ],
            Self::Triple(line) => vec![
                (PriceTier::Small, line.small),
                (PriceTier::Medium, line.medium),
                (PriceTier::Large, line.large),
            ],
        }
    }

    /// Expand this line into one product per price tier.
    #[must_use]
    pub fn offers(&self, category: MenuCategory) -> Vec<MenuOffer> {
        let base = format!("{} {}", category.product_prefix(), self.name());
        self.prices()
            .into_iter()
            .map(|(tier, price)| {
                let name = match tier.suffix() {
                    Some(suffix) => format!("{base} {suffix}"),
                    None => base.clone(),
                };
                MenuOffer {
                    tier,
                    product: Product::new(category.product_category(), name, price),
                }
            })
            .collect()
    }

    /// Case-insensitive substring match on the line name.
    ///
    /// A blank query matches every line.
    #[must_use]
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim();
        query.is_empty() || self.name().to_lowercase().contains(&query.to_lowercase())
    }

    /// Apply a single-field edit.
    ///
    /// Returns the rejected field name if the line's shape has no such field.
    pub(crate) fn apply(&mut self, change: LineField) -> Result<(), &'static str> {
        let field = change.name();
        match (self, change) {
            (Self::Single(line), LineField::Name(name)) => line.name = name,
            (Self::Dual(line), LineField::Name(name)) => line.name = name,
            (Self::Triple(line), LineField::Name(name)) => line.name = name,
            (Self::Single(line), LineField::Price(price)) => line.price = price,
            (Self::Dual(line), LineField::Regular(price)) => line.regular = price,
            (Self::Dual(line), LineField::Jumbo(price)) => line.jumbo = price,
            (Self::Triple(line), LineField::Small(price)) => line.small = price,
            (Self::Triple(line), LineField::Medium(price)) => line.medium = price,
            (Self::Triple(line), LineField::Large(price)) => line.large = price,
            _ => return Err(field),
        }
        Ok(())
    }
}

impl SingleLine {
    #[must_use]
    pub fn new(name: impl Into<String>, price: u64) -> Self {
        Self {
            name: name.into(),
            price: Price::new(price),
        }
    }
}

impl DualLine {
    #[must_use]
    pub fn new(name: impl Into<String>, regular: u64, jumbo: u64) -> Self {
        Self {
            name: name.into(),
            regular: Price::new(regular),
            jumbo: Price::new(jumbo),
        }
    }
}

impl TripleLine {
    #[must_use]
    pub fn new(name: impl Into<String>, small: u64, medium: u64, large: u64) -> Self {
        Self {
            name: name.into(),
            small: Price::new(small),
            medium: Price::new(medium),
            large: Price::new(large),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_triple_is_zeroed() {
        let line = MenuLine::placeholder(PriceArity::Triple);
        assert_eq!(
            line,
            MenuLine::Triple(TripleLine {
                name: PLACEHOLDER_NAME.to_owned(),
                small: Price::ZERO,
                medium: Price::ZERO,
                large: Price::ZERO,
            })
        );
    }

    #[test]
    fn test_offers_name_products_like_the_menu_board() {
        let line = MenuLine::Dual(DualLine::new("شاورما", 4000, 6000));
        let offers = line.offers(MenuCategory::Sandwiches);
        let names: Vec<&str> = offers.iter().map(|o| o.product.name()).collect();
        assert_eq!(names, ["سندويتش شاورما عادي", "سندويتش شاورما جامبو"]);
        assert_eq!(offers[1].product.price(), Price::new(6000));
        assert_eq!(offers[0].product.category(), "سندويتشات");
    }

    #[test]
    fn test_single_offer_has_no_suffix() {
        let line = MenuLine::Single(SingleLine::new("منقة", 3000));
        let offers = line.offers(MenuCategory::Juices);
        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].product.name(), "عصير منقة");
        assert_eq!(offers[0].product.id().as_str(), "عصائر:عصير منقة:3000");
    }

    #[test]
    fn test_matches() {
        let line = MenuLine::Single(SingleLine::new("Nutella Honey", 8000));
        assert!(line.matches(""));
        assert!(line.matches("  "));
        assert!(line.matches("nutella"));
        assert!(!line.matches("oreo"));
    }

    #[test]
    fn test_apply_rejects_foreign_field() {
        let mut line = MenuLine::Single(SingleLine::new("فراخ", 7000));
        assert_eq!(line.apply(LineField::Large(Price::new(1))), Err("large"));
        line.apply(LineField::Price(Price::new(7500))).unwrap();
        assert_eq!(line.prices(), vec![(PriceTier::Single, Price::new(7500))]);
    }

    #[test]
    fn test_line_field_wire_format() {
        let change: LineField = serde_json::from_str(r#"{"field":"jumbo","value":6500}"#).unwrap();
        assert_eq!(change, LineField::Jumbo(Price::new(6500)));
    }

    #[test]
    fn test_untagged_deserialize_picks_shape() {
        let line: MenuLine =
            serde_json::from_str(r#"{"name":"مشكلة","small":15000,"medium":17000,"large":24000}"#)
                .unwrap();
        assert_eq!(line.arity(), PriceArity::Triple);
    }
}
