//! Menu categories and their price shapes.

use core::fmt;

use serde::{Deserialize, Serialize};

/// One of the six sections of the menu board.
///
/// Serialized with the camelCase keys used by persisted menu overrides
/// (`fatayerShami`, `pizzas`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuCategory {
    FatayerShami,
    FatayerSweet,
    Broast,
    Sandwiches,
    Pizzas,
    Juices,
}

impl MenuCategory {
    /// All categories in menu board order.
    pub const ALL: [Self; 6] = [
        Self::FatayerShami,
        Self::FatayerSweet,
        Self::Broast,
        Self::Sandwiches,
        Self::Pizzas,
        Self::Juices,
    ];

    /// Key used in persisted overrides and URLs.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FatayerShami => "fatayerShami",
            Self::FatayerSweet => "fatayerSweet",
            Self::Broast => "broast",
            Self::Sandwiches => "sandwiches",
            Self::Pizzas => "pizzas",
            Self::Juices => "juices",
        }
    }

    /// Section title shown in the admin editor.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FatayerShami => "فطائر شامي",
            Self::FatayerSweet => "فطائر حلوة",
            Self::Broast => "البروست",
            Self::Sandwiches => "السندويتشات",
            Self::Pizzas => "البيتزا",
            Self::Juices => "العصائر",
        }
    }

    /// Category label carried by products added to the cart.
    ///
    /// Both pastry sections share one label.
    #[must_use]
    pub const fn product_category(self) -> &'static str {
        match self {
            Self::FatayerShami | Self::FatayerSweet => "فطائر",
            Self::Broast => "بروست",
            Self::Sandwiches => "سندويتشات",
            Self::Pizzas => "بيتزا",
            Self::Juices => "عصائر",
        }
    }

    /// Prefix of product display names in this category.
    #[must_use]
    pub const fn product_prefix(self) -> &'static str {
        match self {
            Self::FatayerShami => "فطائر شامية",
            Self::FatayerSweet => "فطائر حلوة",
            Self::Broast => "بروست",
            Self::Sandwiches => "سندويتش",
            Self::Pizzas => "بيتزا",
            Self::Juices => "عصير",
        }
    }

    /// Number of price tiers each line in this category carries.
    #[must_use]
    pub const fn arity(self) -> PriceArity {
        match self {
            Self::Sandwiches => PriceArity::Dual,
            Self::Pizzas => PriceArity::Triple,
            Self::FatayerShami | Self::FatayerSweet | Self::Broast | Self::Juices => {
                PriceArity::Single
            }
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Error parsing a [`MenuCategory`] key.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown menu category: {0}")]
pub struct UnknownCategory(pub String);

impl std::str::FromStr for MenuCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| UnknownCategory(s.to_owned()))
    }
}

/// Shape of a category's price fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceArity {
    /// `price`
    Single,
    /// `regular`, `jumbo`
    Dual,
    /// `small`, `medium`, `large`
    Triple,
}

impl PriceArity {
    /// The tiers a line of this shape offers, in display order.
    #[must_use]
    pub const fn tiers(self) -> &'static [PriceTier] {
        match self {
            Self::Single => &[PriceTier::Single],
            Self::Dual => &[PriceTier::Regular, PriceTier::Jumbo],
            Self::Triple => &[PriceTier::Small, PriceTier::Medium, PriceTier::Large],
        }
    }
}

/// One purchasable size of a menu line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceTier {
    Single,
    Regular,
    Jumbo,
    Small,
    Medium,
    Large,
}

impl PriceTier {
    /// Size suffix appended to product names, if any.
    #[must_use]
    pub const fn suffix(self) -> Option<&'static str> {
        match self {
            Self::Single => None,
            Self::Regular => Some("عادي"),
            Self::Jumbo => Some("جامبو"),
            Self::Small => Some("صغيرة"),
            Self::Medium => Some("وسط"),
            Self::Large => Some("كبيرة"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_round_trips_through_from_str() {
        for category in MenuCategory::ALL {
            assert_eq!(category.key().parse::<MenuCategory>(), Ok(category));
        }
        assert!("desserts".parse::<MenuCategory>().is_err());
    }

    #[test]
    fn test_serde_matches_key() {
        let json = serde_json::to_string(&MenuCategory::FatayerShami).unwrap_or_default();
        assert_eq!(json, "\"fatayerShami\"");
    }

    #[test]
    fn test_arity() {
        assert_eq!(MenuCategory::Pizzas.arity(), PriceArity::Triple);
        assert_eq!(MenuCategory::Sandwiches.arity(), PriceArity::Dual);
        assert_eq!(MenuCategory::Juices.arity(), PriceArity::Single);
        assert_eq!(PriceArity::Triple.tiers().len(), 3);
    }

    #[test]
    fn test_pastries_share_product_category() {
        assert_eq!(
            MenuCategory::FatayerShami.product_category(),
            MenuCategory::FatayerSweet.product_category()
        );
    }
}
