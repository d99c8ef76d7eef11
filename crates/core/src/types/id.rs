//! Product identity.
//!
//! Menu products have no database key. Their identity is derived from the
//! category label, display name, and price, so the same menu button always
//! yields the same id and a price change yields a new one.

use core::fmt;

use serde::{Deserialize, Serialize};

use super::price::Price;

/// Identity of a purchasable product.
///
/// Two cart lines refer to the same product iff their ids are equal.
///
/// ```
/// use pizzeti_core::{Price, ProductId};
///
/// let id = ProductId::derive("بيتزا", "بيتزا فراخ وسط", Price::new(16000));
/// assert_eq!(id.as_str(), "بيتزا:بيتزا فراخ وسط:16000");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Derive the id for a product in `category` named `name` at `price`.
    #[must_use]
    pub fn derive(category: &str, name: &str, price: Price) -> Self {
        Self(format!("{category}:{name}:{price}"))
    }

    /// Wrap an id received from a client or a stored snapshot.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_distinguishes_price() {
        let a = ProductId::derive("عصائر", "عصير منقة", Price::new(3000));
        let b = ProductId::derive("عصائر", "عصير منقة", Price::new(3500));
        assert_ne!(a, b);
    }

    #[test]
    fn test_from_raw_matches_derived() {
        let derived = ProductId::derive("بروست", "بروست 1 قطعة", Price::new(3500));
        assert_eq!(ProductId::from_raw("بروست:بروست 1 قطعة:3500"), derived);
    }
}
