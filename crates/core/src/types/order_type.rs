//! How an order reaches the customer.

use serde::{Deserialize, Serialize};

/// Delivery or pickup.
///
/// Determines whether a delivery area is required at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    /// Delivered to the customer's area.
    #[default]
    Delivery,
    /// Collected from the shop.
    Pickup,
}

impl OrderType {
    /// Whether checkout must collect a delivery area.
    #[must_use]
    pub const fn requires_area(self) -> bool {
        matches!(self, Self::Delivery)
    }

    /// Arabic label shown on the checkout form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Delivery => "توصيل",
            Self::Pickup => "استلام",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_delivery() {
        assert_eq!(OrderType::default(), OrderType::Delivery);
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(
            serde_json::to_string(&OrderType::Pickup).unwrap_or_default(),
            "\"pickup\""
        );
        assert_eq!(
            serde_json::from_str::<OrderType>("\"delivery\"").ok(),
            Some(OrderType::Delivery)
        );
    }

    #[test]
    fn test_requires_area() {
        assert!(OrderType::Delivery.requires_area());
        assert!(!OrderType::Pickup.requires_area());
    }
}
