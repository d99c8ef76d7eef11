//! Customer contact and delivery details.
//!
//! [`CustomerForm`] is what the visitor submits; [`CustomerProfile`] is the
//! validated record that the order composer and persistence work with.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{OrderType, Phone, PhoneError};

/// Raw checkout form input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerForm {
    pub name: String,
    pub phone: String,
    pub order_type: OrderType,
    pub area: String,
    pub delivery_notes: String,
}

/// A validated customer profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerProfile {
    pub name: String,
    pub phone: Phone,
    pub order_type: OrderType,
    /// Empty for pickup orders.
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub delivery_notes: String,
}

/// Form field a validation failure is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    Phone,
    Area,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCode {
    Required,
    InvalidFormat,
}

/// One failed field, with the message shown under the form input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub code: ViolationCode,
    pub message: &'static str,
}

impl Violation {
    const fn required(message: &'static str) -> Self {
        Self {
            code: ViolationCode::Required,
            message,
        }
    }
}

/// Field-keyed validation failures. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<Field, Violation>);

impl ValidationErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&Violation> {
        self.0.get(&field)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &Violation)> {
        self.0.iter().map(|(field, violation)| (*field, violation))
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self
            .0
            .keys()
            .map(|field| match field {
                Field::Name => "name",
                Field::Phone => "phone",
                Field::Area => "area",
            })
            .collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

impl std::error::Error for ValidationErrors {}

impl CustomerForm {
    /// Run every field check.
    ///
    /// Returns the failures together with the normalized phone, which is
    /// what gets stored even when other fields fail.
    #[must_use]
    pub fn check(&self) -> (ValidationErrors, String) {
        let mut errors = BTreeMap::new();

        if self.name.trim().is_empty() {
            errors.insert(Field::Name, Violation::required("الاسم مطلوب"));
        }

        if self.order_type.requires_area() && self.area.trim().is_empty() {
            errors.insert(
                Field::Area,
                Violation::required("الموقع / العنوان مطلوب للتوصيل"),
            );
        }

        let normalized = Phone::normalize(&self.phone);
        match Phone::parse(&normalized) {
            Ok(_) => {}
            Err(PhoneError::Empty) => {
                errors.insert(Field::Phone, Violation::required("رقم الهاتف مطلوب"));
            }
            Err(PhoneError::InvalidFormat { .. }) => {
                errors.insert(
                    Field::Phone,
                    Violation {
                        code: ViolationCode::InvalidFormat,
                        message: "رقم الهاتف غير صحيح",
                    },
                );
            }
        }

        (ValidationErrors(errors), normalized)
    }

    /// Validate the form into a [`CustomerProfile`].
    ///
    /// # Errors
    ///
    /// Returns every failed field if any check fails.
    pub fn validate(&self) -> Result<CustomerProfile, ValidationErrors> {
        let (errors, normalized) = self.check();
        if !errors.is_empty() {
            return Err(errors);
        }
        let phone = Phone::parse(&normalized).map_err(|_| errors)?;

        let area = if self.order_type.requires_area() {
            self.area.clone()
        } else {
            String::new()
        };

        Ok(CustomerProfile {
            name: self.name.clone(),
            phone,
            order_type: self.order_type,
            area,
            delivery_notes: self.delivery_notes.clone(),
        })
    }
}

impl From<CustomerProfile> for CustomerForm {
    fn from(profile: CustomerProfile) -> Self {
        Self {
            name: profile.name,
            phone: profile.phone.into_inner(),
            order_type: profile.order_type,
            area: profile.area,
            delivery_notes: profile.delivery_notes,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn form(name: &str, phone: &str, order_type: OrderType, area: &str) -> CustomerForm {
        CustomerForm {
            name: name.to_owned(),
            phone: phone.to_owned(),
            order_type,
            area: area.to_owned(),
            delivery_notes: String::new(),
        }
    }

    #[test]
    fn test_empty_delivery_form_fails_every_field() {
        let errors = form("", "123", OrderType::Delivery, "")
            .validate()
            .unwrap_err();
        assert_eq!(errors.len(), 3);
        assert_eq!(errors.get(Field::Name).unwrap().code, ViolationCode::Required);
        assert_eq!(
            errors.get(Field::Phone).unwrap().code,
            ViolationCode::InvalidFormat
        );
        assert_eq!(errors.get(Field::Area).unwrap().code, ViolationCode::Required);
    }

    #[test]
    fn test_pickup_normalizes_phone() {
        let profile = form("Ali", "+249 900-318100", OrderType::Pickup, "")
            .validate()
            .unwrap();
        assert_eq!(profile.phone.as_str(), "249900318100");
        assert_eq!(profile.area, "");
    }

    #[test]
    fn test_pickup_clears_area() {
        let profile = form("Ali", "0912345678", OrderType::Pickup, "الرياض")
            .validate()
            .unwrap();
        assert!(profile.area.is_empty());
    }

    #[test]
    fn test_blank_phone_is_required() {
        let (errors, normalized) = form("Ali", " ( ) ", OrderType::Pickup, "").check();
        assert_eq!(normalized, "");
        let violation = errors.get(Field::Phone).unwrap();
        assert_eq!(violation.code, ViolationCode::Required);
        assert_eq!(violation.message, "رقم الهاتف مطلوب");
    }

    #[test]
    fn test_whitespace_name_is_required() {
        let (errors, _) = form("   ", "0912345678", OrderType::Pickup, "").check();
        assert!(errors.get(Field::Name).is_some());
    }

    #[test]
    fn test_errors_serialize_by_field() {
        let (errors, _) = form("Ali", "12", OrderType::Pickup, "").check();
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["phone"]["code"], "invalid_format");
        assert_eq!(json["phone"]["message"], "رقم الهاتف غير صحيح");
    }

    #[test]
    fn test_profile_back_to_form() {
        let profile = form("Ali", "0912345678", OrderType::Delivery, "بحري")
            .validate()
            .unwrap();
        let defaults = CustomerForm::from(profile);
        assert_eq!(defaults.phone, "0912345678");
        assert_eq!(defaults.area, "بحري");
    }
}
