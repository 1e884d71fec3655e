//! Customer model

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;
use crate::models::VisitStatus;

/// Opaque customer identifier.
///
/// New customers get a UUID v7 string; ids coming from the remote mirror or
/// older data are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(String);

impl CustomerId {
    /// Create a new unique customer ID using UUID v7
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for CustomerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CustomerId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("customer id cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// A customer (shop) on the operator's route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Unique identifier
    pub id: CustomerId,
    /// Shop name (required)
    pub shop_name: String,
    /// Manager / contact person
    pub manager_name: String,
    /// Phone number (required)
    pub phone: String,
    /// Main region name, expected to match a `Region::name`
    pub main_region: String,
    /// Sub-region name within the main region
    pub sub_region: String,
    /// WhatsApp chat link
    pub whatsapp_link: String,
    /// Map location link
    pub map_link: String,
    /// This week's visit status
    pub visit_status: VisitStatus,
    /// Creation timestamp (Unix ms)
    pub created_at: i64,
}

impl Customer {
    /// Create a new customer with a fresh id.
    ///
    /// The WhatsApp link is derived from the phone number.
    #[must_use]
    pub fn new(shop_name: impl Into<String>, phone: impl Into<String>) -> Self {
        let mut customer = Self {
            id: CustomerId::new(),
            shop_name: shop_name.into(),
            manager_name: String::new(),
            phone: String::new(),
            main_region: String::new(),
            sub_region: String::new(),
            whatsapp_link: String::new(),
            map_link: String::new(),
            visit_status: VisitStatus::default(),
            created_at: chrono::Utc::now().timestamp_millis(),
        };
        customer.set_phone(phone);
        customer
    }

    /// Change the phone number.
    ///
    /// A blank or `wa.me` WhatsApp link follows the new number; a custom link
    /// is left alone.
    pub fn set_phone(&mut self, phone: impl Into<String>) {
        self.phone = phone.into();
        if self.whatsapp_link.trim().is_empty() || self.whatsapp_link.contains("wa.me") {
            self.whatsapp_link = whatsapp_link_for_phone(&self.phone);
        }
    }

    /// Check the fields the entry form requires.
    pub fn validate(&self) -> crate::Result<()> {
        if self.shop_name.trim().is_empty() {
            return Err(Error::InvalidInput("shop name is required".into()));
        }
        if self.phone.trim().is_empty() {
            return Err(Error::InvalidInput("phone is required".into()));
        }
        Ok(())
    }
}

/// Build a `wa.me` link from a phone number, keeping digits only.
///
/// # Examples
///
/// ```
/// use routebook_core::models::whatsapp_link_for_phone;
///
/// assert_eq!(
///     whatsapp_link_for_phone("+964 750-123 4567"),
///     "https://wa.me/9647501234567"
/// );
/// ```
#[must_use]
pub fn whatsapp_link_for_phone(phone: &str) -> String {
    let re = Regex::new(r"\D").expect("Invalid regex");
    format!("https://wa.me/{}", re.replace_all(phone, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_id_unique() {
        let id1 = CustomerId::new();
        let id2 = CustomerId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_customer_id_parse_keeps_foreign_ids() {
        let id: CustomerId = " 42 ".parse().unwrap();
        assert_eq!(id.as_str(), "42");
        assert!("   ".parse::<CustomerId>().is_err());
    }

    #[test]
    fn test_customer_new_defaults() {
        let customer = Customer::new("Corner Shop", "0750 123 4567");
        assert_eq!(customer.shop_name, "Corner Shop");
        assert_eq!(customer.visit_status, VisitStatus::NotDone);
        assert_eq!(customer.whatsapp_link, "https://wa.me/07501234567");
        assert!(customer.created_at > 0);
    }

    #[test]
    fn test_set_phone_updates_generated_link_only() {
        let mut customer = Customer::new("Shop", "111");
        customer.set_phone("222");
        assert_eq!(customer.whatsapp_link, "https://wa.me/222");

        customer.whatsapp_link = "https://chat.example.com/shop".to_string();
        customer.set_phone("333");
        assert_eq!(customer.whatsapp_link, "https://chat.example.com/shop");
    }

    #[test]
    fn test_validate_requires_shop_and_phone() {
        assert!(Customer::new("Shop", "123").validate().is_ok());
        assert!(Customer::new("  ", "123").validate().is_err());
        assert!(Customer::new("Shop", " ").validate().is_err());
    }

    #[test]
    fn test_serializes_camel_case() {
        let customer = Customer::new("Shop", "123");
        let json = serde_json::to_value(&customer).unwrap();
        assert!(json.get("shopName").is_some());
        assert!(json.get("visitStatus").is_some());
        assert!(json.get("shop_name").is_none());
    }
}
