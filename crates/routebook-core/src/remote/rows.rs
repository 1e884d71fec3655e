//! Snake-case row shapes used by the remote tables.

use serde::{Deserialize, Deserializer, Serialize};

use crate::models::{Customer, Region, VisitStatus};

/// Row of the remote `customers` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRow {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub shop_name: Option<String>,
    #[serde(default)]
    pub manager_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub main_region: Option<String>,
    #[serde(default)]
    pub sub_region: Option<String>,
    #[serde(default)]
    pub whatsapp_link: Option<String>,
    #[serde(default)]
    pub map_link: Option<String>,
    #[serde(default)]
    pub visit_status: Option<String>,
    /// Filled in by the backend; never sent
    #[serde(default, skip_serializing)]
    pub created_at: Option<String>,
}

impl From<&Customer> for CustomerRow {
    fn from(customer: &Customer) -> Self {
        Self {
            id: customer.id.to_string(),
            shop_name: Some(customer.shop_name.clone()),
            manager_name: Some(customer.manager_name.clone()),
            phone: Some(customer.phone.clone()),
            main_region: Some(customer.main_region.clone()),
            sub_region: Some(customer.sub_region.clone()),
            whatsapp_link: Some(customer.whatsapp_link.clone()),
            map_link: Some(customer.map_link.clone()),
            visit_status: Some(customer.visit_status.label().to_string()),
            created_at: None,
        }
    }
}

impl CustomerRow {
    /// Convert to a local customer. Rows without a usable id are skipped.
    pub fn into_customer(self) -> Option<Customer> {
        let Ok(id) = self.id.parse() else {
            tracing::warn!("Skipping remote customer row without an id");
            return None;
        };
        let created_at = self
            .created_at
            .as_deref()
            .and_then(|raw| chrono::DateTime::parse_from_rfc3339(raw).ok())
            .map_or_else(
                || chrono::Utc::now().timestamp_millis(),
                |timestamp| timestamp.timestamp_millis(),
            );

        Some(Customer {
            id,
            shop_name: self.shop_name.unwrap_or_default(),
            manager_name: self.manager_name.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            main_region: self.main_region.unwrap_or_default(),
            sub_region: self.sub_region.unwrap_or_default(),
            whatsapp_link: self.whatsapp_link.unwrap_or_default(),
            map_link: self.map_link.unwrap_or_default(),
            visit_status: self
                .visit_status
                .map(VisitStatus::from)
                .unwrap_or_default(),
            created_at,
        })
    }
}

/// Row of the remote `regions` table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionRow {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub subregions: Option<Vec<String>>,
}

impl From<&Region> for RegionRow {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id.to_string(),
            name: Some(region.name.clone()),
            subregions: Some(region.subregions.clone()),
        }
    }
}

impl RegionRow {
    /// Convert to a local region. Rows without a usable id are skipped.
    pub fn into_region(self) -> Option<Region> {
        let Ok(id) = self.id.parse() else {
            tracing::warn!("Skipping remote region row without an id");
            return None;
        };
        Some(Region {
            id,
            name: self.name.unwrap_or_default(),
            subregions: self.subregions.unwrap_or_default(),
        })
    }
}

/// Remote ids may be text or numeric columns
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(id) => Ok(id),
        serde_json::Value::Number(id) => Ok(id.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {other}"
        ))),
    }
}
