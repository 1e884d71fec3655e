//! Customer list filtering.
//!
//! Mirrors the filters of the customer list view: exact region, sub-region
//! and status matches, plus a free-text query.

use crate::models::{Customer, VisitStatus};

/// Criteria for narrowing the customer list. Unset criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFilter {
    pub main_region: Option<String>,
    pub sub_region: Option<String>,
    pub status: Option<VisitStatus>,
    /// Substring of the shop name, manager name or phone
    pub query: Option<String>,
}

impl CustomerFilter {
    /// Check whether no criterion is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Check whether a customer satisfies every set criterion
    pub fn matches(&self, customer: &Customer) -> bool {
        if let Some(region) = &self.main_region {
            if customer.main_region != *region {
                return false;
            }
        }
        if let Some(sub_region) = &self.sub_region {
            if customer.sub_region != *sub_region {
                return false;
            }
        }
        if let Some(status) = self.status {
            if customer.visit_status != status {
                return false;
            }
        }

        match self.query.as_deref().map(str::trim) {
            Some(query) if !query.is_empty() => {
                let needle = query.to_lowercase();
                [&customer.shop_name, &customer.manager_name, &customer.phone]
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            }
            _ => true,
        }
    }

    /// Keep the customers that match, preserving order
    pub fn apply(&self, customers: Vec<Customer>) -> Vec<Customer> {
        if self.is_empty() {
            return customers;
        }
        customers
            .into_iter()
            .filter(|customer| self.matches(customer))
            .collect()
    }
}
