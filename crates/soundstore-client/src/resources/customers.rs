//! Customer resource client.

use serde::{Deserialize, Serialize};

use crate::accessor::PagedQuery;
use crate::client::ApiClient;
use crate::endpoints;
use crate::envelope::PageValue;
use crate::error::Result;

/// Account state of a customer, as stored by the backend.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum::Display,
    strum::EnumString,
    strum::VariantNames,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum CustomerStatus {
    Actived = 1,
    Inactived = 2,
    Deleted = 3,
}

impl CustomerStatus {
    /// Numeric code the backend uses interchangeably with the name.
    pub fn code(&self) -> u8 {
        *self as u8
    }

    /// Human-readable label for display.
    pub fn label(&self) -> &'static str {
        match self {
            CustomerStatus::Actived => "Active",
            CustomerStatus::Inactived => "Inactive",
            CustomerStatus::Deleted => "Deleted",
        }
    }
}

/// Maps a raw status value (numeric code or backend name) to a display label.
pub fn status_label(raw: &str) -> &'static str {
    match raw {
        "1" | "Actived" => "Active",
        "2" | "Inactived" => "Inactive",
        "3" | "Deleted" => "Deleted",
        _ => "Unknown",
    }
}

/// A customer account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub address: String,
    pub email: String,
    #[serde(default)]
    pub date_of_birth: String,
    pub status: String,
}

impl Customer {
    /// Display label for this customer's raw status.
    pub fn status_label(&self) -> &'static str {
        status_label(&self.status)
    }
}

/// Joins first and last name, trimming when either is empty.
pub(crate) fn full_name(first_name: &str, last_name: &str) -> String {
    format!("{first_name} {last_name}").trim().to_string()
}

/// Client for customer operations.
#[derive(Debug, Clone)]
pub struct CustomersClient {
    client: ApiClient,
}

impl CustomersClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches one page of customers.
    pub async fn page(&self, page_number: u32, page_size: u32) -> Result<PageValue<Customer>> {
        self.client
            .get_value(&endpoints::customers_page(page_number, page_size))
            .await
    }

    /// Fetches one customer by id.
    pub async fn get(&self, id: &str) -> Result<Customer> {
        self.client.get_value(&endpoints::customer_by_id(id)).await
    }

    /// Updates a customer's account status via
    /// `PATCH /customer/{id}?status=`, returning the server's outcome
    /// message.
    pub async fn update_status(&self, id: &str, status: CustomerStatus) -> Result<String> {
        self.client
            .patch_message(
                &endpoints::customer_status(id),
                &[("status", status.to_string())],
            )
            .await
    }
}

/// Paginated accessor strategy for customers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerQuery;

impl PagedQuery for CustomerQuery {
    type Item = Customer;

    const RESOURCE: &'static str = "customers";

    fn path(&self, page_number: u32, page_size: u32) -> String {
        endpoints::customers_page(page_number, page_size)
    }

    fn prepare(&self, mut customer: Customer) -> Customer {
        if customer.full_name.trim().is_empty() {
            customer.full_name = full_name(&customer.first_name, &customer.last_name);
        }
        customer
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_status_label_mapping() {
        assert_eq!(status_label("1"), "Active");
        assert_eq!(status_label("Actived"), "Active");
        assert_eq!(status_label("2"), "Inactive");
        assert_eq!(status_label("Inactived"), "Inactive");
        assert_eq!(status_label("3"), "Deleted");
        assert_eq!(status_label("Deleted"), "Deleted");
        assert_eq!(status_label("banana"), "Unknown");
        assert_eq!(status_label(""), "Unknown");
    }

    #[test]
    fn test_status_enum_round_trip() {
        assert_eq!(CustomerStatus::Actived.to_string(), "Actived");
        assert_eq!(CustomerStatus::Actived.code(), 1);
        assert_eq!(CustomerStatus::Deleted.label(), "Deleted");
        assert_eq!(
            CustomerStatus::from_str("inactived").expect("parseable"),
            CustomerStatus::Inactived
        );
        assert!(CustomerStatus::from_str("gone").is_err());
    }

    #[test]
    fn test_full_name_trims_missing_parts() {
        assert_eq!(full_name("Ada", "Lovelace"), "Ada Lovelace");
        assert_eq!(full_name("Ada", ""), "Ada");
        assert_eq!(full_name("", "Lovelace"), "Lovelace");
        assert_eq!(full_name("", ""), "");
    }

    #[test]
    fn test_prepare_fills_blank_full_name() {
        let raw = r#"{
            "id": "c1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "fullName": "",
            "email": "ada@example.com",
            "status": "1"
        }"#;
        let customer: Customer = serde_json::from_str(raw).expect("valid customer");
        let customer = CustomerQuery.prepare(customer);

        assert_eq!(customer.full_name, "Ada Lovelace");
        assert_eq!(customer.status_label(), "Active");
    }

    #[test]
    fn test_prepare_keeps_server_full_name() {
        let raw = r#"{
            "id": "c1",
            "firstName": "Ada",
            "lastName": "Lovelace",
            "fullName": "Countess Ada Lovelace",
            "email": "ada@example.com",
            "status": "Actived"
        }"#;
        let customer: Customer = serde_json::from_str(raw).expect("valid customer");
        let customer = CustomerQuery.prepare(customer);

        assert_eq!(customer.full_name, "Countess Ada Lovelace");
    }
}
