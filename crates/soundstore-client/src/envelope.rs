//! Response envelope types for the catalog API.
//!
//! Every endpoint wraps its payload in `{isSuccess, message, value}`. A
//! response with `isSuccess=false` is a domain failure regardless of the
//! HTTP status code, and may carry a field-keyed `errors` map alongside
//! the general message.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Standard response wrapper used by every catalog API endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Whether the operation succeeded at the domain level.
    pub is_success: bool,
    /// Human-readable outcome message.
    #[serde(default)]
    pub message: String,
    /// Payload; absent or null on most failures and on bare mutations.
    #[serde(default)]
    pub value: Option<T>,
    /// Field-keyed validation errors, present on some rejected mutations.
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl<T> Envelope<T> {
    /// Extracts the payload, mapping `isSuccess=false` to a domain error.
    ///
    /// A success envelope with a missing `value` is treated as a malformed
    /// response rather than silently producing a default.
    pub fn into_value(self) -> Result<T> {
        match self.into_domain_result()? {
            Some(value) => Ok(value),
            None => Err(Error::api("Response envelope is missing a value")),
        }
    }

    /// Extracts the outcome message, mapping `isSuccess=false` to a domain
    /// error. Used for mutations whose envelope carries no payload.
    pub fn into_message(self) -> Result<String> {
        if self.is_success {
            Ok(self.message)
        } else {
            Err(domain_error(self.message, self.errors))
        }
    }

    fn into_domain_result(self) -> Result<Option<T>> {
        if self.is_success {
            Ok(self.value)
        } else {
            Err(domain_error(self.message, self.errors))
        }
    }
}

fn domain_error(message: String, errors: Option<BTreeMap<String, Vec<String>>>) -> Error {
    let message = if message.is_empty() {
        "The server reported a failure".to_string()
    } else {
        message
    };

    match errors {
        Some(fields) if !fields.is_empty() => Error::api_with_fields(message, fields),
        _ => Error::api(message),
    }
}

/// Wire shape of one page of a paginated list endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageValue<T> {
    pub items: Vec<T>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_items: u64,
    pub total_pages: u32,
    pub has_previous_page: bool,
    pub has_next_page: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_yields_value() {
        let raw = r#"{"isSuccess":true,"message":"ok","value":42}"#;
        let envelope: Envelope<i64> = serde_json::from_str(raw).expect("valid envelope");

        assert_eq!(envelope.into_value().expect("value present"), 42);
    }

    #[test]
    fn test_failure_envelope_is_domain_error() {
        let raw = r#"{"isSuccess":false,"message":"Category not found","value":null}"#;
        let envelope: Envelope<i64> = serde_json::from_str(raw).expect("valid envelope");

        let err = envelope.into_value().expect_err("domain failure");
        assert_eq!(err.user_message(), "Category not found");
    }

    #[test]
    fn test_failure_envelope_carries_field_errors() {
        let raw = r#"{
            "isSuccess": false,
            "message": "Validation failed",
            "value": null,
            "errors": {"name": ["Name is required"], "price": ["Price must be positive"]}
        }"#;
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(raw).expect("valid envelope");

        let err = envelope.into_message().expect_err("domain failure");
        let fields = err.field_errors().expect("field errors present");
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["name"], vec!["Name is required".to_string()]);
    }

    #[test]
    fn test_mutation_envelope_message_only() {
        let raw = r#"{"isSuccess":true,"message":"Category created successfully"}"#;
        let envelope: Envelope<serde_json::Value> =
            serde_json::from_str(raw).expect("valid envelope");

        assert_eq!(
            envelope.into_message().expect("success"),
            "Category created successfully"
        );
    }

    #[test]
    fn test_page_value_decodes() {
        let raw = r#"{
            "items": ["a", "b"],
            "pageNumber": 1,
            "pageSize": 10,
            "totalItems": 2,
            "totalPages": 1,
            "hasPreviousPage": false,
            "hasNextPage": false
        }"#;
        let page: PageValue<String> = serde_json::from_str(raw).expect("valid page");

        assert_eq!(page.items, vec!["a", "b"]);
        assert_eq!(page.total_pages, 1);
        assert!(!page.has_next_page);
    }
}
