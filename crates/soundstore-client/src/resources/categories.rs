//! Category resource client.
//!
//! Category timestamps are decoded leniently: the backend occasionally
//! returns malformed or missing dates, so an unusable `createdAt` falls
//! back to the current instant and an unusable `updatedAt` decodes as
//! absent rather than failing the whole page.

use jiff::Timestamp;
use jiff::civil::DateTime;
use jiff::tz::TimeZone;
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::accessor::PagedQuery;
use crate::client::ApiClient;
use crate::endpoints;
use crate::envelope::PageValue;
use crate::error::Result;

/// A sub-category nested under a [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategory {
    pub id: i64,
    pub name: String,
    pub category_id: i64,
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sub_categories: Vec<SubCategory>,
    #[serde(deserialize_with = "lenient_timestamp", default = "Timestamp::now")]
    pub created_at: Timestamp,
    #[serde(deserialize_with = "lenient_timestamp_opt", default)]
    pub updated_at: Option<Timestamp>,
}

/// Payload for `POST /category`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: String,
}

impl NewCategory {
    /// A missing description is sent as an empty string, not omitted.
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description: description.unwrap_or_default(),
        }
    }
}

/// Payload for `PUT /category/{id}`.
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategory {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: String,
}

/// Client for category operations.
#[derive(Debug, Clone)]
pub struct CategoriesClient {
    client: ApiClient,
}

impl CategoriesClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches one page of categories.
    pub async fn page(&self, page_number: u32, page_size: u32) -> Result<PageValue<Category>> {
        self.client
            .get_value(&endpoints::categories_page(page_number, page_size))
            .await
    }

    /// Fetches one category by id.
    pub async fn get(&self, id: i64) -> Result<Category> {
        self.client.get_value(&endpoints::category_by_id(id)).await
    }

    /// Creates a category, returning the server's outcome message.
    pub async fn create(&self, category: &NewCategory) -> Result<String> {
        category.validate()?;
        self.client
            .post_message(&endpoints::category(), category)
            .await
    }

    /// Updates a category, returning the server's outcome message.
    pub async fn update(&self, id: i64, category: &UpdateCategory) -> Result<String> {
        category.validate()?;
        self.client
            .put_message(&endpoints::category_by_id(id), category)
            .await
    }

    /// Deletes a category, returning the server's outcome message.
    pub async fn delete(&self, id: i64) -> Result<String> {
        self.client
            .delete_message(&endpoints::category_by_id(id))
            .await
    }
}

/// Paginated accessor strategy for categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryQuery;

impl PagedQuery for CategoryQuery {
    type Item = Category;

    const RESOURCE: &'static str = "categories";

    fn path(&self, page_number: u32, page_size: u32) -> String {
        endpoints::categories_page(page_number, page_size)
    }
}

fn parse_lenient(raw: &str) -> Option<Timestamp> {
    if let Ok(ts) = raw.parse::<Timestamp>() {
        return Some(ts);
    }

    // Timestamps without an offset are taken as UTC.
    raw.parse::<DateTime>()
        .ok()
        .and_then(|dt| dt.to_zoned(TimeZone::UTC).ok())
        .map(|zoned| zoned.timestamp())
}

fn lenient_timestamp<'de, D>(deserializer: D) -> std::result::Result<Timestamp, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(parse_lenient)
        .unwrap_or_else(Timestamp::now))
}

fn lenient_timestamp_opt<'de, D>(deserializer: D) -> std::result::Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_lenient))
}
