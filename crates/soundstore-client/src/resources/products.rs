//! Product resource client.
//!
//! Product creation uploads images, so `POST /product` is multipart form
//! data with one `images` part per file; updates carry no images and go
//! out as plain JSON.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::accessor::PagedQuery;
use crate::client::ApiClient;
use crate::endpoints;
use crate::envelope::PageValue;
use crate::error::Result;

/// Stock state of a product.
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
pub enum ProductState {
    InStock = 1,
    OutOfStock = 2,
    Discontinued = 3,
}

impl ProductState {
    /// Numeric code the backend uses interchangeably with the name.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

/// One product image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub image_url: String,
}

/// One customer rating attached to a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub user_name: String,
    pub rating_point: f64,
    #[serde(default)]
    pub comment: String,
}

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub stock_quantity: i64,
    pub price: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub connectivity: String,
    #[serde(default)]
    pub special_features: String,
    #[serde(default)]
    pub frequency_response: String,
    #[serde(default)]
    pub sensitivity: String,
    #[serde(default)]
    pub battery_life: String,
    #[serde(default)]
    pub accessories_included: String,
    #[serde(default)]
    pub warranty: String,
    pub sub_category_id: i64,
    #[serde(default)]
    pub sub_category_name: String,
    pub category_id: i64,
    #[serde(default)]
    pub category_name: String,
    pub status: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub overall_rating_score: Option<f64>,
    #[serde(default)]
    pub rating_responses: Option<Vec<RatingResponse>>,
}

/// One image to upload with a new product.
#[derive(Debug, Clone, Serialize)]
pub struct NewProductImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl NewProductImage {
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
        }
    }
}

/// Payload for `POST /product` (multipart form data).
#[derive(Debug, Clone, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: String,
    pub stock_quantity: i64,
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: i64,
    pub kind: String,
    pub connectivity: String,
    pub special_features: String,
    pub frequency_response: String,
    pub sensitivity: String,
    pub battery_life: String,
    pub accessories_included: String,
    pub warranty: String,
    pub sub_category_id: i64,
    #[validate(length(min = 1, message = "At least one image is required"))]
    pub images: Vec<NewProductImage>,
}

impl NewProduct {
    /// Builds the multipart form, with text fields in the backend's field
    /// names and one `images` part per file.
    fn to_form(&self) -> Form {
        let mut form = Form::new()
            .text("name", self.name.clone())
            .text("description", self.description.clone())
            .text("stockQuantity", self.stock_quantity.to_string())
            .text("price", self.price.to_string())
            .text("type", self.kind.clone())
            .text("connectivity", self.connectivity.clone())
            .text("specialFeatures", self.special_features.clone())
            .text("frequencyResponse", self.frequency_response.clone())
            .text("sensitivity", self.sensitivity.clone())
            .text("batteryLife", self.battery_life.clone())
            .text("accessoriesIncluded", self.accessories_included.clone())
            .text("warranty", self.warranty.clone())
            .text("subCategoryId", self.sub_category_id.to_string());

        for image in &self.images {
            let part = Part::bytes(image.bytes.clone()).file_name(image.file_name.clone());
            form = form.part("images", part);
        }

        form
    }
}

/// Payload for `PUT /product/{id}` (JSON, no images).
#[derive(Debug, Clone, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    pub description: String,
    pub stock_quantity: i64,
    #[validate(range(min = 1, message = "Price must be positive"))]
    pub price: i64,
    #[serde(rename = "type")]
    pub kind: String,
    pub connectivity: String,
    pub special_features: String,
    pub frequency_response: String,
    pub sensitivity: String,
    pub battery_life: String,
    pub accessories_included: String,
    pub warranty: String,
    pub sub_category_id: i64,
    pub status: ProductState,
}

/// Client for product operations.
#[derive(Debug, Clone)]
pub struct ProductsClient {
    client: ApiClient,
}

impl ProductsClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Fetches one page of products.
    pub async fn page(&self, page_number: u32, page_size: u32) -> Result<PageValue<Product>> {
        self.client
            .get_value(&endpoints::products_page(page_number, page_size))
            .await
    }

    /// Fetches one product by id.
    pub async fn get(&self, id: i64) -> Result<Product> {
        self.client.get_value(&endpoints::product_by_id(id)).await
    }

    /// Creates a product from a multipart upload, returning the server's
    /// outcome message.
    pub async fn create(&self, product: &NewProduct) -> Result<String> {
        product.validate()?;
        self.client
            .post_multipart_message(&endpoints::product(), product.to_form())
            .await
    }

    /// Updates a product, returning the server's outcome message.
    pub async fn update(&self, id: i64, product: &UpdateProduct) -> Result<String> {
        product.validate()?;
        self.client
            .put_message(&endpoints::product_by_id(id), product)
            .await
    }

    /// Deletes a product, returning the server's outcome message.
    pub async fn delete(&self, id: i64) -> Result<String> {
        self.client
            .delete_message(&endpoints::product_by_id(id))
            .await
    }
}

/// Paginated accessor strategy for products.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProductQuery;

impl PagedQuery for ProductQuery {
    type Item = Product;

    const RESOURCE: &'static str = "products";

    fn path(&self, page_number: u32, page_size: u32) -> String {
        endpoints::products_page(page_number, page_size)
    }
}
