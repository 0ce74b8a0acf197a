//! Endpoint paths for the catalog API.
//!
//! Every path the client talks to is built here, so the REST surface is
//! visible in one place. Paths are relative to the configured base URL.

use std::fmt::Display;

/// `POST /users/login`
pub fn login() -> String {
    "/users/login".to_string()
}

/// `GET /users/me`
pub fn me() -> String {
    "/users/me".to_string()
}

/// `GET /categories/pageNumber/{n}/pageSize/{s}`
pub fn categories_page(page_number: u32, page_size: u32) -> String {
    format!("/categories/pageNumber/{page_number}/pageSize/{page_size}")
}

/// `POST /category`
pub fn category() -> String {
    "/category".to_string()
}

/// `GET|PUT|DELETE /category/{id}`
pub fn category_by_id(id: i64) -> String {
    format!("/category/{id}")
}

/// `GET /customers/pageNumber/{n}/pageSize/{s}`
pub fn customers_page(page_number: u32, page_size: u32) -> String {
    format!("/customers/pageNumber/{page_number}/pageSize/{page_size}")
}

/// `GET /customers/{id}`
pub fn customer_by_id(id: impl Display) -> String {
    format!("/customers/{id}")
}

/// `PATCH /customer/{id}?status=`
pub fn customer_status(id: impl Display) -> String {
    format!("/customer/{id}")
}

/// `GET /products/pageNumber/{n}/pageSize/{s}`
pub fn products_page(page_number: u32, page_size: u32) -> String {
    format!("/products/pageNumber/{page_number}/pageSize/{page_size}")
}

/// `POST /product`
pub fn product() -> String {
    "/product".to_string()
}

/// `GET|PUT|DELETE /product/{id}`
pub fn product_by_id(id: i64) -> String {
    format!("/product/{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginated_paths() {
        assert_eq!(
            categories_page(1, 10),
            "/categories/pageNumber/1/pageSize/10"
        );
        assert_eq!(customers_page(3, 25), "/customers/pageNumber/3/pageSize/25");
        assert_eq!(products_page(2, 5), "/products/pageNumber/2/pageSize/5");
    }

    #[test]
    fn test_item_paths() {
        assert_eq!(category_by_id(42), "/category/42");
        assert_eq!(customer_by_id("a1b2"), "/customers/a1b2");
        assert_eq!(customer_status("a1b2"), "/customer/a1b2");
        assert_eq!(product_by_id(7), "/product/7");
    }
}
