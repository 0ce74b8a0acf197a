//! Typed resource clients for the catalog API.
//!
//! Each resource gets a thin client over the shared [`ApiClient`] for its
//! one-shot operations, plus a [`PagedQuery`] implementation for use with
//! the generic paginated accessor. Mutations never patch a cached page;
//! callers refetch after a successful mutation.
//!
//! [`ApiClient`]: crate::ApiClient
//! [`PagedQuery`]: crate::PagedQuery

pub mod categories;
pub mod customers;
pub mod products;

pub use categories::{
    CategoriesClient, Category, CategoryQuery, NewCategory, SubCategory, UpdateCategory,
};
pub use customers::{Customer, CustomerQuery, CustomerStatus, CustomersClient, status_label};
pub use products::{
    NewProduct, NewProductImage, Product, ProductImage, ProductQuery, ProductState,
    ProductsClient, RatingResponse, UpdateProduct,
};
