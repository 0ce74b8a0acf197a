//! Convenience re-exports for downstream crates.

pub use crate::accessor::{FetchTicket, PagedAccessor, PagedQuery};
pub use crate::client::ApiClient;
pub use crate::config::{ApiBuilder, ApiConfig};
pub use crate::envelope::{Envelope, PageValue};
pub use crate::error::{Error, Result};
pub use crate::page::{PageInfo, PageItem, page_items};
pub use crate::resources::{
    CategoriesClient, Category, CategoryQuery, Customer, CustomerQuery, CustomerStatus,
    CustomersClient, NewCategory, NewProduct, NewProductImage, Product, ProductQuery,
    ProductState, ProductsClient, SubCategory, UpdateCategory, UpdateProduct, status_label,
};
pub use crate::session::{
    ADMIN_ROLE, AUTH_EXPIRATION_KEY, AUTH_TOKEN_KEY, CredentialStore, FileCredentialStore,
    GuardState, LoginRequest, MemoryCredentialStore, SESSION_TTL, SessionManager, User, evaluate,
    evaluate_at,
};
