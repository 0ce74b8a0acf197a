use std::sync::Arc;

use jiff::{SignedDuration, Timestamp};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::prelude::*;
use crate::session::evaluate;

async fn setup() -> (MockServer, ApiClient) {
    let server = MockServer::start().await;
    let config = ApiConfig::builder()
        .with_base_url(&server.uri())
        .expect("valid URL")
        .build()
        .expect("valid config");
    let client = ApiClient::new(config, Arc::new(MemoryCredentialStore::new())).expect("client");
    (server, client)
}

fn profile_json(role: &str) -> serde_json::Value {
    serde_json::json!({
        "id": "u1",
        "firstName": "Ada",
        "lastName": "Admin",
        "address": "1 Main St",
        "dateOfBirth": "1990-01-01",
        "email": "ada@soundstore.dev",
        "phoneNumber": "555-0100",
        "role": role
    })
}

fn envelope(value: serde_json::Value) -> serde_json::Value {
    serde_json::json!({"isSuccess": true, "message": "ok", "value": value})
}

fn category_page_json() -> serde_json::Value {
    envelope(serde_json::json!({
        "items": [
            {
                "id": 1,
                "name": "Headphones",
                "description": "Over-ear and in-ear",
                "subCategories": [],
                "createdAt": "2025-03-01T10:00:00Z",
                "updatedAt": null
            },
            {
                "id": 2,
                "name": "Speakers",
                "description": "",
                "subCategories": [],
                "createdAt": "2025-03-02T10:00:00Z",
                "updatedAt": "2025-04-01T08:30:00Z"
            }
        ],
        "pageNumber": 1,
        "pageSize": 10,
        "totalItems": 2,
        "totalPages": 1,
        "hasPreviousPage": false,
        "hasNextPage": false
    }))
}

#[tokio::test]
async fn test_login_stores_token_and_fetches_profile() {
    let (server, client) = setup().await;

    let mut login_value = profile_json("Admin");
    login_value["token"] = serde_json::json!("abc");

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .and(body_json(serde_json::json!({
            "email": "ada@soundstore.dev",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(login_value)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(profile_json("Admin"))))
        .mount(&server)
        .await;

    let before = Timestamp::now();
    let mut session = SessionManager::new(client);
    let user = session
        .login(&LoginRequest::new("ada@soundstore.dev", "secret"))
        .await
        .expect("login succeeds");

    assert_eq!(user.role, "Admin");
    assert_eq!(session.stored_token().as_deref(), Some("abc"));

    // Expiration lands at roughly now + 60 minutes.
    let expires_at = session.stored_expiration().expect("expiration stored");
    let ttl_secs = expires_at.as_second() - before.as_second();
    assert!((3590..=3610).contains(&ttl_secs), "unexpected TTL: {ttl_secs}s");

    assert!(session.is_authenticated());
    assert_eq!(evaluate(&mut session), GuardState::AuthenticatedAdmin);
}

#[tokio::test]
async fn test_login_rejected_by_server() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "isSuccess": false,
            "message": "Invalid email or password",
            "value": null
        })))
        .mount(&server)
        .await;

    let mut session = SessionManager::new(client);
    let err = session
        .login(&LoginRequest::new("ada@soundstore.dev", "wrong"))
        .await
        .expect_err("login rejected");

    assert!(matches!(err, Error::InvalidCredentials { .. }));
    assert!(session.stored_token().is_none());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_profile_failure_tears_down_session() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "isSuccess": false,
            "message": "Token is no longer valid",
            "value": null
        })))
        .mount(&server)
        .await;

    let store = Arc::clone(client.credentials());
    store.set(AUTH_TOKEN_KEY, "stale").expect("set token");
    store
        .set(
            AUTH_EXPIRATION_KEY,
            &(Timestamp::now() + SignedDuration::from_mins(30)).to_string(),
        )
        .expect("set expiration");

    let mut session = SessionManager::new(client);
    let err = session.refresh().await.expect_err("profile fetch fails");

    assert_eq!(err.user_message(), "Token is no longer valid");
    assert!(store.get(AUTH_TOKEN_KEY).is_none());
    assert!(store.get(AUTH_EXPIRATION_KEY).is_none());
    assert!(!session.is_authenticated());
}

#[tokio::test]
async fn test_expired_session_redirects_to_login_and_clears_slots() {
    let (_server, client) = setup().await;

    let store = Arc::clone(client.credentials());
    store.set(AUTH_TOKEN_KEY, "abc").expect("set token");
    store
        .set(
            AUTH_EXPIRATION_KEY,
            &(Timestamp::now() - SignedDuration::from_secs(5)).to_string(),
        )
        .expect("set expiration");

    let mut session = SessionManager::new(client);
    let state = evaluate(&mut session);

    assert_eq!(state, GuardState::Unauthenticated);
    assert_eq!(state.redirect(), Some("/login"));
    assert!(store.get(AUTH_TOKEN_KEY).is_none());
    assert!(store.get(AUTH_EXPIRATION_KEY).is_none());
}

#[tokio::test]
async fn test_non_admin_session_redirects_to_unauthorized() {
    let (server, client) = setup().await;

    let mut login_value = profile_json("Customer");
    login_value["token"] = serde_json::json!("abc");

    Mock::given(method("POST"))
        .and(path("/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(login_value)))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(profile_json("Customer"))))
        .mount(&server)
        .await;

    let mut session = SessionManager::new(client);
    session
        .login(&LoginRequest::new("ada@soundstore.dev", "secret"))
        .await
        .expect("login succeeds");

    let state = evaluate(&mut session);
    assert_eq!(state, GuardState::AuthenticatedNonAdmin);
    assert_eq!(state.redirect(), Some("/unauthorized"));
}

#[tokio::test]
async fn test_categories_page_fetch() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/categories/pageNumber/1/pageSize/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_page_json()))
        .mount(&server)
        .await;

    let mut accessor = PagedAccessor::new(client, CategoryQuery);
    accessor.fetch_page(1, 10).await.expect("valid request");

    assert_eq!(accessor.items().len(), 2);
    assert_eq!(accessor.items()[0].name, "Headphones");
    assert!(accessor.items()[0].updated_at.is_none());
    assert_eq!(accessor.page_info().total_items, 2);
    assert!(!accessor.page_info().has_next_page);
    assert!(accessor.error().is_none());
    assert!(!accessor.is_loading());
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_items() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/categories/pageNumber/1/pageSize/10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(category_page_json()))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/categories/pageNumber/1/pageSize/10"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .mount(&server)
        .await;

    let mut accessor = PagedAccessor::new(client, CategoryQuery);
    accessor.fetch_page(1, 10).await.expect("valid request");
    assert_eq!(accessor.items().len(), 2);

    accessor.fetch_page(1, 10).await.expect("valid request");

    assert_eq!(accessor.items().len(), 2, "items keep their last good value");
    assert!(accessor.error().is_some());
}

#[tokio::test]
async fn test_bearer_token_attached_to_list_requests() {
    let (server, client) = setup().await;

    client
        .credentials()
        .set(AUTH_TOKEN_KEY, "abc")
        .expect("set token");

    Mock::given(method("GET"))
        .and(path("/products/pageNumber/1/pageSize/5"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(serde_json::json!({
            "items": [],
            "pageNumber": 1,
            "pageSize": 5,
            "totalItems": 0,
            "totalPages": 0,
            "hasPreviousPage": false,
            "hasNextPage": false
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let products = ProductsClient::new(client);
    let page = products.page(1, 5).await.expect("page fetch succeeds");
    assert!(page.items.is_empty());
}

#[tokio::test]
async fn test_customer_status_patch_uses_query_string() {
    let (server, client) = setup().await;

    Mock::given(method("PATCH"))
        .and(path("/customer/c1"))
        .and(query_param("status", "Actived"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "isSuccess": true,
            "message": "Status updated"
        })))
        .mount(&server)
        .await;

    let customers = CustomersClient::new(client);
    let message = customers
        .update_status("c1", CustomerStatus::Actived)
        .await
        .expect("status update succeeds");

    assert_eq!(message, "Status updated");
}

#[tokio::test]
async fn test_product_create_uploads_multipart_form() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/product"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "isSuccess": true,
            "message": "Product created successfully"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let product = NewProduct {
        name: "Studio Monitor".to_string(),
        description: "Nearfield monitor".to_string(),
        stock_quantity: 4,
        price: 299,
        kind: "Speaker".to_string(),
        connectivity: "XLR".to_string(),
        special_features: String::new(),
        frequency_response: "45Hz-20kHz".to_string(),
        sensitivity: String::new(),
        battery_life: String::new(),
        accessories_included: String::new(),
        warranty: "2 years".to_string(),
        sub_category_id: 3,
        images: vec![NewProductImage::new("front.jpg", vec![0xff, 0xd8, 0xff])],
    };

    let products = ProductsClient::new(client);
    let message = products.create(&product).await.expect("create succeeds");

    assert_eq!(message, "Product created successfully");
}

#[tokio::test]
async fn test_create_category_surfaces_field_errors() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/category"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "isSuccess": false,
            "message": "Validation failed",
            "value": null,
            "errors": {"name": ["A category with this name already exists"]}
        })))
        .mount(&server)
        .await;

    let categories = CategoriesClient::new(client);
    let err = categories
        .create(&NewCategory::new("Headphones", None))
        .await
        .expect_err("create rejected");

    let fields = err.field_errors().expect("field errors present");
    assert_eq!(
        fields["name"],
        vec!["A category with this name already exists".to_string()]
    );
}
