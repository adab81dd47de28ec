// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::time::Duration;

use axum::{
    http::{HeaderValue, StatusCode},
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::CorsOrigins,
    models::{
        CartItemView, CartLine, CartView, Category, NewProduct, Order, OrderItem, OrderStatus,
        Product, User, WishlistView,
    },
    state::AppState,
};

pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod paypal;
pub mod products;
pub mod seed;
pub mod wishlist;

/// All routes, with OpenAPI docs at `/docs`. Middleware is added separately
/// by [`with_middleware`].
pub fn router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/me", get(auth::me))
        .route(
            "/products",
            get(products::list_products).post(products::create_product),
        )
        .route("/products/{product_id}", get(products::get_product))
        .route("/categories", get(products::list_categories))
        .route("/cart", get(cart::get_cart).post(cart::add_to_cart))
        .route(
            "/cart/{product_id}",
            put(cart::update_cart_item).delete(cart::remove_from_cart),
        )
        .route("/wishlist", get(wishlist::get_wishlist))
        .route(
            "/wishlist/{product_id}",
            post(wishlist::add_to_wishlist).delete(wishlist::remove_from_wishlist),
        )
        .route("/orders", get(orders::list_orders).post(orders::create_order))
        .route("/paypal/create-order", post(paypal::create_remote_order))
        .route("/paypal/capture-order", post(paypal::capture_remote_order))
        .route("/seed", post(seed::seed));

    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .nest("/api", api_routes)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
}

/// Wrap `router` with CORS, request ids, tracing and a per-request timeout.
pub fn with_middleware(router: Router, cors: &CorsOrigins, request_timeout: Duration) -> Router {
    // Outermost layer is added last.
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors_layer(cors))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::permissive(),
        CorsOrigins::List(list) => {
            let values: Vec<HeaderValue> = list
                .iter()
                .filter_map(|origin| match HeaderValue::from_str(origin) {
                    Ok(value) => Some(value),
                    Err(_) => {
                        tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(values))
                .allow_methods(Any)
                .allow_headers(Any)
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        health::liveness,
        health::readiness,
        auth::register,
        auth::login,
        auth::me,
        products::list_products,
        products::get_product,
        products::create_product,
        products::list_categories,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_from_cart,
        wishlist::get_wishlist,
        wishlist::add_to_wishlist,
        wishlist::remove_from_wishlist,
        orders::list_orders,
        orders::create_order,
        paypal::create_remote_order,
        paypal::capture_remote_order,
        seed::seed
    ),
    components(
        schemas(
            User,
            Product,
            NewProduct,
            Category,
            CartLine,
            CartItemView,
            CartView,
            WishlistView,
            Order,
            OrderItem,
            OrderStatus,
            auth::RegisterRequest,
            auth::LoginRequest,
            auth::TokenResponse,
            cart::AddToCartRequest,
            cart::MessageResponse,
            orders::CreateOrderRequest,
            paypal::RemoteOrderResponse,
            paypal::CaptureResponse,
            seed::SeedResponse,
            health::ReadyResponse,
            health::HealthChecks,
            health::HealthResponse
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness and readiness probes"),
        (name = "Auth", description = "Registration, login and sessions"),
        (name = "Catalog", description = "Products, categories and demo data"),
        (name = "Cart", description = "Per-user shopping cart"),
        (name = "Wishlist", description = "Per-user wishlist"),
        (name = "Orders", description = "Order placement and history"),
        (name = "Payments", description = "PayPal checkout")
    )
)]
struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{
        body::{to_bytes, Body},
        http::{Method, Request},
    };
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::auth::{AccessPolicy, Capability, SessionIssuer};
    use crate::payments::{CheckoutGateway, GatewayFuture, PaymentAdapter};
    use crate::storage::{
        Collection, Document, DocumentStore, MemoryStore, StorageError, StorageResult, UpdateFn,
    };

    /// Memory store whose health check always fails.
    struct UnhealthyStore {
        inner: MemoryStore,
    }

    impl DocumentStore for UnhealthyStore {
        fn find(&self, collection: Collection, id: &str) -> StorageResult<Option<Document>> {
            self.inner.find(collection, id)
        }

        fn insert(&self, collection: Collection, id: &str, document: Document) -> StorageResult<()> {
            self.inner.insert(collection, id, document)
        }

        fn update(
            &self,
            collection: Collection,
            id: &str,
            apply: &mut UpdateFn<'_>,
        ) -> StorageResult<Option<Document>> {
            self.inner.update(collection, id, apply)
        }

        fn scan(&self, collection: Collection) -> StorageResult<Vec<Document>> {
            self.inner.scan(collection)
        }

        fn count(&self, collection: Collection) -> StorageResult<usize> {
            self.inner.count(collection)
        }

        fn health_check(&self) -> StorageResult<()> {
            Err(StorageError::Io(std::io::Error::other("disk unavailable")))
        }
    }

    #[derive(Default)]
    struct FakeGateway {
        created: Mutex<Vec<(String, Decimal)>>,
    }

    impl CheckoutGateway for FakeGateway {
        fn create_remote_order<'a>(
            &'a self,
            reference_id: &'a str,
            total: Decimal,
        ) -> GatewayFuture<'a, String> {
            self.created
                .lock()
                .unwrap()
                .push((reference_id.to_string(), total));
            Box::pin(async { Ok("PAYID-1".to_string()) })
        }

        fn capture_remote_order<'a>(
            &'a self,
            remote_order_id: &'a str,
        ) -> GatewayFuture<'a, String> {
            Box::pin(async move { Ok(format!("CAP-{remote_order_id}")) })
        }
    }

    struct DenyAll;

    impl AccessPolicy for DenyAll {
        fn allows(&self, _user: &User, _capability: Capability) -> bool {
            false
        }
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn register(app: &Router, email: &str) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": email, "name": "Tester", "password": "hunter2"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["access_token"].as_str().unwrap().to_string()
    }

    async fn create_product(app: &Router, token: &str, name: &str, price: f64) -> String {
        let (status, body) = send(
            app,
            Method::POST,
            "/api/products",
            Some(token),
            Some(json!({
                "name": name,
                "description": "Test toy",
                "price": price,
                "category": "Educational",
                "stock": 5,
                "image": "https://example.com/toy.png"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn checkout_flow_marks_order_paid() {
        let gateway = Arc::new(FakeGateway::default());
        let state = AppState::default().with_payments(PaymentAdapter::new(gateway.clone()));
        let app = router(state);

        let token = register(&app, "buyer@example.com").await;
        let product_id = create_product(&app, &token, "Robot", 10.0).await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/cart",
            Some(&token),
            Some(json!({"product_id": product_id, "quantity": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Item added to cart");

        let (_, cart) = send(&app, Method::GET, "/api/cart", Some(&token), None).await;
        assert_eq!(cart["items"][0]["quantity"], 2);
        assert_eq!(cart["items"][0]["product"]["name"], "Robot");

        let (status, order) = send(
            &app,
            Method::POST,
            "/api/orders",
            Some(&token),
            Some(json!({
                "items": [{"product_id": product_id, "name": "Robot", "price": 10.0, "quantity": 2}],
                "shipping_address": {"street": "1 Main St", "city": "Springfield"}
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{order}");
        assert_eq!(order["total"].as_f64(), Some(20.0));
        assert_eq!(order["status"], "pending");
        assert_eq!(order["shipping_address"]["city"], "Springfield");
        let order_id = order["id"].as_str().unwrap().to_string();

        let (_, cart) = send(&app, Method::GET, "/api/cart", Some(&token), None).await;
        assert_eq!(cart["items"].as_array().unwrap().len(), 0);

        let (status, remote) = send(
            &app,
            Method::POST,
            &format!("/api/paypal/create-order?order_id={order_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(remote["id"], "PAYID-1");
        assert_eq!(
            gateway.created.lock().unwrap().as_slice(),
            &[(order_id.clone(), Decimal::new(20, 0))]
        );

        let (status, capture) = send(
            &app,
            Method::POST,
            &format!("/api/paypal/capture-order?paypal_order_id=PAYID-1&order_id={order_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(capture["status"], "success");
        assert_eq!(capture["payment_id"], "PAYID-1");
        assert_eq!(capture["capture_id"], "CAP-PAYID-1");

        let (_, orders) = send(&app, Method::GET, "/api/orders", Some(&token), None).await;
        assert_eq!(orders[0]["status"], "paid");
        assert_eq!(orders[0]["payment_id"], "PAYID-1");
    }

    #[tokio::test]
    async fn order_total_uses_submitted_prices() {
        let app = router(AppState::default());
        let token = register(&app, "pricing@example.com").await;
        let product_id = create_product(&app, &token, "Kite", 10.0).await;

        let (_, order) = send(
            &app,
            Method::POST,
            "/api/orders",
            Some(&token),
            Some(json!({
                "items": [{"product_id": product_id, "name": "Kite", "price": 1.5, "quantity": 3}],
                "shipping_address": {}
            })),
        )
        .await;
        assert_eq!(order["total"].as_f64(), Some(4.5));
    }

    #[tokio::test]
    async fn registration_and_login() {
        let app = router(AppState::default());
        register(&app, "ada@example.com").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/register",
            None,
            Some(json!({"email": "ada@example.com", "name": "Ada", "password": "other"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Email already registered");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "ada@example.com", "password": "wrong"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Incorrect email or password");

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({"email": "ada@example.com", "password": "hunter2"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["token_type"], "bearer");
        assert!(body["user"].get("password_hash").is_none());

        let token = body["access_token"].as_str().unwrap();
        let (status, me) = send(&app, Method::GET, "/api/auth/me", Some(token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(me["email"], "ada@example.com");
    }

    #[tokio::test]
    async fn protected_routes_reject_missing_and_spliced_tokens() {
        let app = router(AppState::default());
        let first = register(&app, "one@example.com").await;
        let second = register(&app, "two@example.com").await;

        let (status, body) = send(&app, Method::GET, "/api/cart", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "missing_auth_header");

        // Second user's claims under the first user's signature.
        let a: Vec<&str> = first.split('.').collect();
        let b: Vec<&str> = second.split('.').collect();
        let spliced = format!("{}.{}.{}", a[0], b[1], a[2]);

        let (status, body) = send(&app, Method::GET, "/api/auth/me", Some(&spliced), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error_code"], "invalid_token");
    }

    #[tokio::test]
    async fn cart_quantities_accumulate_and_validate() {
        let app = router(AppState::default());
        let token = register(&app, "cart@example.com").await;
        let product_id = create_product(&app, &token, "Yo-yo", 3.0).await;

        for quantity in [2, 3] {
            send(
                &app,
                Method::POST,
                "/api/cart",
                Some(&token),
                Some(json!({"product_id": product_id, "quantity": quantity})),
            )
            .await;
        }
        let (_, cart) = send(&app, Method::GET, "/api/cart", Some(&token), None).await;
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);
        assert_eq!(cart["items"][0]["quantity"], 5);

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/cart",
            Some(&token),
            Some(json!({"product_id": product_id, "quantity": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/cart",
            Some(&token),
            Some(json!({"product_id": "no-such-product"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Product not found");

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/api/cart/{product_id}?quantity=7"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Cart updated");
        let (_, cart) = send(&app, Method::GET, "/api/cart", Some(&token), None).await;
        assert_eq!(cart["items"][0]["quantity"], 7);

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/api/cart/{product_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = send(
            &app,
            Method::DELETE,
            "/api/cart/not-in-cart",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Item removed from cart");
        let (_, cart) = send(&app, Method::GET, "/api/cart", Some(&token), None).await;
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn wishlist_add_and_remove() {
        let app = router(AppState::default());
        let token = register(&app, "wish@example.com").await;
        let product_id = create_product(&app, &token, "Puzzle", 12.0).await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/wishlist/missing-product",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        for _ in 0..2 {
            let (status, body) = send(
                &app,
                Method::POST,
                &format!("/api/wishlist/{product_id}"),
                Some(&token),
                None,
            )
            .await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["message"], "Item added to wishlist");
        }

        let (_, wishlist) = send(&app, Method::GET, "/api/wishlist", Some(&token), None).await;
        assert_eq!(wishlist["items"], json!([product_id]));
        assert_eq!(wishlist["products"][0]["name"], "Puzzle");

        let (_, body) = send(
            &app,
            Method::DELETE,
            &format!("/api/wishlist/{product_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(body["message"], "Item removed from wishlist");
        let (_, wishlist) = send(&app, Method::GET, "/api/wishlist", Some(&token), None).await;
        assert_eq!(wishlist["items"], json!([]));
    }

    #[tokio::test]
    async fn seeding_is_idempotent_and_filters_apply() {
        let app = router(AppState::default());

        let (status, body) = send(&app, Method::POST, "/api/seed", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Database seeded successfully");
        assert_eq!(body["products"], 8);
        assert_eq!(body["categories"], 6);

        let (_, body) = send(&app, Method::POST, "/api/seed", None, None).await;
        assert_eq!(body, json!({"message": "Database already seeded"}));

        let (_, products) = send(&app, Method::GET, "/api/products", None, None).await;
        assert_eq!(products.as_array().unwrap().len(), 8);

        let (_, categories) = send(&app, Method::GET, "/api/categories", None, None).await;
        assert_eq!(categories.as_array().unwrap().len(), 6);

        let (_, puzzles) = send(&app, Method::GET, "/api/products?category=Puzzles", None, None).await;
        let puzzles = puzzles.as_array().unwrap();
        assert!(!puzzles.is_empty());
        assert!(puzzles.iter().all(|p| p["category"] == "Puzzles"));

        let (_, featured) = send(&app, Method::GET, "/api/products?featured=true", None, None).await;
        let featured = featured.as_array().unwrap();
        assert!(!featured.is_empty());
        assert!(featured.iter().all(|p| p["featured"] == true));

        let id = products[0]["id"].as_str().unwrap();
        let (status, product) =
            send(&app, Method::GET, &format!("/api/products/{id}"), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(product["id"], id);

        let (status, _) = send(&app, Method::GET, "/api/products/unknown", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn checkout_requires_configured_gateway() {
        let app = router(AppState::default());
        let token = register(&app, "nopay@example.com").await;

        let (status, body) = send(
            &app,
            Method::POST,
            "/api/paypal/create-order?order_id=whatever",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"], "PayPal integration not configured");

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/paypal/capture-order?paypal_order_id=X&order_id=Y",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn remote_order_for_foreign_order_is_not_found() {
        let state = AppState::default()
            .with_payments(PaymentAdapter::new(Arc::new(FakeGateway::default())));
        let app = router(state);
        let owner = register(&app, "owner@example.com").await;
        let other = register(&app, "other@example.com").await;

        let (_, order) = send(
            &app,
            Method::POST,
            "/api/orders",
            Some(&owner),
            Some(json!({"items": [], "shipping_address": {}})),
        )
        .await;
        let order_id = order["id"].as_str().unwrap();

        let (status, body) = send(
            &app,
            Method::POST,
            &format!("/api/paypal/create-order?order_id={order_id}"),
            Some(&other),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Order not found");
    }

    #[tokio::test]
    async fn malformed_bodies_are_bad_requests() {
        let app = router(AppState::default());
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/auth/login")
            .header("Content-Type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn catalog_management_follows_policy() {
        let state = AppState::default().with_policy(Arc::new(DenyAll));
        let app = router(state);
        let token = register(&app, "denied@example.com").await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/products",
            Some(&token),
            Some(json!({
                "name": "Drum",
                "description": "Loud",
                "price": 9.99,
                "category": "Music",
                "stock": 1,
                "image": "drum.png"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn negative_prices_are_rejected() {
        let app = router(AppState::default());
        let token = register(&app, "neg@example.com").await;

        let (status, _) = send(
            &app,
            Method::POST,
            "/api/products",
            Some(&token),
            Some(json!({
                "name": "Refund",
                "description": "",
                "price": -1.0,
                "category": "Misc",
                "stock": 1,
                "image": ""
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_and_docs_are_served() {
        let app = router(AppState::default());

        let (status, body) = send(&app, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["checks"]["store"], "ok");
        assert_eq!(body["checks"]["payments"], "disabled");

        let (status, body) = send(&app, Method::GET, "/health/live", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");

        let (status, doc) = send(&app, Method::GET, "/api-doc/openapi.json", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"].get("/api/cart").is_some());
        assert!(doc["components"]["securitySchemes"].get("bearer_auth").is_some());
    }

    #[tokio::test]
    async fn failing_store_reports_degraded_health() {
        let state = AppState::new(
            Arc::new(UnhealthyStore {
                inner: MemoryStore::new(),
            }),
            SessionIssuer::ephemeral(),
        );
        let app = router(state);

        for path in ["/health", "/health/ready"] {
            let (status, body) = send(&app, Method::GET, path, None, None).await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert_eq!(body["status"], "degraded");
            assert_eq!(body["checks"]["store"], "unavailable");
        }

        let (status, _) = send(&app, Method::GET, "/health/live", None, None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn slow_requests_time_out_with_408() {
        let slow = Router::new().route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "late"
            }),
        );
        let app = with_middleware(slow, &CorsOrigins::Any, Duration::from_millis(20));

        let request = Request::builder().uri("/slow").body(Body::empty()).unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn middleware_assigns_request_ids() {
        let app = with_middleware(
            router(AppState::default()),
            &CorsOrigins::List(vec!["https://shop.example".to_string()]),
            Duration::from_secs(5),
        );

        let request = Request::builder()
            .uri("/health/live")
            .header("Origin", "https://shop.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
        assert_eq!(
            response.headers().get("access-control-allow-origin").unwrap(),
            "https://shop.example"
        );
    }
}
