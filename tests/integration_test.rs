use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};
use url::Url;

use inventory_console::clients::{AuthForm, AuthMode, ScreenHandle};
use inventory_console::framework::{EntityId, SessionMode, SyncError};
use inventory_console::lifecycle::{AdminConsole, ConsoleConfig};
use inventory_console::navigation::Route;

/// One request as the fake API saw it.
#[derive(Debug, Clone, PartialEq)]
struct Seen {
    method: &'static str,
    path: String,
    body: Option<Value>,
}

#[derive(Default)]
struct Store {
    collections: HashMap<&'static str, Vec<Value>>,
    passwords: HashMap<String, String>,
    next_id: u64,
    log: Vec<Seen>,
    fail_next: Option<StatusCode>,
}

#[derive(Clone, Default)]
struct Api(Arc<Mutex<Store>>);

impl Api {
    fn with<R>(&self, f: impl FnOnce(&mut Store) -> R) -> R {
        f(&mut self.0.lock().unwrap())
    }

    fn seed_product(&self, name: &str, price: Value, quantity: u64) -> u64 {
        self.with(|store| {
            store.next_id += 1;
            let id = store.next_id;
            store.collections.entry("products").or_default().push(json!({
                "id": id,
                "name": name,
                "description": format!("{} description", name),
                "price": price,
                "quantity": quantity,
            }));
            id
        })
    }

    fn fail_next(&self, status: StatusCode) {
        self.with(|store| store.fail_next = Some(status));
    }

    fn log(&self) -> Vec<Seen> {
        self.with(|store| store.log.clone())
    }

    fn clear_log(&self) {
        self.with(|store| store.log.clear());
    }
}

impl Store {
    fn record(&mut self, method: &'static str, path: String, body: Option<Value>) -> Option<StatusCode> {
        self.log.push(Seen { method, path, body });
        self.fail_next.take()
    }

    fn items(&mut self, collection: &'static str) -> &mut Vec<Value> {
        self.collections.entry(collection).or_default()
    }
}

fn list(api: &Api, collection: &'static str) -> Response {
    api.with(|store| {
        if let Some(status) = store.record("GET", format!("/api/{}", collection), None) {
            return status.into_response();
        }
        Json(store.items(collection).clone()).into_response()
    })
}

fn create(api: &Api, collection: &'static str, mut body: Value) -> Response {
    api.with(|store| {
        if let Some(status) = store.record("POST", format!("/api/{}", collection), Some(body.clone())) {
            return status.into_response();
        }
        store.next_id += 1;
        body["id"] = json!(store.next_id);
        store.items(collection).push(body.clone());
        (StatusCode::CREATED, Json(body)).into_response()
    })
}

fn replace(api: &Api, collection: &'static str, id: u64, body: Value) -> Response {
    api.with(|store| {
        let path = format!("/api/{}/{}", collection, id);
        if let Some(status) = store.record("PUT", path, Some(body.clone())) {
            return status.into_response();
        }
        let mut entity = body;
        if collection == "users" {
            let username = entity["username"].as_str().unwrap_or_default().to_string();
            let password = entity["password"].as_str().unwrap_or_default().to_string();
            store.passwords.insert(username.clone(), password);
            entity = json!({ "username": username });
        }
        entity["id"] = json!(id);
        match store.items(collection).iter_mut().find(|item| item["id"] == json!(id)) {
            Some(slot) => {
                *slot = entity.clone();
                Json(entity).into_response()
            }
            None => StatusCode::NOT_FOUND.into_response(),
        }
    })
}

fn remove(api: &Api, collection: &'static str, id: u64) -> Response {
    api.with(|store| {
        if let Some(status) = store.record("DELETE", format!("/api/{}/{}", collection, id), None) {
            return status.into_response();
        }
        let items = store.items(collection);
        let before = items.len();
        items.retain(|item| item["id"] != json!(id));
        if items.len() == before {
            StatusCode::NOT_FOUND.into_response()
        } else {
            StatusCode::NO_CONTENT.into_response()
        }
    })
}

fn signup(api: &Api, body: Value) -> Response {
    api.with(|store| {
        if let Some(status) = store.record("POST", "/api/signup".into(), Some(body.clone())) {
            return status.into_response();
        }
        let username = body["username"].as_str().unwrap_or_default().to_string();
        let password = body["password"].as_str().unwrap_or_default().to_string();
        store.next_id += 1;
        let user = json!({ "id": store.next_id, "username": username });
        store.items("users").push(user);
        store.passwords.insert(username, password);
        (StatusCode::CREATED, Json(json!({ "message": "User registered" }))).into_response()
    })
}

fn login(api: &Api, body: Value) -> Response {
    api.with(|store| {
        if let Some(status) = store.record("POST", "/api/login".into(), Some(body.clone())) {
            return status.into_response();
        }
        let username = body["username"].as_str().unwrap_or_default();
        let password = body["password"].as_str().unwrap_or_default();
        if store.passwords.get(username).map(String::as_str) == Some(password) {
            Json(json!({ "token": "not-used" })).into_response()
        } else {
            StatusCode::UNAUTHORIZED.into_response()
        }
    })
}

fn router(api: Api) -> Router {
    Router::new()
        .route(
            "/api/products",
            get(|State(api): State<Api>| async move { list(&api, "products") })
                .post(|State(api): State<Api>, Json(body): Json<Value>| async move { create(&api, "products", body) }),
        )
        .route(
            "/api/products/{id}",
            put(|State(api): State<Api>, Path(id): Path<u64>, Json(body): Json<Value>| async move {
                replace(&api, "products", id, body)
            })
            .delete(|State(api): State<Api>, Path(id): Path<u64>| async move { remove(&api, "products", id) }),
        )
        .route(
            "/api/users",
            get(|State(api): State<Api>| async move { list(&api, "users") }),
        )
        .route(
            "/api/users/{id}",
            put(|State(api): State<Api>, Path(id): Path<u64>, Json(body): Json<Value>| async move {
                replace(&api, "users", id, body)
            })
            .delete(|State(api): State<Api>, Path(id): Path<u64>| async move { remove(&api, "users", id) }),
        )
        .route(
            "/api/signup",
            post(|State(api): State<Api>, Json(body): Json<Value>| async move { signup(&api, body) }),
        )
        .route(
            "/api/login",
            post(|State(api): State<Api>, Json(body): Json<Value>| async move { login(&api, body) }),
        )
        .with_state(api)
}

async fn spawn_api() -> (ConsoleConfig, Api) {
    spawn_api_under("").await
}

/// Serves the fake API below `prefix`, e.g. `/admin`.
async fn spawn_api_under(prefix: &str) -> (ConsoleConfig, Api) {
    let api = Api::default();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = if prefix.is_empty() {
        router(api.clone())
    } else {
        Router::new().nest(prefix, router(api.clone()))
    };
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let origin = Url::parse(&format!("http://{}{}", addr, prefix)).unwrap();
    (ConsoleConfig::with_origin(origin), api)
}

/// Full end-to-end flow on the product screen against a real HTTP server.
#[tokio::test]
async fn test_product_screen_end_to_end() {
    let (config, api) = spawn_api().await;
    let mut console = AdminConsole::new(config);

    let products = console.open_products().await;
    assert!(products.state().items.is_empty());
    assert_eq!(console.dashboard().empty_message(), Some("No products have been added yet."));

    // Create through the form
    for (name, value) in [
        ("name", "Widget"),
        ("description", "Blue"),
        ("price", "9.99"),
        ("quantity", "3"),
    ] {
        products.change_field(name, value).await.unwrap();
    }
    products.submit().await.unwrap();

    let state = products.state();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.mode, SessionMode::Creating);
    assert_eq!(state.draft, Default::default());
    let widget = state.items[0].clone();
    assert_eq!(widget.quantity, 3);
    assert_eq!(widget.price.label(), "M9.99");

    // Sell echoes every field with quantity - 1, then re-fetches
    api.clear_log();
    products.sell(widget.id.clone()).await.unwrap();
    let log = api.log();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].method, "PUT");
    assert_eq!(log[0].path, format!("/api/products/{}", widget.id));
    assert_eq!(
        log[0].body,
        Some(json!({ "name": "Widget", "description": "Blue", "price": "9.99", "quantity": 2 }))
    );
    assert_eq!(log[1].method, "GET");
    assert_eq!(products.state().items[0].quantity, 2);

    // Edit replaces instead of creating
    products.edit(products.state().items[0].clone()).await.unwrap();
    products.change_field("name", "Widget Pro").await.unwrap();
    products.submit().await.unwrap();
    let state = products.state();
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].name, "Widget Pro");

    let dashboard = console.dashboard();
    assert_eq!(dashboard.price_rows()[0].price, "9.99");
    assert_eq!(dashboard.chart_series()[0].quantity, 2);

    // Delete, then the list is empty again
    products.delete(widget.id.clone()).await.unwrap();
    assert!(products.state().items.is_empty());
    assert_eq!(products.state().error, None);

    drop(products);
    console.shutdown().await.expect("Shutdown failed");
}

#[tokio::test]
async fn test_sell_out_of_stock_sends_nothing() {
    let (config, api) = spawn_api().await;
    api.seed_product("Gizmo", json!(4.5), 0);
    let mut console = AdminConsole::new(config);
    let products = console.open_products().await;
    let gizmo = products.state().items[0].clone();
    api.clear_log();

    let result = products.sell(gizmo.id.clone()).await;

    assert!(matches!(result, Err(SyncError::Domain(_))));
    assert!(api.log().is_empty());
    assert_eq!(products.state().error.as_deref(), Some("Product is out of stock"));
    assert_eq!(products.state().items[0].quantity, 0);
}

#[tokio::test]
async fn test_server_errors_set_screen_messages() {
    let (config, api) = spawn_api().await;
    let id = api.seed_product("Widget", json!("2"), 5);
    let mut console = AdminConsole::new(config);

    api.fail_next(StatusCode::INTERNAL_SERVER_ERROR);
    let products = console.open_products().await;
    let state = products.state();
    assert!(state.items.is_empty());
    assert_eq!(state.error.as_deref(), Some("Error fetching products"));

    // A later successful refresh clears the message
    products.load().await.unwrap();
    assert_eq!(products.state().items.len(), 1);
    assert_eq!(products.state().error, None);

    api.fail_next(StatusCode::INTERNAL_SERVER_ERROR);
    let result = products.sell(EntityId::from(id)).await;
    assert!(matches!(result, Err(SyncError::Rejected { status: 500 })));
    assert_eq!(products.state().error.as_deref(), Some("Error selling product"));
    assert_eq!(products.state().items[0].quantity, 5);

    api.fail_next(StatusCode::NOT_FOUND);
    assert!(products.delete(EntityId::from(id)).await.is_err());
    assert_eq!(products.state().error.as_deref(), Some("Error deleting product"));
    assert_eq!(products.state().items.len(), 1);
}

#[tokio::test]
async fn test_user_screen_creates_through_signup() {
    let (config, api) = spawn_api().await;
    let mut console = AdminConsole::new(config);
    let users = console.open_users().await;

    users.change_field("username", "alice").await.unwrap();
    users.change_field("password", "pw").await.unwrap();
    users.submit().await.unwrap();

    let log = api.log();
    assert!(log.iter().any(|seen| seen.method == "POST" && seen.path == "/api/signup"));
    let alice = users.state().items[0].clone();
    assert_eq!(alice.username, "alice");

    // Editing starts with a blank password and replaces the user
    users.edit(alice.clone()).await.unwrap();
    assert_eq!(users.state().draft.password, "");
    assert_eq!(users.state().mode, SessionMode::Editing(alice.id.clone()));
    users.change_field("username", "alice2").await.unwrap();
    users.change_field("password", "new").await.unwrap();
    users.submit().await.unwrap();

    let last_put = api.log().into_iter().rev().find(|seen| seen.method == "PUT").unwrap();
    assert_eq!(last_put.path, format!("/api/users/{}", alice.id));
    assert_eq!(users.state().items[0].username, "alice2");

    users.delete(alice.id.clone()).await.unwrap();
    assert!(users.state().items.is_empty());
}

#[tokio::test]
async fn test_signup_then_login_routes() {
    let (config, _api) = spawn_api().await;
    let console = AdminConsole::new(config);

    let mut form = AuthForm::new();
    form.toggle_mode();
    assert_eq!(form.mode, AuthMode::Signup);
    form.username = "bob".into();
    form.password = "secret".into();
    assert_eq!(form.submit(console.auth()).await.unwrap(), Route::Login);

    form.toggle_mode();
    assert_eq!(form.submit(console.auth()).await.unwrap(), Route::Dashboard);
    assert_eq!(form.error, None);

    form.password = "wrong".into();
    assert!(form.submit(console.auth()).await.is_err());
    assert_eq!(form.error.as_deref(), Some("Error: Network response was not ok"));

    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_sign_in_returns_the_form_message() {
    let (config, _api) = spawn_api().await;
    let console = AdminConsole::new(config);

    let mut form = AuthForm::new();
    form.username = "nobody".into();
    form.password = "wrong".into();
    let result = console.sign_in(&mut form).await;

    assert_eq!(result, Err("Error: Network response was not ok".to_string()));
    assert_eq!(form.mode, AuthMode::Login);
    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unreadable_price_keeps_the_rest_of_the_list() {
    let (config, api) = spawn_api().await;
    api.seed_product("Widget", json!(null), 1);
    api.seed_product("Gizmo", json!("3"), 2);
    api.seed_product("Doohickey", json!(0.125), 3);
    let mut console = AdminConsole::new(config);

    let products = console.open_products().await;
    assert_eq!(products.state().error, None);
    assert_eq!(products.state().items.len(), 3);

    let prices: Vec<String> = console.dashboard().price_rows().into_iter().map(|row| row.price).collect();
    assert_eq!(prices, vec!["N/A", "3.00", "0.13"]);

    // Selling echoes the unreadable price back untouched
    let widget = products.state().items[0].clone();
    products.sell(widget.id.clone()).await.unwrap();
    let put = api.log().into_iter().find(|seen| seen.method == "PUT").unwrap();
    assert!(put.body.unwrap()["price"].is_null());
    assert_eq!(products.state().items[0].quantity, 0);

    drop(products);
    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_origin_path_prefix_reaches_the_api() {
    let (config, api) = spawn_api_under("/admin").await;
    let id = api.seed_product("Widget", json!(2), 2);
    let mut console = AdminConsole::new(config);

    let products = console.open_products().await;
    assert_eq!(products.state().error, None);
    assert_eq!(products.state().items.len(), 1);

    products.sell(EntityId::from(id)).await.unwrap();
    assert_eq!(products.state().items[0].quantity, 1);

    drop(products);
    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_unreachable_api_is_a_network_error() {
    // Nothing listens on the discard port.
    let config = ConsoleConfig::with_origin(Url::parse("http://127.0.0.1:9").unwrap());
    let mut console = AdminConsole::new(config);

    let products = console.open_products().await;
    assert_eq!(products.state().error.as_deref(), Some("Error fetching products"));
    assert!(matches!(products.load().await, Err(SyncError::Network(_))));

    drop(products);
    console.shutdown().await.unwrap();
}
