#![allow(dead_code)]

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use serde_json::{Value, json};

use fnb_storefront::{api::ApiClient, storage::MemoryStore};

pub const PASSWORD: &str = "secret";
pub const UNIT_PRICE: i64 = 25_000;
pub const DELIVERY_FEE: i64 = 15_000;
pub const VALID_CODE: &str = "SAVE10";
pub const CLOSED_STORE: &str = "CLOSED";
pub const FULFILLED_COUNT: i64 = 12;

#[derive(Serialize)]
struct Claims {
    sub: String,
    exp: i64,
}

/// A token whose `exp` lies `seconds` from now (negative for expired ones).
pub fn token_expiring_in(seconds: i64) -> String {
    let claims = Claims {
        sub: "u-1".into(),
        exp: (Utc::now() + Duration::seconds(seconds)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"test-secret"),
    )
    .expect("encode token")
}

pub fn user_json(role: &str, store_code: Option<&str>) -> Value {
    json!({
        "id": "u-1",
        "phoneNum": "0901234567",
        "email": "lan@example.com",
        "firstName": "Lan",
        "lastName": "Nguyen",
        "role": role,
        "staffOfStoreCode": store_code,
        "createdAt": "2024-05-01T03:00:00Z"
    })
}

pub fn order_json(id: &str, status: &str, total: i64, paid: bool) -> Value {
    json!({
        "id": id,
        "storeCode": "HCM01",
        "customerPhoneNum": "0901234567",
        "customerName": "Lan Nguyen",
        "orderMethod": "PICK_UP",
        "destination": "",
        "status": status,
        "subtotalAmount": total,
        "discountAmount": 0,
        "deliveryFee": 0,
        "totalAmount": total,
        "paid": paid,
        "paymentMethod": "CASH",
        "createdAt": "2024-05-01T03:00:00Z",
        "lines": []
    })
}

/// What the mock backend saw.
#[derive(Debug, Default)]
pub struct Recorded {
    pub created_orders: Vec<Value>,
    pub order_auth: Vec<Option<String>>,
    pub order_queries: Vec<HashMap<String, String>>,
    pub order_updates: Vec<(String, Value)>,
    pub request_ids: Vec<String>,
}

#[derive(Clone)]
struct MockState {
    role: String,
    store_code: Option<String>,
    token: String,
    recorded: Arc<Mutex<Recorded>>,
}

pub struct MockBackend {
    pub api: ApiClient,
    pub token: String,
    pub recorded: Arc<Mutex<Recorded>>,
}

impl MockBackend {
    pub async fn start() -> Self {
        Self::start_as("CUSTOMER", None).await
    }

    /// Serves the REST API on an ephemeral port; logins yield a user with
    /// `role`.
    pub async fn start_as(role: &str, store_code: Option<&str>) -> Self {
        let recorded = Arc::new(Mutex::new(Recorded::default()));
        let token = token_expiring_in(3600);
        let state = MockState {
            role: role.to_string(),
            store_code: store_code.map(str::to_string),
            token: token.clone(),
            recorded: recorded.clone(),
        };

        let api = Router::new()
            .route("/auth/login", post(login))
            .route("/users/me", get(me))
            .route("/products/by-slug/{slug}", get(product_by_slug))
            .route("/orders/preview", post(preview))
            .route("/orders", post(create_order).get(list_orders))
            .route("/orders/{id}", patch(update_order))
            .with_state(state);
        let app = Router::new().nest("/api", api);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve mock backend");
        });

        let api = ApiClient::new(format!("http://{addr}/api")).expect("client");
        Self {
            api,
            token,
            recorded,
        }
    }

    pub fn recorded(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded.lock().expect("recorded lock")
    }
}

pub fn memory_store() -> MemoryStore {
    MemoryStore::new()
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

fn record_request_id(state: &MockState, headers: &HeaderMap) {
    if let Some(id) = headers.get("x-request-id").and_then(|v| v.to_str().ok()) {
        state
            .recorded
            .lock()
            .expect("recorded lock")
            .request_ids
            .push(id.to_string());
    }
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn login(State(state): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    record_request_id(&state, &headers);
    if body["password"] != PASSWORD {
        return error(StatusCode::UNAUTHORIZED, "Invalid phone number, email or password");
    }
    Json(json!({
        "user": user_json(&state.role, state.store_code.as_deref()),
        "token": state.token,
    }))
    .into_response()
}

async fn me(State(state): State<MockState>, headers: HeaderMap) -> Response {
    if bearer(&headers) != Some(format!("Bearer {}", state.token)) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    Json(user_json(&state.role, state.store_code.as_deref())).into_response()
}

async fn product_by_slug(Path(slug): Path<String>) -> Response {
    if slug != "milk-tea" {
        return error(StatusCode::NOT_FOUND, "Product not found");
    }
    Json(json!({
        "id": "p-milk-tea",
        "name": "Milk Tea",
        "slug": "milk-tea",
        "basePrice": UNIT_PRICE,
        "unavailableAtStoreCodes": ["HN02"],
        "options": [
            {"id": "size", "name": "Size", "selections": [
                {"id": "m", "name": "M", "priceChange": 0},
                {"id": "l", "name": "L", "priceChange": 5000}
            ]}
        ],
        "toppings": [{"id": "pearl", "name": "Pearl", "priceChange": 5000}]
    }))
    .into_response()
}

/// Prices every line at [`UNIT_PRICE`]; only [`VALID_CODE`] applies a 10% discount.
async fn preview(Json(body): Json<Value>) -> Response {
    let quantity: i64 = body["lines"]
        .as_array()
        .map(|lines| lines.iter().filter_map(|l| l["quantity"].as_i64()).sum())
        .unwrap_or_default();
    let subtotal = quantity * UNIT_PRICE;
    let applied = body["discountCode"].as_str() == Some(VALID_CODE);
    let discount = if applied { subtotal / 10 } else { 0 };
    let delivery = if body["orderMethod"] == "DELIVERY" { DELIVERY_FEE } else { 0 };
    Json(json!({
        "storeCode": body["storeCode"],
        "orderMethod": body["orderMethod"],
        "discountCode": if applied { json!(VALID_CODE) } else { Value::Null },
        "subtotalAmount": subtotal,
        "discountAmount": discount,
        "deliveryFee": delivery,
        "totalAmount": subtotal - discount + delivery,
        "lines": []
    }))
    .into_response()
}

async fn create_order(State(state): State<MockState>, headers: HeaderMap, Json(body): Json<Value>) -> Response {
    record_request_id(&state, &headers);
    if body["storeCode"] == CLOSED_STORE {
        return error(StatusCode::BAD_REQUEST, "Store is closed");
    }
    {
        let mut recorded = state.recorded.lock().expect("recorded lock");
        recorded.order_auth.push(bearer(&headers));
        recorded.created_orders.push(body.clone());
    }
    let mut order = order_json("o-new", "PENDING", 50_000, false);
    order["storeCode"] = body["storeCode"].clone();
    order["customerName"] = body["customerName"].clone();
    (StatusCode::CREATED, Json(order)).into_response()
}

async fn list_orders(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if bearer(&headers).is_none() {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    state
        .recorded
        .lock()
        .expect("recorded lock")
        .order_queries
        .push(query.clone());

    let status = query.get("status").cloned().unwrap_or_default();
    let page_size: i64 = query
        .get("pageSize")
        .and_then(|v| v.parse().ok())
        .unwrap_or(20);
    let total = match status.as_str() {
        "FULFILLED" => FULFILLED_COUNT,
        "PENDING" => 2,
        "PREPARING" => 1,
        _ => 0,
    };
    let content: Vec<Value> = (0..total.min(page_size))
        .map(|i| order_json(&format!("{status}-{i}"), &status, 10_000, i % 2 == 0))
        .collect();
    Json(json!({
        "content": content,
        "totalPages": (total + page_size - 1) / page_size,
        "number": 0,
        "totalElements": total
    }))
    .into_response()
}

async fn update_order(
    State(state): State<MockState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if bearer(&headers) != Some(format!("Bearer {}", state.token)) {
        return error(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    state
        .recorded
        .lock()
        .expect("recorded lock")
        .order_updates
        .push((id.clone(), body.clone()));
    let status = body["status"].as_str().unwrap_or("PENDING");
    let paid = body["paid"].as_bool().unwrap_or(false);
    Json(order_json(&id, status, 10_000, paid)).into_response()
}
