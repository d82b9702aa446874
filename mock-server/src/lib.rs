//! In-memory mock of a DRF-convention REST backend.
//!
//! # Design
//! One `users` resource behind trailing-slash routes. List endpoints apply
//! filters, `search`, `ordering`, then `limit`/`offset`, and report the
//! post-filter total either as a `{results, count}` envelope
//! ([`envelope_app`]) or as the last segment of a `Content-Range` header
//! over a bare array ([`count_header_app`]). Records carry a
//! self-referential `url` field so both identity conventions can be
//! exercised against the same store.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub url: String,
    pub name: String,
    pub group: u64,
}

#[derive(Deserialize)]
pub struct CreateUser {
    pub name: String,
    #[serde(default)]
    pub group: u64,
}

#[derive(Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub group: Option<u64>,
}

/// How the list endpoint reports its pagination total.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListStyle {
    Envelope,
    ContentRange,
}

struct Store {
    users: HashMap<u64, User>,
    next_id: u64,
}

#[derive(Clone)]
struct AppState {
    store: Arc<RwLock<Store>>,
    style: ListStyle,
}

/// Router speaking the envelope convention: `{results, count}` lists.
pub fn envelope_app() -> Router {
    app_with(ListStyle::Envelope)
}

/// Router speaking the header-count convention: bare-array lists plus a
/// `Content-Range: items <first>-<last>/<total>` header.
pub fn count_header_app() -> Router {
    app_with(ListStyle::ContentRange)
}

fn app_with(style: ListStyle) -> Router {
    let state = AppState {
        store: Arc::new(RwLock::new(Store {
            users: HashMap::new(),
            next_id: 1,
        })),
        style,
    };
    Router::new()
        .route("/users/", get(list_users).post(create_user))
        .route("/users/{id}/", get(get_user).put(update_user).delete(delete_user))
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, envelope_app()).await
}

pub async fn run_count_header(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, count_header_app()).await
}

const RESERVED_PARAMS: [&str; 4] = ["limit", "offset", "ordering", "search"];

async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let store = state.store.read().await;
    let mut users: Vec<User> = store.users.values().cloned().collect();
    users.sort_by_key(|u| u.id);

    for (key, value) in &params {
        if RESERVED_PARAMS.contains(&key.as_str()) {
            continue;
        }
        users.retain(|u| field_matches(u, key, value));
    }

    if let Some(term) = params.get("search") {
        let term = term.to_lowercase();
        users.retain(|u| u.name.to_lowercase().contains(&term));
    }

    if let Some(ordering) = params.get("ordering") {
        let (field, descending) = match ordering.strip_prefix('-') {
            Some(field) => (field, true),
            None => (ordering.as_str(), false),
        };
        users.sort_by(|a, b| compare_field(a, b, field));
        if descending {
            users.reverse();
        }
    }

    let total = users.len();
    let offset: usize = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(total);
    let page: Vec<User> = users.into_iter().skip(offset).take(limit).collect();

    match state.style {
        ListStyle::Envelope => Json(json!({ "results": page, "count": total })).into_response(),
        ListStyle::ContentRange => {
            let last = offset + page.len().saturating_sub(1);
            let range = format!("items {offset}-{last}/{total}");
            let mut headers = HeaderMap::new();
            if let Ok(value) = HeaderValue::from_str(&range) {
                headers.insert("content-range", value);
            }
            (headers, Json(page)).into_response()
        }
    }
}

fn field_matches(user: &User, field: &str, value: &str) -> bool {
    match field {
        "id" => user.id.to_string() == value,
        "url" => user.url == value,
        "name" => user.name == value,
        "group" => user.group.to_string() == value,
        _ => false,
    }
}

fn compare_field(a: &User, b: &User, field: &str) -> Ordering {
    match field {
        "name" => a.name.cmp(&b.name),
        "group" => a.group.cmp(&b.group),
        _ => a.id.cmp(&b.id),
    }
}

async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> (StatusCode, Json<User>) {
    let mut store = state.store.write().await;
    let id = store.next_id;
    store.next_id += 1;
    let user = User {
        id,
        url: format!("http://testserver/users/{id}/"),
        name: input.name,
        group: input.group,
    };
    store.users.insert(id, user.clone());
    (StatusCode::CREATED, Json(user))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<User>, StatusCode> {
    let store = state.store.read().await;
    store.users.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
    Json(input): Json<UpdateUser>,
) -> Result<Json<User>, StatusCode> {
    let mut store = state.store.write().await;
    let user = store.users.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    if let Some(name) = input.name {
        user.name = name;
    }
    if let Some(group) = input.group {
        user.group = group;
    }
    Ok(Json(user.clone()))
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<StatusCode, StatusCode> {
    let mut store = state.store.write().await;
    store
        .users
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}
