//! In-process fake of the Notion endpoints glideshow uses.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

use glideshow::config::NotionSettings;

pub const API_KEY: &str = "secret_test_key";
pub const DATABASE_ID: &str = "db-slides";

/// Canned response: status and raw body.
pub type Reply = (StatusCode, String);

/// One request the fake received.
#[derive(Debug, Clone)]
pub struct Seen {
    pub path: String,
    pub authorization: Option<String>,
    pub notion_version: Option<String>,
    pub body: Value,
}

pub struct FakeNotion {
    /// Database query reply for a given `start_cursor`.
    pub query: fn(Option<&str>) -> Reply,
    /// Block children reply for a given block id.
    pub children: fn(&str) -> Reply,
    pub seen: Mutex<Vec<Seen>>,
}

impl FakeNotion {
    pub fn new(query: fn(Option<&str>) -> Reply, children: fn(&str) -> Reply) -> Arc<Self> {
        Arc::new(Self {
            query,
            children,
            seen: Mutex::new(Vec::new()),
        })
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }

    fn record(&self, path: String, headers: &HeaderMap, body: Value) {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        self.seen.lock().unwrap().push(Seen {
            path,
            authorization: header("authorization"),
            notion_version: header("notion-version"),
            body,
        });
    }
}

fn json_reply((status, body): Reply) -> Response {
    (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn query_database(
    State(fake): State<Arc<FakeNotion>>,
    Path(database_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let cursor = body["start_cursor"].as_str().map(str::to_string);
    fake.record(format!("/v1/databases/{}/query", database_id), &headers, body);
    json_reply((fake.query)(cursor.as_deref()))
}

async fn block_children(
    State(fake): State<Arc<FakeNotion>>,
    Path(block_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    fake.record(format!("/v1/blocks/{}/children", block_id), &headers, Value::Null);
    json_reply((fake.children)(&block_id))
}

/// Serve `fake` on an ephemeral port; returns its address.
pub async fn spawn_notion(fake: Arc<FakeNotion>) -> SocketAddr {
    let app = Router::new()
        .route("/v1/databases/:id/query", post(query_database))
        .route("/v1/blocks/:id/children", get(block_children))
        .with_state(fake);
    spawn_router(app).await
}

pub async fn spawn_router(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

/// Notion settings pointing at a fake served on `addr`.
pub fn settings_for(addr: SocketAddr) -> NotionSettings {
    NotionSettings {
        api_key: Some(API_KEY.to_string()),
        database_id: Some(DATABASE_ID.to_string()),
        api_base: format!("http://{}/v1", addr),
        ..NotionSettings::default()
    }
}

pub fn ok(body: Value) -> Reply {
    (StatusCode::OK, body.to_string())
}

pub fn list(results: Vec<Value>, next_cursor: Option<&str>) -> Value {
    json!({
        "object": "list",
        "results": results,
        "has_more": next_cursor.is_some(),
        "next_cursor": next_cursor,
    })
}

pub fn error(status: StatusCode, code: &str, message: &str) -> Reply {
    let body = json!({
        "object": "error",
        "status": status.as_u16(),
        "code": code,
        "message": message,
    });
    (status, body.to_string())
}

fn runs(text: &str) -> Value {
    json!([{ "type": "text", "text": { "content": text }, "plain_text": text }])
}

/// A database row in Notion's page shape.
pub fn page(id: &str, number: f64, title: &str, image: &str, link: &str, description: Option<&str>) -> Value {
    let mut properties = json!({
        "id": { "id": "n", "type": "number", "number": number },
        "이름": { "id": "title", "type": "title", "title": runs(title) },
        "image": { "id": "i", "type": "url", "url": image },
        "link": { "id": "l", "type": "url", "url": link },
    });
    if let Some(text) = description {
        properties["description"] = json!({ "id": "d", "type": "rich_text", "rich_text": runs(text) });
    }
    json!({ "object": "page", "id": id, "properties": properties })
}

pub fn paragraph(text: &str) -> Value {
    json!({
        "object": "block",
        "id": format!("blk-{}", text.len()),
        "type": "paragraph",
        "paragraph": { "rich_text": runs(text) },
    })
}

pub fn heading(text: &str) -> Value {
    json!({
        "object": "block",
        "id": "heading",
        "type": "heading_1",
        "heading_1": { "rich_text": runs(text) },
    })
}
