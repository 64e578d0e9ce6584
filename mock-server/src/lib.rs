use axum::{
    extract::{Form, Query},
    http::{header, HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Form or query fields echoed back as JSON, in the order they arrived.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Echo {
    pub fields: Vec<(String, String)>,
}

pub fn app() -> Router {
    Router::new()
        .route("/", get(index))
        .route("/404", get(not_found))
        .route("/lines", get(lines))
        .route("/agent", get(agent))
        .route("/search", get(search))
        .route("/form", post(form))
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn index() -> &'static str {
    "hello from mock-server"
}

async fn not_found() -> (StatusCode, &'static str) {
    (StatusCode::NOT_FOUND, "Nope")
}

async fn lines() -> &'static str {
    "first\r\nsecond\r\nthird"
}

async fn agent(headers: HeaderMap) -> Result<String, StatusCode> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .ok_or(StatusCode::BAD_REQUEST)
}

async fn search(Query(fields): Query<Vec<(String, String)>>) -> Json<Echo> {
    Json(Echo { fields })
}

async fn form(Form(fields): Form<Vec<(String, String)>>) -> (StatusCode, Json<Echo>) {
    (StatusCode::CREATED, Json(Echo { fields }))
}
