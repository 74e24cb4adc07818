//! Fake journals catalog server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1, on its own runtime thread so blocking clients can call it from
//! plain `#[test]` functions. Serves:
//! - `GET /api/journals?q=...` the first page, linking to page 2
//! - `GET /api/journals?q=...&page=2` the last page, without a next link
//! - `GET /broken/journals` a 500 error

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct CatalogState {
    base_url: String,
    requests: Vec<String>,
}

/// Handle to the running fake catalog.
pub struct FakeCatalog {
    addr: SocketAddr,
    state: Arc<Mutex<CatalogState>>,
}

impl FakeCatalog {
    /// Starts the fake catalog. Returns once the server is listening.
    pub fn start() -> std::io::Result<Self> {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.set_nonblocking(true)?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(CatalogState {
            base_url: format!("http://{addr}"),
            requests: Vec::new(),
        }));

        let app = Router::new()
            .route("/api/journals", get(journals))
            .route("/broken/journals", get(broken))
            .with_state(state.clone());

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, app).await.unwrap();
            });
        });

        Ok(Self { addr, state })
    }

    /// API base URL (e.g. `http://127.0.0.1:PORT/api`).
    pub fn api_url(&self) -> String {
        format!("http://{}/api", self.addr)
    }

    /// Base URL of an API whose every search fails.
    pub fn broken_url(&self) -> String {
        format!("http://{}/broken", self.addr)
    }

    /// Query strings of every request received, in order.
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

async fn journals(
    State(state): State<Arc<Mutex<CatalogState>>>,
    Query(params): Query<HashMap<String, String>>,
) -> impl IntoResponse {
    let mut state = state.lock().unwrap();
    let q = params.get("q").cloned().unwrap_or_default();
    let page = params.get("page").cloned().unwrap_or_else(|| "1".to_string());
    state.requests.push(format!("page={page} q={q}"));

    if page == "2" {
        return Json(json!({
            "hits": {"hits": [
                {"metadata": {"short_title": "Phys.Rev.D", "journal_title": {"title": "Physical Review D"}}}
            ]}
        }));
    }

    Json(json!({
        "hits": {"hits": [
            {"metadata": {"short_title": "Phys.Rev.A", "journal_title": {"title": "Physical Review A"}}},
            {"metadata": {"short_title": "Phys.Rev.B", "journal_title": {"title": "Physical Review B"}}}
        ]},
        "links": {"next": format!("{}/api/journals?q=Phys%20Rev&page=2", state.base_url)}
    }))
}

async fn broken() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "catalog unavailable")
}
