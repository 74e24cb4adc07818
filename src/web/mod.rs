//! Search form over HTTP.
//!
//! `GET /journals_search` renders the form and, when a search value is
//! present, the matching records. Searches run on the blocking pool because
//! the catalog client is synchronous.

use crate::client::SearchTransport;
use crate::config::JournalSearchConfig;
use crate::models::{ResultSet, SearchFlags};
use crate::services::JournalSearchService;
use crate::{Error, Result};
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::routing::get;
use axum::Router;
use serde::Deserialize;
use std::fmt::Write as _;
use std::sync::Arc;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Path of the search form.
pub const SEARCH_PATH: &str = "/journals_search";

const SEARCH_FORM: &str = r#"
    <h1>Journal search</h1>
    <form action="" method="get">
    <div>
        <label for="value">Search query: </label>
        <input type="text" name="value" id="value" value="{value}" required />
        <input type="submit" value="Search">
    </div>
    <div>
        <p>Search in:</p>
        <input type="checkbox" name="name" id="name"><label for="name">short_title, journal_title, title_variants</label><br />
        <input type="checkbox" name="exact" id="exact"><label for="exact">short_title, journal_title only</label><br />
        <p>Result options:</p>
        <input type="checkbox" name="long" id="long"><label for="long">print all fields</label><br />
        <input type="checkbox" name="all" id="all"><label for="all">print all records (default up to {limit})</label><br />
    </div>
    </form>
"#;

/// Query parameters of the search form.
///
/// A checkbox counts as ticked when its parameter is present at all.
#[derive(Debug, Default, Deserialize)]
pub struct WebSearchParams {
    /// Search value.
    pub value: Option<String>,
    /// Title-variant matching.
    pub name: Option<String>,
    /// Exact title matching.
    pub exact: Option<String>,
    /// Long field set.
    pub long: Option<String>,
    /// No result cap.
    pub all: Option<String>,
}

impl WebSearchParams {
    /// The search value, if one was entered.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    /// Converts the parameters into search flags.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the value is missing or blank.
    pub fn to_flags(&self) -> Result<SearchFlags> {
        let mut flags = SearchFlags::new(self.value().unwrap_or_default())?;
        flags.name = self.name.is_some();
        flags.exact = self.exact.is_some();
        flags.long = self.long.is_some();
        flags.all = self.all.is_some();
        Ok(flags)
    }
}

struct AppState<T> {
    service: JournalSearchService<T>,
    max_results: usize,
}

/// Builds the router for a search service.
pub fn router<T>(service: JournalSearchService<T>, max_results: usize) -> Router
where
    T: SearchTransport + 'static,
{
    let state = Arc::new(AppState {
        service,
        max_results,
    });

    Router::new()
        .route("/", get(|| async { Redirect::to(SEARCH_PATH) }))
        .route(SEARCH_PATH, get(journals_search::<T>))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            header::HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            header::HeaderValue::from_static("no-store"),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the search form on the configured address until stopped.
///
/// # Errors
///
/// Returns an error if the runtime cannot be created or the address cannot
/// be bound.
pub fn serve(config: &JournalSearchConfig) -> Result<()> {
    // The blocking client must not be created or dropped inside the runtime.
    let service = JournalSearchService::from_config(config);
    let app = router(service, config.max_results);

    let rt = tokio::runtime::Runtime::new().map_err(|e| Error::OperationFailed {
        operation: "create_runtime".to_string(),
        cause: e.to_string(),
    })?;

    let host = config.server.host.as_str();
    let port = config.server.port;
    tracing::info!(host, port, "Starting journal search form");

    let listener = rt
        .block_on(tokio::net::TcpListener::bind((host, port)))
        .map_err(|e| Error::OperationFailed {
            operation: "bind".to_string(),
            cause: format!("{host}:{port}: {e}"),
        })?;

    rt.block_on(async {
        axum::serve(listener, app)
            .await
            .map_err(|e| Error::OperationFailed {
                operation: "serve".to_string(),
                cause: e.to_string(),
            })
    })
}

async fn journals_search<T>(
    State(state): State<Arc<AppState<T>>>,
    Query(params): Query<WebSearchParams>,
) -> Response
where
    T: SearchTransport + 'static,
{
    let mut page = page_header(params.value().unwrap_or_default(), state.max_results);

    if params.value().is_none() {
        return finish(StatusCode::OK, page);
    }

    let flags = match params.to_flags() {
        Ok(flags) => flags,
        Err(e) => return error_page(page, &e),
    };
    let all = flags.all;

    let worker = Arc::clone(&state);
    let outcome = tokio::task::spawn_blocking(move || worker.service.search(&flags)).await;

    match outcome {
        Ok(Ok(result)) => {
            write_results(&mut page, &result, state.max_results, all);
            finish(StatusCode::OK, page)
        },
        Ok(Err(e)) => {
            tracing::warn!(error = %e, "Search failed");
            error_page(page, &e)
        },
        Err(e) => error_page(
            page,
            &Error::OperationFailed {
                operation: "search_task".to_string(),
                cause: e.to_string(),
            },
        ),
    }
}

fn page_header(value: &str, max_results: usize) -> String {
    let form = SEARCH_FORM
        .replace("{limit}", &max_results.to_string())
        .replace("{value}", &escape_html(value));
    format!("<!doctype html><html><body>{form}")
}

fn write_results(page: &mut String, result: &ResultSet, max_results: usize, all: bool) {
    let _ = write!(page, "<h2>{} Results</h2>", result.len());

    if result.exceeds_cap(max_results, all) {
        page.push_str("<p>Too many records. Refine your search or tick \"print all records\".</p>");
        return;
    }

    let blocks: Vec<String> = result
        .records()
        .iter()
        .map(|record| escape_html(record.as_str()))
        .collect();
    let _ = write!(page, "<pre>{}</pre>", blocks.join("</pre><hr /><pre>"));
}

fn error_page(mut page: String, error: &Error) -> Response {
    let status = match error {
        Error::InvalidInput(_) => StatusCode::BAD_REQUEST,
        e if e.is_backend() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let _ = write!(page, "<p class=\"error\">{}</p>", escape_html(&error.to_string()));
    finish(status, page)
}

fn finish(status: StatusCode, mut page: String) -> Response {
    page.push_str("</body></html>");
    (status, Html(page)).into_response()
}

/// Escapes text for inclusion in HTML content or attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '&' => "&amp;".to_string(),
            '<' => "&lt;".to_string(),
            '>' => "&gt;".to_string(),
            '"' => "&quot;".to_string(),
            '\'' => "&#39;".to_string(),
            _ => c.to_string(),
        })
        .collect::<String>()
}
