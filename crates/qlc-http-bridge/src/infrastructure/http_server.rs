//! HTTP server: REST routes over the widget operations.
//!
//! Every handler is a thin adapter: it pulls the ID, name or value out of the
//! request, calls one [`WidgetService`] operation and writes the payload back
//! as plain text.  Each request makes its own exchange(s) with QLC+; nothing
//! is cached and nothing is shared between requests except the immutable
//! service value.
//!
//! # Routes
//!
//! | Method | Path                    | Operation            |
//! |--------|-------------------------|----------------------|
//! | GET    | `/`                     | HTML widget table    |
//! | GET    | `/health`               | liveness             |
//! | GET    | `/widgets`              | JSON widget listing  |
//! | GET    | `/widgets/id/{id}`      | status by ID         |
//! | POST   | `/widgets/id/{id}`      | set status by ID     |
//! | GET    | `/widgets/name/{name}`  | status by name       |
//! | POST   | `/widgets/name/{name}`  | set status by name   |
//!
//! `/id/{id}` and `/name/{name}` are kept as aliases for older clients.

use std::future::Future;

use anyhow::Context;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tokio::net::TcpListener;
use tracing::{info, warn};

use qlc_core::{Widget, WidgetDirectory};

use crate::application::exchange::ErrorKind;
use crate::application::widget_service::{WidgetError, WidgetService};
use crate::domain::config::BridgeConfig;
use crate::infrastructure::controller_conn::ControllerClient;

// ── Public API ────────────────────────────────────────────────────────────────

/// Builds the axum router with all routes bound to `service`.
pub fn router(service: WidgetService) -> Router {
    Router::new()
        .route("/", get(index_page))
        .route("/health", get(health))
        .route("/widgets", get(list_widgets))
        .route("/widgets/id/{id}", get(get_by_id).post(set_by_id))
        .route("/widgets/name/{name}", get(get_by_name).post(set_by_name))
        .route("/id/{id}", get(get_by_id).post(set_by_id))
        .route("/name/{name}", get(get_by_name).post(set_by_name))
        .with_state(service)
}

/// Binds the HTTP listener and serves until `shutdown` completes.
///
/// # Errors
///
/// Returns an error if the listen address cannot be bound or the server
/// fails while running.
pub async fn run_server(
    config: BridgeConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let client = ControllerClient::new(&config);
    info!(
        "using QLC+ websocket API at {} (timeout {:?})",
        client.url(),
        client.timeout()
    );
    let app = router(WidgetService::new(std::sync::Arc::new(client)));

    let listener = TcpListener::bind(&config.http_bind_addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {}", config.http_bind_addr))?;
    info!("serving QLC+ HTTP API on {}", config.http_bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;
    Ok(())
}

// ── Error mapping ─────────────────────────────────────────────────────────────

/// Failure of one HTTP request, rendered as a plain-text body.
#[derive(Debug)]
enum ApiError {
    Widget(WidgetError),
    MissingValue,
}

impl From<WidgetError> for ApiError {
    fn from(e: WidgetError) -> Self {
        ApiError::Widget(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingValue => StatusCode::BAD_REQUEST,
            ApiError::Widget(WidgetError::WidgetNotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Widget(WidgetError::Controller(e)) => match e.kind() {
                ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
                ErrorKind::Connection | ErrorKind::Protocol => StatusCode::BAD_GATEWAY,
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::MissingValue => "request body must contain the value to set".to_string(),
            ApiError::Widget(e) => e.to_string(),
        };
        warn!("request failed ({status}): {message}");
        (status, format!("{message}\n")).into_response()
    }
}

// ── Route handlers ────────────────────────────────────────────────────────────

async fn health() -> &'static str {
    "ok\n"
}

async fn index_page(State(service): State<WidgetService>) -> Result<Html<String>, ApiError> {
    let directory = service.list_widgets().await?;
    Ok(Html(render_index(&directory)))
}

async fn list_widgets(State(service): State<WidgetService>) -> Result<Json<Vec<Widget>>, ApiError> {
    let directory = service.list_widgets().await?;
    Ok(Json(directory.widgets().to_vec()))
}

async fn get_by_id(
    State(service): State<WidgetService>,
    Path(id): Path<String>,
) -> Result<String, ApiError> {
    let status = service.get_status_by_id(&id).await?;
    Ok(format!("{status}\n"))
}

async fn get_by_name(
    State(service): State<WidgetService>,
    Path(name): Path<String>,
) -> Result<String, ApiError> {
    let status = service.get_status_by_name(&name).await?;
    Ok(format!("{status}\n"))
}

async fn set_by_id(
    State(service): State<WidgetService>,
    Path(id): Path<String>,
    body: String,
) -> Result<String, ApiError> {
    let value = value_from_body(&body)?;
    let confirmation = service.set_status_by_id(&id, value).await?;
    Ok(format!("{confirmation}\n"))
}

async fn set_by_name(
    State(service): State<WidgetService>,
    Path(name): Path<String>,
    body: String,
) -> Result<String, ApiError> {
    let value = value_from_body(&body)?;
    let confirmation = service.set_status_by_name(&name, value).await?;
    Ok(format!("{confirmation}\n"))
}

/// The value to write, without the trailing newline most shells add.
fn value_from_body(body: &str) -> Result<&str, ApiError> {
    let value = body.trim();
    if value.is_empty() {
        return Err(ApiError::MissingValue);
    }
    Ok(value)
}

// ── HTML index ────────────────────────────────────────────────────────────────

fn render_index(directory: &WidgetDirectory) -> String {
    let mut rows = String::new();
    for widget in directory {
        rows.push_str(&format!(
            "      <tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(&widget.id),
            escape_html(&widget.name)
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width,initial-scale=1">
    <style>table, th, td {{ border: 1px solid black; }}</style>
    <title>qlc-http-bridge</title>
  </head>
  <body>
    <h1>qlc-http-bridge</h1>
    <h2>Widgets</h2>
    <table>
      <tr><th>ID</th><th>Name</th></tr>
{rows}    </table>
  </body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
