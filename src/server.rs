//! The command server: the rendezvous point launcher invocations talk to.
//!
//! It binds the well-known port once at application startup; a refused bind
//! means another live instance already owns it, which is informational, not
//! fatal: this process simply never becomes a server. Accepted commands are
//! forwarded to the active window with the theme applied strictly before the
//! content load, and every request is acknowledged whether or not forwarding
//! succeeded: the contract is "command received", not "command rendered".

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Extension;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::error::AppError;
use crate::protocol::{Command, OpenPayload, OpenRequest, HEALTH_ROUTE, OPEN_ROUTE};
use crate::state::AppContext;
use crate::window::ContentEvent;

// ── Response types ───────────────────────────────────────────────

#[derive(Serialize)]
struct ApiOk<T: Serialize> {
    ok: bool,
    data: T,
}

fn ok_json<T: Serialize>(data: T) -> impl IntoResponse {
    Json(ApiOk { ok: true, data })
}

// ── Handlers ─────────────────────────────────────────────────────

async fn post_open(
    Extension(ctx): Extension<Arc<AppContext>>,
    Json(req): Json<OpenRequest>,
) -> impl IntoResponse {
    dispatch(&ctx, Command::from(req));
    // The ack does not depend on the forwarding outcome.
    ok_json("received")
}

async fn get_health() -> impl IntoResponse {
    ok_json("ok")
}

/// Forward a command to the active window: theme first, then content, as a
/// sequential chain so the ordering holds structurally. Failures are logged
/// and swallowed; they must not reach the acknowledgement path.
fn dispatch(ctx: &AppContext, cmd: Command) {
    let Some(window) = ctx.active_window() else {
        eprintln!("[GeoJSON] No window registered; dropping open command");
        return;
    };

    if let Some(theme) = cmd.theme {
        if let Err(e) = window.send(ContentEvent::SetTheme(theme)) {
            eprintln!("[GeoJSON] Failed to forward theme change: {e}");
            return;
        }
    }

    let content = match cmd.payload {
        Some(OpenPayload::File(path)) => Some(ContentEvent::LoadFile(path)),
        Some(OpenPayload::Data(text)) => Some(ContentEvent::LoadData(text)),
        None => None,
    };
    if let Some(event) = content {
        if let Err(e) = window.send(event) {
            eprintln!("[GeoJSON] Failed to forward content load: {e}");
        }
    }
}

// ── Server startup ───────────────────────────────────────────────

/// Bind the command server and serve it on a background task. Returns the
/// bound port (useful when `port` is 0 in tests). A bind refusal is returned
/// as an error for the caller to log; it must not abort application startup.
pub async fn start_command_server(ctx: Arc<AppContext>, port: u16) -> Result<u16, AppError> {
    let app = Router::new()
        .route(OPEN_ROUTE, post(post_open))
        .route(HEALTH_ROUTE, get(get_health))
        .layer(CorsLayer::permissive())
        .layer(Extension(ctx));

    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Bind {
            port,
            message: e.to_string(),
        })?;
    let bound_port = listener
        .local_addr()
        .map_err(|e| AppError::Bind {
            port,
            message: e.to_string(),
        })?
        .port();

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("[GeoJSON] Command server error: {e}");
        }
    });

    Ok(bound_port)
}
