//! Stand-in for the PRISM message backend.
//!
//! Serves `POST /api/chat` with canned behaviour so the chat client can be
//! exercised without the real assistant:
//!
//! | Mode    | Reply |
//! |---------|-------|
//! | `echo`  | `200 {"response": "You said: <message>"}` |
//! | `empty` | `200 {}` |
//! | `error` | `500 {"response": "Error: ...", "error": true}` |

use std::sync::Arc;

use anyhow::Result;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use clap::{Parser, ValueEnum};
use prism_models::ChatRequest;
use prism_sdk::ApiRoutes;
use serde_json::{json, Value};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "mock-chat-backend", about = "Mock PRISM message backend")]
struct Args {
    #[arg(long, default_value_t = 5000)]
    port: u16,

    #[arg(long, value_enum, default_value_t = Mode::Echo)]
    mode: Mode,
}

#[derive(Clone, Copy, Debug, ValueEnum, PartialEq, Eq)]
enum Mode {
    Echo,
    Empty,
    Error,
}

struct AppState {
    mode: Mode,
}

fn app(mode: Mode) -> Router {
    Router::new()
        .route(ApiRoutes::CHAT, post(chat))
        .with_state(Arc::new(AppState { mode }))
}

/// `POST /api/chat`
async fn chat(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<Value>) {
    info!(mode = ?state.mode, message = %req.message, timestamp = %req.timestamp, "chat request");

    match state.mode {
        Mode::Echo => (
            StatusCode::OK,
            Json(json!({ "response": format!("You said: {}", req.message) })),
        ),
        Mode::Empty => (StatusCode::OK, Json(json!({}))),
        Mode::Error => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "response": "Error: assistant unavailable", "error": true })),
        ),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!(address = %addr, mode = ?args.mode, "mock backend listening");
    axum::serve(listener, app(args.mode)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_test::TestServer;

    fn server(mode: Mode) -> TestServer {
        TestServer::new(app(mode)).unwrap()
    }

    fn body(message: &str) -> Value {
        json!({ "message": message, "timestamp": "2025-09-01T10:00:00.000Z" })
    }

    #[tokio::test]
    async fn echo_mode_repeats_message() {
        let res = server(Mode::Echo).post(ApiRoutes::CHAT).json(&body("hello")).await;
        res.assert_status_ok();
        assert_eq!(res.json::<Value>(), json!({ "response": "You said: hello" }));
    }

    #[tokio::test]
    async fn empty_mode_omits_response() {
        let res = server(Mode::Empty).post(ApiRoutes::CHAT).json(&body("ping")).await;
        res.assert_status_ok();
        assert_eq!(res.json::<Value>(), json!({}));
    }

    #[tokio::test]
    async fn error_mode_returns_500() {
        let res = server(Mode::Error)
            .post(ApiRoutes::CHAT)
            .expect_failure()
            .json(&body("test"))
            .await;
        res.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.json::<Value>()["error"], json!(true));
    }

    #[tokio::test]
    async fn missing_fields_are_rejected() {
        let res = server(Mode::Echo)
            .post(ApiRoutes::CHAT)
            .expect_failure()
            .json(&json!({ "text": "hello" }))
            .await;
        assert!(res.status_code().is_client_error());
    }

    #[test]
    fn default_args() {
        let args = Args::try_parse_from(["mock-chat-backend"]).unwrap();
        assert_eq!(args.port, 5000);
        assert_eq!(args.mode, Mode::Echo);
    }
}
