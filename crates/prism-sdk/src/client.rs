//! HTTP client for the PRISM message backend.
//!
//! [`ChatClient`] performs exactly one round-trip per call: it posts a
//! [`ChatRequest`] to `/api/chat` and decodes the [`ChatReply`].  There is no
//! retry, no timeout and no cancellation; a request always runs until the
//! transport resolves it one way or the other.
//!
//! # Typical usage
//!
//! ```rust,no_run
//! use prism_sdk::{ChatClient, ChatRequest, ClientConfig};
//!
//! # async fn run() -> Result<(), prism_sdk::SdkError> {
//! let client = ChatClient::new(&ClientConfig::from_env())?;
//! let reply = client.send(&ChatRequest::new("Which samples contain PET?")).await?;
//! println!("bot: {}", reply.display_text());
//! # Ok(())
//! # }
//! ```

use prism_models::{ChatReply, ChatRequest};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::SdkError;
use crate::routes::ApiRoutes;

const APPLICATION_JSON: &str = "application/json";

/// A handle on the message backend.
///
/// Cheap to clone; clones share the underlying connection pool, so a host
/// event loop can hand a clone to a spawned task.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    /// Build a client for the backend described by `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, SdkError> {
        config.validate()?;
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: ApiRoutes::chat(&config.base_url),
        })
    }

    /// Submit one message and wait for the reply.
    ///
    /// * transport failure → [`SdkError::Http`]
    /// * non-2xx status → [`SdkError::Status`]
    /// * body that is not a JSON object → [`SdkError::Serialization`]
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatReply, SdkError> {
        debug!(endpoint = %self.endpoint, message = %request.message, "posting chat message");

        let res = self
            .http
            .post(&self.endpoint)
            .header(CONTENT_TYPE, APPLICATION_JSON)
            .header(ACCEPT, APPLICATION_JSON)
            .json(request)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "backend returned an error status");
            return Err(SdkError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = res.bytes().await?;
        let reply: ChatReply = serde_json::from_slice(&bytes)?;
        debug!(?reply, "chat reply decoded");
        Ok(reply)
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};

    /// Serve `app` on an ephemeral local port and return its base URL.
    async fn spawn_backend(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn client_for(base: &str) -> ChatClient {
        ChatClient::new(&ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn endpoint_appends_chat_route() {
        let client = client_for("http://localhost:5000/");
        assert_eq!(client.endpoint(), "http://localhost:5000/api/chat");
    }

    #[test]
    fn invalid_config_rejected() {
        assert!(ChatClient::new(&ClientConfig::new("")).is_err());
    }

    #[tokio::test]
    async fn send_posts_json_with_headers() {
        let app = Router::new().route(
            ApiRoutes::CHAT,
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let accept = headers
                    .get(ACCEPT)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                let content_type = headers
                    .get(CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                Json(json!({
                    "response": format!(
                        "{}|{}|{}|{}",
                        body["message"].as_str().unwrap_or_default(),
                        body["timestamp"].is_string(),
                        accept,
                        content_type,
                    )
                }))
            }),
        );
        let base = spawn_backend(app).await;

        let reply = client_for(&base)
            .send(&ChatRequest::new("hello"))
            .await
            .unwrap();

        assert_eq!(
            reply.display_text(),
            "hello|true|application/json|application/json"
        );
    }

    #[tokio::test]
    async fn non_success_status_is_error() {
        let app = Router::new().route(
            ApiRoutes::CHAT,
            post(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "response": "Error: boom", "error": true })),
                )
            }),
        );
        let base = spawn_backend(app).await;

        let err = client_for(&base)
            .send(&ChatRequest::new("test"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(matches!(err, SdkError::Status { ref body, .. } if body.contains("boom")));
    }

    #[tokio::test]
    async fn malformed_body_is_serialization_error() {
        let app = Router::new().route(ApiRoutes::CHAT, post(|| async { "<h2>not json</h2>" }));
        let base = spawn_backend(app).await;

        let err = client_for(&base)
            .send(&ChatRequest::new("ping"))
            .await
            .unwrap_err();

        assert!(matches!(err, SdkError::Serialization(_)));
    }

    #[tokio::test]
    async fn non_object_json_body_is_serialization_error() {
        for body in [json!(["hi"]), json!("abc"), Value::Null] {
            let reply = body.clone();
            let app = Router::new().route(
                ApiRoutes::CHAT,
                post(move || {
                    let reply = reply.clone();
                    async move { Json(reply) }
                }),
            );
            let base = spawn_backend(app).await;

            let err = client_for(&base)
                .send(&ChatRequest::new("ping"))
                .await
                .unwrap_err();

            assert!(
                matches!(err, SdkError::Serialization(_)),
                "body {body} gave {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn empty_object_decodes_to_fallback() {
        let app = Router::new().route(ApiRoutes::CHAT, post(|| async { Json(json!({})) }));
        let base = spawn_backend(app).await;

        let reply = client_for(&base)
            .send(&ChatRequest::new("ping"))
            .await
            .unwrap();

        assert_eq!(reply.display_text(), prism_models::NO_RESPONSE_TEXT);
    }

    #[tokio::test]
    async fn unreachable_backend_is_transport_error() {
        // Grab a free port, then close it so nothing is listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let err = client_for(&format!("http://{addr}"))
            .send(&ChatRequest::new("anyone?"))
            .await
            .unwrap_err();

        assert!(matches!(err, SdkError::Http(_)));
    }
}
