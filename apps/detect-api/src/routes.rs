//! # Route Layer
//!
//! The two detection entry points plus a liveness probe.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Request Flow                                    │
//! │                                                                         │
//! │  GET /api/v1/detect                                                    │
//! │    User-Agent header (may be absent)                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    SyntheticEnvironment::new(header_or_empty)                          │
//! │         .with_viewport(config defaults)                                │
//! │         .capture()                                                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    200 { success: true, data, message } - ALWAYS                       │
//! │                                                                         │
//! │  POST /api/v1/detect                                                   │
//! │    { userAgent, width?, height? }                                      │
//! │         │                                                               │
//! │         ├── userAgent missing ──► 400 envelope, no classification      │
//! │         │                                                               │
//! │         ▼                                                               │
//! │    SyntheticEnvironment::new(userAgent)                                │
//! │         .with_viewport(body values or config defaults)                 │
//! │         .capture()                                                     │
//! │         │                                                               │
//! │         ├── invalid width/height ──► 400 envelope                      │
//! │         ▼                                                               │
//! │    200 { success: true, data, message }                                │
//! │                                                                         │
//! │  Each request fabricates its own signal; nothing is installed into     │
//! │  shared state, so overlapping requests cannot read each other's UA.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use axum::extract::{DefaultBodyLimit, State};
use axum::http::{header::USER_AGENT, HeaderMap};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::debug;

use cardlink_core::environment::SyntheticEnvironment;
use cardlink_core::MAX_USER_AGENT_LEN;

use crate::envelope::{ApiResponse, DetectionPayload};
use crate::error::ApiError;
use crate::AppState;

// =============================================================================
// Router
// =============================================================================

/// Builds the application router.
///
/// Request bodies are capped at the configured `max_body_bytes`; a valid
/// submission is a short JSON object, so anything larger is rejected before
/// deserialization.
pub fn router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.max_body_bytes;
    Router::new()
        .route(
            "/api/v1/detect",
            get(detect_from_headers).post(detect_from_body),
        )
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

/// Liveness probe.
async fn health_handler() -> &'static str {
    "OK"
}

// =============================================================================
// Read-Only Query (GET)
// =============================================================================

/// Classifies from the transport layer's `User-Agent` header.
///
/// Always answers a success envelope: an absent header degrades to the empty
/// string (Unknown classifications), dimensions fall back to the configured
/// defaults. An oversized header is treated the same as an absent one rather
/// than failing a read-only probe.
pub async fn detect_from_headers(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<DetectionPayload>>, ApiError> {
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    let user_agent = if user_agent.len() > MAX_USER_AGENT_LEN {
        debug!(len = user_agent.len(), "Oversized User-Agent header ignored");
        ""
    } else {
        user_agent
    };

    let result = SyntheticEnvironment::new(user_agent)
        .with_viewport(
            state.config.default_viewport_width,
            state.config.default_viewport_height,
        )
        .capture()
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    debug!(os = ?result.os.family, browser = ?result.browser.family, "Header detection");

    Ok(Json(ApiResponse::ok(
        result.into(),
        "Device detected from request headers",
    )))
}

// =============================================================================
// Explicit Submission (POST)
// =============================================================================

/// JSON body for the explicit-submission entry point.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectRequest {
    /// Required. A missing or blank value is a client error.
    pub user_agent: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
}

/// Classifies from explicitly submitted signals.
///
/// `userAgent` is required here - this entry point exists for callers that
/// know their signals and want them processed verbatim, so an absent value
/// is a client error, not a degenerate input.
pub async fn detect_from_body(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DetectRequest>,
) -> Result<Json<ApiResponse<DetectionPayload>>, ApiError> {
    let user_agent = match request.user_agent {
        Some(ua) if !ua.trim().is_empty() => ua,
        _ => {
            return Err(ApiError::InvalidRequest(
                "userAgent is required".to_string(),
            ))
        }
    };

    let width = request.width.unwrap_or(state.config.default_viewport_width);
    let height = request
        .height
        .unwrap_or(state.config.default_viewport_height);

    let result = SyntheticEnvironment::new(user_agent)
        .with_viewport(width, height)
        .capture()?;

    debug!(os = ?result.os.family, browser = ?result.browser.family, width, "Body detection");

    Ok(Json(ApiResponse::ok(
        result.into(),
        "Device signals processed",
    )))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};
    use axum::response::IntoResponse;
    use cardlink_core::{BrowserFamily, DeviceType, OsFamily};

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1";

    const EDGE_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 \
        Safari/537.36 Edg/124.0.2478.51";

    fn state() -> Arc<AppState> {
        Arc::new(AppState {
            config: crate::ApiConfig::default(),
        })
    }

    fn headers_with_ua(ua: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_str(ua).unwrap());
        headers
    }

    // -------------------------------------------------------------------------
    // GET /api/v1/detect
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_get_without_ua_header_succeeds_with_unknowns() {
        let response = detect_from_headers(State(state()), HeaderMap::new())
            .await
            .unwrap();

        let envelope = response.0;
        assert!(envelope.success);
        let data = envelope.data.unwrap();
        assert_eq!(data.os, OsFamily::Unknown);
        assert_eq!(data.os_version, "");
        assert_eq!(data.browser, BrowserFamily::Unknown);
        assert_eq!(data.width, 1024.0);
        assert_eq!(data.height, 768.0);
        assert_eq!(
            envelope.message.as_deref(),
            Some("Device detected from request headers")
        );
    }

    #[tokio::test]
    async fn test_get_classifies_header_ua() {
        let response = detect_from_headers(State(state()), headers_with_ua(EDGE_UA))
            .await
            .unwrap();

        let data = response.0.data.unwrap();
        assert_eq!(data.os, OsFamily::Windows);
        assert_eq!(data.browser, BrowserFamily::Edge);
        assert_eq!(data.browser_version, "124.0.2478.51");
        assert_eq!(data.user_agent, EDGE_UA);
    }

    #[tokio::test]
    async fn test_get_oversized_ua_header_degrades_to_empty() {
        let huge = "A".repeat(MAX_USER_AGENT_LEN + 1);
        let response = detect_from_headers(State(state()), headers_with_ua(&huge))
            .await
            .unwrap();

        let data = response.0.data.unwrap();
        assert_eq!(data.os, OsFamily::Unknown);
        assert_eq!(data.user_agent, "");
    }

    // -------------------------------------------------------------------------
    // POST /api/v1/detect
    // -------------------------------------------------------------------------

    #[tokio::test]
    async fn test_post_missing_ua_is_client_error() {
        let request = DetectRequest {
            user_agent: None,
            width: Some(390.0),
            height: Some(844.0),
        };

        let err = detect_from_body(State(state()), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_blank_ua_is_client_error() {
        let request = DetectRequest {
            user_agent: Some("   ".to_string()),
            width: None,
            height: None,
        };

        let err = detect_from_body(State(state()), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_post_happy_path() {
        let request = DetectRequest {
            user_agent: Some(IPHONE_UA.to_string()),
            width: Some(390.0),
            height: Some(844.0),
        };

        let envelope = detect_from_body(State(state()), Json(request))
            .await
            .unwrap()
            .0;
        assert!(envelope.success);
        assert_eq!(envelope.message.as_deref(), Some("Device signals processed"));

        let data = envelope.data.unwrap();
        assert_eq!(data.os, OsFamily::Ios);
        assert_eq!(data.os_version, "17.4");
        assert_eq!(data.browser, BrowserFamily::Safari);
        assert_eq!(data.device_type, DeviceType::Mobile);
        assert_eq!(data.width, 390.0);
    }

    #[tokio::test]
    async fn test_post_defaults_missing_dimensions() {
        let request = DetectRequest {
            user_agent: Some(IPHONE_UA.to_string()),
            width: None,
            height: None,
        };

        let data = detect_from_body(State(state()), Json(request))
            .await
            .unwrap()
            .0
            .data
            .unwrap();
        assert_eq!(data.width, 1024.0);
        assert_eq!(data.height, 768.0);
        assert_eq!(data.device_type, DeviceType::Desktop);
    }

    #[tokio::test]
    async fn test_post_invalid_width_is_client_error() {
        let request = DetectRequest {
            user_agent: Some(IPHONE_UA.to_string()),
            width: Some(-50.0),
            height: None,
        };

        let err = detect_from_body(State(state()), Json(request))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest(_)));
    }

    #[tokio::test]
    async fn test_error_envelope_wire_shape() {
        let response = ApiError::InvalidRequest("userAgent is required".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "userAgent is required");
        assert!(json.get("data").is_none());
    }

    // -------------------------------------------------------------------------
    // Concurrency
    // -------------------------------------------------------------------------

    /// Two in-flight requests with different User-Agents must each see their
    /// own classification. There is no shared signal slot for them to race
    /// on, and this pins that down at the handler level.
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_requests_do_not_cross_talk() {
        let shared = state();

        let mut tasks = Vec::new();
        for _ in 0..50 {
            let s = shared.clone();
            tasks.push(tokio::spawn(async move {
                let envelope = detect_from_body(
                    State(s),
                    Json(DetectRequest {
                        user_agent: Some(IPHONE_UA.to_string()),
                        width: Some(390.0),
                        height: Some(844.0),
                    }),
                )
                .await
                .unwrap()
                .0;
                let data = envelope.data.unwrap();
                assert_eq!(data.os, OsFamily::Ios);
                assert_eq!(data.user_agent, IPHONE_UA);
            }));

            let s = shared.clone();
            tasks.push(tokio::spawn(async move {
                let envelope = detect_from_body(
                    State(s),
                    Json(DetectRequest {
                        user_agent: Some(EDGE_UA.to_string()),
                        width: Some(1920.0),
                        height: Some(1080.0),
                    }),
                )
                .await
                .unwrap()
                .0;
                let data = envelope.data.unwrap();
                assert_eq!(data.os, OsFamily::Windows);
                assert_eq!(data.browser, BrowserFamily::Edge);
                assert_eq!(data.user_agent, EDGE_UA);
            }));
        }

        for task in tasks {
            task.await.unwrap();
        }
    }
}
