//! # Cardlink Detect API
//!
//! HTTP JSON API exposing the synthetic-mode detection adapter.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Detect API Endpoints                             │
//! │                                                                         │
//! │  ┌────────────────────────┐  ┌────────────────────────────────────────┐│
//! │  │  GET /api/v1/detect    │  │  POST /api/v1/detect                   ││
//! │  │                        │  │                                        ││
//! │  │ • UA from request      │  │ • UA from JSON body (required)         ││
//! │  │   header (may be "")   │  │ • optional width/height                ││
//! │  │ • always succeeds      │  │ • 400 envelope when userAgent missing  ││
//! │  └────────────────────────┘  └────────────────────────────────────────┘│
//! │                                                                         │
//! │  ┌────────────────────────┐                                            │
//! │  │  GET /health           │   Uniform envelope on every response:      │
//! │  │                        │   { success, data?, error?, message? }     │
//! │  │ • liveness probe       │                                            │
//! │  └────────────────────────┘                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `HTTP_PORT` - HTTP server port (default: 8080)
//! - `BIND_ADDR` - Bind address (default: 0.0.0.0)
//! - `DEFAULT_VIEWPORT_WIDTH` - Fallback width for header-only requests
//! - `DEFAULT_VIEWPORT_HEIGHT` - Fallback height for header-only requests
//! - `MAX_BODY_BYTES` - Request body size cap (default: 16 KiB)

pub mod config;
pub mod envelope;
pub mod error;
pub mod routes;

// Re-exports
pub use config::ApiConfig;
pub use error::ApiError;

/// Shared application state.
///
/// Intentionally read-only after startup: request handling shares the
/// configuration and nothing else.
pub struct AppState {
    pub config: ApiConfig,
}
