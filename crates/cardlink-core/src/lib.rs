//! # cardlink-core: Pure Detection Logic for Cardlink
//!
//! This crate is the **heart** of the Cardlink device-detection subsystem.
//! It classifies a client's operating system, browser, device category, and
//! screen-size bucket from raw signals, as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cardlink Detect Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Callers (two invocation modes)                  │   │
//! │  │    Browser shim (real signals) ── Server handler (synthetic)   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ UaSignal (explicit, per call)          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cardlink-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   rules   │  │  engine   │  │environment│  │   │
//! │  │   │ UaSignal  │  │ OS rules  │  │ detect_os │  │ Synthetic │  │   │
//! │  │   │  Result   │  │ UA rules  │  │ detect_*  │  │  builder  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBALS • NO AMBIENT STATE • PURE FUNCTIONS      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  apps/detect-api (HTTP layer)                   │   │
//! │  │           GET/POST /api/v1/detect, JSON envelopes               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (UaSignal, classifications, DetectionResult)
//! - [`rules`] - Priority-ordered OS/browser rule tables
//! - [`engine`] - The four classification operations plus the aggregate
//! - [`environment`] - Synthetic signal builder for non-browser callers
//! - [`error`] - Domain error types
//! - [`validation`] - Signal validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic - same signal = same result
//! 2. **No Ambient State**: The engine reads nothing it is not handed. The
//!    browser original swapped a substitute environment into a shared global
//!    and restored it afterwards; here every call carries its own [`types::UaSignal`],
//!    so two concurrent callers can never observe each other's signals.
//! 3. **Ordered Rules**: Token precedence (iPad before Macintosh, Edge before
//!    Chrome) is data in an explicit table, never implicit branch order.
//! 4. **Degrade, Don't Fail**: An empty or unparseable User-Agent yields
//!    `Unknown` with an empty version, never an error or a panic.
//!
//! ## Example Usage
//!
//! ```rust
//! use cardlink_core::environment::SyntheticEnvironment;
//! use cardlink_core::types::{DeviceType, OsFamily};
//!
//! let result = SyntheticEnvironment::new(
//!     "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
//!      AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 \
//!      Mobile/15E148 Safari/604.1",
//! )
//! .with_viewport(390.0, 844.0)
//! .capture()
//! .unwrap();
//!
//! assert_eq!(result.os.family, OsFamily::Ios);
//! assert_eq!(result.device_type, DeviceType::Mobile);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod engine;
pub mod environment;
pub mod error;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use cardlink_core::DetectionResult` instead of
// `use cardlink_core::types::DetectionResult`

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default viewport width when a caller supplies no dimensions.
///
/// ## Why 1024×768?
/// The browser original could always read a real viewport; a stateless server
/// request has none. 1024×768 lands the fallback in the Desktop bucket, which
/// is the least-wrong assumption for a headerless caller.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1024.0;

/// Default viewport height when a caller supplies no dimensions.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 768.0;

/// Widths below this are Mobile.
pub const MOBILE_MAX_WIDTH: f64 = 768.0;

/// Widths below this (and at least [`MOBILE_MAX_WIDTH`]) are Tablet.
pub const TABLET_MAX_WIDTH: f64 = 1024.0;

/// Maximum accepted User-Agent length in bytes.
///
/// User-Agent strings are short, bounded text; anything beyond this is
/// hostile input and is rejected before the rule tables run.
pub const MAX_USER_AGENT_LEN: usize = 4096;
