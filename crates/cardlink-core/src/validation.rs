//! # Validation Module
//!
//! Signal validation for Cardlink Detect.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP handler (detect-api)                                    │
//! │  ├── Required-field checks (userAgent present in POST bodies)          │
//! │  └── Immediate client-error responses (400)                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (runs inside every capture)                      │
//! │  ├── Numeric signals are finite and non-negative                       │
//! │  └── User-Agent length is bounded                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Engine invariants                                            │
//! │  └── Unrecognised input degrades to Unknown, never errors              │
//! │                                                                         │
//! │  A degenerate signal (empty UA, default viewport) is VALID.            │
//! │  Only out-of-domain numbers and oversized text are rejected.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::MAX_USER_AGENT_LEN;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a viewport width.
///
/// ## Rules
/// - Must be finite (no NaN, no infinities)
/// - Must be non-negative (zero is a legal, if odd, viewport)
///
/// Breakpoint comparison on a NaN width would silently fall through every
/// interval; reject it up front instead.
pub fn validate_width(width: f64) -> ValidationResult<()> {
    validate_dimension("width", width)
}

/// Validates a viewport height. Same rules as [`validate_width`].
pub fn validate_height(height: f64) -> ValidationResult<()> {
    validate_dimension("height", height)
}

fn validate_dimension(field: &str, value: f64) -> ValidationResult<()> {
    if !value.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    if value < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
            value,
        });
    }

    Ok(())
}

/// Validates a device pixel ratio.
///
/// ## Rules
/// - Must be finite and strictly positive
/// - Real devices sit between 1.0 and 4.0; allow up to 10 for headroom
pub fn validate_pixel_ratio(ratio: f64) -> ValidationResult<()> {
    if !ratio.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "pixelRatio".to_string(),
        });
    }

    if ratio <= 0.0 || ratio > 10.0 {
        return Err(ValidationError::OutOfRange {
            field: "pixelRatio".to_string(),
            min: 0.0,
            max: 10.0,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a User-Agent string.
///
/// ## Rules
/// - Empty is ALLOWED (classifies as Unknown)
/// - Must not exceed [`MAX_USER_AGENT_LEN`] bytes
///
/// ## Example
/// ```rust
/// use cardlink_core::validation::validate_user_agent;
///
/// assert!(validate_user_agent("").is_ok());
/// assert!(validate_user_agent("Mozilla/5.0 (X11; Linux x86_64)").is_ok());
/// assert!(validate_user_agent(&"A".repeat(10_000)).is_err());
/// ```
pub fn validate_user_agent(user_agent: &str) -> ValidationResult<()> {
    if user_agent.len() > MAX_USER_AGENT_LEN {
        return Err(ValidationError::TooLong {
            field: "userAgent".to_string(),
            max: MAX_USER_AGENT_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
