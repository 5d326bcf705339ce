//! # Error Types
//!
//! Domain-specific error types for cardlink-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cardlink-core errors (this file)                                      │
//! │  ├── CoreError        - General detection errors                       │
//! │  └── ValidationError  - Signal validation failures                     │
//! │                                                                         │
//! │  detect-api errors (app crate)                                         │
//! │  └── ApiError         - What HTTP clients see (envelope + status)      │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → JSON envelope          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String
//! 4. A malformed-but-present User-Agent is NOT an error - the engine
//!    degrades to `Unknown`; only invalid numeric signals error out

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core detection errors.
///
/// These represent genuinely rejected input, never "we could not recognise
/// the User-Agent" (that case resolves to `Unknown` classifications).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Signal validation errors.
///
/// These errors occur when numeric signals are out of range or a bounded
/// text field exceeds its cap. Used for early validation before any
/// classification runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} bytes")]
    TooLong { field: String, max: usize },

    /// Numeric value is negative where only non-negative values make sense.
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: String, value: f64 },

    /// Numeric value is NaN or infinite.
    #[error("{field} must be finite")]
    NotFinite { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "userAgent".to_string(),
        };
        assert_eq!(err.to_string(), "userAgent is required");

        let err = ValidationError::Negative {
            field: "width".to_string(),
            value: -5.0,
        };
        assert_eq!(err.to_string(), "width must be non-negative, got -5");

        let err = ValidationError::NotFinite {
            field: "width".to_string(),
        };
        assert_eq!(err.to_string(), "width must be finite");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::NotFinite {
            field: "width".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
