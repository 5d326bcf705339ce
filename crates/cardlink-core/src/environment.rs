//! # Synthetic Environment
//!
//! Builds complete signals for callers that have no browser environment.
//!
//! ## Two Invocation Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Environment Adapter                                  │
//! │                                                                         │
//! │  Browser mode:                                                          │
//! │    real platform state ──► UaSignal ──► engine::detect(&signal)        │
//! │                                                                         │
//! │  Synthetic mode (server request handler, tests):                        │
//! │    User-Agent header ──► SyntheticEnvironment::new(ua)                 │
//! │    optional width/height ──► .with_viewport(w, h)                      │
//! │                        ──► .capture() ──► DetectionResult              │
//! │                                                                         │
//! │  The browser original INSTALLED a substitute environment over a        │
//! │  process-wide slot, classified, then restored the previous value on    │
//! │  every exit path. Two overlapping requests on one process could read   │
//! │  each other's substitute. Here the builder produces a plain value      │
//! │  that is passed explicitly, so there is nothing to install, nothing    │
//! │  to restore, and nothing for a concurrent caller to observe.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::engine;
use crate::error::CoreResult;
use crate::types::{DetectionResult, UaSignal};

// =============================================================================
// Synthetic Environment Builder
// =============================================================================

/// Fabricates a full signal from request data and runs one classification.
///
/// Every field a browser environment would expose has a documented default:
/// 1024x768 viewport, pixel ratio 1.0, no touch, not standalone. The
/// media-query probe is a no-op computed from the synthetic viewport
/// ([`UaSignal::media_matches_min_width`]).
#[derive(Debug, Clone)]
pub struct SyntheticEnvironment {
    signal: UaSignal,
}

impl SyntheticEnvironment {
    /// Starts a synthetic environment from a User-Agent string.
    ///
    /// The User-Agent is required at this layer; callers that tolerate an
    /// absent header pass the empty string and get Unknown classifications.
    pub fn new(user_agent: impl Into<String>) -> Self {
        SyntheticEnvironment {
            signal: UaSignal::from_user_agent(user_agent),
        }
    }

    /// Overrides the default 1024x768 viewport.
    pub fn with_viewport(mut self, width: f64, height: f64) -> Self {
        self.signal.width = width;
        self.signal.height = height;
        self
    }

    /// Overrides the default pixel ratio of 1.0.
    pub fn with_pixel_ratio(mut self, ratio: f64) -> Self {
        self.signal.pixel_ratio = ratio;
        self
    }

    /// Overrides the default of zero touch points.
    pub fn with_touch_points(mut self, touch_points: u32) -> Self {
        self.signal.touch_points = touch_points;
        self
    }

    /// Marks the client as an installed/standalone web app.
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.signal.standalone = standalone;
        self
    }

    /// Returns the fabricated signal without classifying.
    pub fn signal(&self) -> &UaSignal {
        &self.signal
    }

    /// Validates the fabricated signal and runs all four classifications.
    ///
    /// Consumes the builder: the signal moves into the result's echo fields
    /// and nothing outlives the call.
    pub fn capture(self) -> CoreResult<DetectionResult> {
        engine::detect(&self.signal)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
