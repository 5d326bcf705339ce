//! # Domain Types
//!
//! Core domain types used throughout Cardlink Detect.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    UaSignal     │   │ Classifications │   │ DetectionResult │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  user_agent     │   │  OsFamily       │   │  os + browser   │       │
//! │  │  width/height   │   │  BrowserFamily  │   │  device_type    │       │
//! │  │  pixel_ratio    │   │  DeviceType     │   │  screen_size    │       │
//! │  │  touch_points   │   │  ScreenSize     │   │  raw echo       │       │
//! │  │  standalone     │   │                 │   │  timestamp      │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! Every type here is created fresh per classification call and dropped once
//! the caller consumes it. Nothing persists across calls and nothing is
//! shared between callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH};

// =============================================================================
// Raw Signal
// =============================================================================

/// The raw signals a classification call reads.
///
/// In a browser this is captured from real platform state (navigator,
/// viewport, touch capability). In synthetic mode the
/// [`environment`](crate::environment) module fabricates one from request
/// data. Either way the engine only ever sees this struct - there is no
/// ambient fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct UaSignal {
    /// The User-Agent string. May be empty (classifies as Unknown).
    pub user_agent: String,

    /// Viewport width in CSS pixels.
    pub width: f64,

    /// Viewport height in CSS pixels.
    pub height: f64,

    /// Device pixel ratio (1.0 when unknown).
    pub pixel_ratio: f64,

    /// Maximum simultaneous touch points (0 when unknown).
    ///
    /// Disambiguates desktop-mode iPads, which present a Macintosh token
    /// but report touch capability.
    pub touch_points: u32,

    /// Whether the client runs as an installed/standalone web app.
    pub standalone: bool,
}

impl UaSignal {
    /// Creates a signal with just a User-Agent and the documented
    /// 1024x768 fallback viewport.
    pub fn from_user_agent(user_agent: impl Into<String>) -> Self {
        UaSignal {
            user_agent: user_agent.into(),
            ..UaSignal::default()
        }
    }

    /// Synthetic stand-in for the browser's media-query probe.
    ///
    /// The browser original exposed `matchMedia`; a fabricated environment
    /// has no media engine, so the probe degenerates to viewport arithmetic.
    pub fn media_matches_min_width(&self, min_width: f64) -> bool {
        self.width >= min_width
    }
}

impl Default for UaSignal {
    fn default() -> Self {
        UaSignal {
            user_agent: String::new(),
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            pixel_ratio: 1.0,
            touch_points: 0,
            standalone: false,
        }
    }
}

// =============================================================================
// OS Family
// =============================================================================

/// The resolved operating-system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Ios,
    Android,
    Windows,
    Mac,
    Linux,
    /// No rule matched. The floor value - never null/absent.
    Unknown,
}

impl Default for OsFamily {
    fn default() -> Self {
        OsFamily::Unknown
    }
}

// =============================================================================
// Browser Family
// =============================================================================

/// The resolved browser family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum BrowserFamily {
    Chrome,
    Firefox,
    Safari,
    Edge,
    Opera,
    /// No rule matched. The floor value - never null/absent.
    Unknown,
}

impl Default for BrowserFamily {
    fn default() -> Self {
        BrowserFamily::Unknown
    }
}

// =============================================================================
// Classifications
// =============================================================================

/// Resolved operating system plus extracted version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OsClassification {
    pub family: OsFamily,

    /// Version string pulled from the matched token.
    /// Empty when not extractable from the signal - never null.
    pub version: String,
}

impl OsClassification {
    /// The classification for an unrecognised or absent User-Agent.
    pub fn unknown() -> Self {
        OsClassification {
            family: OsFamily::Unknown,
            version: String::new(),
        }
    }
}

/// Resolved browser plus extracted version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BrowserClassification {
    pub family: BrowserFamily,

    /// Version string pulled from the matched token.
    /// Empty when not extractable from the signal - never null.
    pub version: String,
}

impl BrowserClassification {
    /// The classification for an unrecognised or absent User-Agent.
    pub fn unknown() -> Self {
        BrowserClassification {
            family: BrowserFamily::Unknown,
            version: String::new(),
        }
    }
}

// =============================================================================
// Device Type
// =============================================================================

/// Coarse device form factor, a pure function of viewport width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum DeviceType {
    /// width < 768
    Mobile,
    /// 768 <= width < 1024
    Tablet,
    /// width >= 1024
    Desktop,
}

// =============================================================================
// Screen Size Bucket
// =============================================================================

/// Named breakpoint bucket, finer-grained than [`DeviceType`].
///
/// Ordered: `Small < Medium < Large < Xlarge`. A larger width never yields
/// a smaller-ranked bucket (the engine's breakpoint table is monotonic and
/// the derive order here backs that with `Ord`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum ScreenSize {
    /// width < 640
    Small,
    /// 640 <= width < 1024
    Medium,
    /// 1024 <= width < 1440
    Large,
    /// width >= 1440
    Xlarge,
}

// =============================================================================
// Detection Result
// =============================================================================

/// The aggregate returned to a caller.
///
/// Assembled once per call by [`engine::detect`](crate::engine::detect) and
/// immutable after construction. Echoes the raw signal so a caller can see
/// exactly what was classified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DetectionResult {
    /// The User-Agent string that was classified (echo).
    pub user_agent: String,

    /// Resolved operating system.
    pub os: OsClassification,

    /// Resolved browser.
    pub browser: BrowserClassification,

    /// Coarse form factor from viewport width.
    pub device_type: DeviceType,

    /// Named breakpoint bucket from viewport width.
    pub screen_size: ScreenSize,

    /// Viewport width that was classified (echo).
    pub width: f64,

    /// Viewport height that was classified (echo).
    pub height: f64,

    /// When the classification was captured.
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
