//! # Detection Engine
//!
//! The four classification operations plus the aggregate capture.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Detection Engine                                  │
//! │                                                                         │
//! │  detect_os(&signal)          ──► OsClassification      (never errors)  │
//! │  detect_browser(&signal)     ──► BrowserClassification (never errors)  │
//! │  detect_device_type(width)   ──► DeviceType     (validated threshold)  │
//! │  detect_screen_size(width)   ──► ScreenSize     (validated threshold)  │
//! │                                                                         │
//! │  detect(&signal)             ──► DetectionResult (all four + stamp)    │
//! │                                                                         │
//! │  Every operation takes its signal EXPLICITLY. Nothing here reads a     │
//! │  global, so concurrent callers cannot interfere with each other.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Breakpoints
//! ```text
//! width:      0        640       768        1024       1440
//! device:     ├── mobile ──────────┼─ tablet ──┼── desktop ──────►
//! screen:     ├─ small ──┼──── medium ─────────┼─ large ──┼─ xlarge ──►
//! ```
//! Intervals are half-open on the right; the boundary value belongs to the
//! larger bucket (768 is Tablet, 1024 is Desktop).

use chrono::Utc;

use crate::error::{CoreResult, ValidationError};
use crate::rules::{browser_rules, os_rules};
use crate::types::{
    BrowserClassification, DetectionResult, DeviceType, OsClassification, ScreenSize, UaSignal,
};
use crate::validation::{
    validate_height, validate_pixel_ratio, validate_user_agent, validate_width,
};
use crate::{MOBILE_MAX_WIDTH, TABLET_MAX_WIDTH};

// =============================================================================
// OS Detection
// =============================================================================

/// Classifies the operating system from a signal.
///
/// Walks the priority-ordered rule table, first match wins. An empty or
/// unrecognised User-Agent yields `{Unknown, ""}` - this operation never
/// errors and never panics.
pub fn detect_os(signal: &UaSignal) -> OsClassification {
    for rule in os_rules() {
        if rule.matches(signal) {
            return OsClassification {
                family: rule.family,
                version: rule.extract_version(&signal.user_agent),
            };
        }
    }

    OsClassification::unknown()
}

// =============================================================================
// Browser Detection
// =============================================================================

/// Classifies the browser from a signal.
///
/// Same mechanism as [`detect_os`]: ordered table, first match wins,
/// `{Unknown, ""}` floor. Never errors.
pub fn detect_browser(signal: &UaSignal) -> BrowserClassification {
    for rule in browser_rules() {
        if rule.matches(&signal.user_agent) {
            return BrowserClassification {
                family: rule.family,
                version: rule.extract_version(&signal.user_agent),
            };
        }
    }

    BrowserClassification::unknown()
}

// =============================================================================
// Device Type
// =============================================================================

/// Classifies the coarse form factor from viewport width.
///
/// ## Thresholds
/// - `w < 768` → Mobile
/// - `768 <= w < 1024` → Tablet
/// - `w >= 1024` → Desktop
///
/// Negative or non-finite widths are rejected, never silently defaulted.
pub fn detect_device_type(width: f64) -> Result<DeviceType, ValidationError> {
    validate_width(width)?;

    Ok(if width < MOBILE_MAX_WIDTH {
        DeviceType::Mobile
    } else if width < TABLET_MAX_WIDTH {
        DeviceType::Tablet
    } else {
        DeviceType::Desktop
    })
}

// =============================================================================
// Screen Size Bucket
// =============================================================================

/// Classifies the named breakpoint bucket from viewport width.
///
/// Finer-grained than [`detect_device_type`]; monotonic non-decreasing in
/// width and total over all valid widths.
pub fn detect_screen_size(width: f64) -> Result<ScreenSize, ValidationError> {
    validate_width(width)?;

    Ok(if width < 640.0 {
        ScreenSize::Small
    } else if width < 1024.0 {
        ScreenSize::Medium
    } else if width < 1440.0 {
        ScreenSize::Large
    } else {
        ScreenSize::Xlarge
    })
}

// =============================================================================
// Aggregate Capture
// =============================================================================

/// Runs all four classifications against one signal and stamps the result.
///
/// The only fallible steps are signal validation; classification itself
/// degrades rather than failing. The result is assembled once and is
/// immutable after construction.
pub fn detect(signal: &UaSignal) -> CoreResult<DetectionResult> {
    validate_user_agent(&signal.user_agent)?;
    validate_width(signal.width)?;
    validate_height(signal.height)?;
    validate_pixel_ratio(signal.pixel_ratio)?;

    Ok(DetectionResult {
        user_agent: signal.user_agent.clone(),
        os: detect_os(signal),
        browser: detect_browser(signal),
        device_type: detect_device_type(signal.width)?,
        screen_size: detect_screen_size(signal.width)?,
        width: signal.width,
        height: signal.height,
        timestamp: Utc::now(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BrowserFamily, OsFamily};

    const CHROME_WIN_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";

    const EDGE_WIN_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 \
        Safari/537.36 Edg/124.0.2478.51";

    const OPERA_MAC_UA: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 \
        Safari/537.36 OPR/109.0.0.0";

    const IPHONE_SAFARI_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_4 like Mac OS X) \
        AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Mobile/15E148 Safari/604.1";

    const ANDROID_CHROME_UA: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) \
        AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.6367.82 Mobile Safari/537.36";

    const FIREFOX_LINUX_UA: &str =
        "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0";

    fn signal(ua: &str) -> UaSignal {
        UaSignal::from_user_agent(ua)
    }

    // -------------------------------------------------------------------------
    // OS detection
    // -------------------------------------------------------------------------

    #[test]
    fn test_detect_os_empty_ua_is_unknown() {
        let result = detect_os(&signal(""));
        assert_eq!(result.family, OsFamily::Unknown);
        assert_eq!(result.version, "");
    }

    #[test]
    fn test_detect_os_garbage_ua_is_unknown() {
        let result = detect_os(&signal("definitely not a user agent"));
        assert_eq!(result.family, OsFamily::Unknown);
        assert_eq!(result.version, "");
    }

    #[test]
    fn test_detect_os_iphone_beats_generic_apple_token() {
        // Contains both "iPhone" and "Mac OS X"; priority says iOS.
        let result = detect_os(&signal(IPHONE_SAFARI_UA));
        assert_eq!(result.family, OsFamily::Ios);
        assert_eq!(result.version, "17.4");
    }

    #[test]
    fn test_detect_os_android_beats_linux_token() {
        // Contains both "Android" and "Linux"; priority says Android.
        let result = detect_os(&signal(ANDROID_CHROME_UA));
        assert_eq!(result.family, OsFamily::Android);
        assert_eq!(result.version, "14");
    }

    #[test]
    fn test_detect_os_windows_with_version() {
        let result = detect_os(&signal(CHROME_WIN_UA));
        assert_eq!(result.family, OsFamily::Windows);
        assert_eq!(result.version, "10.0");
    }

    #[test]
    fn test_detect_os_mac_with_underscore_version() {
        let result = detect_os(&signal(OPERA_MAC_UA));
        assert_eq!(result.family, OsFamily::Mac);
        assert_eq!(result.version, "10.15.7");
    }

    #[test]
    fn test_detect_os_linux_empty_version() {
        let result = detect_os(&signal(FIREFOX_LINUX_UA));
        assert_eq!(result.family, OsFamily::Linux);
        assert_eq!(result.version, "");
    }

    #[test]
    fn test_detect_os_ipad_desktop_mode_is_ios_not_mac() {
        let mut s = signal(
            "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_6) \
             AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
        );
        s.touch_points = 5;
        assert_eq!(detect_os(&s).family, OsFamily::Ios);

        s.touch_points = 0;
        assert_eq!(detect_os(&s).family, OsFamily::Mac);
    }

    // -------------------------------------------------------------------------
    // Browser detection
    // -------------------------------------------------------------------------

    #[test]
    fn test_detect_browser_empty_ua_is_unknown() {
        let result = detect_browser(&signal(""));
        assert_eq!(result.family, BrowserFamily::Unknown);
        assert_eq!(result.version, "");
    }

    #[test]
    fn test_detect_browser_edge_beats_chrome_token() {
        // Contains the literal "Chrome/"; priority says Edge.
        let result = detect_browser(&signal(EDGE_WIN_UA));
        assert_eq!(result.family, BrowserFamily::Edge);
        assert_eq!(result.version, "124.0.2478.51");
    }

    #[test]
    fn test_detect_browser_opera_beats_chrome_token() {
        let result = detect_browser(&signal(OPERA_MAC_UA));
        assert_eq!(result.family, BrowserFamily::Opera);
        assert_eq!(result.version, "109.0.0.0");
    }

    #[test]
    fn test_detect_browser_chrome_beats_safari_token() {
        // Contains "Safari/"; priority says Chrome.
        let result = detect_browser(&signal(CHROME_WIN_UA));
        assert_eq!(result.family, BrowserFamily::Chrome);
        assert_eq!(result.version, "124.0.0.0");
    }

    #[test]
    fn test_detect_browser_safari_from_version_token() {
        let result = detect_browser(&signal(IPHONE_SAFARI_UA));
        assert_eq!(result.family, BrowserFamily::Safari);
        assert_eq!(result.version, "17.4");
    }

    #[test]
    fn test_detect_browser_firefox() {
        let result = detect_browser(&signal(FIREFOX_LINUX_UA));
        assert_eq!(result.family, BrowserFamily::Firefox);
        assert_eq!(result.version, "125.0");
    }

    // -------------------------------------------------------------------------
    // Device type thresholds
    // -------------------------------------------------------------------------

    #[test]
    fn test_device_type_boundaries() {
        assert_eq!(detect_device_type(0.0).unwrap(), DeviceType::Mobile);
        assert_eq!(detect_device_type(767.0).unwrap(), DeviceType::Mobile);
        assert_eq!(detect_device_type(767.9).unwrap(), DeviceType::Mobile);
        assert_eq!(detect_device_type(768.0).unwrap(), DeviceType::Tablet);
        assert_eq!(detect_device_type(1023.0).unwrap(), DeviceType::Tablet);
        assert_eq!(detect_device_type(1024.0).unwrap(), DeviceType::Desktop);
        assert_eq!(detect_device_type(3840.0).unwrap(), DeviceType::Desktop);
    }

    #[test]
    fn test_device_type_rejects_invalid_width() {
        assert!(detect_device_type(-1.0).is_err());
        assert!(detect_device_type(f64::NAN).is_err());
        assert!(detect_device_type(f64::INFINITY).is_err());
    }

    #[test]
    fn test_device_type_is_deterministic() {
        for _ in 0..3 {
            assert_eq!(detect_device_type(800.0).unwrap(), DeviceType::Tablet);
        }
    }

    // -------------------------------------------------------------------------
    // Screen size buckets
    // -------------------------------------------------------------------------

    #[test]
    fn test_screen_size_boundaries() {
        assert_eq!(detect_screen_size(0.0).unwrap(), ScreenSize::Small);
        assert_eq!(detect_screen_size(639.0).unwrap(), ScreenSize::Small);
        assert_eq!(detect_screen_size(640.0).unwrap(), ScreenSize::Medium);
        assert_eq!(detect_screen_size(1023.0).unwrap(), ScreenSize::Medium);
        assert_eq!(detect_screen_size(1024.0).unwrap(), ScreenSize::Large);
        assert_eq!(detect_screen_size(1439.0).unwrap(), ScreenSize::Large);
        assert_eq!(detect_screen_size(1440.0).unwrap(), ScreenSize::Xlarge);
    }

    #[test]
    fn test_screen_size_is_monotonic_in_width() {
        let mut last = ScreenSize::Small;
        let mut w = 0.0;
        while w <= 4000.0 {
            let bucket = detect_screen_size(w).unwrap();
            assert!(bucket >= last, "bucket shrank at width {}", w);
            last = bucket;
            w += 0.5;
        }
    }

    #[test]
    fn test_screen_size_rejects_invalid_width() {
        assert!(detect_screen_size(-0.1).is_err());
        assert!(detect_screen_size(f64::NAN).is_err());
    }

    // -------------------------------------------------------------------------
    // Aggregate
    // -------------------------------------------------------------------------

    #[test]
    fn test_detect_assembles_all_classifications() {
        let mut s = signal(ANDROID_CHROME_UA);
        s.width = 412.0;
        s.height = 915.0;

        let result = detect(&s).unwrap();
        assert_eq!(result.os.family, OsFamily::Android);
        assert_eq!(result.browser.family, BrowserFamily::Chrome);
        assert_eq!(result.device_type, DeviceType::Mobile);
        assert_eq!(result.screen_size, ScreenSize::Small);
        assert_eq!(result.user_agent, ANDROID_CHROME_UA);
        assert_eq!(result.width, 412.0);
        assert_eq!(result.height, 915.0);
    }

    #[test]
    fn test_detect_rejects_invalid_signal() {
        let mut s = signal(CHROME_WIN_UA);
        s.width = f64::NAN;
        assert!(detect(&s).is_err());

        let mut s = signal(CHROME_WIN_UA);
        s.height = -10.0;
        assert!(detect(&s).is_err());

        let mut s = signal(CHROME_WIN_UA);
        s.pixel_ratio = f64::NAN;
        assert!(detect(&s).is_err());

        let s = signal(&"A".repeat(crate::MAX_USER_AGENT_LEN + 1));
        assert!(detect(&s).is_err());
    }

    #[test]
    fn test_detect_degenerate_signal_is_valid() {
        let result = detect(&UaSignal::default()).unwrap();
        assert_eq!(result.os.family, OsFamily::Unknown);
        assert_eq!(result.browser.family, BrowserFamily::Unknown);
        assert_eq!(result.device_type, DeviceType::Desktop);
        assert_eq!(result.width, 1024.0);
        assert_eq!(result.height, 768.0);
    }
}
