//! # Classification Rule Tables
//!
//! Priority-ordered rule tables for OS and browser detection.
//!
//! ## Why Ordered Tables?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Token Nesting in User-Agents                          │
//! │                                                                         │
//! │  OS tokens overlap:                                                     │
//! │    iPad (desktop mode) ──► "Macintosh" + touch     must beat Mac       │
//! │    Android             ──► contains "Linux"        must beat Linux     │
//! │                                                                         │
//! │  Browser tokens nest:                                                   │
//! │    Edge   ──► "... Chrome/124.0 ... Edg/124.0"     must beat Chrome    │
//! │    Opera  ──► "... Chrome/124.0 ... OPR/110.0"     must beat Chrome    │
//! │    Chrome ──► "... Chrome/124.0 Safari/537.36"     must beat Safari    │
//! │                                                                         │
//! │  Evaluation: walk the table top to bottom, FIRST MATCH WINS.           │
//! │  Precedence is data in the table, never implicit branch order,         │
//! │  and the ordering is unit-tested below.                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Version Extraction
//! Each rule carries an optional regex that pulls the version out of the
//! matched token. Extraction failure is not an error: the classification
//! keeps its family and reports an empty version string.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{BrowserFamily, OsFamily, UaSignal};

// =============================================================================
// OS Rules
// =============================================================================

/// One entry in the OS rule table.
pub struct OsRule {
    /// Family this rule resolves to.
    pub family: OsFamily,

    /// Predicate over the full signal.
    ///
    /// A signal (not just the UA string) because desktop-mode iPads are only
    /// distinguishable from real Macs by touch capability.
    matcher: fn(&UaSignal) -> bool,

    /// Version sub-pattern for the matched vendor; first capture group is
    /// the version. `None` when the vendor advertises no usable version.
    version: Option<Regex>,

    /// Apple writes versions with underscores ("17_4_1"); normalize to dots.
    underscore_version: bool,
}

impl OsRule {
    /// Whether this rule matches the signal.
    #[inline]
    pub fn matches(&self, signal: &UaSignal) -> bool {
        (self.matcher)(signal)
    }

    /// Extracts the version from the User-Agent, empty string on failure.
    pub fn extract_version(&self, user_agent: &str) -> String {
        let Some(re) = &self.version else {
            return String::new();
        };
        let raw = re
            .captures(user_agent)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();
        if self.underscore_version {
            raw.replace('_', ".")
        } else {
            raw
        }
    }
}

fn is_ios(signal: &UaSignal) -> bool {
    let ua = &signal.user_agent;
    if ua.contains("iPhone") || ua.contains("iPad") || ua.contains("iPod") {
        return true;
    }
    // Desktop-mode iPad: presents a Macintosh token but reports touch.
    ua.contains("Macintosh") && signal.touch_points > 1
}

fn is_android(signal: &UaSignal) -> bool {
    signal.user_agent.contains("Android")
}

fn is_windows(signal: &UaSignal) -> bool {
    signal.user_agent.contains("Windows")
}

fn is_mac(signal: &UaSignal) -> bool {
    signal.user_agent.contains("Macintosh") || signal.user_agent.contains("Mac OS X")
}

fn is_linux(signal: &UaSignal) -> bool {
    signal.user_agent.contains("Linux") || signal.user_agent.contains("X11")
}

/// The OS rule table, priority order top to bottom.
///
/// Ordering constraints:
/// - iOS before Mac (iPad desktop mode presents "Macintosh")
/// - Android before Linux (Android UAs contain "Linux")
static OS_RULES: LazyLock<Vec<OsRule>> = LazyLock::new(|| {
    vec![
        OsRule {
            family: OsFamily::Ios,
            matcher: is_ios,
            // "CPU iPhone OS 17_4 like Mac OS X" / "CPU OS 17_4 like Mac OS X"
            version: Some(Regex::new(r"OS (\d+(?:_\d+)*) like Mac OS X").unwrap()),
            underscore_version: true,
        },
        OsRule {
            family: OsFamily::Android,
            matcher: is_android,
            version: Some(Regex::new(r"Android (\d+(?:\.\d+)*)").unwrap()),
            underscore_version: false,
        },
        OsRule {
            family: OsFamily::Windows,
            matcher: is_windows,
            version: Some(Regex::new(r"Windows NT (\d+(?:\.\d+)*)").unwrap()),
            underscore_version: false,
        },
        OsRule {
            family: OsFamily::Mac,
            matcher: is_mac,
            version: Some(Regex::new(r"Mac OS X (\d+(?:[_.]\d+)*)").unwrap()),
            underscore_version: true,
        },
        OsRule {
            family: OsFamily::Linux,
            matcher: is_linux,
            // Desktop Linux UAs advertise no OS version.
            version: None,
            underscore_version: false,
        },
    ]
});

/// Returns the OS rule table in priority order.
pub fn os_rules() -> &'static [OsRule] {
    &OS_RULES
}

// =============================================================================
// Browser Rules
// =============================================================================

/// One entry in the browser rule table.
pub struct BrowserRule {
    /// Family this rule resolves to.
    pub family: BrowserFamily,

    /// Any of these substrings matches the rule.
    tokens: &'static [&'static str],

    /// Version sub-pattern; first capture group is the version.
    version: Regex,
}

impl BrowserRule {
    /// Whether this rule matches the User-Agent string.
    pub fn matches(&self, user_agent: &str) -> bool {
        self.tokens.iter().any(|t| user_agent.contains(t))
    }

    /// Extracts the version from the User-Agent, empty string on failure.
    pub fn extract_version(&self, user_agent: &str) -> String {
        self.version
            .captures(user_agent)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default()
    }
}

/// The browser rule table, priority order top to bottom.
///
/// Ordering constraints:
/// - Edge and Opera before Chrome (Chromium derivatives embed "Chrome/")
/// - Chrome before Safari (every WebKit UA embeds "Safari/")
static BROWSER_RULES: LazyLock<Vec<BrowserRule>> = LazyLock::new(|| {
    vec![
        BrowserRule {
            family: BrowserFamily::Edge,
            // Desktop, iOS, and Android Edge plus the legacy EdgeHTML token.
            tokens: &["Edg/", "EdgiOS/", "EdgA/", "Edge/"],
            version: Regex::new(r"(?:EdgiOS|EdgA|Edge|Edg)/(\d+(?:\.\d+)*)").unwrap(),
        },
        BrowserRule {
            family: BrowserFamily::Opera,
            tokens: &["OPR/", "Opera"],
            version: Regex::new(r"(?:OPR|Opera)[/ ](\d+(?:\.\d+)*)").unwrap(),
        },
        BrowserRule {
            family: BrowserFamily::Firefox,
            tokens: &["Firefox/", "FxiOS/"],
            version: Regex::new(r"(?:Firefox|FxiOS)/(\d+(?:\.\d+)*)").unwrap(),
        },
        BrowserRule {
            family: BrowserFamily::Chrome,
            tokens: &["Chrome/", "CriOS/"],
            version: Regex::new(r"(?:Chrome|CriOS)/(\d+(?:\.\d+)*)").unwrap(),
        },
        BrowserRule {
            family: BrowserFamily::Safari,
            tokens: &["Safari/"],
            // Safari reports its version in a separate "Version/x.y" token.
            version: Regex::new(r"Version/(\d+(?:\.\d+)*)").unwrap(),
        },
    ]
});

/// Returns the browser rule table in priority order.
pub fn browser_rules() -> &'static [BrowserRule] {
    &BROWSER_RULES
}

// =============================================================================
// Unit Tests
// =============================================================================
