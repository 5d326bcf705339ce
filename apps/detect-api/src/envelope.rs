//! # Response Envelope
//!
//! The uniform JSON envelope every endpoint answers with, plus the flat wire
//! shape of a detection result.
//!
//! ## Wire Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Success:                          Failure:                             │
//! │  {                                 {                                    │
//! │    "success": true,                  "success": false,                  │
//! │    "data": { ...detection... },      "error": "userAgent is required",  │
//! │    "message": "Device signals        "message": "Missing required       │
//! │                processed"                        field"                 │
//! │  }                                 }                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The detection payload flattens the core's nested classifications into the
//! field names the marketing-site frontend expects (os + osVersion, browser +
//! browserVersion), all camelCase.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use cardlink_core::{BrowserFamily, DetectionResult, DeviceType, OsFamily, ScreenSize};

// =============================================================================
// Envelope
// =============================================================================

/// Uniform response envelope: `{ success, data?, error?, message? }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A success envelope with data and a human-readable status message.
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.into()),
        }
    }

    /// A failure envelope with an error description and status message.
    pub fn err(error: impl Into<String>, message: impl Into<String>) -> Self {
        ApiResponse {
            success: false,
            data: None,
            error: Some(error.into()),
            message: Some(message.into()),
        }
    }
}

// =============================================================================
// Detection Payload
// =============================================================================

/// Flat wire shape of a [`DetectionResult`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionPayload {
    pub user_agent: String,
    pub os: OsFamily,
    pub os_version: String,
    pub browser: BrowserFamily,
    pub browser_version: String,
    pub device_type: DeviceType,
    pub screen_size: ScreenSize,
    pub width: f64,
    pub height: f64,
    pub timestamp: DateTime<Utc>,
}

impl From<DetectionResult> for DetectionPayload {
    fn from(result: DetectionResult) -> Self {
        DetectionPayload {
            user_agent: result.user_agent,
            os: result.os.family,
            os_version: result.os.version,
            browser: result.browser.family,
            browser_version: result.browser.version,
            device_type: result.device_type,
            screen_size: result.screen_size,
            width: result.width,
            height: result.height,
            timestamp: result.timestamp,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use cardlink_core::environment::SyntheticEnvironment;

    #[test]
    fn test_success_envelope_omits_error() {
        let envelope = ApiResponse::ok(1, "done");
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("\"data\":1"));
        assert!(!json.contains("\"error\""));
    }

    #[test]
    fn test_failure_envelope_omits_data() {
        let envelope: ApiResponse<()> = ApiResponse::err("bad input", "rejected");
        let json = serde_json::to_string(&envelope).unwrap();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("\"error\":\"bad input\""));
        assert!(!json.contains("\"data\""));
    }

    #[test]
    fn test_payload_field_names_are_camel_case() {
        let result = SyntheticEnvironment::new(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
             AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
        )
        .capture()
        .unwrap();

        let payload = DetectionPayload::from(result);
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"userAgent\""));
        assert!(json.contains("\"osVersion\""));
        assert!(json.contains("\"browserVersion\""));
        assert!(json.contains("\"deviceType\":\"desktop\""));
        assert!(json.contains("\"screenSize\":\"large\""));
        assert!(json.contains("\"os\":\"windows\""));
        assert!(json.contains("\"browser\":\"chrome\""));
    }
}
