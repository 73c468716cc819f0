//! Shared FFI Types
//!
//! Request and response shapes exchanged as JSON across the C ABI.

use serde::{Deserialize, Serialize};

use crate::config::{ConfigUpdate, QrConfig};
use crate::payload::PayloadKind;

/// Input for `quickqr_apply_update`
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyUpdateRequest {
    pub config: QrConfig,
    pub update: ConfigUpdate,
}

/// Input for `quickqr_apply_preset`
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyPresetRequest {
    pub config: QrConfig,
    pub preset: String,
}

/// Input for `quickqr_render_params`
#[derive(Debug, Clone, Deserialize)]
pub struct RenderParamsRequest {
    pub config: QrConfig,
    /// Target edge in pixels, the preview size when absent
    #[serde(default)]
    pub size: Option<u32>,
}

/// Output of `quickqr_format_payload`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedPayload {
    pub kind: PayloadKind,
    /// Tab label, also the history entry type
    pub label: String,
    pub value: String,
    pub display_name: String,
}

/// JSON envelope for every FFI response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<crate::error::QuickQrError>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: crate::error::QuickQrError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"success":false,"error":{"code":"internal","message":"Serialization failed"}}"#.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuickQrError;

    #[test]
    fn test_api_response_serialization() {
        let response = ApiResponse::ok("test_data".to_string());
        let json = response.to_json();
        assert!(json.contains("\"success\":true"));
        assert!(json.contains("test_data"));

        let failed: ApiResponse<()> = ApiResponse::err(QuickQrError::invalid_input("bad"));
        let json = failed.to_json();
        assert!(json.contains("\"success\":false"));
        assert!(json.contains("invalid_input"));
    }

    #[test]
    fn test_apply_update_request_parses() {
        let req: ApplyUpdateRequest = serde_json::from_str(
            r#"{"config": {"value": "hi"}, "update": {"field": "dotStyle", "value": "classy-rounded"}}"#,
        )
        .unwrap();
        assert_eq!(req.config.value, "hi");
        assert!(matches!(req.update, ConfigUpdate::DotStyle(_)));
    }
}
