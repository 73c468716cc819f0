//! FFI Layer for QuickQR
//!
//! All C-ABI exports are defined here. Every function follows the same
//! pattern:
//! - Input: JSON string (null-terminated C string)
//! - Output: JSON string (must be freed with `quickqr_free_string`)
//!
//! Error handling: every response carries a `success` field. On error,
//! `success: false` and the `error` object is populated.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use crate::config::{self, find_preset, QrConfig};
use crate::error::QuickQrError;
use crate::payload::Payload;
use crate::render::{RenderParams, PREVIEW_SIZE};
use crate::types::*;

// =============================================================================
// Memory Management
// =============================================================================

/// Free a string returned by any quickqr_* function
///
/// # Safety
/// The pointer must have been returned by a quickqr_* function
#[unsafe(no_mangle)]
pub extern "C" fn quickqr_free_string(s: *mut c_char) {
    if s.is_null() {
        return;
    }
    unsafe {
        let _ = CString::from_raw(s);
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Copy a C string into an owned Rust string, or an error response
fn parse_input(input: *const c_char) -> Result<String, *mut c_char> {
    if input.is_null() {
        return Err(error_response(QuickQrError::invalid_input("Null input pointer")));
    }

    let c_str = unsafe { CStr::from_ptr(input) };
    match c_str.to_str() {
        Ok(s) => Ok(s.to_owned()),
        Err(_) => Err(error_response(QuickQrError::invalid_input("Invalid UTF-8 string"))),
    }
}

/// Parse the JSON body of a request
fn parse_json<T: serde::de::DeserializeOwned>(input: *const c_char) -> Result<T, *mut c_char> {
    let raw = parse_input(input)?;
    serde_json::from_str(&raw).map_err(|e| error_response(e.into()))
}

fn success_response<T: serde::Serialize>(data: T) -> *mut c_char {
    let response = ApiResponse::ok(data);
    string_to_ptr(response.to_json())
}

fn error_response(error: QuickQrError) -> *mut c_char {
    let response: ApiResponse<()> = ApiResponse::err(error);
    string_to_ptr(response.to_json())
}

fn string_to_ptr(s: String) -> *mut c_char {
    match CString::new(s) {
        Ok(c_str) => c_str.into_raw(),
        // Last resort: return a minimal error
        Err(_) => c"{\"success\":false,\"error\":{\"code\":\"internal\",\"message\":\"String conversion failed\"}}"
            .to_owned()
            .into_raw(),
    }
}

// =============================================================================
// Payload
// =============================================================================

/// Format a structured record into the literal symbol payload
///
/// # Input
/// ```json
/// { "type": "wifi", "ssid": "Home", "password": "secret1", "encryption": "WPA", "hidden": false }
/// ```
///
/// # Output
/// ```json
/// {
///   "success": true,
///   "data": {
///     "kind": "wifi",
///     "label": "WiFi",
///     "value": "WIFI:T:WPA;S:Home;P:secret1;H:false;;",
///     "display_name": "Home"
///   }
/// }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn quickqr_format_payload(input: *const c_char) -> *mut c_char {
    let payload: Payload = match parse_json(input) {
        Ok(p) => p,
        Err(e) => return e,
    };

    success_response(FormattedPayload {
        kind: payload.kind(),
        label: payload.kind().label().to_string(),
        value: payload.format(),
        display_name: payload.display_name(),
    })
}

// =============================================================================
// Configuration
// =============================================================================

/// Default configuration
#[unsafe(no_mangle)]
pub extern "C" fn quickqr_default_config() -> *mut c_char {
    success_response(QrConfig::default())
}

/// Apply one field write to a configuration
///
/// # Input
/// ```json
/// { "config": { ... }, "update": { "field": "logoImage", "value": "data:image/png;base64,..." } }
/// ```
///
/// # Output
/// The updated configuration. A logo always comes back with `ecLevel: "H"`.
#[unsafe(no_mangle)]
pub extern "C" fn quickqr_apply_update(input: *const c_char) -> *mut c_char {
    let request: ApplyUpdateRequest = match parse_json(input) {
        Ok(r) => r,
        Err(e) => return e,
    };

    success_response(config::apply(&request.config, request.update))
}

/// Merge a named preset over a configuration
///
/// # Input
/// ```json
/// { "config": { ... }, "preset": "Modern" }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn quickqr_apply_preset(input: *const c_char) -> *mut c_char {
    let request: ApplyPresetRequest = match parse_json(input) {
        Ok(r) => r,
        Err(e) => return e,
    };

    match find_preset(&request.preset) {
        Some(preset) => success_response(config::apply_patch(&request.config, &preset.patch)),
        None => error_response(QuickQrError::invalid_input(format!("Unknown preset '{}'", request.preset))),
    }
}

/// Restore default styling, keeping `value`
///
/// # Input
/// A configuration object.
#[unsafe(no_mangle)]
pub extern "C" fn quickqr_reset_config(input: *const c_char) -> *mut c_char {
    let current: QrConfig = match parse_json(input) {
        Ok(c) => c,
        Err(e) => return e,
    };

    success_response(config::reset(&current))
}

// =============================================================================
// Rendering
// =============================================================================

/// Derive renderer parameters for a host-side renderer
///
/// # Input
/// ```json
/// { "config": { ... }, "size": 300 }
/// ```
#[unsafe(no_mangle)]
pub extern "C" fn quickqr_render_params(input: *const c_char) -> *mut c_char {
    let request: RenderParamsRequest = match parse_json(input) {
        Ok(r) => r,
        Err(e) => return e,
    };

    let size = request.size.unwrap_or(PREVIEW_SIZE);
    if size == 0 {
        return error_response(QuickQrError::invalid_input("Render size must be positive"));
    }
    success_response(RenderParams::from_config(&request.config, size))
}
