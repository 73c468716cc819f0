//! Logo Upload
//!
//! Turns an image file into a self-contained `data:` URL that can live
//! inside a configuration (and therefore inside a history snapshot), and
//! back into raw bytes for the renderer.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::fs;
use std::path::Path;

use crate::error::{QuickQrError, QuickQrResult};
use crate::log_info;

/// Largest logo file accepted
pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024;

/// Decoded `data:` URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Read an image file and encode it as a data URL.
///
/// The file must decode as an image; anything else is rejected so a bad
/// upload never reaches the configuration.
pub fn load_logo_file(path: &Path) -> QuickQrResult<String> {
    let bytes = fs::read(path).map_err(|e| {
        QuickQrError::upload_failed(format!("Cannot read logo {}", path.display()))
            .with_details(e.to_string())
    })?;

    let data_url = encode_logo_bytes(&bytes)?;
    log_info!("logo", "Logo loaded", path = path.display(), logo = data_url);
    Ok(data_url)
}

/// Encode raw image bytes as a data URL
pub fn encode_logo_bytes(bytes: &[u8]) -> QuickQrResult<String> {
    if bytes.is_empty() {
        return Err(QuickQrError::upload_failed("Logo file is empty"));
    }
    if bytes.len() > MAX_LOGO_BYTES {
        return Err(QuickQrError::upload_failed(format!(
            "Logo is {} bytes (max {})",
            bytes.len(),
            MAX_LOGO_BYTES
        )));
    }

    let format = image::guess_format(bytes)
        .map_err(|e| QuickQrError::upload_failed("Unrecognized image format").with_details(e.to_string()))?;

    // Reject truncated or corrupt files up front
    image::load_from_memory_with_format(bytes, format)?;

    Ok(format!(
        "data:{};base64,{}",
        format.to_mime_type(),
        BASE64.encode(bytes)
    ))
}

/// Split a base64 data URL into media type and bytes
pub fn decode_data_url(url: &str) -> QuickQrResult<DataUrl> {
    let rest = url
        .strip_prefix("data:")
        .ok_or_else(|| QuickQrError::parse_error("Logo is not a data URL"))?;

    let (header, payload) = rest
        .split_once(',')
        .ok_or_else(|| QuickQrError::parse_error("Data URL has no payload"))?;

    let mime_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| QuickQrError::parse_error("Only base64 data URLs are supported"))?;

    Ok(DataUrl {
        mime_type: mime_type.to_string(),
        bytes: BASE64.decode(payload.trim())?,
    })
}
