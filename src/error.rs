//! Unified error types for QuickQR
//!
//! All errors flow through this module for consistent handling
//! across the CLI, the FFI layer and the editor session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Main error type for all QuickQR operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuickQrError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl QuickQrError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Convenience constructors
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, msg)
    }

    pub fn capacity(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::EncodingCapacity, msg)
    }

    pub fn export_blocked(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ExportBlocked, msg)
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::StorageError, msg)
    }

    pub fn upload_failed(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::UploadFailed, msg)
    }

    pub fn parse_error(msg: impl Into<String>) -> Self {
        Self::new(ErrorCode::ParseError, msg)
    }
}

impl fmt::Display for QuickQrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for QuickQrError {}

/// Error codes for categorization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    // Input errors
    InvalidInput,
    InvalidColor,

    // Rendering errors
    EncodingCapacity,
    RenderFailed,
    ExportBlocked,

    // Storage errors
    StorageError,

    // Logo upload errors
    UploadFailed,
    ImageError,

    // Parse errors
    ParseError,
    JsonError,

    // Internal
    Io,
    Internal,
}

/// Result type alias for QuickQR operations
pub type QuickQrResult<T> = Result<T, QuickQrError>;

// Conversions from common error types

impl From<serde_json::Error> for QuickQrError {
    fn from(e: serde_json::Error) -> Self {
        QuickQrError::new(ErrorCode::JsonError, e.to_string())
    }
}

impl From<std::io::Error> for QuickQrError {
    fn from(e: std::io::Error) -> Self {
        QuickQrError::new(ErrorCode::Io, e.to_string())
    }
}

impl From<image::ImageError> for QuickQrError {
    fn from(e: image::ImageError) -> Self {
        QuickQrError::new(ErrorCode::ImageError, e.to_string())
    }
}

impl From<base64::DecodeError> for QuickQrError {
    fn from(e: base64::DecodeError) -> Self {
        QuickQrError::new(ErrorCode::ParseError, format!("Base64 error: {}", e))
    }
}
