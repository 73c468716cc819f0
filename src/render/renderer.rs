//! Renderer Seam
//!
//! The symbol encoder/renderer is a collaborator behind this trait: it
//! accepts render parameters, may refuse them, and exports the last
//! accepted symbol as an image.

use thiserror::Error;

use super::params::{DownloadOptions, ExportedAsset, RenderParams};
use crate::config::ErrorCorrectionLevel;
use crate::error::{ErrorCode, QuickQrError};

/// Renderer failures
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Payload of {0} bytes does not fit a symbol at level {1}")]
    CapacityExceeded(usize, ErrorCorrectionLevel),

    #[error("Invalid render parameters: {0}")]
    InvalidParams(String),

    #[error("Nothing has been rendered yet")]
    NotRendered,

    #[error("Export failed: {0}")]
    Export(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<RenderError> for QuickQrError {
    fn from(e: RenderError) -> Self {
        match e {
            RenderError::CapacityExceeded(..) => QuickQrError::capacity(e.to_string()),
            RenderError::Io(_) => QuickQrError::new(ErrorCode::Io, e.to_string()),
            _ => QuickQrError::new(ErrorCode::RenderFailed, e.to_string()),
        }
    }
}

/// Draws symbols and exports them
pub trait Renderer: Send + 'static {
    /// Accept new parameters; fails when the payload cannot be encoded
    fn update(&mut self, params: &RenderParams) -> Result<(), RenderError>;

    /// Export the last accepted symbol
    fn download(&mut self, options: &DownloadOptions) -> Result<ExportedAsset, RenderError>;
}

impl<R: Renderer + ?Sized> Renderer for Box<R> {
    fn update(&mut self, params: &RenderParams) -> Result<(), RenderError> {
        (**self).update(params)
    }

    fn download(&mut self, options: &DownloadOptions) -> Result<ExportedAsset, RenderError> {
        (**self).download(options)
    }
}
