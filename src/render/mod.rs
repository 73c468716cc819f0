//! Render Coordinator
//!
//! Everything between a configuration and pixels:
//! - `params`: renderer input derived from a configuration
//! - `renderer`: the renderer seam and its errors
//! - `debounce`: trailing-edge debounce on the tokio timer
//! - `coordinator`: debounced rendering, failure advisory, export gating
//! - `matrix`: reference renderer built on `qrcode` and `image`

pub mod coordinator;
pub mod debounce;
pub mod matrix;
pub mod params;
pub mod renderer;
pub mod shapes;

pub use coordinator::{RenderCoordinator, RenderState, CAPACITY_ADVISORY, EXPORT_PREFIX, RENDER_PENDING};
pub use debounce::{Debouncer, DEFAULT_WINDOW};
pub use matrix::MatrixRenderer;
pub use params::{DownloadOptions, ExportFormat, ExportedAsset, RenderParams, PREVIEW_SIZE};
pub use renderer::{RenderError, Renderer};
