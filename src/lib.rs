//! QuickQR Core Library
//!
//! Headless core of a QR code editor.
//!
//! # Architecture
//!
//! This crate provides:
//! - **payload**: Structured records (link, text, WiFi, email, contact) and
//!   the exact strings they encode to
//! - **config**: The configuration model, its reducer and style presets
//! - **render**: Debounced rendering, failure advisory, export gating and a
//!   reference renderer
//! - **history**: The ten most recent exports, persisted
//! - **session**: An editor session tying the above together
//! - **ffi**: C-ABI exports for native host UIs
//!
//! # FFI Usage
//!
//! All public FFI functions are in the `ffi` module and follow this pattern:
//! - Input: JSON string (null-terminated C string)
//! - Output: JSON string (must be freed with `quickqr_free_string`)
//!
//! # Example
//!
//! ```rust,ignore
//! use quickqr::payload::{Payload, WifiRecord};
//!
//! let wifi = Payload::Wifi(WifiRecord { ssid: "Home".into(), password: "secret1".into(), ..Default::default() });
//! assert_eq!(wifi.format(), "WIFI:T:WPA;S:Home;P:secret1;H:false;;");
//! ```

pub mod config;
pub mod error;
pub mod ffi;
pub mod history;
pub mod logo;
pub mod payload;
pub mod render;
pub mod session;
pub mod settings;
pub mod storage;
pub mod types;
pub mod utils;

// Re-export key types for convenience
pub use config::{ConfigUpdate, QrConfig};
pub use error::{ErrorCode, QuickQrError, QuickQrResult};
pub use history::{HistoryEntry, HistoryStore};
pub use payload::{Payload, PayloadKind, PayloadRecords};
pub use render::{ExportFormat, MatrixRenderer, RenderCoordinator, RenderState, Renderer};
pub use session::{EditorSession, ExportReceipt};
pub use settings::EditorSettings;
pub use types::ApiResponse;

// Re-export FFI functions at crate root
pub use ffi::{
    quickqr_apply_preset,
    quickqr_apply_update,
    quickqr_default_config,
    quickqr_format_payload,
    quickqr_free_string,
    quickqr_render_params,
    quickqr_reset_config,
};
