//! Render Coordinator
//!
//! Keeps the renderer in step with the configuration: changes are debounced,
//! encoder failures become a user-facing advisory, and export is refused
//! until the latest configuration has rendered successfully.

use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::debounce::{Debouncer, DEFAULT_WINDOW};
use super::params::{DownloadOptions, ExportFormat, ExportedAsset, RenderParams, PREVIEW_SIZE};
use super::renderer::Renderer;
use crate::config::QrConfig;
use crate::error::{QuickQrError, QuickQrResult};
use crate::{log_debug, log_warn};

/// Advisory shown whenever the renderer refuses a configuration
pub const CAPACITY_ADVISORY: &str = "The content is too large for the selected configuration. Try reducing text length or changing error correction level.";

/// Export refusal while a scheduled render has not run yet
pub const RENDER_PENDING: &str = "A render is still pending. Wait for the preview to update before exporting.";

/// Export file name prefix
pub const EXPORT_PREFIX: &str = "qrcode";

/// Outcome of the most recent render
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "lowercase")]
pub enum RenderState {
    /// Parameters of the last accepted render, `None` before the first
    Ready(Option<RenderParams>),
    /// Advisory message for the user
    Failed(String),
}

impl RenderState {
    pub fn is_ready(&self) -> bool {
        matches!(self, RenderState::Ready(_))
    }

    pub fn failure(&self) -> Option<&str> {
        match self {
            RenderState::Failed(msg) => Some(msg),
            RenderState::Ready(_) => None,
        }
    }
}

#[derive(Debug)]
struct Shared {
    state: RenderState,
    last_good: Option<RenderParams>,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    // State is always replaced wholesale, so a poisoned lock is still usable
    m.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn render_into<R: Renderer>(renderer: &Mutex<R>, shared: &Mutex<Shared>, params: RenderParams) {
    let result = lock(renderer).update(&params);
    let mut shared = lock(shared);
    match result {
        Ok(()) => {
            log_debug!("render", "Render accepted", bytes = params.data.len());
            shared.last_good = Some(params.clone());
            shared.state = RenderState::Ready(Some(params));
        }
        Err(e) => {
            log_warn!("render", "Render refused", error = e, bytes = params.data.len());
            shared.state = RenderState::Failed(CAPACITY_ADVISORY.to_string());
        }
    }
}

/// Drives one renderer from configuration changes
pub struct RenderCoordinator<R: Renderer> {
    renderer: Arc<Mutex<R>>,
    shared: Arc<Mutex<Shared>>,
    debouncer: Debouncer,
    preview_size: u32,
}

impl<R: Renderer> RenderCoordinator<R> {
    pub fn new(renderer: R, window: Duration, preview_size: u32) -> Self {
        Self {
            renderer: Arc::new(Mutex::new(renderer)),
            shared: Arc::new(Mutex::new(Shared {
                state: RenderState::Ready(None),
                last_good: None,
            })),
            debouncer: Debouncer::new(window),
            preview_size,
        }
    }

    /// 100 ms window, 300 px preview
    pub fn with_defaults(renderer: R) -> Self {
        Self::new(renderer, DEFAULT_WINDOW, PREVIEW_SIZE)
    }

    pub fn preview_size(&self) -> u32 {
        self.preview_size
    }

    /// Debounced render of `config`
    pub fn schedule(&mut self, config: &QrConfig) {
        let params = RenderParams::from_config(config, self.preview_size);
        let renderer = self.renderer.clone();
        let shared = self.shared.clone();
        self.debouncer.trigger(move || render_into(&renderer, &shared, params));
    }

    /// Render `config` immediately, dropping anything pending
    pub fn render_now(&mut self, config: &QrConfig) -> RenderState {
        self.debouncer.cancel();
        let params = RenderParams::from_config(config, self.preview_size);
        render_into(&self.renderer, &self.shared, params);
        self.state()
    }

    pub fn state(&self) -> RenderState {
        lock(&self.shared).state.clone()
    }

    pub fn is_ready(&self) -> bool {
        lock(&self.shared).state.is_ready()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Back to `Ready` with the last accepted parameters
    pub fn clear_failure(&mut self) {
        let mut shared = lock(&self.shared);
        if !shared.state.is_ready() {
            shared.state = RenderState::Ready(shared.last_good.clone());
        }
    }

    /// Export the current symbol as `qrcode-<now_millis>.<ext>`.
    ///
    /// Blocked while the last render failed or a newer one is still pending.
    pub fn export(&self, format: ExportFormat, now_millis: i64) -> QuickQrResult<ExportedAsset> {
        if let RenderState::Failed(msg) = self.state() {
            return Err(QuickQrError::export_blocked(msg));
        }
        if self.is_pending() {
            return Err(QuickQrError::export_blocked(RENDER_PENDING));
        }

        let options = DownloadOptions {
            extension: format,
            name: format!("{}-{}", EXPORT_PREFIX, now_millis),
        };
        Ok(lock(&self.renderer).download(&options)?)
    }

    /// Wait for a scheduled render to complete
    pub async fn settle(&mut self) {
        self.debouncer.settle().await;
    }

    /// Cancel pending work
    pub fn shutdown(&mut self) {
        self.debouncer.cancel();
    }

    /// Borrow the renderer
    pub fn with_renderer<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(&lock(&self.renderer))
    }
}
