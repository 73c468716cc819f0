//! Editor Session
//!
//! Headless editor state: the active payload tab, the five structured
//! records, the configuration they project into, the render coordinator
//! and the persisted history.
//!
//! Every mutation rebuilds the configuration through the config reducer
//! and schedules a debounced render.

use serde::Serialize;
use std::path::Path;

use crate::config::{self, ConfigUpdate, Preset, QrConfig};
use crate::error::QuickQrResult;
use crate::history::{HistoryEntry, HistoryStore};
use crate::logo::load_logo_file;
use crate::payload::limits::Clamp;
use crate::payload::{self, ContactRecord, EmailRecord, LinkRecord, PayloadKind, PayloadRecords, TextRecord, WifiRecord};
use crate::render::{ExportFormat, ExportedAsset, RenderCoordinator, RenderState, Renderer};
use crate::settings::EditorSettings;
use crate::storage::KeyValueStore;
use crate::{log_debug, log_info};

/// Result of a successful export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportReceipt {
    pub asset: ExportedAsset,
    pub entry: HistoryEntry,
}

pub struct EditorSession<R: Renderer, S: KeyValueStore> {
    config: QrConfig,
    active: PayloadKind,
    records: PayloadRecords,
    coordinator: RenderCoordinator<R>,
    history: HistoryStore<S>,
    entries: Vec<HistoryEntry>,
}

impl<R: Renderer, S: KeyValueStore> EditorSession<R, S> {
    /// Session with default settings
    pub fn new(renderer: R, store: S) -> Self {
        Self::from_coordinator(RenderCoordinator::with_defaults(renderer), store)
    }

    pub fn with_settings(renderer: R, store: S, settings: &EditorSettings) -> Self {
        let coordinator = RenderCoordinator::new(renderer, settings.debounce_window(), settings.preview_size);
        Self::from_coordinator(coordinator, store)
    }

    fn from_coordinator(coordinator: RenderCoordinator<R>, store: S) -> Self {
        let history = HistoryStore::new(store);
        let entries = history.list();
        let records = PayloadRecords::default();
        let active = PayloadKind::default();
        let config = config::apply(&QrConfig::default(), ConfigUpdate::Value(payload::format(active, &records)));

        let mut session = Self {
            config,
            active,
            records,
            coordinator,
            history,
            entries,
        };
        session.coordinator.schedule(&session.config);
        session
    }

    pub fn config(&self) -> &QrConfig {
        &self.config
    }

    pub fn active_kind(&self) -> PayloadKind {
        self.active
    }

    pub fn records(&self) -> &PayloadRecords {
        &self.records
    }

    /// The quality selector is locked to `H` while a logo is present
    pub fn is_quality_locked(&self) -> bool {
        self.config.has_logo()
    }

    pub fn render_state(&self) -> RenderState {
        self.coordinator.state()
    }

    pub fn coordinator(&self) -> &RenderCoordinator<R> {
        &self.coordinator
    }

    /// Switch tabs; the new tab's record becomes the payload
    pub fn set_active_kind(&mut self, kind: PayloadKind) {
        self.active = kind;
        self.project();
    }

    pub fn edit_link(&mut self, edit: impl FnOnce(&mut LinkRecord)) {
        edit(&mut self.records.link);
        self.records.link.clamp();
        self.project();
    }

    pub fn edit_text(&mut self, edit: impl FnOnce(&mut TextRecord)) {
        edit(&mut self.records.text);
        self.records.text.clamp();
        self.project();
    }

    pub fn edit_wifi(&mut self, edit: impl FnOnce(&mut WifiRecord)) {
        edit(&mut self.records.wifi);
        self.records.wifi.clamp();
        self.project();
    }

    pub fn edit_email(&mut self, edit: impl FnOnce(&mut EmailRecord)) {
        edit(&mut self.records.email);
        self.records.email.clamp();
        self.project();
    }

    pub fn edit_contact(&mut self, edit: impl FnOnce(&mut ContactRecord)) {
        edit(&mut self.records.contact);
        self.records.contact.clamp();
        self.project();
    }

    /// Recompute `value` from the active record
    fn project(&mut self) {
        let value = payload::format(self.active, &self.records);
        self.commit(config::apply(&self.config, ConfigUpdate::Value(value)));
    }

    fn commit(&mut self, next: QrConfig) {
        self.config = next;
        self.coordinator.schedule(&self.config);
    }

    /// Write one configuration field
    pub fn update(&mut self, update: ConfigUpdate) {
        let next = config::apply(&self.config, update);
        self.commit(next);
    }

    pub fn apply_preset(&mut self, preset: &Preset) {
        log_debug!("session", "Applying preset", preset = preset.name);
        let next = config::apply_patch(&self.config, &preset.patch);
        self.commit(next);
    }

    /// Restore default styling, keeping the payload; clears a shown failure
    pub fn reset(&mut self) {
        let next = config::reset(&self.config);
        self.coordinator.clear_failure();
        self.commit(next);
    }

    /// Embed an image file as the logo. The configuration is untouched on failure.
    pub fn upload_logo(&mut self, path: &Path) -> QuickQrResult<()> {
        let data_url = load_logo_file(path)?;
        self.update(ConfigUpdate::LogoImage(Some(data_url)));
        Ok(())
    }

    pub fn remove_logo(&mut self) {
        self.update(ConfigUpdate::LogoImage(None));
    }

    /// Export the current symbol and record it in history
    pub fn export(&mut self, format: ExportFormat) -> QuickQrResult<ExportReceipt> {
        self.export_at(format, chrono::Utc::now().timestamp_millis())
    }

    /// Export with an explicit timestamp (unix millis)
    pub fn export_at(&mut self, format: ExportFormat, now_millis: i64) -> QuickQrResult<ExportReceipt> {
        let asset = self.coordinator.export(format, now_millis)?;

        let entry = HistoryEntry::at(
            now_millis,
            self.config.clone(),
            self.active.label(),
            payload::display_name(self.active, &self.records),
        );
        self.entries = self.history.append(entry.clone());

        log_info!(
            "session",
            "Export recorded",
            file = asset.file_name,
            kind = self.active,
            history = self.entries.len()
        );

        Ok(ExportReceipt { asset, entry })
    }

    /// Recent exports, most recent first
    pub fn history(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
        self.entries.clear();
    }

    /// Reload a past export.
    ///
    /// The snapshot goes back through the reducer, so a stored logo still
    /// forces level `H`. Links and WiFi payloads also switch tabs; only the
    /// link record is rebuilt from the stored value.
    pub fn load_history_entry(&mut self, entry: &HistoryEntry) {
        match payload::sniff_kind(&entry.snapshot.value) {
            Some(PayloadKind::Link) => {
                self.active = PayloadKind::Link;
                self.records.link.url = entry.snapshot.value.clone();
                self.records.link.clamp();
            }
            Some(kind) => self.active = kind,
            None => {}
        }

        log_debug!("session", "History entry loaded", id = entry.id, kind = self.active);
        let logo = entry.snapshot.logo_image.clone();
        self.commit(config::apply(&entry.snapshot, ConfigUpdate::LogoImage(logo)));
    }

    /// Wait for a scheduled render to finish
    pub async fn settle(&mut self) {
        self.coordinator.settle().await;
    }

    /// Cancel pending renders
    pub fn shutdown(&mut self) {
        self.coordinator.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{find_preset, ErrorCorrectionLevel, DotType};
    use crate::error::ErrorCode;
    use crate::logo::tests::red_png;
    use crate::render::coordinator::tests::FakeRenderer;
    use crate::render::CAPACITY_ADVISORY;
    use crate::storage::{FileStore, MemoryStore};

    fn session() -> EditorSession<FakeRenderer, MemoryStore> {
        EditorSession::new(FakeRenderer::default(), MemoryStore::new())
    }

    #[tokio::test(start_paused = true)]
    async fn test_initial_render() {
        let mut session = session();
        session.settle().await;

        assert_eq!(session.config().value, "https://example.com");
        assert!(matches!(session.render_state(), RenderState::Ready(Some(p)) if p.data == "https://example.com"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wifi_edit_projects_value() {
        let mut session = session();
        session.set_active_kind(PayloadKind::Wifi);
        session.edit_wifi(|w| {
            w.ssid = "Home".into();
            w.password = "secret1".into();
        });
        session.settle().await;

        assert_eq!(session.config().value, "WIFI:T:WPA;S:Home;P:secret1;H:false;;");
        session.coordinator().with_renderer(|r| {
            assert_eq!(r.updates.last().unwrap().data, "WIFI:T:WPA;S:Home;P:secret1;H:false;;");
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_edits_clamp_to_limits() {
        let mut session = session();
        session.set_active_kind(PayloadKind::Wifi);
        session.edit_wifi(|w| w.ssid = "s".repeat(40));

        assert_eq!(session.records().wifi.ssid.chars().count(), 32);
    }

    #[tokio::test(start_paused = true)]
    async fn test_inactive_record_edit_keeps_value() {
        let mut session = session();
        session.edit_text(|t| t.text = "not shown".into());

        assert_eq!(session.config().value, "https://example.com");
        assert_eq!(session.records().text.text, "not shown");
    }

    #[tokio::test(start_paused = true)]
    async fn test_style_updates_leave_value() {
        let mut session = session();
        session.update(ConfigUpdate::DotStyle(DotType::Dots));
        session.apply_preset(find_preset("eco").unwrap());

        assert_eq!(session.config().value, "https://example.com");
        assert_eq!(session.config().background_color.as_str(), "#f0fdf4");
    }

    #[tokio::test(start_paused = true)]
    async fn test_logo_upload_forces_high_level() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, red_png()).unwrap();

        let mut session = session();
        session.update(ConfigUpdate::ErrorCorrectionLevel(ErrorCorrectionLevel::L));
        session.upload_logo(&path).unwrap();

        assert!(session.is_quality_locked());
        assert_eq!(session.config().error_correction_level, ErrorCorrectionLevel::H);

        session.remove_logo();
        assert!(!session.is_quality_locked());
        assert_eq!(session.config().error_correction_level, ErrorCorrectionLevel::H);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_upload_leaves_config() {
        let mut session = session();
        let before = session.config().clone();

        let err = session.upload_logo(Path::new("/nonexistent/logo.png")).unwrap_err();
        assert_eq!(err.code, ErrorCode::UploadFailed);
        assert_eq!(session.config(), &before);
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_appends_history() {
        let mut session = session();
        session.set_active_kind(PayloadKind::Wifi);
        session.edit_wifi(|w| w.ssid = "Cafe".into());
        session.settle().await;

        let receipt = session.export_at(ExportFormat::Png, 1_700_000_000_000).unwrap();
        assert_eq!(receipt.asset.file_name, "qrcode-1700000000000.png");
        assert_eq!(receipt.entry.kind_label, "WiFi");
        assert_eq!(receipt.entry.display_name, "Cafe");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0], receipt.entry);
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_blocked_after_failure_and_reset_clears() {
        let mut session = EditorSession::new(FakeRenderer::with_limit(30), MemoryStore::new());
        session.set_active_kind(PayloadKind::Text);
        session.edit_text(|t| t.text = "z".repeat(100));
        session.settle().await;

        assert_eq!(session.render_state(), RenderState::Failed(CAPACITY_ADVISORY.into()));
        let err = session.export(ExportFormat::Png).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportBlocked);
        assert!(session.history().is_empty());

        session.reset();
        assert!(session.render_state().is_ready());
        assert_eq!(session.config().value, "z".repeat(100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_history_entry_sniffs_tab() {
        let mut session = session();

        let mut link = QrConfig::default();
        link.value = "https://restored.test".into();
        link.dot_style = DotType::Classy;
        session.set_active_kind(PayloadKind::Text);
        session.load_history_entry(&HistoryEntry::at(1, link.clone(), "Link", "restored"));
        assert_eq!(session.active_kind(), PayloadKind::Link);
        assert_eq!(session.records().link.url, "https://restored.test");
        assert_eq!(session.config(), &link);

        let mut wifi = QrConfig::default();
        wifi.value = "WIFI:T:WEP;S:Old;P:pw;H:true;;".into();
        session.load_history_entry(&HistoryEntry::at(2, wifi.clone(), "WiFi", "Old"));
        assert_eq!(session.active_kind(), PayloadKind::Wifi);
        assert_eq!(session.config().value, wifi.value);
        // Structured WiFi fields are not reconstructed
        assert_eq!(session.records().wifi.ssid, "");

        let mut text = QrConfig::default();
        text.value = "plain words".into();
        session.load_history_entry(&HistoryEntry::at(3, text, "Text", "QR Code"));
        assert_eq!(session.active_kind(), PayloadKind::Wifi);
        assert_eq!(session.config().value, "plain words");
    }

    #[tokio::test(start_paused = true)]
    async fn test_export_refused_while_render_pending() {
        let mut session = EditorSession::new(FakeRenderer::with_limit(30), MemoryStore::new());
        session.settle().await;

        session.set_active_kind(PayloadKind::Text);
        session.edit_text(|t| t.text = "q".repeat(100));
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;

        let err = session.export_at(ExportFormat::Png, 7).unwrap_err();
        assert_eq!(err.code, ErrorCode::ExportBlocked);
        assert!(session.history().is_empty());
        session.coordinator().with_renderer(|r| assert!(r.downloads.is_empty()));

        session.settle().await;
        assert_eq!(session.render_state(), RenderState::Failed(CAPACITY_ADVISORY.into()));
        assert!(session.export_at(ExportFormat::Png, 8).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_history_entry_keeps_logo_level() {
        let mut session = session();

        let mut stored = QrConfig::default();
        stored.value = "https://logo.test".into();
        stored.logo_image = Some("data:image/png;base64,AA==".into());
        stored.error_correction_level = ErrorCorrectionLevel::L;
        session.load_history_entry(&HistoryEntry::at(1, stored, "Link", "logo"));

        assert!(session.is_quality_locked());
        assert_eq!(session.config().error_correction_level, ErrorCorrectionLevel::H);
        assert_eq!(session.config().value, "https://logo.test");

        session.settle().await;
        session.coordinator().with_renderer(|r| {
            assert_eq!(r.updates.last().unwrap().qr_options.error_correction_level, ErrorCorrectionLevel::H);
        });
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_survives_sessions() {
        let dir = tempfile::tempdir().unwrap();

        let mut first = EditorSession::new(FakeRenderer::default(), FileStore::open(dir.path()).unwrap());
        first.settle().await;
        first.export_at(ExportFormat::Svg, 5).unwrap();
        drop(first);

        let mut second = EditorSession::new(FakeRenderer::default(), FileStore::open(dir.path()).unwrap());
        assert_eq!(second.history().len(), 1);
        assert_eq!(second.history()[0].timestamp, 5);

        second.clear_history();
        assert!(second.history().is_empty());
        let third = EditorSession::new(FakeRenderer::default(), FileStore::open(dir.path()).unwrap());
        assert!(third.history().is_empty());
    }
}
