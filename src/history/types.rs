//! History Entry

use serde::{Deserialize, Serialize};

use crate::config::QrConfig;

/// Name stored when the display name is empty
pub const UNTITLED: &str = "Untitled";

/// One exported symbol, with the configuration that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Random 64-bit hex identifier
    pub id: String,
    /// Export time, unix milliseconds
    #[serde(rename = "date")]
    pub timestamp: i64,
    /// Payload type label ("Link", "WiFi", ...)
    #[serde(rename = "type")]
    pub kind_label: String,
    /// Short display name
    #[serde(rename = "name")]
    pub display_name: String,
    /// Full configuration snapshot
    #[serde(rename = "config")]
    pub snapshot: QrConfig,
}

impl HistoryEntry {
    /// Create an entry stamped with the current time
    pub fn new(snapshot: QrConfig, kind_label: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::at(chrono::Utc::now().timestamp_millis(), snapshot, kind_label, display_name)
    }

    /// Create an entry with an explicit timestamp
    pub fn at(
        timestamp: i64,
        snapshot: QrConfig,
        kind_label: impl Into<String>,
        display_name: impl Into<String>,
    ) -> Self {
        let display_name = display_name.into();
        Self {
            id: generate_entry_id(),
            timestamp,
            kind_label: kind_label.into(),
            display_name: if display_name.is_empty() { UNTITLED.to_string() } else { display_name },
            snapshot,
        }
    }

    /// Export time as a calendar date (UTC)
    pub fn date_label(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.timestamp)
            .map(|dt| dt.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

/// Generate a unique entry ID
fn generate_entry_id() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let id: u64 = rng.gen();
    format!("{:016x}", id)
}
