//! Structured Logging with Sensitive Data Redaction
//!
//! Provides safe logging that automatically redacts:
//! - Network passwords
//! - Embedded logo blobs (summarized by size)
//! - Long payload strings (shortened)

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag to enable/disable debug logging
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Longest payload preview written to the log
const MAX_PAYLOAD_PREVIEW: usize = 48;

/// Enable debug logging
pub fn enable_debug() {
    DEBUG_ENABLED.store(true, Ordering::SeqCst);
}

/// Check if debug logging is enabled
pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

/// Log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warn => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Structured log entry
#[derive(Debug)]
pub struct LogEntry {
    pub level: LogLevel,
    pub module: &'static str,
    pub message: String,
    pub fields: Vec<(&'static str, String)>,
}

impl LogEntry {
    pub fn new(level: LogLevel, module: &'static str, message: impl Into<String>) -> Self {
        Self {
            level,
            module,
            message: message.into(),
            fields: Vec::new(),
        }
    }

    /// Add a field to the log entry (auto-redacts sensitive data)
    pub fn field(mut self, key: &'static str, value: impl fmt::Display) -> Self {
        let value_str = value.to_string();
        let redacted = redact_if_sensitive(key, &value_str);
        self.fields.push((key, redacted));
        self
    }

    /// Log the entry
    pub fn log(self) {
        if self.level == LogLevel::Debug && !is_debug_enabled() {
            return;
        }

        let fields_str = self.fields
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(" ");

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ");

        if fields_str.is_empty() {
            eprintln!("[{}] {} [{}] {}", timestamp, self.level, self.module, self.message);
        } else {
            eprintln!("[{}] {} [{}] {} | {}", timestamp, self.level, self.module, self.message, fields_str);
        }
    }
}

/// Redact a value if the key suggests it's sensitive
fn redact_if_sensitive(key: &str, value: &str) -> String {
    let key_lower = key.to_lowercase();

    let fully_redacted_keys = ["password", "passphrase", "secret", "psk"];
    for sensitive_key in &fully_redacted_keys {
        if key_lower.contains(sensitive_key) {
            return redact_value(value);
        }
    }

    // Logo blobs are data URLs that can run to megabytes
    let blob_keys = ["logo", "image", "data_url"];
    for blob_key in &blob_keys {
        if key_lower.contains(blob_key) {
            return summarize_blob(value);
        }
    }

    let payload_keys = ["payload", "value", "data"];
    for payload_key in &payload_keys {
        if key_lower.contains(payload_key) {
            return shorten_payload(value);
        }
    }

    value.to_string()
}

/// Fully redact a sensitive value
fn redact_value(value: &str) -> String {
    if value.is_empty() {
        return "[EMPTY]".to_string();
    }

    let len = value.chars().count();
    if len <= 4 {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED:{}chars]", len)
    }
}

/// Replace a data URL with its media type and size
fn summarize_blob(value: &str) -> String {
    if value.is_empty() {
        return "[EMPTY]".to_string();
    }

    match value.strip_prefix("data:").and_then(|rest| rest.split_once(';')) {
        Some((mime, _)) => format!("[BLOB:{}:{}bytes]", mime, value.len()),
        None => format!("[BLOB:{}bytes]", value.len()),
    }
}

/// Keep the head of a long payload
fn shorten_payload(value: &str) -> String {
    let total = value.chars().count();
    if total <= MAX_PAYLOAD_PREVIEW {
        return value.to_string();
    }

    let head: String = value.chars().take(MAX_PAYLOAD_PREVIEW).collect();
    format!("{}...[{}chars]", head, total)
}

/// Convenience macro for debug logging
#[macro_export]
macro_rules! log_debug {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Debug,
            $module,
            $msg
        ).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Debug,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

/// Convenience macro for info logging
#[macro_export]
macro_rules! log_info {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Info,
            $module,
            $msg
        ).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Info,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

/// Convenience macro for warning logging
#[macro_export]
macro_rules! log_warn {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Warn,
            $module,
            $msg
        ).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Warn,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

/// Convenience macro for error logging
#[macro_export]
macro_rules! log_error {
    ($module:expr, $msg:expr) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Error,
            $module,
            $msg
        ).log()
    };
    ($module:expr, $msg:expr, $($key:ident = $value:expr),* $(,)?) => {
        $crate::utils::logging::LogEntry::new(
            $crate::utils::logging::LogLevel::Error,
            $module,
            $msg
        )
        $(.field(stringify!($key), &$value))*
        .log()
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_value() {
        assert_eq!(redact_value(""), "[EMPTY]");
        assert_eq!(redact_value("abc"), "[REDACTED]");
        assert_eq!(redact_value("hunter2hunter2"), "[REDACTED:14chars]");
    }

    #[test]
    fn test_summarize_blob() {
        let url = "data:image/png;base64,iVBORw0KGgo=";
        let summary = summarize_blob(url);
        assert!(summary.starts_with("[BLOB:image/png:"));
        assert!(!summary.contains("iVBOR"));
    }

    #[test]
    fn test_shorten_payload() {
        assert_eq!(shorten_payload("https://a.test"), "https://a.test");

        let long = "x".repeat(100);
        let short = shorten_payload(&long);
        assert!(short.ends_with("...[100chars]"));
    }

    #[test]
    fn test_redact_if_sensitive() {
        assert!(redact_if_sensitive("wifi_password", "secret1").contains("REDACTED"));
        assert!(redact_if_sensitive("logo", "data:image/png;base64,AAAA").starts_with("[BLOB"));
        assert_eq!(redact_if_sensitive("format", "png"), "png");
    }

    #[test]
    fn test_log_entry() {
        let entry = LogEntry::new(LogLevel::Info, "test", "Test message")
            .field("format", "svg")
            .field("password", "secret1")
            .field("logo", "data:image/png;base64,AAAA");

        let pw_field = entry.fields.iter().find(|(k, _)| *k == "password");
        assert!(pw_field.is_some());
        assert!(pw_field.unwrap().1.contains("REDACTED"));

        let logo_field = entry.fields.iter().find(|(k, _)| *k == "logo");
        assert!(logo_field.unwrap().1.starts_with("[BLOB"));
    }
}
