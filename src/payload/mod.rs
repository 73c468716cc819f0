//! Payload Formatting
//!
//! Maps one of five structured input records to the literal string a
//! symbol encodes.
//!
//! # Formats
//! - Link / Text: verbatim
//! - WiFi: `WIFI:T:<enc>;S:<ssid>;P:<password>;H:<hidden>;;`
//! - Email: `mailto:` URI with percent-encoded subject and body
//! - Contact: vCard 3.0 block
//!
//! Formatting is total: empty or odd fields yield a degenerate but
//! well-formed string, never an error.

pub mod formatter;
pub mod limits;
pub mod types;

pub use formatter::{format_contact, format_email, format_wifi};
pub use types::*;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuickQrError;
use crate::utils::text::truncate_chars;

/// Longest display name recorded in history
pub const MAX_DISPLAY_NAME: usize = 20;

/// Display name used when the payload kind has no natural label
pub const GENERIC_DISPLAY_NAME: &str = "QR Code";

/// Payload type tag (one editor tab per kind)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayloadKind {
    #[default]
    Link,
    Text,
    Wifi,
    Email,
    #[serde(rename = "vcard")]
    Contact,
}

impl PayloadKind {
    /// All kinds in tab order
    pub const ALL: [PayloadKind; 5] = [
        PayloadKind::Link,
        PayloadKind::Text,
        PayloadKind::Wifi,
        PayloadKind::Email,
        PayloadKind::Contact,
    ];

    /// Tab label, also stored as the history entry type
    pub fn label(&self) -> &'static str {
        match self {
            PayloadKind::Link => "Link",
            PayloadKind::Text => "Text",
            PayloadKind::Wifi => "WiFi",
            PayloadKind::Email => "Email",
            PayloadKind::Contact => "VCard",
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PayloadKind {
    type Err = QuickQrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "link" | "url" => Ok(PayloadKind::Link),
            "text" => Ok(PayloadKind::Text),
            "wifi" => Ok(PayloadKind::Wifi),
            "email" | "mail" => Ok(PayloadKind::Email),
            "vcard" | "contact" => Ok(PayloadKind::Contact),
            other => {
                let known: Vec<String> = PayloadKind::ALL.iter().map(|k| k.label().to_ascii_lowercase()).collect();
                Err(QuickQrError::invalid_input(format!(
                    "Unknown payload type '{}' (expected one of: {})",
                    other,
                    known.join(", ")
                )))
            }
        }
    }
}

/// One structured record, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Payload {
    Link(LinkRecord),
    Text(TextRecord),
    Wifi(WifiRecord),
    Email(EmailRecord),
    #[serde(rename = "vcard")]
    Contact(ContactRecord),
}

impl Payload {
    /// Kind tag of this payload
    pub fn kind(&self) -> PayloadKind {
        match self {
            Payload::Link(_) => PayloadKind::Link,
            Payload::Text(_) => PayloadKind::Text,
            Payload::Wifi(_) => PayloadKind::Wifi,
            Payload::Email(_) => PayloadKind::Email,
            Payload::Contact(_) => PayloadKind::Contact,
        }
    }

    /// The literal text encoded in the symbol
    pub fn format(&self) -> String {
        match self {
            Payload::Link(link) => link.url.clone(),
            Payload::Text(text) => text.text.clone(),
            Payload::Wifi(wifi) => format_wifi(wifi),
            Payload::Email(email) => format_email(email),
            Payload::Contact(contact) => format_contact(contact),
        }
    }

    /// History label: URL, SSID or contact name, truncated
    pub fn display_name(&self) -> String {
        let name = match self {
            Payload::Link(link) => link.url.clone(),
            Payload::Wifi(wifi) => wifi.ssid.clone(),
            Payload::Contact(contact) => contact.full_name(),
            Payload::Text(_) | Payload::Email(_) => GENERIC_DISPLAY_NAME.to_string(),
        };
        truncate_chars(&name, MAX_DISPLAY_NAME)
    }
}

impl PayloadRecords {
    /// Project the record selected by `kind`
    pub fn active(&self, kind: PayloadKind) -> Payload {
        match kind {
            PayloadKind::Link => Payload::Link(self.link.clone()),
            PayloadKind::Text => Payload::Text(self.text.clone()),
            PayloadKind::Wifi => Payload::Wifi(self.wifi.clone()),
            PayloadKind::Email => Payload::Email(self.email.clone()),
            PayloadKind::Contact => Payload::Contact(self.contact.clone()),
        }
    }

    /// Store a record in its slot, leaving the other kinds untouched
    pub fn set(&mut self, payload: Payload) {
        match payload {
            Payload::Link(link) => self.link = link,
            Payload::Text(text) => self.text = text,
            Payload::Wifi(wifi) => self.wifi = wifi,
            Payload::Email(email) => self.email = email,
            Payload::Contact(contact) => self.contact = contact,
        }
    }
}

/// Format the active record
pub fn format(kind: PayloadKind, records: &PayloadRecords) -> String {
    records.active(kind).format()
}

/// Display name of the active record
pub fn display_name(kind: PayloadKind, records: &PayloadRecords) -> String {
    records.active(kind).display_name()
}

/// Guess the tab a stored payload string came from.
///
/// Only links and WiFi credentials are recognized; text, email and contact
/// payloads are not reconstructed.
pub fn sniff_kind(value: &str) -> Option<PayloadKind> {
    if value.starts_with("http") {
        Some(PayloadKind::Link)
    } else if value.starts_with("WIFI") {
        Some(PayloadKind::Wifi)
    } else {
        None
    }
}
