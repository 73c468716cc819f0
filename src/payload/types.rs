//! Payload Record Types
//!
//! One structured record per payload kind. Records are held independently
//! so switching tabs never loses what was typed into another one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuickQrError;

/// Default link shown in a fresh editor
pub const DEFAULT_LINK: &str = "https://example.com";
/// Default free text shown in a fresh editor
pub const DEFAULT_TEXT: &str = "Hello World";

/// Website link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub url: String,
}

impl Default for LinkRecord {
    fn default() -> Self {
        Self { url: DEFAULT_LINK.to_string() }
    }
}

/// Free text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRecord {
    pub text: String,
}

impl Default for TextRecord {
    fn default() -> Self {
        Self { text: DEFAULT_TEXT.to_string() }
    }
}

/// Network authentication scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WifiEncryption {
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    #[serde(rename = "WEP")]
    Wep,
    #[serde(rename = "nopass")]
    None,
}

impl WifiEncryption {
    /// Token written into the `T:` field
    pub fn as_str(&self) -> &'static str {
        match self {
            WifiEncryption::Wpa => "WPA",
            WifiEncryption::Wep => "WEP",
            WifiEncryption::None => "nopass",
        }
    }
}

impl fmt::Display for WifiEncryption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WifiEncryption {
    type Err = QuickQrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "wpa" | "wpa2" => Ok(WifiEncryption::Wpa),
            "wep" => Ok(WifiEncryption::Wep),
            "nopass" | "none" | "open" => Ok(WifiEncryption::None),
            other => Err(QuickQrError::invalid_input(format!(
                "Unknown WiFi encryption '{}' (expected WPA, WEP or none)",
                other
            ))),
        }
    }
}

/// Network-join credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WifiRecord {
    pub ssid: String,
    pub password: String,
    pub encryption: WifiEncryption,
    pub hidden: bool,
}

/// Email intent
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Contact card
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub first_name: String,
    pub last_name: String,
    pub mobile: String,
    pub email: String,
    pub company: String,
    pub job: String,
    pub website: String,
    pub street: String,
    pub city: String,
    pub zip: String,
    pub country: String,
}

impl ContactRecord {
    /// "First Last" as shown in the formatted-name line
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Every record the editor holds, one per payload kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadRecords {
    pub link: LinkRecord,
    pub text: TextRecord,
    pub wifi: WifiRecord,
    pub email: EmailRecord,
    pub contact: ContactRecord,
}
