//! Input Field Limits
//!
//! Maximum character counts for every editable payload field. Edits past a
//! limit are clamped, the way a length-capped text box behaves.

use super::types::{ContactRecord, EmailRecord, LinkRecord, TextRecord, WifiRecord};
use crate::utils::text::clamp_chars;

pub const MAX_URL_LENGTH: usize = 2048;
pub const MAX_TEXT_LENGTH: usize = 2500;
pub const MAX_SSID_LENGTH: usize = 32;
pub const MAX_WIFI_PASSWORD_LENGTH: usize = 64;
pub const MAX_EMAIL_ADDRESS_LENGTH: usize = 320;
pub const MAX_SUBJECT_LENGTH: usize = 200;
pub const MAX_BODY_LENGTH: usize = 1000;
pub const MAX_NAME_LENGTH: usize = 50;
pub const MAX_PHONE_LENGTH: usize = 50;
pub const MAX_ORG_LENGTH: usize = 100;
pub const MAX_STREET_LENGTH: usize = 100;
pub const MAX_CITY_LENGTH: usize = 50;
pub const MAX_ZIP_LENGTH: usize = 20;
pub const MAX_COUNTRY_LENGTH: usize = 50;

/// Clamp every field of a record to its limit
pub trait Clamp {
    fn clamp(&mut self);
}

impl Clamp for LinkRecord {
    fn clamp(&mut self) {
        clamp_chars(&mut self.url, MAX_URL_LENGTH);
    }
}

impl Clamp for TextRecord {
    fn clamp(&mut self) {
        clamp_chars(&mut self.text, MAX_TEXT_LENGTH);
    }
}

impl Clamp for WifiRecord {
    fn clamp(&mut self) {
        clamp_chars(&mut self.ssid, MAX_SSID_LENGTH);
        clamp_chars(&mut self.password, MAX_WIFI_PASSWORD_LENGTH);
    }
}

impl Clamp for EmailRecord {
    fn clamp(&mut self) {
        clamp_chars(&mut self.to, MAX_EMAIL_ADDRESS_LENGTH);
        clamp_chars(&mut self.subject, MAX_SUBJECT_LENGTH);
        clamp_chars(&mut self.body, MAX_BODY_LENGTH);
    }
}

impl Clamp for ContactRecord {
    fn clamp(&mut self) {
        clamp_chars(&mut self.first_name, MAX_NAME_LENGTH);
        clamp_chars(&mut self.last_name, MAX_NAME_LENGTH);
        clamp_chars(&mut self.mobile, MAX_PHONE_LENGTH);
        clamp_chars(&mut self.email, MAX_EMAIL_ADDRESS_LENGTH);
        clamp_chars(&mut self.company, MAX_ORG_LENGTH);
        clamp_chars(&mut self.job, MAX_ORG_LENGTH);
        clamp_chars(&mut self.website, MAX_URL_LENGTH);
        clamp_chars(&mut self.street, MAX_STREET_LENGTH);
        clamp_chars(&mut self.city, MAX_CITY_LENGTH);
        clamp_chars(&mut self.zip, MAX_ZIP_LENGTH);
        clamp_chars(&mut self.country, MAX_COUNTRY_LENGTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wifi_clamp() {
        let mut wifi = WifiRecord {
            ssid: "s".repeat(50),
            password: "p".repeat(80),
            ..Default::default()
        };
        wifi.clamp();
        assert_eq!(wifi.ssid.chars().count(), MAX_SSID_LENGTH);
        assert_eq!(wifi.password.chars().count(), MAX_WIFI_PASSWORD_LENGTH);
    }

    #[test]
    fn test_contact_clamp_keeps_short_fields() {
        let mut contact = ContactRecord {
            first_name: "Ada".to_string(),
            zip: "1".repeat(30),
            ..Default::default()
        };
        contact.clamp();
        assert_eq!(contact.first_name, "Ada");
        assert_eq!(contact.zip.len(), MAX_ZIP_LENGTH);
    }
}
