//! Payload Text Formats
//!
//! Turns structured records into the literal text a symbol encodes.
//! Field values are substituted verbatim: `;`, `:` and `,` inside a WiFi
//! or contact field are not escaped.

use super::types::{ContactRecord, EmailRecord, WifiRecord};

/// `WIFI:T:<enc>;S:<ssid>;P:<password>;H:<hidden>;;`
pub fn format_wifi(wifi: &WifiRecord) -> String {
    format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        wifi.encryption.as_str(),
        wifi.ssid,
        wifi.password,
        wifi.hidden
    )
}

/// `mailto:<to>?subject=<enc>&body=<enc>`
///
/// Only subject and body are percent-encoded; the recipient passes through.
pub fn format_email(email: &EmailRecord) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        email.to,
        urlencoding::encode(&email.subject),
        urlencoding::encode(&email.body)
    )
}

/// vCard 3.0 text block, one property per line
pub fn format_contact(contact: &ContactRecord) -> String {
    let lines = [
        "BEGIN:VCARD".to_string(),
        "VERSION:3.0".to_string(),
        format!("N:{};{};;;", contact.last_name, contact.first_name),
        format!("FN:{}", contact.full_name()),
        format!("ORG:{}", contact.company),
        format!("TITLE:{}", contact.job),
        format!("TEL;TYPE=CELL:{}", contact.mobile),
        format!("EMAIL:{}", contact.email),
        format!("URL:{}", contact.website),
        format!(
            "ADR:;;{};{};;{};{}",
            contact.street, contact.city, contact.zip, contact.country
        ),
        "END:VCARD".to_string(),
    ];

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::types::WifiEncryption;

    #[test]
    fn test_wifi_format() {
        let wifi = WifiRecord {
            ssid: "Home".to_string(),
            password: "secret1".to_string(),
            encryption: WifiEncryption::Wpa,
            hidden: false,
        };
        assert_eq!(format_wifi(&wifi), "WIFI:T:WPA;S:Home;P:secret1;H:false;;");
    }

    #[test]
    fn test_wifi_open_hidden() {
        let wifi = WifiRecord {
            ssid: "Lab".to_string(),
            password: String::new(),
            encryption: WifiEncryption::None,
            hidden: true,
        };
        assert_eq!(format_wifi(&wifi), "WIFI:T:nopass;S:Lab;P:;H:true;;");
    }

    #[test]
    fn test_wifi_delimiters_pass_through() {
        let wifi = WifiRecord {
            ssid: "a;b:c".to_string(),
            password: "x,y".to_string(),
            ..Default::default()
        };
        assert_eq!(format_wifi(&wifi), "WIFI:T:WPA;S:a;b:c;P:x,y;H:false;;");
    }

    #[test]
    fn test_email_format() {
        let email = EmailRecord {
            to: "a+b@x.test".to_string(),
            subject: "Hi there".to_string(),
            body: "Line 1\nLine 2 & more".to_string(),
        };
        assert_eq!(
            format_email(&email),
            "mailto:a+b@x.test?subject=Hi%20there&body=Line%201%0ALine%202%20%26%20more"
        );
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(format_email(&EmailRecord::default()), "mailto:?subject=&body=");
    }

    #[test]
    fn test_contact_format() {
        let contact = ContactRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            mobile: "+44 20 0000".to_string(),
            email: "ada@engine.test".to_string(),
            company: "Analytical".to_string(),
            job: "Programmer".to_string(),
            website: "https://ada.test".to_string(),
            street: "1 Main St".to_string(),
            city: "London".to_string(),
            zip: "N1".to_string(),
            country: "UK".to_string(),
        };

        let expected = "BEGIN:VCARD\n\
                        VERSION:3.0\n\
                        N:Lovelace;Ada;;;\n\
                        FN:Ada Lovelace\n\
                        ORG:Analytical\n\
                        TITLE:Programmer\n\
                        TEL;TYPE=CELL:+44 20 0000\n\
                        EMAIL:ada@engine.test\n\
                        URL:https://ada.test\n\
                        ADR:;;1 Main St;London;;N1;UK\n\
                        END:VCARD";
        assert_eq!(format_contact(&contact), expected);
    }

    #[test]
    fn test_empty_contact_is_well_formed() {
        let card = format_contact(&ContactRecord::default());
        assert!(card.starts_with("BEGIN:VCARD\nVERSION:3.0\n"));
        assert!(card.contains("\nFN: \n"));
        assert!(card.ends_with("\nEND:VCARD"));
        assert_eq!(card.lines().count(), 11);
    }
}
