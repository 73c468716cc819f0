//! Style Presets
//!
//! Named partial configurations merged over the current style.

use lazy_static::lazy_static;

use super::model::ConfigPatch;
use super::types::{Color, CornerDotType, CornerSquareType, DotType};

/// A named style preset
#[derive(Debug, Clone)]
pub struct Preset {
    pub name: &'static str,
    pub patch: ConfigPatch,
}

lazy_static! {
    /// Built-in presets, in display order
    pub static ref PRESETS: Vec<Preset> = vec![
        preset("Classic", DotType::Square, CornerSquareType::Square, CornerDotType::Square, "#ffffff", "#000000"),
        preset("Modern", DotType::Dots, CornerSquareType::ExtraRounded, CornerDotType::Dot, "#ffffff", "#2563eb"),
        preset("Soft", DotType::Rounded, CornerSquareType::ExtraRounded, CornerDotType::Dot, "#ffffff", "#475569"),
        preset("Eco", DotType::Classy, CornerSquareType::ExtraRounded, CornerDotType::Dot, "#f0fdf4", "#166534"),
    ];
}

/// Look up a preset by name, ignoring case
pub fn find_preset(name: &str) -> Option<&'static Preset> {
    PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Body, corner frame and corner dot all share the ink color
fn preset(
    name: &'static str,
    dots: DotType,
    frame: CornerSquareType,
    dot: CornerDotType,
    background: &str,
    ink: &str,
) -> Preset {
    let background = Color::from_hex_const(background);
    let ink = Color::from_hex_const(ink);

    Preset {
        name,
        patch: ConfigPatch {
            background_color: Some(background),
            foreground_color: Some(ink.clone()),
            dot_style: Some(dots),
            corner_frame_style: Some(frame),
            corner_frame_color: Some(ink.clone()),
            corner_dot_style: Some(dot),
            corner_dot_color: Some(ink),
            ..Default::default()
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{apply_patch, QrConfig};

    #[test]
    fn test_preset_names() {
        let names: Vec<_> = PRESETS.iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Classic", "Modern", "Soft", "Eco"]);
    }

    #[test]
    fn test_find_preset() {
        assert_eq!(find_preset("modern").map(|p| p.name), Some("Modern"));
        assert!(find_preset("neon").is_none());
    }

    #[test]
    fn test_eco_preset() {
        let mut config = QrConfig::default();
        config.value = "hello".to_string();
        config.quiet_zone = 5;

        let eco = find_preset("Eco").unwrap();
        let next = apply_patch(&config, &eco.patch);

        assert_eq!(next.background_color.as_str(), "#f0fdf4");
        assert_eq!(next.foreground_color.as_str(), "#166534");
        assert_eq!(next.corner_dot_color.as_str(), "#166534");
        assert_eq!(next.dot_style, DotType::Classy);
        assert_eq!(next.corner_frame_style, CornerSquareType::ExtraRounded);
        assert_eq!(next.value, "hello");
        assert_eq!(next.quiet_zone, 5);
    }
}
