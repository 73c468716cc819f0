//! Configuration Reducer
//!
//! Every configuration change goes through [`apply`] or [`apply_patch`],
//! which keep the logo/error-correction coupling intact: whenever a logo is
//! present after an update, the level is `H`.

use serde::{Deserialize, Serialize};

use super::types::*;

/// A single field write
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ConfigUpdate {
    Value(String),
    ErrorCorrectionLevel(ErrorCorrectionLevel),
    Size(u32),
    BackgroundColor(Color),
    ForegroundColor(Color),
    LogoImage(Option<String>),
    LogoScale(f64),
    QuietZone(u32),
    DotStyle(DotType),
    CornerFrameStyle(CornerSquareType),
    CornerFrameColor(Color),
    CornerDotStyle(CornerDotType),
    CornerDotColor(Color),
}

/// Apply one field write, returning the new configuration
pub fn apply(config: &QrConfig, update: ConfigUpdate) -> QrConfig {
    let mut next = config.clone();

    match update {
        ConfigUpdate::Value(value) => next.value = value,
        ConfigUpdate::ErrorCorrectionLevel(level) => next.error_correction_level = level,
        ConfigUpdate::Size(size) => next.size = size,
        ConfigUpdate::BackgroundColor(color) => next.background_color = color,
        ConfigUpdate::ForegroundColor(color) => next.foreground_color = color,
        ConfigUpdate::LogoImage(logo) => next.logo_image = logo,
        ConfigUpdate::LogoScale(scale) => next.logo_scale = clamp_logo_scale(scale),
        ConfigUpdate::QuietZone(margin) => next.quiet_zone = margin,
        ConfigUpdate::DotStyle(style) => next.dot_style = style,
        ConfigUpdate::CornerFrameStyle(style) => next.corner_frame_style = style,
        ConfigUpdate::CornerFrameColor(color) => next.corner_frame_color = color,
        ConfigUpdate::CornerDotStyle(style) => next.corner_dot_style = style,
        ConfigUpdate::CornerDotColor(color) => next.corner_dot_color = color,
    }

    enforce_logo_level(next)
}

/// Restore defaults, keeping the current payload
pub fn reset(config: &QrConfig) -> QrConfig {
    QrConfig {
        value: config.value.clone(),
        ..QrConfig::default()
    }
}

/// Partial configuration; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "ecLevel")]
    pub error_correction_level: Option<ErrorCorrectionLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "bgColor")]
    pub background_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "fgColor")]
    pub foreground_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "logoUrl")]
    pub logo_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "logoSize")]
    pub logo_scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiet_zone: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "dotType")]
    pub dot_style: Option<DotType>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "cornerSquareType")]
    pub corner_frame_style: Option<CornerSquareType>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "cornerSquareColor")]
    pub corner_frame_color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "cornerDotType")]
    pub corner_dot_style: Option<CornerDotType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub corner_dot_color: Option<Color>,
}

/// Merge a patch over the current configuration
pub fn apply_patch(config: &QrConfig, patch: &ConfigPatch) -> QrConfig {
    let mut next = config.clone();

    if let Some(level) = patch.error_correction_level {
        next.error_correction_level = level;
    }
    if let Some(ref color) = patch.background_color {
        next.background_color = color.clone();
    }
    if let Some(ref color) = patch.foreground_color {
        next.foreground_color = color.clone();
    }
    if let Some(ref logo) = patch.logo_image {
        next.logo_image = Some(logo.clone());
    }
    if let Some(scale) = patch.logo_scale {
        next.logo_scale = clamp_logo_scale(scale);
    }
    if let Some(margin) = patch.quiet_zone {
        next.quiet_zone = margin;
    }
    if let Some(style) = patch.dot_style {
        next.dot_style = style;
    }
    if let Some(style) = patch.corner_frame_style {
        next.corner_frame_style = style;
    }
    if let Some(ref color) = patch.corner_frame_color {
        next.corner_frame_color = color.clone();
    }
    if let Some(style) = patch.corner_dot_style {
        next.corner_dot_style = style;
    }
    if let Some(ref color) = patch.corner_dot_color {
        next.corner_dot_color = color.clone();
    }

    enforce_logo_level(next)
}

/// Keep the logo fraction inside the supported range
pub fn clamp_logo_scale(scale: f64) -> f64 {
    if scale.is_nan() {
        return QrConfig::default().logo_scale;
    }
    scale.clamp(MIN_LOGO_SCALE, MAX_LOGO_SCALE)
}

/// A logo covers modules; only level H leaves enough redundancy
fn enforce_logo_level(mut config: QrConfig) -> QrConfig {
    if config.logo_image.is_some() {
        config.error_correction_level = ErrorCorrectionLevel::H;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOGO: &str = "data:image/png;base64,iVBORw0KGgo=";

    #[test]
    fn test_apply_replaces_field() {
        let config = QrConfig::default();
        let next = apply(&config, ConfigUpdate::DotStyle(DotType::Classy));

        assert_eq!(next.dot_style, DotType::Classy);
        assert_eq!(next.value, config.value);
        assert_eq!(next.foreground_color, config.foreground_color);
    }

    #[test]
    fn test_logo_forces_high_level() {
        for level in [
            ErrorCorrectionLevel::L,
            ErrorCorrectionLevel::M,
            ErrorCorrectionLevel::Q,
            ErrorCorrectionLevel::H,
        ] {
            let config = apply(&QrConfig::default(), ConfigUpdate::ErrorCorrectionLevel(level));
            let next = apply(&config, ConfigUpdate::LogoImage(Some(LOGO.to_string())));
            assert_eq!(next.error_correction_level, ErrorCorrectionLevel::H);
        }
    }

    #[test]
    fn test_level_cannot_drop_while_logo_present() {
        let config = apply(&QrConfig::default(), ConfigUpdate::LogoImage(Some(LOGO.to_string())));
        let next = apply(&config, ConfigUpdate::ErrorCorrectionLevel(ErrorCorrectionLevel::L));
        assert_eq!(next.error_correction_level, ErrorCorrectionLevel::H);
    }

    #[test]
    fn test_removing_logo_keeps_level() {
        let config = apply(&QrConfig::default(), ConfigUpdate::LogoImage(Some(LOGO.to_string())));
        let next = apply(&config, ConfigUpdate::LogoImage(None));
        assert!(next.logo_image.is_none());
        assert_eq!(next.error_correction_level, ErrorCorrectionLevel::H);

        let lowered = apply(&next, ConfigUpdate::ErrorCorrectionLevel(ErrorCorrectionLevel::L));
        assert_eq!(lowered.error_correction_level, ErrorCorrectionLevel::L);
    }

    #[test]
    fn test_logo_scale_clamped() {
        let config = QrConfig::default();
        assert_eq!(apply(&config, ConfigUpdate::LogoScale(0.9)).logo_scale, MAX_LOGO_SCALE);
        assert_eq!(apply(&config, ConfigUpdate::LogoScale(0.01)).logo_scale, MIN_LOGO_SCALE);
        assert_eq!(apply(&config, ConfigUpdate::LogoScale(0.25)).logo_scale, 0.25);
    }

    #[test]
    fn test_reset_preserves_value() {
        let mut config = QrConfig::default();
        config.value = "WIFI:T:WPA;S:Home;P:secret1;H:false;;".to_string();
        let config = apply(&config, ConfigUpdate::LogoImage(Some(LOGO.to_string())));
        let config = apply(&config, ConfigUpdate::QuietZone(4));

        let restored = reset(&config);
        assert_eq!(restored.value, config.value);
        assert_eq!(
            restored,
            QrConfig { value: config.value.clone(), ..QrConfig::default() }
        );
    }

    #[test]
    fn test_patch_leaves_absent_fields() {
        let config = apply(&QrConfig::default(), ConfigUpdate::QuietZone(7));
        let patch = ConfigPatch {
            dot_style: Some(DotType::Dots),
            ..Default::default()
        };
        let next = apply_patch(&config, &patch);
        assert_eq!(next.dot_style, DotType::Dots);
        assert_eq!(next.quiet_zone, 7);
    }

    #[test]
    fn test_patch_with_logo_forces_high_level() {
        let config = apply(&QrConfig::default(), ConfigUpdate::ErrorCorrectionLevel(ErrorCorrectionLevel::L));
        let patch = ConfigPatch {
            logo_image: Some(LOGO.to_string()),
            ..Default::default()
        };
        assert_eq!(apply_patch(&config, &patch).error_correction_level, ErrorCorrectionLevel::H);
    }

    #[test]
    fn test_update_wire_format() {
        let update: ConfigUpdate =
            serde_json::from_str(r##"{"field":"foregroundColor","value":"#2563eb"}"##).unwrap();
        assert_eq!(update, ConfigUpdate::ForegroundColor("#2563eb".parse().unwrap()));
    }
}
