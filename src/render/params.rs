//! Render Parameters
//!
//! The object handed to a renderer: the payload plus every styling option,
//! derived from a [`QrConfig`]. Field names follow the renderer contract.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::{Color, CornerDotType, CornerSquareType, DotType, ErrorCorrectionLevel, QrConfig};
use crate::error::QuickQrError;

/// Fixed square size of the rendered target, in pixels
pub const PREVIEW_SIZE: u32 = 300;

/// Body module styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DotsOptions {
    pub color: Color,
    #[serde(rename = "type")]
    pub shape: DotType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundOptions {
    pub color: Color,
}

/// Finder frame styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornersSquareOptions {
    pub color: Color,
    #[serde(rename = "type")]
    pub shape: CornerSquareType,
}

/// Finder dot styling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CornersDotOptions {
    pub color: Color,
    #[serde(rename = "type")]
    pub shape: CornerDotType,
}

/// Logo placement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageOptions {
    /// Padding around the logo, in pixels
    pub margin: u32,
    /// Logo size as a fraction of the symbol
    pub image_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrOptions {
    pub error_correction_level: ErrorCorrectionLevel,
}

/// Everything a renderer needs to draw one symbol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderParams {
    pub data: String,
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub dots_options: DotsOptions,
    pub background_options: BackgroundOptions,
    pub corners_square_options: CornersSquareOptions,
    pub corners_dot_options: CornersDotOptions,
    pub image_options: ImageOptions,
    pub qr_options: QrOptions,
}

impl RenderParams {
    /// Derive renderer input from a configuration
    pub fn from_config(config: &QrConfig, size: u32) -> Self {
        Self {
            data: config.value.clone(),
            width: size,
            height: size,
            margin: config.quiet_zone,
            image: config.logo_image.clone(),
            dots_options: DotsOptions {
                color: config.foreground_color.clone(),
                shape: config.dot_style,
            },
            background_options: BackgroundOptions {
                color: config.background_color.clone(),
            },
            corners_square_options: CornersSquareOptions {
                color: config.corner_frame_color.clone(),
                shape: config.corner_frame_style,
            },
            corners_dot_options: CornersDotOptions {
                color: config.corner_dot_color.clone(),
                shape: config.corner_dot_style,
            },
            image_options: ImageOptions {
                margin: 0,
                image_size: config.logo_scale,
            },
            qr_options: QrOptions {
                error_correction_level: config.error_correction_level,
            },
        }
    }
}

/// Export file type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Png,
    Jpeg,
    Svg,
}

impl ExportFormat {
    /// File extension, without the dot
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpeg",
            ExportFormat::Svg => "svg",
        }
    }

    pub fn is_vector(&self) -> bool {
        matches!(self, ExportFormat::Svg)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = QuickQrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "jpg" | "jpeg" => Ok(ExportFormat::Jpeg),
            "svg" => Ok(ExportFormat::Svg),
            other => Err(QuickQrError::invalid_input(format!(
                "Unknown export format '{}' (expected png, jpeg or svg)",
                other
            ))),
        }
    }
}

/// Arguments to a renderer download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadOptions {
    pub extension: ExportFormat,
    /// File name without extension
    pub name: String,
}

impl DownloadOptions {
    /// `<name>.<extension>`
    pub fn file_name(&self) -> String {
        format!("{}.{}", self.name, self.extension.extension())
    }
}

/// A finished export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedAsset {
    pub file_name: String,
    pub format: ExportFormat,
    /// Where the file was written, when the renderer writes files
    pub path: Option<PathBuf>,
    pub size_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{apply, ConfigUpdate};

    #[test]
    fn test_params_from_default_config() {
        let params = RenderParams::from_config(&QrConfig::default(), PREVIEW_SIZE);

        assert_eq!(params.data, "https://example.com");
        assert_eq!(params.width, 300);
        assert_eq!(params.height, 300);
        assert_eq!(params.margin, 20);
        assert!(params.image.is_none());
        assert_eq!(params.image_options.margin, 0);
        assert_eq!(params.image_options.image_size, 0.4);
        assert_eq!(params.qr_options.error_correction_level, ErrorCorrectionLevel::M);
    }

    #[test]
    fn test_params_carry_logo_and_styles() {
        let config = apply(&QrConfig::default(), ConfigUpdate::LogoImage(Some("data:image/png;base64,AA==".into())));
        let config = apply(&config, ConfigUpdate::CornerFrameStyle(CornerSquareType::ExtraRounded));
        let params = RenderParams::from_config(&config, PREVIEW_SIZE);

        assert_eq!(params.image.as_deref(), Some("data:image/png;base64,AA=="));
        assert_eq!(params.corners_square_options.shape, CornerSquareType::ExtraRounded);
        assert_eq!(params.qr_options.error_correction_level, ErrorCorrectionLevel::H);
    }

    #[test]
    fn test_params_wire_format() {
        let params = RenderParams::from_config(&QrConfig::default(), PREVIEW_SIZE);
        let json = serde_json::to_value(&params).unwrap();

        assert_eq!(json["dotsOptions"]["type"], "square");
        assert_eq!(json["backgroundOptions"]["color"], "#ffffff");
        assert_eq!(json["imageOptions"]["imageSize"], 0.4);
        assert_eq!(json["qrOptions"]["errorCorrectionLevel"], "M");
        assert!(json.get("image").is_none());
    }

    #[test]
    fn test_export_format() {
        assert_eq!("jpg".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert_eq!(ExportFormat::Jpeg.extension(), "jpeg");
        assert!(ExportFormat::Svg.is_vector());
        assert!("gif".parse::<ExportFormat>().is_err());

        let options = DownloadOptions { extension: ExportFormat::Png, name: "qrcode-1".into() };
        assert_eq!(options.file_name(), "qrcode-1.png");
    }
}
