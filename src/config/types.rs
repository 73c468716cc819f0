//! Configuration Types
//!
//! The single structured value that fully determines a rendered symbol.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{ErrorCode, QuickQrError};
use crate::payload::DEFAULT_LINK;

/// Smallest logo, as a fraction of symbol width
pub const MIN_LOGO_SCALE: f64 = 0.1;
/// Largest logo, as a fraction of symbol width
pub const MAX_LOGO_SCALE: f64 = 0.5;

/// Error correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorCorrectionLevel {
    /// Low (~7% recovery)
    L,
    /// Medium (~15% recovery)
    #[default]
    M,
    /// Quartile (~25% recovery)
    Q,
    /// High (~30% recovery)
    H,
}

impl fmt::Display for ErrorCorrectionLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for ErrorCorrectionLevel {
    type Err = QuickQrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "L" => Ok(ErrorCorrectionLevel::L),
            "M" => Ok(ErrorCorrectionLevel::M),
            "Q" => Ok(ErrorCorrectionLevel::Q),
            "H" => Ok(ErrorCorrectionLevel::H),
            other => Err(QuickQrError::invalid_input(format!(
                "Unknown error correction level '{}' (expected L, M, Q or H)",
                other
            ))),
        }
    }
}

/// Body module shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DotType {
    #[default]
    Square,
    Dots,
    Rounded,
    Classy,
    ClassyRounded,
    ExtraRounded,
}

/// Finder pattern outer frame shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerSquareType {
    #[default]
    Square,
    Dot,
    ExtraRounded,
}

/// Finder pattern inner dot shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CornerDotType {
    #[default]
    Square,
    Dot,
}

macro_rules! kebab_names {
    ($ty:ty { $($variant:ident => $name:literal),+ $(,)? }) => {
        impl $ty {
            /// Wire name understood by the renderer
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $name,)+
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = QuickQrError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().replace('_', "-").as_str() {
                    $($name => Ok(Self::$variant),)+
                    other => Err(QuickQrError::invalid_input(format!(
                        "Unknown {} '{}'",
                        stringify!($ty),
                        other
                    ))),
                }
            }
        }
    };
}

kebab_names!(DotType {
    Square => "square",
    Dots => "dots",
    Rounded => "rounded",
    Classy => "classy",
    ClassyRounded => "classy-rounded",
    ExtraRounded => "extra-rounded",
});

kebab_names!(CornerSquareType {
    Square => "square",
    Dot => "dot",
    ExtraRounded => "extra-rounded",
});

kebab_names!(CornerDotType {
    Square => "square",
    Dot => "dot",
});

/// `#rrggbb` color, stored lowercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(String);

impl Color {
    pub const WHITE: &'static str = "#ffffff";
    pub const BLACK: &'static str = "#000000";

    pub fn white() -> Self {
        Color(Self::WHITE.to_string())
    }

    pub fn black() -> Self {
        Color(Self::BLACK.to_string())
    }

    /// Build from a compile-time literal; malformed input falls back to black
    pub(crate) fn from_hex_const(hex: &str) -> Self {
        hex.parse().unwrap_or_else(|_| Color::black())
    }

    /// Hex string including the leading `#`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Red, green and blue channels
    pub fn rgb(&self) -> [u8; 3] {
        let mut out = [0u8; 3];
        // Validated at construction
        if let Ok(bytes) = hex::decode(&self.0[1..]) {
            out.copy_from_slice(&bytes);
        }
        out
    }
}

impl FromStr for Color {
    type Err = QuickQrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if digits.len() != 6 || hex::decode(digits).is_err() {
            return Err(QuickQrError::new(
                ErrorCode::InvalidColor,
                format!("Invalid color '{}' (expected #rrggbb)", s),
            ));
        }

        Ok(Color(format!("#{}", digits.to_ascii_lowercase())))
    }
}

impl TryFrom<String> for Color {
    type Error = QuickQrError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Payload plus visual style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QrConfig {
    /// Literal payload, derived from the active record
    pub value: String,
    #[serde(rename = "ecLevel")]
    pub error_correction_level: ErrorCorrectionLevel,
    /// Logical pixel size hint
    pub size: u32,
    #[serde(rename = "bgColor")]
    pub background_color: Color,
    #[serde(rename = "fgColor")]
    pub foreground_color: Color,
    /// Self-contained data URL, `None` for no logo
    #[serde(rename = "logoUrl")]
    pub logo_image: Option<String>,
    #[serde(rename = "logoSize")]
    pub logo_scale: f64,
    /// Margin around the symbol in pixels
    pub quiet_zone: u32,
    #[serde(rename = "dotType")]
    pub dot_style: DotType,
    #[serde(rename = "cornerSquareType")]
    pub corner_frame_style: CornerSquareType,
    #[serde(rename = "cornerSquareColor")]
    pub corner_frame_color: Color,
    #[serde(rename = "cornerDotType")]
    pub corner_dot_style: CornerDotType,
    pub corner_dot_color: Color,
}

impl Default for QrConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_LINK.to_string(),
            error_correction_level: ErrorCorrectionLevel::M,
            size: 1000,
            background_color: Color::white(),
            foreground_color: Color::black(),
            logo_image: None,
            logo_scale: 0.4,
            quiet_zone: 20,
            dot_style: DotType::Square,
            corner_frame_style: CornerSquareType::Square,
            corner_frame_color: Color::black(),
            corner_dot_style: CornerDotType::Square,
            corner_dot_color: Color::black(),
        }
    }
}

impl QrConfig {
    /// Whether a logo is drawn over the symbol center
    pub fn has_logo(&self) -> bool {
        self.logo_image.is_some()
    }
}
