//! Matrix Renderer
//!
//! Encodes the payload with the `qrcode` crate and draws the module matrix
//! with the configured shapes, colors and logo. Raster exports go through
//! the `image` crate; SVG is written directly.

use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use qrcode::types::QrError as EncodeError;
use qrcode::{EcLevel, QrCode};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use super::params::{DownloadOptions, ExportFormat, ExportedAsset, RenderParams};
use super::renderer::{RenderError, Renderer};
use super::shapes::{self, finder_at, finder_origins, fmt_num, module_shape, Neighbours};
use crate::config::{Color, ErrorCorrectionLevel};
use crate::logo::decode_data_url;
use crate::{log_debug, log_info};

fn ec_level(level: ErrorCorrectionLevel) -> EcLevel {
    match level {
        ErrorCorrectionLevel::L => EcLevel::L,
        ErrorCorrectionLevel::M => EcLevel::M,
        ErrorCorrectionLevel::Q => EcLevel::Q,
        ErrorCorrectionLevel::H => EcLevel::H,
    }
}

/// Accepted symbol, ready to draw
struct Symbol {
    params: RenderParams,
    /// Modules per side
    n: usize,
    dark: Vec<bool>,
    logo: Option<DynamicImage>,
}

impl Symbol {
    fn is_dark(&self, x: isize, y: isize) -> bool {
        if x < 0 || y < 0 || x as usize >= self.n || y as usize >= self.n {
            return false;
        }
        self.dark[y as usize * self.n + x as usize]
    }

    fn neighbours(&self, x: usize, y: usize) -> Neighbours {
        let (x, y) = (x as isize, y as isize);
        Neighbours {
            top: self.is_dark(x, y - 1),
            right: self.is_dark(x + 1, y),
            bottom: self.is_dark(x, y + 1),
            left: self.is_dark(x - 1, y),
        }
    }

    fn layout(&self) -> Layout {
        let side = self.params.width as f64;
        let margin = self.params.margin as f64;
        let module = (side - 2.0 * margin) / self.n as f64;

        let logo_box = self.logo.as_ref().map(|_| {
            let size = (side - 2.0 * margin) * self.params.image_options.image_size;
            let origin = (side - size) / 2.0;
            (origin, size)
        });

        Layout { side, margin, module, logo_box }
    }

    /// Modules under the logo are left blank
    fn hidden(&self, layout: &Layout, x: usize, y: usize) -> bool {
        let Some((origin, size)) = layout.logo_box else {
            return false;
        };
        let pad = self.params.image_options.margin as f64;
        let (lo, hi) = (origin - pad, origin + size + pad);
        let x0 = layout.margin + x as f64 * layout.module;
        let y0 = layout.margin + y as f64 * layout.module;
        x0 + layout.module > lo && x0 < hi && y0 + layout.module > lo && y0 < hi
    }
}

/// Pixel geometry of one render
struct Layout {
    side: f64,
    margin: f64,
    /// Module edge in pixels
    module: f64,
    /// Logo square: origin and edge, in pixels
    logo_box: Option<(f64, f64)>,
}

/// Reference renderer writing exports into a directory
pub struct MatrixRenderer {
    output_dir: PathBuf,
    current: Option<Symbol>,
}

impl MatrixRenderer {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            current: None,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Modules per side of the accepted symbol
    pub fn modules(&self) -> Option<usize> {
        self.current.as_ref().map(|s| s.n)
    }

    /// Draw the accepted symbol as an SVG document
    pub fn to_svg(&self) -> Result<String, RenderError> {
        let symbol = self.current.as_ref().ok_or(RenderError::NotRendered)?;
        Ok(draw_svg(symbol))
    }

    /// Draw the accepted symbol into an RGBA buffer
    pub fn to_raster(&self) -> Result<RgbaImage, RenderError> {
        let symbol = self.current.as_ref().ok_or(RenderError::NotRendered)?;
        Ok(draw_raster(symbol))
    }

    fn encode(&self, format: ExportFormat) -> Result<Vec<u8>, RenderError> {
        match format {
            ExportFormat::Svg => Ok(self.to_svg()?.into_bytes()),
            ExportFormat::Png => {
                let mut bytes = Vec::new();
                self.to_raster()?
                    .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
                    .map_err(|e| RenderError::Export(e.to_string()))?;
                Ok(bytes)
            }
            ExportFormat::Jpeg => {
                // JPEG has no alpha channel
                let rgb = DynamicImage::ImageRgba8(self.to_raster()?).to_rgb8();
                let mut bytes = Vec::new();
                rgb.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
                    .map_err(|e| RenderError::Export(e.to_string()))?;
                Ok(bytes)
            }
        }
    }
}

impl Renderer for MatrixRenderer {
    fn update(&mut self, params: &RenderParams) -> Result<(), RenderError> {
        if params.width == 0 || params.width != params.height {
            return Err(RenderError::InvalidParams(format!(
                "Target must be a non-empty square, got {}x{}",
                params.width, params.height
            )));
        }
        if params.margin.saturating_mul(2) >= params.width {
            return Err(RenderError::InvalidParams(format!(
                "Margin {} leaves no room in a {}px target",
                params.margin, params.width
            )));
        }

        let level = params.qr_options.error_correction_level;
        let code = QrCode::with_error_correction_level(params.data.as_bytes(), ec_level(level)).map_err(|e| match e {
            EncodeError::DataTooLong => RenderError::CapacityExceeded(params.data.len(), level),
            other => RenderError::InvalidParams(other.to_string()),
        })?;

        let logo = match &params.image {
            Some(url) => {
                let decoded = decode_data_url(url).map_err(|e| RenderError::InvalidParams(e.message))?;
                let img = image::load_from_memory(&decoded.bytes)
                    .map_err(|e| RenderError::InvalidParams(format!("Logo is not a readable image: {}", e)))?;
                Some(img)
            }
            None => None,
        };

        let n = code.width();
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();

        log_debug!("render", "Symbol encoded", modules = n, level = level, bytes = params.data.len());

        self.current = Some(Symbol {
            params: params.clone(),
            n,
            dark,
            logo,
        });
        Ok(())
    }

    fn download(&mut self, options: &DownloadOptions) -> Result<ExportedAsset, RenderError> {
        let bytes = self.encode(options.extension)?;

        fs::create_dir_all(&self.output_dir)?;
        let file_name = options.file_name();
        let path = self.output_dir.join(&file_name);
        fs::write(&path, &bytes)?;

        log_info!("render", "Exported", file = file_name, bytes = bytes.len());

        Ok(ExportedAsset {
            file_name,
            format: options.extension,
            path: Some(path),
            size_bytes: bytes.len(),
        })
    }
}

fn rgba(color: &Color) -> Rgba<u8> {
    let [r, g, b] = color.rgb();
    Rgba([r, g, b, 255])
}

fn draw_raster(symbol: &Symbol) -> RgbaImage {
    let params = &symbol.params;
    let layout = symbol.layout();
    let side = params.width;

    let background = rgba(&params.background_options.color);
    let ink = rgba(&params.dots_options.color);
    let frame_ink = rgba(&params.corners_square_options.color);
    let dot_ink = rgba(&params.corners_dot_options.color);

    let (frame_outer, frame_inner) = shapes::frame_outlines(params.corners_square_options.shape);
    let finder_dot = shapes::dot_outline(params.corners_dot_options.shape);

    let mut canvas = RgbaImage::from_pixel(side, side, background);
    let span = symbol.n as f64;

    for py in 0..side {
        for px in 0..side {
            // Sample at the pixel center, in module units
            let mx = (px as f64 + 0.5 - layout.margin) / layout.module;
            let my = (py as f64 + 0.5 - layout.margin) / layout.module;
            if mx < 0.0 || my < 0.0 || mx >= span || my >= span {
                continue;
            }
            let (x, y) = (mx as usize, my as usize);

            if let Some((fx, fy)) = finder_at(symbol.n, x, y) {
                let (lx, ly) = (mx - fx as f64, my - fy as f64);
                if finder_dot.contains(lx, ly) {
                    canvas.put_pixel(px, py, dot_ink);
                } else if frame_outer.contains(lx, ly) && !frame_inner.contains(lx, ly) {
                    canvas.put_pixel(px, py, frame_ink);
                }
                continue;
            }

            if !symbol.dark[y * symbol.n + x] || symbol.hidden(&layout, x, y) {
                continue;
            }
            let shape = module_shape(params.dots_options.shape, symbol.neighbours(x, y));
            if shape.contains(mx - x as f64, my - y as f64) {
                canvas.put_pixel(px, py, ink);
            }
        }
    }

    if let (Some(logo), Some((origin, size))) = (&symbol.logo, layout.logo_box) {
        let edge = size.round().max(1.0) as u32;
        let scaled = logo.resize(edge, edge, FilterType::Lanczos3).to_rgba8();
        // Center within the logo box, keeping aspect ratio
        let x = origin + (size - scaled.width() as f64) / 2.0;
        let y = origin + (size - scaled.height() as f64) / 2.0;
        imageops::overlay(&mut canvas, &scaled, x.round() as i64, y.round() as i64);
    }

    canvas
}

fn draw_svg(symbol: &Symbol) -> String {
    let params = &symbol.params;
    let layout = symbol.layout();
    let side = fmt_num(layout.side);
    let scale = layout.module;

    let mut body = String::new();
    for y in 0..symbol.n {
        for x in 0..symbol.n {
            if !symbol.dark[y * symbol.n + x] || finder_at(symbol.n, x, y).is_some() || symbol.hidden(&layout, x, y) {
                continue;
            }
            let ox = layout.margin + x as f64 * scale;
            let oy = layout.margin + y as f64 * scale;
            match module_shape(params.dots_options.shape, symbol.neighbours(x, y)) {
                shapes::ModuleShape::Circle => {
                    let r = scale / 2.0;
                    body.push_str(&format!(
                        "<circle cx=\"{}\" cy=\"{}\" r=\"{}\"/>",
                        fmt_num(ox + r),
                        fmt_num(oy + r),
                        fmt_num(r)
                    ));
                }
                shapes::ModuleShape::Rect(radii) => {
                    let rect = shapes::RoundedRect { x: 0.0, y: 0.0, size: 1.0, radii };
                    body.push_str(&format!("<path d=\"{}\"/>", rect.path(scale, ox, oy)));
                }
            }
        }
    }

    let (frame_outer, frame_inner) = shapes::frame_outlines(params.corners_square_options.shape);
    let finder_dot = shapes::dot_outline(params.corners_dot_options.shape);
    let mut frames = String::new();
    let mut dots = String::new();
    for (fx, fy) in finder_origins(symbol.n) {
        let ox = layout.margin + fx as f64 * scale;
        let oy = layout.margin + fy as f64 * scale;
        frames.push_str(&format!(
            "<path fill-rule=\"evenodd\" d=\"{}{}\"/>",
            frame_outer.path(scale, ox, oy),
            frame_inner.path(scale, ox, oy)
        ));
        dots.push_str(&format!("<path d=\"{}\"/>", finder_dot.path(scale, ox, oy)));
    }

    let mut svg = format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{side}\" height=\"{side}\" viewBox=\"0 0 {side} {side}\">",
        side = side
    );
    svg.push_str(&format!(
        "<rect width=\"{side}\" height=\"{side}\" fill=\"{}\"/>",
        params.background_options.color,
        side = side
    ));
    svg.push_str(&format!("<g fill=\"{}\">{}</g>", params.dots_options.color, body));
    svg.push_str(&format!("<g fill=\"{}\">{}</g>", params.corners_square_options.color, frames));
    svg.push_str(&format!("<g fill=\"{}\">{}</g>", params.corners_dot_options.color, dots));

    if let (Some(url), Some((origin, size))) = (&params.image, layout.logo_box) {
        svg.push_str(&format!(
            "<image href=\"{}\" x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"xMidYMid meet\"/>",
            url,
            fmt_num(origin),
            fmt_num(origin),
            fmt_num(size),
            fmt_num(size)
        ));
    }

    svg.push_str("</svg>");
    svg
}
