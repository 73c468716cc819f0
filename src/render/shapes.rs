//! Module Geometry
//!
//! Shape rules shared by the raster and vector outputs. Everything here is
//! in module units; callers scale to pixels.

use crate::config::{CornerDotType, CornerSquareType, DotType};

/// Finder patterns are 7x7 modules
pub const FINDER_SIZE: usize = 7;

/// Corner radii, clockwise from top-left
pub type Radii = [f64; 4];

/// Axis-aligned rectangle with per-corner radii
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundedRect {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub radii: Radii,
}

impl RoundedRect {
    pub fn square(x: f64, y: f64, size: f64, radius: f64) -> Self {
        Self { x, y, size, radii: [radius; 4] }
    }

    pub fn contains(&self, px: f64, py: f64) -> bool {
        let (x0, y0) = (self.x, self.y);
        let (x1, y1) = (self.x + self.size, self.y + self.size);
        if px < x0 || py < y0 || px >= x1 || py >= y1 {
            return false;
        }

        let [tl, tr, br, bl] = self.radii;
        let corners = [
            (tl, x0 + tl, y0 + tl, px < x0 + tl && py < y0 + tl),
            (tr, x1 - tr, y0 + tr, px > x1 - tr && py < y0 + tr),
            (br, x1 - br, y1 - br, px > x1 - br && py > y1 - br),
            (bl, x0 + bl, y1 - bl, px < x0 + bl && py > y1 - bl),
        ];
        for (r, cx, cy, in_zone) in corners {
            if r > 0.0 && in_zone {
                let (dx, dy) = (px - cx, py - cy);
                return dx * dx + dy * dy <= r * r;
            }
        }
        true
    }

    /// SVG path data, scaled and offset into pixel space
    pub fn path(&self, scale: f64, ox: f64, oy: f64) -> String {
        let x = ox + self.x * scale;
        let y = oy + self.y * scale;
        let s = self.size * scale;
        let [tl, tr, br, bl] = self.radii.map(|r| r * scale);

        let mut d = format!("M{} {}", fmt_num(x + tl), fmt_num(y));
        d.push_str(&format!("H{}", fmt_num(x + s - tr)));
        if tr > 0.0 {
            d.push_str(&arc(tr, x + s, y + tr));
        }
        d.push_str(&format!("V{}", fmt_num(y + s - br)));
        if br > 0.0 {
            d.push_str(&arc(br, x + s - br, y + s));
        }
        d.push_str(&format!("H{}", fmt_num(x + bl)));
        if bl > 0.0 {
            d.push_str(&arc(bl, x, y + s - bl));
        }
        d.push_str(&format!("V{}", fmt_num(y + tl)));
        if tl > 0.0 {
            d.push_str(&arc(tl, x + tl, y));
        }
        d.push('Z');
        d
    }
}

fn arc(r: f64, x: f64, y: f64) -> String {
    format!("A{r} {r} 0 0 1 {} {}", fmt_num(x), fmt_num(y), r = fmt_num(r))
}

/// Two decimals, trailing zeros stripped
pub fn fmt_num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Dark neighbours of one module
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbours {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

/// Body module outline for a dot style
pub enum ModuleShape {
    Circle,
    Rect(Radii),
}

/// Corners are only rounded where both adjoining sides are open
pub fn module_shape(style: DotType, n: Neighbours) -> ModuleShape {
    let open = [
        !n.top && !n.left,
        !n.top && !n.right,
        !n.bottom && !n.right,
        !n.bottom && !n.left,
    ];
    let pick = |radii: [f64; 4]| {
        let mut out = [0.0; 4];
        for i in 0..4 {
            if open[i] {
                out[i] = radii[i];
            }
        }
        ModuleShape::Rect(out)
    };

    match style {
        DotType::Square => ModuleShape::Rect([0.0; 4]),
        DotType::Dots => ModuleShape::Circle,
        DotType::Rounded => pick([0.3; 4]),
        DotType::ExtraRounded => pick([0.5; 4]),
        DotType::Classy => pick([0.5, 0.0, 0.5, 0.0]),
        DotType::ClassyRounded => pick([0.5, 0.2, 0.5, 0.2]),
    }
}

impl ModuleShape {
    /// Hit test at a point local to the module cell, both axes in [0, 1)
    pub fn contains(&self, u: f64, v: f64) -> bool {
        match self {
            ModuleShape::Circle => {
                let (dx, dy) = (u - 0.5, v - 0.5);
                dx * dx + dy * dy <= 0.25
            }
            ModuleShape::Rect(radii) => RoundedRect { x: 0.0, y: 0.0, size: 1.0, radii: *radii }.contains(u, v),
        }
    }
}

/// Outer and inner outlines of a finder frame, relative to the finder origin
pub fn frame_outlines(style: CornerSquareType) -> (RoundedRect, RoundedRect) {
    let (outer, inner) = match style {
        CornerSquareType::Square => (0.0, 0.0),
        CornerSquareType::ExtraRounded => (2.5, 1.5),
        CornerSquareType::Dot => (3.5, 2.5),
    };
    (
        RoundedRect::square(0.0, 0.0, 7.0, outer),
        RoundedRect::square(1.0, 1.0, 5.0, inner),
    )
}

/// Finder dot outline, relative to the finder origin
pub fn dot_outline(style: CornerDotType) -> RoundedRect {
    let r = match style {
        CornerDotType::Square => 0.0,
        CornerDotType::Dot => 1.5,
    };
    RoundedRect::square(2.0, 2.0, 3.0, r)
}

/// Top-left corners of the three finder patterns in a symbol of `n` modules
pub fn finder_origins(n: usize) -> [(usize, usize); 3] {
    let far = n.saturating_sub(FINDER_SIZE);
    [(0, 0), (far, 0), (0, far)]
}

/// Finder containing module `(x, y)`, if any
pub fn finder_at(n: usize, x: usize, y: usize) -> Option<(usize, usize)> {
    finder_origins(n)
        .into_iter()
        .find(|&(fx, fy)| x >= fx && x < fx + FINDER_SIZE && y >= fy && y < fy + FINDER_SIZE)
}
