use crate::color::HexColor;
use crate::wrap::FontSpec;
use palette::Srgba;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn polar(center: Point, radius: f64, angle: f64) -> Self {
        Self::new(
            center.x + angle.cos() * radius,
            center.y + angle.sin() * radius,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f64,
    pub height: f64,
}

impl SurfaceSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Donut slice: outer arc clockwise from `start_angle` to `end_angle`, radial
/// edge in, inner arc back, radial edge out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnularSector {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl AnnularSector {
    pub fn inner_start(&self) -> Point {
        Point::polar(self.center, self.inner_radius, self.start_angle)
    }

    pub fn inner_end(&self) -> Point {
        Point::polar(self.center, self.inner_radius, self.end_angle)
    }
}

/// Two-stop gradient: `start_color` at `from`, `end_color` at `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearGradient {
    pub from: Point,
    pub to: Point,
    pub start_color: HexColor,
    pub end_color: HexColor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Baseline {
    Middle,
    Alphabetic,
}

/// One line of horizontally centred text. The painter moves to `origin`,
/// rotates by `rotation`, then draws at `(0, offset_y)` in that frame.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub origin: Point,
    pub rotation: f64,
    pub offset_y: f64,
    pub font: FontSpec,
    pub color: Srgba<f64>,
    pub baseline: Baseline,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Background(HexColor),
    FillSector {
        sector: AnnularSector,
        gradient: LinearGradient,
    },
    StrokeSector {
        sector: AnnularSector,
        color: HexColor,
        line_width: f64,
    },
    Text(TextRun),
}

/// Ordered draw operations for one full repaint.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    pub size: SurfaceSize,
    pub ops: Vec<DrawOp>,
}

impl Scene {
    pub fn new(size: SurfaceSize) -> Self {
        Self {
            size,
            ops: Vec::new(),
        }
    }

    pub fn push(&mut self, op: DrawOp) {
        self.ops.push(op);
    }

    pub fn iter(&self) -> impl Iterator<Item = &DrawOp> {
        self.ops.iter()
    }

    pub fn sectors(&self) -> impl Iterator<Item = &AnnularSector> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::FillSector { sector, .. } => Some(sector),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &TextRun> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text(run) => Some(run),
            _ => None,
        })
    }
}
