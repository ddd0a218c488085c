use crate::color::{HexColor, WHITE};
use crate::item::ItemId;
use crate::layout::Wedge;
use crate::params::InnerRadius;
use crate::scene::{
    AnnularSector, Baseline, DrawOp, LinearGradient, Point, Scene, SurfaceSize, TextRun,
};
use crate::wrap::{self, FontSpec, TextMeasure};
use palette::Srgba;
use std::f64::consts::FRAC_PI_2;

pub const PADDING: f64 = 24.0;
pub const LABEL_RADIUS_FACTOR: f64 = 0.55;
pub const SHADE_LUMINOSITY: f64 = 0.1;
pub const SELECTION_LINE_WIDTH: f64 = 3.0;
pub const ICON_OFFSET: f64 = 12.0;
pub const LABEL_MARGIN: f64 = 20.0;
pub const LINE_HEIGHT: f64 = 18.0;
pub const ICON_FONT: FontSpec = FontSpec::bold(24.0);
pub const LABEL_FONT: FontSpec = FontSpec::bold(16.0);
pub const PLACEHOLDER_FONT: FontSpec = FontSpec::bold(20.0);
pub const PLACEHOLDER_TEXT: &str = "Add items to build your radial menu";

pub struct Style {
    pub selection: HexColor,
    pub icon: Srgba<f64>,
    pub label: Srgba<f64>,
    pub placeholder: Srgba<f64>,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            selection: WHITE,
            icon: WHITE.with_alpha(1.0),
            label: WHITE.with_alpha(0.9),
            placeholder: WHITE.with_alpha(0.6),
        }
    }
}

/// Radii shared by every wedge on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub center: Point,
    pub outer_radius: f64,
    pub inner_radius: f64,
}

impl Frame {
    pub fn calculate(size: SurfaceSize, inner: InnerRadius) -> Self {
        let outer_radius = (size.width.min(size.height) / 2.0 - PADDING).max(0.0);
        Self {
            center: size.center(),
            outer_radius,
            inner_radius: inner.get() * outer_radius,
        }
    }

    pub fn label_radius(&self) -> f64 {
        self.inner_radius + (self.outer_radius - self.inner_radius) * LABEL_RADIUS_FACTOR
    }

    pub fn label_max_width(&self) -> f64 {
        self.outer_radius - self.inner_radius - LABEL_MARGIN
    }
}

struct WedgeRenderer<'a> {
    wedge: &'a Wedge<'a>,
    frame: &'a Frame,
    selected: bool,
    style: &'a Style,
}

impl<'a> WedgeRenderer<'a> {
    fn new(wedge: &'a Wedge<'a>, frame: &'a Frame, selected: bool, style: &'a Style) -> Self {
        Self {
            wedge,
            frame,
            selected,
            style,
        }
    }

    fn draw(&self, scene: &mut Scene, measure: &impl TextMeasure) {
        let sector = self.sector();
        self.draw_fill(scene, sector);
        if self.selected {
            scene.push(DrawOp::StrokeSector {
                sector,
                color: self.style.selection,
                line_width: SELECTION_LINE_WIDTH,
            });
        }
        self.draw_content(scene, measure);
    }

    /// Inverted spans collapse to zero width at the start angle so the
    /// backend never sweeps the long way round.
    fn sector(&self) -> AnnularSector {
        AnnularSector {
            center: self.frame.center,
            inner_radius: self.frame.inner_radius,
            outer_radius: self.frame.outer_radius,
            start_angle: self.wedge.start_angle,
            end_angle: self.wedge.end_angle.max(self.wedge.start_angle),
        }
    }

    fn draw_fill(&self, scene: &mut Scene, sector: AnnularSector) {
        let color = self.wedge.item.color;
        let gradient = LinearGradient {
            from: self.frame.center,
            to: Point::polar(
                self.frame.center,
                self.frame.outer_radius,
                self.wedge.mid_angle(),
            ),
            start_color: color.shade(SHADE_LUMINOSITY),
            end_color: color.shade(-SHADE_LUMINOSITY),
        };
        scene.push(DrawOp::FillSector { sector, gradient });
    }

    fn draw_content(&self, scene: &mut Scene, measure: &impl TextMeasure) {
        let mid = self.wedge.mid_angle();
        let origin = Point::polar(self.frame.center, self.frame.label_radius(), mid);
        let rotation = mid + FRAC_PI_2;
        let text_run = |text: String, offset_y: f64, font: FontSpec, color: Srgba<f64>| {
            DrawOp::Text(TextRun {
                text,
                origin,
                rotation,
                offset_y,
                font,
                color,
                baseline: Baseline::Middle,
            })
        };

        let label_y = match self.wedge.item.icon() {
            Some(icon) => {
                scene.push(text_run(
                    icon.to_string(),
                    -ICON_OFFSET,
                    ICON_FONT,
                    self.style.icon,
                ));
                ICON_OFFSET
            }
            None => 0.0,
        };

        let lines = wrap::wrap_label(
            &self.wedge.item.label,
            self.frame.label_max_width(),
            &LABEL_FONT,
            measure,
        );
        let top = label_y - (lines.len().saturating_sub(1) as f64 / 2.0) * LINE_HEIGHT;
        for (i, line) in lines.into_iter().enumerate() {
            scene.push(text_run(
                line,
                top + i as f64 * LINE_HEIGHT,
                LABEL_FONT,
                self.style.label,
            ));
        }
    }
}

/// Full repaint of the preview. Background first, then each wedge in list
/// order: gradient fill, selection outline, icon, wrapped label. An empty
/// wedge list yields the background and a centred placeholder.
pub fn render(
    size: SurfaceSize,
    wedges: &[Wedge<'_>],
    selected: Option<ItemId>,
    background: HexColor,
    inner_radius: InnerRadius,
    measure: &impl TextMeasure,
) -> Scene {
    let style = Style::default();
    let mut scene = Scene::new(size);
    scene.push(DrawOp::Background(background));

    if wedges.is_empty() {
        scene.push(DrawOp::Text(TextRun {
            text: PLACEHOLDER_TEXT.to_string(),
            origin: size.center(),
            rotation: 0.0,
            offset_y: 0.0,
            font: PLACEHOLDER_FONT,
            color: style.placeholder,
            baseline: Baseline::Alphabetic,
        }));
        return scene;
    }

    let frame = Frame::calculate(size, inner_radius);
    for wedge in wedges {
        let is_selected = selected == Some(wedge.item.id);
        WedgeRenderer::new(wedge, &frame, is_selected, &style).draw(&mut scene, measure);
    }

    log::trace!("rendered {} wedges into {} ops", wedges.len(), scene.ops.len());
    scene
}
