use cairo::{Context, FontSlant, FontWeight};
use radial::scene::{AnnularSector, Baseline, LinearGradient, TextRun};
use radial::wrap::FONT_FAMILY;
use radial::{DrawOp, FontSpec, HexColor, Scene, TextMeasure};

fn set_source_color(cr: &Context, color: HexColor) {
    let (r, g, b) = color.to_srgb().into_components();
    cr.set_source_rgb(r, g, b);
}

fn set_font(cr: &Context, font: &FontSpec) {
    let weight = if font.bold {
        FontWeight::Bold
    } else {
        FontWeight::Normal
    };
    cr.select_font_face(FONT_FAMILY, FontSlant::Normal, weight);
    cr.set_font_size(font.size);
}

fn sector_path(cr: &Context, sector: &AnnularSector) {
    let start = sector.inner_start();
    let end = sector.inner_end();
    let (cx, cy) = (sector.center.x, sector.center.y);

    cr.new_path();
    cr.move_to(start.x, start.y);
    cr.arc(
        cx,
        cy,
        sector.outer_radius,
        sector.start_angle,
        sector.end_angle,
    );
    cr.line_to(end.x, end.y);
    cr.arc_negative(
        cx,
        cy,
        sector.inner_radius,
        sector.end_angle,
        sector.start_angle,
    );
    cr.close_path();
}

/// Replays a [`Scene`] onto a cairo context in order.
pub struct ScenePainter<'a> {
    cr: &'a Context,
}

impl<'a> ScenePainter<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }

    pub fn paint(&self, scene: &Scene) -> Result<(), cairo::Error> {
        for op in scene.iter() {
            match op {
                DrawOp::Background(color) => self.draw_background(*color)?,
                DrawOp::FillSector { sector, gradient } => self.fill_sector(sector, gradient)?,
                DrawOp::StrokeSector {
                    sector,
                    color,
                    line_width,
                } => self.stroke_sector(sector, *color, *line_width)?,
                DrawOp::Text(run) => self.draw_text(run)?,
            }
        }
        Ok(())
    }

    fn draw_background(&self, color: HexColor) -> Result<(), cairo::Error> {
        set_source_color(self.cr, color);
        self.cr.paint()
    }

    fn fill_sector(
        &self,
        sector: &AnnularSector,
        gradient: &LinearGradient,
    ) -> Result<(), cairo::Error> {
        let pattern = cairo::LinearGradient::new(
            gradient.from.x,
            gradient.from.y,
            gradient.to.x,
            gradient.to.y,
        );
        for (offset, color) in [(0.0, gradient.start_color), (1.0, gradient.end_color)] {
            let (r, g, b) = color.to_srgb().into_components();
            pattern.add_color_stop_rgb(offset, r, g, b);
        }

        sector_path(self.cr, sector);
        self.cr.set_source(&pattern)?;
        self.cr.fill()
    }

    fn stroke_sector(
        &self,
        sector: &AnnularSector,
        color: HexColor,
        line_width: f64,
    ) -> Result<(), cairo::Error> {
        sector_path(self.cr, sector);
        set_source_color(self.cr, color);
        self.cr.set_line_width(line_width);
        self.cr.stroke()
    }

    /// Centres the run horizontally on the rotated origin. `Middle` puts the
    /// centre of the font's ascent/descent box on `offset_y`.
    fn draw_text(&self, run: &TextRun) -> Result<(), cairo::Error> {
        let cr = self.cr;
        cr.save()?;
        cr.translate(run.origin.x, run.origin.y);
        cr.rotate(run.rotation);

        set_font(cr, &run.font);
        let (r, g, b, a) = run.color.into_components();
        cr.set_source_rgba(r, g, b, a);

        let extents = cr.text_extents(&run.text)?;
        let baseline_shift = match run.baseline {
            Baseline::Middle => {
                let font = cr.font_extents()?;
                (font.ascent() - font.descent()) / 2.0
            }
            Baseline::Alphabetic => 0.0,
        };
        cr.move_to(-extents.x_advance() / 2.0, run.offset_y + baseline_shift);
        cr.show_text(&run.text)?;
        cr.restore()
    }
}

/// Text measure backed by the same context that paints, so wrapped lines fit
/// what ends up on the surface.
pub struct CairoMeasure<'a> {
    cr: &'a Context,
}

impl<'a> CairoMeasure<'a> {
    pub fn new(cr: &'a Context) -> Self {
        Self { cr }
    }
}

impl TextMeasure for CairoMeasure<'_> {
    fn text_width(&self, text: &str, font: &FontSpec) -> f64 {
        set_font(self.cr, font);
        match self.cr.text_extents(text) {
            Ok(extents) => extents.x_advance(),
            Err(e) => {
                log::warn!("Failed to measure {:?}: {}", text, e);
                0.0
            }
        }
    }
}
