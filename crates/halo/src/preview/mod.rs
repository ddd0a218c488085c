//! Cairo backend for the wedge renderer.

pub mod paint;

pub use paint::{CairoMeasure, ScenePainter};

use crate::session::Session;
use cairo::{Context, Format, ImageSurface};
use radial::{Scene, SurfaceSize, TextMeasure, compute_wedges};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("Invalid preview size {width}x{height}")]
    InvalidSize { width: f64, height: f64 },
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("Failed to write PNG: {0}")]
    Png(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Lays out the session and turns it into draw operations.
pub fn scene_for(session: &Session, size: SurfaceSize, measure: &impl TextMeasure) -> Scene {
    let layout = session.layout();
    let wedges = compute_wedges(session.items(), layout.gap_angle);
    radial::render(
        size,
        &wedges,
        session.selected_id(),
        layout.background_color,
        layout.inner_radius,
        measure,
    )
}

pub fn render_surface(session: &Session, size: SurfaceSize) -> Result<ImageSurface, PreviewError> {
    let (width, height) = (size.width.round(), size.height.round());
    if !(1.0..=i32::MAX as f64).contains(&width) || !(1.0..=i32::MAX as f64).contains(&height) {
        return Err(PreviewError::InvalidSize {
            width: size.width,
            height: size.height,
        });
    }

    let surface = ImageSurface::create(Format::ARgb32, width as i32, height as i32)?;
    {
        let cr = Context::new(&surface)?;
        let scene = scene_for(session, size, &CairoMeasure::new(&cr));
        ScenePainter::new(&cr).paint(&scene)?;
    }
    surface.flush();
    Ok(surface)
}

pub fn render_png(session: &Session, size: SurfaceSize, path: &Path) -> Result<(), PreviewError> {
    let surface = render_surface(session, size)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs_err::create_dir_all(parent)?;
    }
    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    log::info!(
        "Rendered {} items to {:?} ({}x{})",
        session.items().len(),
        path,
        size.width,
        size.height
    );
    Ok(())
}
