use crate::events::AppEvent;
use crate::preset;
use crate::preview;
use crate::session::{Intent, Session};
use radial::{LayoutParams, SurfaceSize};
use std::path::{Path, PathBuf};
use tokio::runtime::Runtime;

/// Renders `preset` to `output`. An unreadable preset is logged and the last
/// good image is left in place.
pub fn refresh_preview(preset: &Path, output: &Path, size: SurfaceSize) -> bool {
    let import = match preset::read_import(preset) {
        Ok(import) => import,
        Err(e) => {
            log::error!("Skipping {:?}: {}", preset, e);
            return false;
        }
    };

    let mut session = Session::empty(LayoutParams::default());
    session.apply_intent(Intent::Import(import));
    match preview::render_png(&session, size, output) {
        Ok(()) => true,
        Err(e) => {
            log::error!("Failed to render {:?}: {}", output, e);
            false
        }
    }
}

/// Renders once, then again on every change to the preset file until Ctrl-C.
pub fn watch_preset(preset: PathBuf, output: PathBuf, size: SurfaceSize) -> std::io::Result<()> {
    let rt = Runtime::new()?;

    rt.block_on(async {
        let (tx, rx) = async_channel::bounded(32);

        {
            let tx = tx.clone();
            let preset = preset.clone();
            tokio::spawn(async move {
                crate::sys::watcher::run_async_watcher(preset, tx).await;
            });
        }

        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                log::error!("Failed to listen for Ctrl-C: {}", e);
            }
            let _ = tx.send(AppEvent::Shutdown).await;
        });

        refresh_preview(&preset, &output, size);

        while let Ok(event) = rx.recv().await {
            match event {
                AppEvent::PresetChanged(path) => {
                    refresh_preview(&path, &output, size);
                }
                AppEvent::Shutdown => {
                    log::info!("Stopping preset watcher");
                    break;
                }
            }
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_renders_valid_preset() {
        let dir = tempfile::tempdir().unwrap();
        let preset = dir.path().join("menu.json");
        let output = dir.path().join("menu.png");
        fs_err::write(&preset, r#"{ "items": [ { "label": "Fillet" } ] }"#).unwrap();

        assert!(refresh_preview(&preset, &output, SurfaceSize::new(80.0, 80.0)));
        assert!(output.exists());
    }

    #[test]
    fn test_refresh_keeps_last_image_on_bad_preset() {
        let dir = tempfile::tempdir().unwrap();
        let preset = dir.path().join("menu.json");
        let output = dir.path().join("menu.png");
        fs_err::write(&preset, r#"{ "items": [] }"#).unwrap();
        assert!(refresh_preview(&preset, &output, SurfaceSize::new(80.0, 80.0)));
        let before = fs_err::read(&output).unwrap();

        fs_err::write(&preset, "not json").unwrap();
        assert!(!refresh_preview(&preset, &output, SurfaceSize::new(80.0, 80.0)));
        assert_eq!(fs_err::read(&output).unwrap(), before);
    }
}
