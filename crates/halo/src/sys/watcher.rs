use crate::events::AppEvent;
use async_channel::Sender;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Directory to register with the OS watcher. Editors often replace a file
/// instead of writing it in place, so the parent is watched rather than the
/// file itself.
fn watch_dir(preset_path: &Path) -> PathBuf {
    match preset_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn is_relevant(event: &notify::Event, preset_path: &Path) -> bool {
    let meaningful_event = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    meaningful_event
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == preset_path.file_name())
}

pub async fn run_async_watcher(preset_path: PathBuf, tx: Sender<AppEvent>) {
    let dir = watch_dir(&preset_path);
    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    if let Err(e) = watcher.watch(&dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch {:?}: {}", dir, e);
        return;
    }
    log::info!("Watching {:?}", preset_path);

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                if is_relevant(&event, &preset_path)
                    && tx
                        .send(AppEvent::PresetChanged(preset_path.clone()))
                        .await
                        .is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    fn event(kind: EventKind, path: &str) -> notify::Event {
        notify::Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_watch_dir_of_bare_file_name() {
        assert_eq!(watch_dir(Path::new("menu.json")), PathBuf::from("."));
        assert_eq!(
            watch_dir(Path::new("/tmp/presets/menu.json")),
            PathBuf::from("/tmp/presets")
        );
    }

    #[test]
    fn test_only_preset_events_are_relevant() {
        let preset = Path::new("/tmp/presets/menu.json");

        assert!(is_relevant(
            &event(EventKind::Modify(ModifyKind::Any), "/tmp/presets/menu.json"),
            preset
        ));
        assert!(is_relevant(
            &event(EventKind::Create(CreateKind::File), "/tmp/presets/menu.json"),
            preset
        ));
        assert!(!is_relevant(
            &event(EventKind::Modify(ModifyKind::Any), "/tmp/presets/other.json"),
            preset
        ));
        assert!(!is_relevant(
            &event(EventKind::Access(AccessKind::Any), "/tmp/presets/menu.json"),
            preset
        ));
    }
}
