use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    PresetChanged(PathBuf),
    Shutdown,
}
