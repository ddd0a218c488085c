use crate::preset::{DEFAULT_EXPORT_FILE, DEFAULT_PRESET_NAME};
use directories::ProjectDirs;
use radial::SurfaceSize;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 560,
            height: 560,
            output: PathBuf::from("preview.png"),
        }
    }
}

impl PreviewConfig {
    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(f64::from(self.width), f64::from(self.height))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct PresetConfig {
    pub name: String,
    pub export_file: PathBuf,
}

impl Default for PresetConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_PRESET_NAME.to_string(),
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StorageConfig {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EditorConfig {
    pub preview: PreviewConfig,
    pub preset: PresetConfig,
    pub storage: StorageConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "troia", "halo-editor").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn builder(path: PathBuf) -> config::ConfigBuilder<config::builder::DefaultState> {
    config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            config::Environment::with_prefix("HALO_EDITOR")
                .separator("__")
                .try_parsing(true),
        )
}

pub fn load_from(path: PathBuf) -> Result<EditorConfig, ConfigError> {
    Ok(builder(path).build()?.try_deserialize()?)
}

pub fn load_config() -> Result<EditorConfig, ConfigError> {
    load_from(get_config_path()?)
}

pub fn load_or_default() -> EditorConfig {
    match load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Using default configuration: {}", e);
            EditorConfig::default()
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");
