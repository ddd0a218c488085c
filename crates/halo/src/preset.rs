use crate::session::{ItemDraft, Session};
use chrono::{DateTime, SecondsFormat, Utc};
use fs_err as fs;
use radial::{
    CommandId, GapAngle, HexColor, IconGlyph, InnerRadius, Keybind, Label, MenuItem, Weight,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::{DefaultOnError, serde_as};
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_PRESET_NAME: &str = "Plasticity Radial Menu preset";
pub const DEFAULT_EXPORT_FILE: &str = "plasticity-radial-menu.json";

#[derive(Debug, Error)]
pub enum PresetError {
    #[error("Invalid preset file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid preset file: expected a JSON object")]
    NotAnObject,
    #[error("Invalid preset file: \"items\" must be a list")]
    MissingItems,
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresetMeta {
    pub name: String,
    pub generated_at: String,
    pub inner_radius: InnerRadius,
    pub gap_angle: GapAngle,
    pub background_color: HexColor,
}

/// Item as the menu host sees it. `id` is the 1-based position, not the
/// editor's internal identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetItem {
    pub id: usize,
    pub label: Label,
    pub command: CommandId,
    pub keybind: Keybind,
    pub icon: IconGlyph,
    pub color: HexColor,
    pub weight: Weight,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresetDocument {
    pub meta: PresetMeta,
    pub items: Vec<PresetItem>,
}

impl PresetDocument {
    pub fn from_session(session: &Session, name: &str, generated_at: DateTime<Utc>) -> Self {
        let layout = session.layout();
        Self {
            meta: PresetMeta {
                name: name.to_string(),
                generated_at: generated_at.to_rfc3339_opts(SecondsFormat::Millis, true),
                inner_radius: layout.inner_radius,
                gap_angle: layout.gap_angle,
                background_color: layout.background_color,
            },
            items: session
                .items()
                .iter()
                .enumerate()
                .map(|(index, item)| PresetItem::from_item(index + 1, item))
                .collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, PresetError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), PresetError> {
        let mut json = self.to_json_pretty()?;
        json.push('\n');
        fs::write(path, json)?;
        Ok(())
    }
}

impl PresetItem {
    fn from_item(id: usize, item: &MenuItem) -> Self {
        Self {
            id,
            label: item.label.clone(),
            command: item.command.clone(),
            keybind: item.keybind.clone(),
            icon: item.icon.clone(),
            color: item.color,
            weight: item.weight,
        }
    }
}

/// A validated preset ready to replace the session's items. Layout fields are
/// `None` when the document did not carry a usable value.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetImport {
    pub drafts: Vec<ItemDraft>,
    pub inner_radius: Option<InnerRadius>,
    pub gap_angle: Option<GapAngle>,
    pub background_color: Option<HexColor>,
}

// Fields of the wrong type are treated as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ImportedItem {
    #[serde_as(deserialize_as = "DefaultOnError")]
    label: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    command: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    keybind: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    icon: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    color: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    weight: Option<f64>,
}

#[serde_as]
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct ImportedMeta {
    #[serde_as(deserialize_as = "DefaultOnError")]
    inner_radius: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    gap_angle: Option<f64>,
    #[serde_as(deserialize_as = "DefaultOnError")]
    background_color: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

impl ImportedItem {
    /// Empty strings and a zero weight count as missing, matching how the
    /// host reads presets.
    fn into_draft(self, index: usize) -> ItemDraft {
        let color = non_empty(self.color)
            .and_then(|raw| match raw.parse::<HexColor>() {
                Ok(color) => Some(color),
                Err(e) => {
                    log::warn!("Item {}: {}; using palette color", index + 1, e);
                    None
                }
            })
            .unwrap_or_else(|| HexColor::palette_entry(index + 3));
        let weight = self.weight.filter(|w| *w != 0.0).unwrap_or(Weight::MIN);

        ItemDraft {
            label: Label::new(
                non_empty(self.label).unwrap_or_else(|| MenuItem::DEFAULT_LABEL.to_string()),
            ),
            command: CommandId::new(self.command.unwrap_or_default()),
            keybind: Keybind::new(self.keybind.unwrap_or_default()),
            icon: IconGlyph::new(self.icon.unwrap_or_default()),
            color,
            weight: Weight::new(weight),
        }
    }
}

/// Validates a preset document. Nothing is applied here; the caller turns the
/// result into an import intent, so a rejected document leaves state as is.
pub fn parse_import(json: &str) -> Result<PresetImport, PresetError> {
    let Value::Object(mut root) = serde_json::from_str::<Value>(json)? else {
        return Err(PresetError::NotAnObject);
    };
    let Some(Value::Array(items)) = root.remove("items") else {
        return Err(PresetError::MissingItems);
    };

    let drafts = items
        .into_iter()
        .enumerate()
        .map(|(index, value)| {
            serde_json::from_value::<ImportedItem>(value)
                .unwrap_or_default()
                .into_draft(index)
        })
        .collect();

    let meta = root
        .remove("meta")
        .and_then(|value| serde_json::from_value::<ImportedMeta>(value).ok())
        .unwrap_or_default();

    Ok(PresetImport {
        drafts,
        inner_radius: meta.inner_radius.map(InnerRadius::new),
        gap_angle: meta.gap_angle.map(GapAngle::new),
        background_color: meta
            .background_color
            .and_then(|raw| raw.parse::<HexColor>().ok()),
    })
}

pub fn read_import(path: &Path) -> Result<PresetImport, PresetError> {
    let json = fs::read_to_string(path)?;
    parse_import(&json)
}
