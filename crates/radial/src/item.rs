use crate::color::HexColor;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// Stable identity of an item for as long as it lives. Never derived from the
/// item's position in the list.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From, Into,
)]
#[serde(transparent)]
pub struct ItemId(u64);

impl ItemId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct Label(String);

crate::impl_string_newtype!(Label);

/// Command string interpreted by the menu host. Opaque here.
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct CommandId(String);

crate::impl_string_newtype!(CommandId);

#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct Keybind(String);

crate::impl_string_newtype!(Keybind);

/// Short glyph drawn above the label. Empty means "no icon".
#[derive(
    Debug,
    Clone,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct IconGlyph(String);

crate::impl_string_newtype!(IconGlyph);

/// Relative angular share of an item, always within `[MIN, MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Display)]
#[serde(from = "f64", into = "f64")]
pub struct Weight(f64);

impl Weight {
    pub const MIN: f64 = 1.0;
    pub const MAX: f64 = 4.0;

    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(Self::MIN, Self::MAX))
        } else {
            Self(Self::MIN)
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<f64> for Weight {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Weight> for f64 {
    fn from(weight: Weight) -> Self {
        weight.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub label: Label,
    #[serde(default)]
    pub command: CommandId,
    #[serde(default)]
    pub keybind: Keybind,
    #[serde(default)]
    pub icon: IconGlyph,
    pub color: HexColor,
    #[serde(default)]
    pub weight: Weight,
}

impl MenuItem {
    pub const DEFAULT_LABEL: &'static str = "New Slice";

    pub fn new(id: ItemId, label: impl Into<String>, color: HexColor) -> Self {
        Self {
            id,
            label: Label::new(label),
            command: CommandId::default(),
            keybind: Keybind::default(),
            icon: IconGlyph::default(),
            color,
            weight: Weight::default(),
        }
    }

    /// Copy of this item under a new identity.
    pub fn duplicate(&self, id: ItemId) -> Self {
        Self { id, ..self.clone() }
    }

    pub fn icon(&self) -> Option<&str> {
        (!self.icon.is_empty()).then(|| self.icon.as_str())
    }
}
