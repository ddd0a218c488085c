use crate::preset::PresetImport;
use radial::{
    CommandId, GapAngle, HexColor, IconGlyph, InnerRadius, ItemId, Keybind, Label, LayoutParams,
    MenuItem, Weight,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::num::ParseFloatError;
use strum::{Display as StrumDisplay, EnumIter, EnumString};
use thiserror::Error;

const DEFAULT_PRESET: [(&str, HexColor); 4] = [
    ("Modeling", HexColor::new(0x6d, 0xcf, 0xf6)),
    ("Surface", HexColor::new(0xf7, 0x6f, 0xc1)),
    ("Utility", HexColor::new(0xff, 0xcd, 0x3c)),
    ("Custom", HexColor::new(0x7d, 0x7a, 0xff)),
];

/// Item fields without an identity yet. The session assigns ids when drafts
/// enter the list.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemDraft {
    pub label: Label,
    pub command: CommandId,
    pub keybind: Keybind,
    pub icon: IconGlyph,
    pub color: HexColor,
    pub weight: Weight,
}

impl ItemDraft {
    pub fn new(label: impl Into<String>, color: HexColor) -> Self {
        Self {
            label: Label::new(label),
            command: CommandId::default(),
            keybind: Keybind::default(),
            icon: IconGlyph::default(),
            color,
            weight: Weight::default(),
        }
    }

    fn into_item(self, id: ItemId) -> MenuItem {
        MenuItem {
            id,
            label: self.label,
            command: self.command,
            keybind: self.keybind,
            icon: self.icon,
            color: self.color,
            weight: self.weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

impl MoveDirection {
    fn offset(self, index: usize, len: usize) -> Option<usize> {
        match self {
            Self::Up => index.checked_sub(1),
            Self::Down => (index + 1 < len).then_some(index + 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, StrumDisplay)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
pub enum ItemField {
    Label,
    Command,
    Keybind,
    Icon,
    Color,
    Weight,
}

#[derive(Debug, Error)]
pub enum EditError {
    #[error(transparent)]
    Color(#[from] radial::ColorError),
    #[error("weight must be a number: {0}")]
    Weight(#[from] ParseFloatError),
}

impl ItemField {
    pub fn edit(self, value: &str) -> Result<ItemEdit, EditError> {
        Ok(match self {
            Self::Label => ItemEdit::Label(value.to_string()),
            Self::Command => ItemEdit::Command(value.to_string()),
            Self::Keybind => ItemEdit::Keybind(value.to_string()),
            Self::Icon => ItemEdit::Icon(value.to_string()),
            Self::Color => ItemEdit::Color(value.parse()?),
            Self::Weight => ItemEdit::Weight(value.trim().parse()?),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ItemEdit {
    Label(String),
    Command(String),
    Keybind(String),
    Icon(String),
    Color(HexColor),
    Weight(f64),
}

impl ItemEdit {
    /// Command and keybind are not drawn, so editing them leaves the preview
    /// untouched.
    fn affects_preview(&self) -> bool {
        !matches!(self, Self::Command(_) | Self::Keybind(_))
    }

    fn apply(self, item: &mut MenuItem) -> bool {
        let before = item.clone();
        match self {
            Self::Label(label) => item.label = Label::new(label),
            Self::Command(command) => item.command = CommandId::new(command),
            Self::Keybind(keybind) => item.keybind = Keybind::new(keybind),
            Self::Icon(icon) => item.icon = IconGlyph::new(icon),
            Self::Color(color) => item.color = color,
            Self::Weight(weight) => item.weight = Weight::new(weight),
        }
        *item != before
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    Add,
    DuplicateSelected,
    RemoveSelected,
    MoveSelected(MoveDirection),
    Select(ItemId),
    Edit(ItemEdit),
    SetInnerRadius(f64),
    SetGapAngle(f64),
    SetBackground(HexColor),
    Import(PresetImport),
    Reset,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IntentOutcome {
    pub should_redraw: bool,
    pub should_persist: bool,
}

impl IntentOutcome {
    pub fn new(should_redraw: bool, should_persist: bool) -> Self {
        Self {
            should_redraw,
            should_persist,
        }
    }

    fn changed() -> Self {
        Self::new(true, true)
    }

    fn unchanged() -> Self {
        Self::default()
    }

    pub fn merge(self, other: Self) -> Self {
        Self::new(
            self.should_redraw || other.should_redraw,
            self.should_persist || other.should_persist,
        )
    }

    pub fn is_noop(&self) -> bool {
        !self.should_redraw && !self.should_persist
    }
}

/// Editor state: the ordered item list, the selection and the layout
/// parameters. Every mutation goes through [`Session::apply_intent`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    items: Vec<MenuItem>,
    #[serde(default)]
    selected_id: Option<ItemId>,
    #[serde(flatten)]
    layout: LayoutParams,
    #[serde(default = "first_id")]
    next_id: ItemId,
}

fn first_id() -> ItemId {
    ItemId::from(1)
}

impl Default for Session {
    fn default() -> Self {
        let mut session = Self::empty(LayoutParams::default());
        session.replace_items(default_drafts());
        session
    }
}

fn default_drafts() -> Vec<ItemDraft> {
    DEFAULT_PRESET
        .iter()
        .map(|&(label, color)| {
            let mut draft = ItemDraft::new(label, color);
            draft.icon = IconGlyph::new(&label[..1]);
            draft
        })
        .collect()
}

impl Session {
    pub fn empty(layout: LayoutParams) -> Self {
        Self {
            items: Vec::new(),
            selected_id: None,
            layout,
            next_id: first_id(),
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn layout(&self) -> &LayoutParams {
        &self.layout
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected_id
    }

    pub fn selected(&self) -> Option<&MenuItem> {
        self.selected_id.and_then(|id| self.find(id))
    }

    pub fn find(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn id_at(&self, position: usize) -> Option<ItemId> {
        self.items.get(position).map(|item| item.id)
    }

    fn selected_index(&self) -> Option<usize> {
        let id = self.selected_id?;
        self.items.iter().position(|item| item.id == id)
    }

    fn allocate_id(&mut self) -> ItemId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    fn replace_items(&mut self, drafts: Vec<ItemDraft>) {
        let items: Vec<_> = drafts
            .into_iter()
            .map(|draft| draft.into_item(self.allocate_id()))
            .collect();
        self.items = items;
        self.selected_id = self.id_at(0);
    }

    /// Restores invariants on state that came from outside (a snapshot):
    /// ids are unique, the id counter stays ahead of every live id and the
    /// selection points at a live item. Repeated ids keep their first owner.
    pub fn normalize(&mut self) {
        if let Some(max) = self.items.iter().map(|item| item.id).max() {
            self.next_id = self.next_id.max(max.next());
        }

        let mut seen = HashSet::new();
        let duplicates: Vec<usize> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| !seen.insert(item.id))
            .map(|(index, _)| index)
            .collect();
        for index in duplicates {
            let id = self.allocate_id();
            log::warn!(
                "Item {} reuses id {}, renumbered to {}",
                index + 1,
                self.items[index].id,
                id
            );
            self.items[index].id = id;
        }

        if self.selected().is_none() {
            self.selected_id = self.id_at(0);
        }
    }

    pub fn apply_intent(&mut self, intent: Intent) -> IntentOutcome {
        log::debug!("applying {:?}", intent);
        match intent {
            Intent::Add => self.add(),
            Intent::DuplicateSelected => self.duplicate_selected(),
            Intent::RemoveSelected => self.remove_selected(),
            Intent::MoveSelected(direction) => self.move_selected(direction),
            Intent::Select(id) => self.select(id),
            Intent::Edit(edit) => self.edit_selected(edit),
            Intent::SetInnerRadius(ratio) => {
                self.set_layout(|layout| layout.inner_radius = InnerRadius::new(ratio), ratio)
            }
            Intent::SetGapAngle(degrees) => {
                self.set_layout(|layout| layout.gap_angle = GapAngle::new(degrees), degrees)
            }
            Intent::SetBackground(color) => {
                self.set_layout(|layout| layout.background_color = color, 0.0)
            }
            Intent::Import(import) => self.import(import),
            Intent::Reset => {
                let next_id = self.next_id;
                *self = Self::empty(LayoutParams::default());
                self.next_id = next_id;
                self.replace_items(default_drafts());
                IntentOutcome::changed()
            }
        }
    }

    fn add(&mut self) -> IntentOutcome {
        let color = HexColor::palette_entry(self.items.len() + 3);
        let item = ItemDraft::new(MenuItem::DEFAULT_LABEL, color).into_item(self.allocate_id());
        self.selected_id = Some(item.id);
        self.items.push(item);
        IntentOutcome::changed()
    }

    fn duplicate_selected(&mut self) -> IntentOutcome {
        let Some(index) = self.selected_index() else {
            return IntentOutcome::unchanged();
        };
        let id = self.allocate_id();
        let clone = self.items[index].duplicate(id);
        self.items.insert(index + 1, clone);
        self.selected_id = Some(id);
        IntentOutcome::changed()
    }

    fn remove_selected(&mut self) -> IntentOutcome {
        let Some(index) = self.selected_index() else {
            return IntentOutcome::unchanged();
        };
        self.items.remove(index);
        self.selected_id = self
            .items
            .get(index)
            .or_else(|| self.items.last())
            .map(|item| item.id);
        IntentOutcome::changed()
    }

    fn move_selected(&mut self, direction: MoveDirection) -> IntentOutcome {
        let Some(index) = self.selected_index() else {
            return IntentOutcome::unchanged();
        };
        match direction.offset(index, self.items.len()) {
            Some(target) => {
                self.items.swap(index, target);
                IntentOutcome::changed()
            }
            None => IntentOutcome::unchanged(),
        }
    }

    fn select(&mut self, id: ItemId) -> IntentOutcome {
        if self.find(id).is_none() || self.selected_id == Some(id) {
            return IntentOutcome::unchanged();
        }
        self.selected_id = Some(id);
        IntentOutcome::changed()
    }

    fn edit_selected(&mut self, edit: ItemEdit) -> IntentOutcome {
        let Some(index) = self.selected_index() else {
            return IntentOutcome::unchanged();
        };
        let redraw = edit.affects_preview();
        if edit.apply(&mut self.items[index]) {
            IntentOutcome::new(redraw, true)
        } else {
            IntentOutcome::unchanged()
        }
    }

    /// Non-finite numeric input keeps the current value.
    fn set_layout(&mut self, update: impl FnOnce(&mut LayoutParams), value: f64) -> IntentOutcome {
        if !value.is_finite() {
            return IntentOutcome::unchanged();
        }
        let before = self.layout;
        update(&mut self.layout);
        if self.layout == before {
            IntentOutcome::unchanged()
        } else {
            IntentOutcome::changed()
        }
    }

    fn import(&mut self, import: PresetImport) -> IntentOutcome {
        let PresetImport {
            drafts,
            inner_radius,
            gap_angle,
            background_color,
        } = import;

        self.replace_items(drafts);
        if let Some(ratio) = inner_radius {
            self.layout.inner_radius = ratio;
        }
        if let Some(gap) = gap_angle {
            self.layout.gap_angle = gap;
        }
        if let Some(color) = background_color {
            self.layout.background_color = color;
        }
        IntentOutcome::changed()
    }

    pub fn rows(&self) -> Vec<ItemRow> {
        let total: f64 = self.items.iter().map(|item| item.weight.get()).sum();
        let total = if total > 0.0 { total } else { 1.0 };

        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let label = if item.label.is_empty() {
                    format!("Slice {}", index + 1)
                } else {
                    item.label.to_string()
                };
                let badge = item.icon().map(str::to_string).unwrap_or_else(|| {
                    format!("{}%", (item.weight.get() / total * 100.0).round())
                });
                let details = [item.keybind.as_str(), item.command.as_str()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join(" · ");

                ItemRow {
                    position: index + 1,
                    label,
                    badge,
                    details,
                    color: item.color,
                    selected: self.selected_id == Some(item.id),
                }
            })
            .collect()
    }
}

/// One line of the item list summary.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemRow {
    pub position: usize,
    pub label: String,
    pub badge: String,
    pub details: String,
    pub color: HexColor,
    pub selected: bool,
}

pub const EMPTY_LIST_MESSAGE: &str = "No items yet — add your first slice.";

impl fmt::Display for ItemRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.selected { '>' } else { ' ' };
        write!(
            f,
            "{marker} {:>2}. {} [{}] {}",
            self.position, self.label, self.badge, self.color
        )?;
        if !self.details.is_empty() {
            write!(f, "  {}", self.details)?;
        }
        Ok(())
    }
}
