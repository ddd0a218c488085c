//! Weighted radial menu geometry: wedge layout, shading and the draw
//! operations a preview needs to match the menu host.

pub mod color;
pub mod item;
pub mod layout;
pub mod macros;
pub mod params;
pub mod render;
pub mod scene;
pub mod wrap;

pub use color::{ColorError, HexColor};
pub use item::{CommandId, IconGlyph, ItemId, Keybind, Label, MenuItem, Weight};
pub use layout::{Wedge, compute_wedges, usable_arc};
pub use params::{GapAngle, InnerRadius, LayoutParams};
pub use render::{Frame, render};
pub use scene::{DrawOp, Point, Scene, SurfaceSize};
pub use wrap::{FontSpec, TextMeasure};
