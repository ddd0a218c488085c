use crate::color::HexColor;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Fraction of the outer radius left empty as the hub.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct InnerRadius(f64);

impl InnerRadius {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 0.85;

    pub fn new(ratio: f64) -> Self {
        if ratio.is_finite() {
            Self(ratio.clamp(Self::MIN, Self::MAX))
        } else {
            Self(Self::MIN)
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for InnerRadius {
    fn default() -> Self {
        Self(0.35)
    }
}

impl From<f64> for InnerRadius {
    fn from(ratio: f64) -> Self {
        Self::new(ratio)
    }
}

impl From<InnerRadius> for f64 {
    fn from(ratio: InnerRadius) -> Self {
        ratio.0
    }
}

/// Angle inserted between neighbouring wedges, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct GapAngle(f64);

impl GapAngle {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 20.0;

    pub fn new(degrees: f64) -> Self {
        if degrees.is_finite() {
            Self(degrees.clamp(Self::MIN, Self::MAX))
        } else {
            Self(Self::MIN)
        }
    }

    pub fn degrees(self) -> f64 {
        self.0
    }

    /// Same operation order as the host (`deg * PI / 180`), not `to_radians`.
    pub fn radians(self) -> f64 {
        self.0 * PI / 180.0
    }
}

impl Default for GapAngle {
    fn default() -> Self {
        Self(2.0)
    }
}

impl From<f64> for GapAngle {
    fn from(degrees: f64) -> Self {
        Self::new(degrees)
    }
}

impl From<GapAngle> for f64 {
    fn from(gap: GapAngle) -> Self {
        gap.0
    }
}

pub const DEFAULT_BACKGROUND: HexColor = HexColor::new(0x1b, 0x1d, 0x26);

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutParams {
    pub inner_radius: InnerRadius,
    pub gap_angle: GapAngle,
    pub background_color: HexColor,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            inner_radius: InnerRadius::default(),
            gap_angle: GapAngle::default(),
            background_color: DEFAULT_BACKGROUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inner_radius_clamps() {
        assert_eq!(InnerRadius::new(-0.2).get(), 0.0);
        assert_eq!(InnerRadius::new(0.5).get(), 0.5);
        assert_eq!(InnerRadius::new(0.99).get(), 0.85);
        assert_eq!(InnerRadius::new(f64::NAN).get(), 0.0);
    }

    #[test]
    fn test_gap_angle_clamps_and_converts() {
        assert_eq!(GapAngle::new(45.0).degrees(), 20.0);
        assert_eq!(GapAngle::new(-1.0).degrees(), 0.0);
        assert!((GapAngle::new(18.0).radians() - PI / 10.0).abs() < 1e-12);
    }

    #[test]
    fn test_layout_params_json_shape() {
        let json = serde_json::to_value(LayoutParams::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "innerRadius": 0.35,
                "gapAngle": 2.0,
                "backgroundColor": "#1b1d26",
            })
        );
    }
}
