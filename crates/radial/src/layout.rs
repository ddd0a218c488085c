use crate::item::MenuItem;
use crate::params::GapAngle;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Angle of the first wedge's slice boundary: straight up in screen space
/// (0 points right, angles grow clockwise).
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// Lower bound on the arc shared between wedges once gaps are reserved.
pub const MIN_USABLE_ARC: f64 = FRAC_PI_2;

/// Angular region assigned to one item. Angles are radians.
///
/// `start_angle < end_angle` holds except when the gap is wider than the
/// item's slice; the renderer draws such wedges with zero size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge<'a> {
    pub item: &'a MenuItem,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Wedge<'_> {
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    pub fn is_degenerate(&self) -> bool {
        self.span() < 0.0
    }
}

/// Arc left for wedges after reserving one gap per item, never below
/// [`MIN_USABLE_ARC`].
pub fn usable_arc(item_count: usize, gap: GapAngle) -> f64 {
    (TAU - gap.radians() * item_count as f64).max(MIN_USABLE_ARC)
}

/// Splits the circle between `items` in proportion to their weights, in list
/// order, starting at [`START_ANGLE`]. Each slice gives up half a gap on both
/// sides, and the cursor then skips one more full gap before the next slice.
pub fn compute_wedges(items: &[MenuItem], gap: GapAngle) -> Vec<Wedge<'_>> {
    if items.is_empty() {
        return Vec::new();
    }

    let total_weight: f64 = items.iter().map(|item| item.weight.get()).sum();
    let arc = usable_arc(items.len(), gap);
    let gap = gap.radians();

    items
        .iter()
        .scan(START_ANGLE, |angle, item| {
            let start = *angle;
            let slice = arc * (item.weight.get() / total_weight);
            *angle = start + slice + gap;

            Some(Wedge {
                item,
                start_angle: start + gap / 2.0,
                end_angle: start + slice - gap / 2.0,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::HexColor;
    use crate::item::{ItemId, Weight};
    use std::f64::consts::PI;

    const EPS: f64 = 1e-9;

    fn items(weights: &[f64]) -> Vec<MenuItem> {
        weights
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let mut item = MenuItem::new(
                    ItemId::from(i as u64 + 1),
                    format!("Item {i}"),
                    HexColor::palette_entry(i),
                );
                item.weight = Weight::new(w);
                item
            })
            .collect()
    }

    #[test]
    fn test_empty_list_has_no_wedges() {
        assert!(compute_wedges(&[], GapAngle::new(4.0)).is_empty());
    }

    #[test]
    fn test_equal_weights_without_gap_are_quarters() {
        let items = items(&[1.0, 1.0, 1.0, 1.0]);
        let wedges = compute_wedges(&items, GapAngle::new(0.0));

        assert_eq!(wedges.len(), 4);
        assert!((wedges[0].start_angle + PI / 2.0).abs() < EPS);
        for (i, wedge) in wedges.iter().enumerate() {
            assert!((wedge.span() - PI / 2.0).abs() < EPS);
            assert!((wedge.start_angle - (-PI / 2.0 + i as f64 * PI / 2.0)).abs() < EPS);
        }
    }

    #[test]
    fn test_one_to_three_weights() {
        let items = items(&[1.0, 3.0]);
        let wedges = compute_wedges(&items, GapAngle::new(0.0));

        assert!((wedges[1].span() / wedges[0].span() - 3.0).abs() < EPS);
        assert!((wedges[0].span() + wedges[1].span() - TAU).abs() < EPS);
    }

    #[test]
    fn test_gap_is_split_around_each_slice() {
        let items = items(&[1.0, 1.0]);
        let gap = GapAngle::new(10.0);
        let g = gap.radians();
        let wedges = compute_wedges(&items, gap);

        let slice = (TAU - 2.0 * g) / 2.0;
        assert!((wedges[0].start_angle - (START_ANGLE + g / 2.0)).abs() < EPS);
        assert!((wedges[0].end_angle - (START_ANGLE + slice - g / 2.0)).abs() < EPS);
        assert!((wedges[1].start_angle - (START_ANGLE + slice + g + g / 2.0)).abs() < EPS);
    }

    #[test]
    fn test_usable_arc_floor() {
        // 2π − 20 × (20π/180) ≈ −0.70, so the floor applies
        assert_eq!(usable_arc(20, GapAngle::new(20.0)), MIN_USABLE_ARC);
        assert!((usable_arc(4, GapAngle::new(0.0)) - TAU).abs() < EPS);
    }

    #[test]
    fn test_crowded_layout_produces_degenerate_wedges() {
        let items = items(&[1.0; 20]);
        let wedges = compute_wedges(&items, GapAngle::new(20.0));

        assert_eq!(wedges.len(), 20);
        assert!(wedges.iter().all(Wedge::is_degenerate));
    }

    #[test]
    fn test_order_follows_items() {
        let items = items(&[2.0, 1.0, 4.0]);
        let wedges = compute_wedges(&items, GapAngle::new(3.0));

        let ids: Vec<_> = wedges.iter().map(|w| w.item.id).collect();
        let expected: Vec<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, expected);
        assert!(
            wedges
                .windows(2)
                .all(|pair| pair[0].end_angle <= pair[1].start_angle)
        );
    }

    #[test]
    fn test_layout_is_deterministic() {
        let items = items(&[1.5, 2.0, 1.0]);
        let a = compute_wedges(&items, GapAngle::new(7.5));
        let b = compute_wedges(&items, GapAngle::new(7.5));
        assert_eq!(a, b);
    }
}
