use proptest::prelude::*;
use radial::render::LABEL_FONT;
use radial::wrap::wrap_label;
use radial::{
    FontSpec, GapAngle, HexColor, InnerRadius, ItemId, MenuItem, SurfaceSize, Weight,
    compute_wedges, render, usable_arc,
};
use std::f64::consts::FRAC_PI_2;

const EPS: f64 = 1e-9;

fn menu(weights: &[f64]) -> Vec<MenuItem> {
    weights
        .iter()
        .enumerate()
        .map(|(i, &w)| {
            let mut item = MenuItem::new(
                ItemId::from(i as u64),
                format!("Slice {i}"),
                HexColor::palette_entry(i),
            );
            item.weight = Weight::new(w);
            item
        })
        .collect()
}

// proportional advance per char, wide glyphs for capitals
fn measure(text: &str, font: &FontSpec) -> f64 {
    text.chars()
        .map(|c| if c.is_uppercase() { 0.7 } else { 0.5 })
        .sum::<f64>()
        * font.size
}

proptest! {
    #[test]
    fn spans_plus_gaps_fill_the_usable_arc(
        weights in prop::collection::vec(1.0f64..=4.0, 1..24),
        gap in 0.0f64..=20.0,
    ) {
        let items = menu(&weights);
        let gap = GapAngle::new(gap);
        let wedges = compute_wedges(&items, gap);

        let spans: f64 = wedges.iter().map(|w| w.span()).sum();
        let gaps = gap.radians() * items.len() as f64;
        prop_assert!((spans + gaps - usable_arc(items.len(), gap)).abs() < EPS);

        for pair in wedges.windows(2) {
            prop_assert!(pair[0].end_angle <= pair[1].start_angle + EPS);
            prop_assert!(pair[0].start_angle < pair[1].start_angle);
        }
    }

    #[test]
    fn usable_arc_never_below_quarter_turn(count in 0usize..200, gap in 0.0f64..=20.0) {
        prop_assert!(usable_arc(count, GapAngle::new(gap)) >= FRAC_PI_2);
    }

    #[test]
    fn slices_are_proportional_to_weight(
        w1 in 1.0f64..=4.0,
        w2 in 1.0f64..=4.0,
        gap in 0.0f64..=20.0,
    ) {
        let items = menu(&[w1, w2]);
        let gap = GapAngle::new(gap);
        let wedges = compute_wedges(&items, gap);

        let slice = |i: usize| wedges[i].span() + gap.radians();
        prop_assert!((slice(0) / slice(1) - w1 / w2).abs() < 1e-9);
    }

    #[test]
    fn rotating_items_rotates_wedges(
        weights in prop::collection::vec(1.0f64..=4.0, 2..12),
        shift in 0usize..12,
    ) {
        let items = menu(&weights);
        let mut rotated = items.clone();
        rotated.rotate_left(shift % items.len());

        let wedges = compute_wedges(&rotated, GapAngle::new(0.0));
        let ids: Vec<_> = wedges.iter().map(|w| w.item.id).collect();
        let expected: Vec<_> = rotated.iter().map(|i| i.id).collect();
        prop_assert_eq!(ids, expected);
    }

    #[test]
    fn shading_stays_in_channel_range(
        r in any::<u8>(),
        g in any::<u8>(),
        b in any::<u8>(),
        l in -1.0f64..=1.0,
    ) {
        let color = HexColor::new(r, g, b);
        let shaded = color.shade(l).shade(-l);
        let hex = shaded.to_string();
        prop_assert_eq!(hex.len(), 7);
        prop_assert_eq!(hex.parse::<HexColor>().unwrap(), shaded);
    }

    #[test]
    fn wrapped_lines_never_overflow(
        label in "[A-Za-z]{1,14}( [A-Za-z]{1,14}){0,6}",
        max_width in 12.0f64..300.0,
    ) {
        for line in wrap_label(&label, max_width, &LABEL_FONT, &measure) {
            prop_assert!(measure(&line, &LABEL_FONT) <= max_width, "{line:?} > {max_width}");
        }
    }

    #[test]
    fn wrapping_keeps_every_character(
        label in "[a-z]{1,10}( [a-z]{1,10}){0,5}",
        max_width in 8.0f64..200.0,
    ) {
        let joined: String = wrap_label(&label, max_width, &LABEL_FONT, &measure).concat();
        let original: String = label.split_whitespace().collect();
        prop_assert_eq!(joined.replace(' ', ""), original);
    }

    #[test]
    fn every_item_gets_one_filled_sector(
        weights in prop::collection::vec(1.0f64..=4.0, 0..16),
        gap in 0.0f64..=20.0,
        ratio in 0.0f64..=1.0,
    ) {
        let items = menu(&weights);
        let wedges = compute_wedges(&items, GapAngle::new(gap));
        let scene = render(
            SurfaceSize::new(560.0, 560.0),
            &wedges,
            items.first().map(|i| i.id),
            HexColor::new(0x1b, 0x1d, 0x26),
            InnerRadius::new(ratio),
            &measure,
        );

        prop_assert_eq!(scene.sectors().count(), items.len());
        prop_assert!(scene.sectors().all(|s| s.end_angle >= s.start_angle));
    }
}

#[test]
fn twenty_items_at_max_gap_use_the_floor() {
    let items = menu(&[1.0; 20]);
    assert_eq!(usable_arc(items.len(), GapAngle::new(20.0)), FRAC_PI_2);
}
