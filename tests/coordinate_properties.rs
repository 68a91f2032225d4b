//! Property tests for the coordinate model, the visibility selector and the
//! placement engine.

use abyss_sampler::catalog::{WorldCatalog, SPECIES_BASE};
use abyss_sampler::config::GameConfig;
use abyss_sampler::constants::{CATALOG_DEPTHS, CATALOG_HEADINGS};
use abyss_sampler::coords::{
    angular_distance, depth_for, heading_for, signed_angular_delta, wrap_degrees, ArmAxis,
};
use abyss_sampler::placement::Viewport;
use abyss_sampler::session::GameSession;
use abyss_sampler::visibility::{select_visible, VisibilityWindow};
use proptest::prelude::*;

fn arm_step() -> impl Strategy<Value = (ArmAxis, i32)> {
    (
        prop_oneof![Just(ArmAxis::Heading), Just(ArmAxis::Depth)],
        prop_oneof![Just(1), Just(-1)],
    )
}

proptest! {
    #[test]
    fn heading_is_always_a_valid_angle(axis in any::<i32>()) {
        let h = heading_for(axis, 5);
        prop_assert!((0..360).contains(&h));
    }

    #[test]
    fn heading_repeats_every_full_turn(axis in -1_000_000i32..1_000_000) {
        prop_assert_eq!(heading_for(axis, 5), heading_for(axis + 72, 5));
    }

    #[test]
    fn depth_is_clamped_and_monotonic(a in -10_000i32..10_000, b in -10_000i32..10_000) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let d_lo = depth_for(lo, 5, 1200, 0, 6000);
        let d_hi = depth_for(hi, 5, 1200, 0, 6000);
        prop_assert!((0..=6000).contains(&d_lo));
        prop_assert!(d_lo <= d_hi);
    }

    #[test]
    fn wrap_is_idempotent(n in any::<i64>()) {
        let w = wrap_degrees(n);
        prop_assert_eq!(wrap_degrees(w as i64), w);
    }

    #[test]
    fn signed_delta_agrees_with_distance(a in 0i32..360, b in 0i32..360) {
        let d = signed_angular_delta(a, b);
        prop_assert!(d > -180 && d <= 180);
        prop_assert_eq!(d.abs(), angular_distance(a, b));
        prop_assert_eq!(wrap_degrees(a as i64 + d as i64), b);
    }

    #[test]
    fn selector_returns_between_one_and_max(heading in 0i32..360, depth in 0i32..=6000) {
        let catalog = WorldCatalog::from_grid(&CATALOG_HEADINGS, &CATALOG_DEPTHS, &SPECIES_BASE)
            .unwrap();
        let window = VisibilityWindow::from(&GameConfig::default());
        let selected = select_visible(catalog.spawns(), heading, depth, &window);
        prop_assert!(!selected.is_empty());
        prop_assert!(selected.len() <= window.max_visible);
        prop_assert!(selected.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[test]
    fn placed_markers_stay_inside_padded_viewport(
        seed in any::<u64>(),
        steps in proptest::collection::vec(arm_step(), 0..60),
    ) {
        let config = GameConfig { layout_seed: Some(seed), ..Default::default() };
        let (pad, size) = (config.viewport_padding, config.marker_size);
        let mut session = GameSession::new(config).unwrap();
        session.enter_scene(Viewport::new(960.0, 540.0)).unwrap();
        for (axis, delta) in steps {
            session.apply_arm(axis, delta);
            prop_assert!(!session.placed().is_empty());
            for placed in session.placed() {
                let r = placed.rect;
                prop_assert!(r.left >= pad && r.left <= 960.0 - pad - size);
                prop_assert!(r.top >= pad && r.top <= 540.0 - pad - size);
            }
        }
    }
}
