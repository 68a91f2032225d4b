//! End-to-end scenarios against [`GameSession`] without an app.
//!
//! Covered scenarios:
//! 1. Catching one creature of every species shows the win overlay.
//! 2. The inventory refuses catches past its capacity.
//! 3. A caught spawn disappears and comes back after the respawn delay.
//! 4. Releasing a sample keeps the species unlocked.
//! 5. Anchor slots are stable while the camera moves away and back.
//! 6. Reset clears samples and unlocks; continue only hides the overlay.

use abyss_sampler::config::GameConfig;
use abyss_sampler::coords::ArmAxis;
use abyss_sampler::placement::Viewport;
use abyss_sampler::session::{CatchOutcome, CatchRejection, GameSession};
use std::collections::HashSet;
use std::time::Duration;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn started_session(seed: u64) -> GameSession {
    let config = GameConfig {
        layout_seed: Some(seed),
        ..Default::default()
    };
    let mut session = GameSession::new(config).expect("default catalog is valid");
    session
        .enter_scene(Viewport::new(960.0, 540.0))
        .expect("default viewport fits");
    session
}

/// Step the arm until the camera sits exactly on `heading` / `depth`.
fn move_camera_to(session: &mut GameSession, heading: i32, depth: i32) {
    let config = session.config().clone();
    let target_heading_axis = heading / config.heading_step_deg;
    let target_depth_axis = (depth - config.depth_base_m) / config.depth_step_m;
    let arm = session.arm();
    step_axis(session, ArmAxis::Heading, target_heading_axis - arm.heading_axis);
    step_axis(session, ArmAxis::Depth, target_depth_axis - arm.depth_axis);
    assert_eq!((session.heading(), session.depth()), (heading, depth));
}

fn step_axis(session: &mut GameSession, axis: ArmAxis, steps: i32) {
    for _ in 0..steps.abs() {
        session.apply_arm(axis, steps.signum());
    }
}

fn respawn_delay(session: &GameSession) -> Duration {
    Duration::from_millis(session.config().respawn_delay_ms)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// Standing on a spawn puts it first in the placed list under the centred
/// crosshair, so one catch per species unlocks the whole encyclopedia.
#[test]
fn catching_every_species_wins() {
    let mut session = started_session(1);
    let targets: Vec<_> = session
        .catalog()
        .templates()
        .iter()
        .filter_map(|t| {
            session
                .catalog()
                .spawns()
                .iter()
                .find(|s| s.species_id == t.id)
                .map(|s| (s.id.clone(), s.heading, s.depth))
        })
        .collect();
    assert_eq!(targets.len(), 5);

    for (i, (spawn_id, heading, depth)) in targets.iter().enumerate() {
        move_camera_to(&mut session, *heading, *depth);
        assert_eq!(session.placed()[0].spawn_id, *spawn_id);
        assert_eq!(session.target().spawn_id(), Some(spawn_id.as_str()));

        let CatchOutcome::Caught { completed, .. } = session.catch() else {
            panic!("catch of {spawn_id} was ignored");
        };
        let last = i == targets.len() - 1;
        assert_eq!(completed, last, "completion only on the final species");
        assert_eq!(session.win_visible(), last);
    }
    assert_eq!(session.inventory().len(), 5);
    assert_eq!(session.unlocked().len(), 5);

    session.dismiss_win();
    assert!(!session.win_visible());
    assert_eq!(session.inventory().len(), 5, "continue keeps progress");
}

#[test]
fn inventory_refuses_catches_when_full() {
    let mut session = started_session(2);
    let capacity = session.inventory().capacity();
    assert_eq!(capacity, 9);

    for _ in 0..capacity {
        assert!(session.target().is_targeting());
        assert!(matches!(session.catch(), CatchOutcome::Caught { .. }));
        let delay = respawn_delay(&session);
        session.advance(delay);
    }
    assert!(session.inventory().is_full());
    assert!(session.target().is_targeting());
    assert_eq!(
        session.catch(),
        CatchOutcome::Ignored(CatchRejection::InventoryFull)
    );
    assert_eq!(session.inventory().len(), capacity);

    let ids: HashSet<_> = session
        .inventory()
        .items()
        .iter()
        .map(|i| i.id.clone())
        .collect();
    assert_eq!(ids.len(), capacity, "sample ids are unique");
}

#[test]
fn caught_spawn_respawns_after_delay() {
    let mut session = started_session(3);
    let CatchOutcome::Caught { spawn_id, .. } = session.catch() else {
        panic!("home pose should start on a target");
    };
    assert!(session.is_depleted(&spawn_id));

    // Moving around while depleted never brings it back.
    session.apply_arm(ArmAxis::Heading, 1);
    session.apply_arm(ArmAxis::Heading, -1);
    assert!(session.placed().iter().all(|p| p.spawn_id != spawn_id));

    session.advance(Duration::from_millis(599));
    assert!(session.is_depleted(&spawn_id));
    session.advance(Duration::from_millis(1));
    assert!(!session.is_depleted(&spawn_id));
    assert_eq!(session.placed()[0].spawn_id, spawn_id);
    assert_eq!(session.target().spawn_id(), Some(spawn_id.as_str()));
}

#[test]
fn release_keeps_species_unlocked() {
    let mut session = started_session(4);
    let CatchOutcome::Caught { item_id, .. } = session.catch() else {
        panic!("home pose should start on a target");
    };
    assert!(session.release(&item_id));
    assert!(!session.release(&item_id), "second release is a no-op");
    assert!(session.inventory().is_empty());
    assert_eq!(session.unlocked().len(), 1);
}

#[test]
fn anchors_are_stable_across_camera_moves() {
    let mut session = started_session(5);
    let before = session.placed().to_vec();
    let slots: Vec<_> = before
        .iter()
        .map(|p| session.layout().assigned_slot(&p.spawn_id))
        .collect();

    step_axis(&mut session, ArmAxis::Heading, 6);
    step_axis(&mut session, ArmAxis::Depth, -4);
    step_axis(&mut session, ArmAxis::Depth, 4);
    step_axis(&mut session, ArmAxis::Heading, -6);

    assert_eq!(session.placed(), before.as_slice());
    for (placed, slot) in before.iter().zip(slots) {
        assert_eq!(session.layout().assigned_slot(&placed.spawn_id), slot);
    }
}

#[test]
fn reset_clears_progress_and_overlay() {
    let mut session = started_session(6);
    let targets: Vec<_> = session
        .catalog()
        .templates()
        .iter()
        .filter_map(|t| {
            session
                .catalog()
                .spawns()
                .iter()
                .find(|s| s.species_id == t.id)
                .map(|s| (s.heading, s.depth))
        })
        .collect();
    for (heading, depth) in targets {
        move_camera_to(&mut session, heading, depth);
        session.catch();
    }
    assert!(session.win_visible());

    session.reset_progress();
    assert!(!session.win_visible());
    assert!(session.inventory().is_empty());
    assert!(session.unlocked().is_empty());
}

#[test]
fn panels_toggle_exclusively() {
    let mut session = started_session(7);
    session.toggle_encyclopedia();
    session.toggle_inventory();
    let panels = session.panels();
    assert!(panels.inventory_open);
    assert!(!panels.encyclopedia_open);
    session.toggle_inventory();
    assert!(!session.panels().inventory_open);
}
