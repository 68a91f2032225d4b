//! Headless tests for the [`GameState`] state machine and the intro → game
//! transition.
//!
//! These tests use [`MinimalPlugins`] (no window, no rendering) so they run
//! fast and deterministically in CI.  Frame time is pinned with
//! [`TimeUpdateStrategy::ManualDuration`] so delays resolve after a known
//! number of frames.
//!
//! Covered scenarios:
//! 1. The plugin boots into `Intro` and stays there without a start request.
//! 2. A start request fades out, enters `Playing`, then initialises the scene.
//! 3. Scene entry is aborted when the viewport node is missing.

use abyss_sampler::config::GameConfig;
use abyss_sampler::menu::{GameState, MenuPlugin, SceneTransition, StartRequested};
use abyss_sampler::session::GameSession;
use abyss_sampler::viewport::ViewportRoot;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Headless app running the real `MenuPlugin` with a live session, a viewport
/// anchor and 50 ms frames.
fn app_with_menu_plugin() -> App {
    let mut app = app_without_viewport();
    // Stand-in for the node ViewportPlugin spawns on entering Playing.
    app.world_mut().spawn(ViewportRoot);
    app
}

fn app_without_viewport() -> App {
    let config = GameConfig {
        layout_seed: Some(11),
        ..Default::default()
    };
    let session = GameSession::new(config.clone()).expect("default catalog is valid");

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(50)))
        .init_resource::<ButtonInput<KeyCode>>()
        .insert_resource(config)
        .insert_resource(session)
        .add_plugins(MenuPlugin);
    app
}

fn current_state(app: &App) -> GameState {
    app.world().resource::<State<GameState>>().get().clone()
}

/// Run frames until `done` holds, returning the number of frames taken.
fn run_until(app: &mut App, max_frames: usize, done: impl Fn(&App) -> bool) -> Option<usize> {
    for frame in 0..max_frames {
        if done(app) {
            return Some(frame);
        }
        app.update();
    }
    done(app).then_some(max_frames)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

/// The plugin boots into `Intro`, and without a start request it stays there.
#[test]
fn intro_waits_for_start_request() {
    let mut app = app_with_menu_plugin();
    app.update();
    assert_eq!(current_state(&app), GameState::Intro, "initial state must be Intro");
    for _ in 0..30 {
        app.update();
    }
    assert_eq!(current_state(&app), GameState::Intro);
    assert!(!app.world().resource::<GameSession>().scene_started());
}

/// Start request → fade → `Playing` → delayed scene entry.
#[test]
fn start_request_fades_then_enters_scene() {
    let mut app = app_with_menu_plugin();
    app.update();
    app.world_mut().write_message(StartRequested);

    let to_playing = run_until(&mut app, 40, |app| current_state(app) == GameState::Playing)
        .expect("fade should finish within 2 s of frames");
    // 400 ms fade at 50 ms per frame.
    assert!(to_playing >= 8, "state changed before the fade ran out");
    assert!(
        !app.world().resource::<GameSession>().scene_started(),
        "scene entry waits for its own delay"
    );

    run_until(&mut app, 40, |app| {
        app.world().resource::<GameSession>().scene_started()
    })
    .expect("scene should start after the enter delay");

    let session = app.world().resource::<GameSession>();
    assert!(!session.placed().is_empty());
    assert!(session.target().is_targeting(), "home pose starts on a target");
    assert!(!app.world().resource::<SceneTransition>().is_pending());
}

/// Without the viewport node the scene is never initialised.
#[test]
fn missing_viewport_aborts_scene_entry() {
    let mut app = app_without_viewport();
    app.update();
    app.world_mut().write_message(StartRequested);
    run_until(&mut app, 60, |app| current_state(app) == GameState::Playing)
        .expect("fade should still finish");
    for _ in 0..20 {
        app.update();
    }
    assert!(!app.world().resource::<GameSession>().scene_started());
}
