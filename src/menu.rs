//! Intro screen, `GameState` definition and the intro → game transition.
//!
//! ## States
//!
//! | State     | Description                                        |
//! |-----------|----------------------------------------------------|
//! | `Intro`   | Initial state; title and PLAY shown, game keys off |
//! | `Playing` | Game view visible; input, HUD and panels active    |
//!
//! ## Transition
//!
//! ```text
//! PLAY / Enter / Space ─► StartRequested ─► fade (intro_fade_ms) ─► Playing
//! OnEnter(Playing) ─► scene_enter_delay_ms ─► GameSession::enter_scene
//! ```
//!
//! A new start request cancels whatever step is still pending and restarts
//! the fade.
//!
//! ## Systems (registered by `MenuPlugin`)
//!
//! | System                      | Schedule                | Purpose                        |
//! |-----------------------------|-------------------------|--------------------------------|
//! | `setup_intro`               | `OnEnter(Intro)`        | Spawn full-screen intro UI     |
//! | `cleanup_intro`             | `OnExit(Intro)`         | Despawn intro UI entities      |
//! | `intro_button_system`       | `Update / in Intro`     | PLAY click → `StartRequested`  |
//! | `intro_keyboard_system`     | `Update / in Intro`     | Enter/Space → `StartRequested` |
//! | `begin_transition_system`   | `Update / in Intro`     | Start the fade                 |
//! | `fade_intro_system`         | `Update / in Intro`     | Apply fade opacity             |
//! | `schedule_scene_entry`      | `OnEnter(Playing)`      | Queue the delayed scene entry  |
//! | `advance_transition_system` | `Update`                | Run due transition steps       |

use crate::config::GameConfig;
use crate::error::{GameError, GameResult};
use crate::placement::Viewport;
use crate::scheduler::{Scheduler, TaskHandle};
use crate::session::GameSession;
use crate::viewport::ViewportRoot;
use bevy::prelude::*;
use std::time::Duration;

// ── Game state ────────────────────────────────────────────────────────────────

/// Top-level application state machine.
#[derive(States, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    /// Intro screen; shown on startup.
    #[default]
    Intro,
    /// Game view.
    Playing,
}

/// The player asked to leave the intro.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct StartRequested;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    FadeFinished,
    EnterScene,
}

/// Pending intro → game steps on their own clock.
#[derive(Resource, Debug, Default)]
pub struct SceneTransition {
    tasks: Scheduler<TransitionStep>,
    fade: Option<(TaskHandle, Duration)>,
}

impl SceneTransition {
    /// Cancel anything pending and start the intro fade.
    pub fn request_start(&mut self, fade: Duration) {
        self.tasks.clear();
        let handle = self.tasks.schedule(fade, TransitionStep::FadeFinished);
        self.fade = Some((handle, fade));
    }

    /// Queue core initialisation once the game view is on screen.
    pub fn game_view_shown(&mut self, delay: Duration) {
        self.tasks.schedule(delay, TransitionStep::EnterScene);
    }

    pub fn advance(&mut self, dt: Duration) -> Vec<TransitionStep> {
        let steps = self.tasks.advance(dt);
        if steps.contains(&TransitionStep::FadeFinished) {
            self.fade = None;
        }
        steps
    }

    pub fn is_pending(&self) -> bool {
        self.tasks.pending() > 0
    }

    pub fn is_fading(&self) -> bool {
        self.fade.is_some()
    }

    /// Intro opacity in `[0, 1]`; fully opaque while no fade runs.
    pub fn intro_alpha(&self) -> f32 {
        let Some((handle, total)) = self.fade else {
            return 1.0;
        };
        match self.tasks.remaining(handle) {
            Some(left) if !total.is_zero() => left.as_secs_f32() / total.as_secs_f32(),
            _ => 0.0,
        }
    }
}

// ── Component markers ─────────────────────────────────────────────────────────

/// Root node of the intro UI; entire tree is despawned on `OnExit(Intro)`.
#[derive(Component)]
pub struct IntroRoot;

/// Tags the PLAY button.
#[derive(Component)]
pub struct IntroPlayButton;

/// Intro text whose alpha follows the fade.
#[derive(Component)]
pub struct IntroFade {
    base: Color,
}

// ── Plugin ────────────────────────────────────────────────────────────────────

/// Registers `GameState`, the intro UI, and the scene transition.
///
/// Must be added before any plugin that uses `in_state(GameState::Playing)`.
pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_message::<StartRequested>()
            .init_resource::<SceneTransition>()
            .add_systems(OnEnter(GameState::Intro), setup_intro)
            .add_systems(OnExit(GameState::Intro), cleanup_intro)
            .add_systems(OnEnter(GameState::Playing), schedule_scene_entry)
            .add_systems(
                Update,
                (
                    intro_button_system,
                    intro_keyboard_system,
                    begin_transition_system,
                    fade_intro_system,
                )
                    .chain()
                    .run_if(in_state(GameState::Intro)),
            )
            .add_systems(Update, advance_transition_system);
    }
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn intro_bg() -> Color {
    Color::srgb(0.01, 0.04, 0.09)
}
fn play_bg() -> Color {
    Color::srgb(0.04, 0.22, 0.30)
}
fn play_border() -> Color {
    Color::srgb(0.20, 0.78, 0.86)
}
fn play_text() -> Color {
    Color::srgb(0.78, 0.98, 1.0)
}
fn title_color() -> Color {
    Color::srgb(0.55, 0.92, 0.95)
}
fn subtitle_color() -> Color {
    Color::srgb(0.42, 0.55, 0.66)
}
fn hint_color() -> Color {
    Color::srgb(0.24, 0.32, 0.40)
}

// ── OnEnter(Intro): spawn UI ──────────────────────────────────────────────────

/// Spawn the full-screen intro overlay.
///
/// Layout:
/// ```text
/// ┌─────────────────────────────────────────────┐
/// │              ABYSS SAMPLER                  │
/// │     Deep-sea sampling arm · bay 04          │
/// │                                             │
/// │               [ PLAY ]                      │
/// │                                             │
/// │        ENTER / SPACE to dive                │
/// └─────────────────────────────────────────────┘
/// ```
pub fn setup_intro(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                ..default()
            },
            BackgroundColor(intro_bg()),
            ZIndex(50),
            IntroRoot,
        ))
        .with_children(|root| {
            fading_text(root, "ABYSS SAMPLER", 56.0, title_color());
            spacer(root, 10.0);
            fading_text(root, "Deep-sea sampling arm · bay 04", 18.0, subtitle_color());
            spacer(root, 52.0);

            root.spawn((
                Button,
                Node {
                    width: Val::Px(220.0),
                    height: Val::Px(50.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    border: UiRect::all(Val::Px(2.0)),
                    ..default()
                },
                BackgroundColor(play_bg()),
                BorderColor::all(play_border()),
                IntroPlayButton,
            ))
            .with_children(|btn| {
                btn.spawn((
                    Text::new("PLAY"),
                    TextFont {
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(play_text()),
                    IntroFade { base: play_text() },
                ));
            });

            spacer(root, 52.0);
            fading_text(root, "ENTER / SPACE to dive", 12.0, hint_color());
        });
}

fn fading_text(parent: &mut ChildSpawnerCommands<'_>, text: &str, size: f32, color: Color) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
        IntroFade { base: color },
    ));
}

/// Spawn a fixed-height invisible spacer node.
pub(crate) fn spacer(parent: &mut ChildSpawnerCommands<'_>, px: f32) {
    parent.spawn(Node {
        height: Val::Px(px),
        ..default()
    });
}

// ── OnExit(Intro): despawn UI ─────────────────────────────────────────────────

/// Recursively despawn all intro entities.
pub fn cleanup_intro(mut commands: Commands, query: Query<Entity, With<IntroRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

// ── Update (Intro only): start requests ───────────────────────────────────────

/// PLAY click → [`StartRequested`]; hover tints the label.
#[allow(clippy::type_complexity)]
pub fn intro_button_system(
    query: Query<(&Interaction, &Children), (Changed<Interaction>, With<IntroPlayButton>)>,
    mut btn_text: Query<&mut TextColor>,
    mut start: MessageWriter<StartRequested>,
) {
    for (interaction, children) in query.iter() {
        let tint = match interaction {
            Interaction::Pressed => {
                start.write(StartRequested);
                continue;
            }
            Interaction::Hovered => Color::WHITE,
            Interaction::None => play_text(),
        };
        for child in children.iter() {
            if let Ok(mut color) = btn_text.get_mut(child) {
                *color = TextColor(tint);
            }
        }
    }
}

/// Enter or Space → [`StartRequested`].
pub fn intro_keyboard_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut start: MessageWriter<StartRequested>,
) {
    if keys.any_just_pressed([KeyCode::Enter, KeyCode::NumpadEnter, KeyCode::Space]) {
        start.write(StartRequested);
    }
}

pub fn begin_transition_system(
    mut requests: MessageReader<StartRequested>,
    mut transition: ResMut<SceneTransition>,
    config: Res<GameConfig>,
) {
    if requests.read().count() == 0 {
        return;
    }
    transition.request_start(Duration::from_millis(config.intro_fade_ms));
    info!("intro: start requested, fading out");
}

#[allow(clippy::type_complexity)]
pub fn fade_intro_system(
    transition: Res<SceneTransition>,
    mut roots: Query<&mut BackgroundColor, With<IntroRoot>>,
    mut texts: Query<(&IntroFade, &mut TextColor)>,
) {
    if !transition.is_fading() {
        return;
    }
    let alpha = transition.intro_alpha();
    for mut bg in roots.iter_mut() {
        *bg = BackgroundColor(intro_bg().with_alpha(alpha));
    }
    for (fade, mut color) in texts.iter_mut() {
        *color = TextColor(fade.base.with_alpha(alpha));
    }
}

// ── Transition steps ──────────────────────────────────────────────────────────

/// Viewport the scene is laid out in; fails when the viewport node is absent.
pub fn scene_viewport(config: &GameConfig, anchor_present: bool) -> GameResult<Viewport> {
    if !anchor_present {
        return Err(GameError::MissingViewport);
    }
    Ok(Viewport::new(config.viewport_width, config.viewport_height))
}

pub fn schedule_scene_entry(mut transition: ResMut<SceneTransition>, config: Res<GameConfig>) {
    transition.game_view_shown(Duration::from_millis(config.scene_enter_delay_ms));
}

/// Advance the transition clock and act on due steps.
pub fn advance_transition_system(
    time: Res<Time>,
    config: Res<GameConfig>,
    mut transition: ResMut<SceneTransition>,
    mut next_state: ResMut<NextState<GameState>>,
    mut session: Option<ResMut<GameSession>>,
    anchors: Query<(), With<ViewportRoot>>,
) {
    if !transition.is_pending() {
        return;
    }
    for step in transition.advance(time.delta()) {
        match step {
            TransitionStep::FadeFinished => {
                next_state.set(GameState::Playing);
            }
            TransitionStep::EnterScene => {
                let Some(session) = session.as_deref_mut() else {
                    error!("scene entry skipped: no game session");
                    continue;
                };
                match scene_viewport(&config, !anchors.is_empty())
                    .and_then(|viewport| session.enter_scene(viewport))
                {
                    Ok(diff) => info!(
                        "scene entered at {}°/{} m with {} creatures in view",
                        session.heading(),
                        session.depth(),
                        diff.added.len()
                    ),
                    Err(e) => error!("scene entry failed: {e}"),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn fade_then_enter() {
        let mut t = SceneTransition::default();
        assert_eq!(t.intro_alpha(), 1.0);
        t.request_start(ms(400));
        assert!(t.advance(ms(200)).is_empty());
        assert!((t.intro_alpha() - 0.5).abs() < 1e-4);
        assert_eq!(t.advance(ms(200)), vec![TransitionStep::FadeFinished]);
        assert!(!t.is_fading());
        t.game_view_shown(ms(200));
        assert!(t.advance(ms(199)).is_empty());
        assert_eq!(t.advance(ms(1)), vec![TransitionStep::EnterScene]);
        assert!(!t.is_pending());
    }

    #[test]
    fn scene_needs_viewport_anchor() {
        let config = GameConfig::default();
        assert!(matches!(
            scene_viewport(&config, false),
            Err(GameError::MissingViewport)
        ));
        assert_eq!(
            scene_viewport(&config, true).unwrap(),
            Viewport::new(config.viewport_width, config.viewport_height)
        );
    }

    #[test]
    fn repeated_request_restarts_fade() {
        let mut t = SceneTransition::default();
        t.request_start(ms(400));
        t.advance(ms(300));
        t.request_start(ms(400));
        assert!(t.advance(ms(300)).is_empty(), "first fade must have been cancelled");
        assert_eq!(t.advance(ms(100)), vec![TransitionStep::FadeFinished]);
    }
}
