//! Heads-up display: arm readouts, UTC clock, sample count, ocean readings,
//! current target, stick indicator and key caps.
//!
//! Text nodes carry a [`HudField`] tag and are rewritten only when the
//! session changes; the clock has its own repeating timer.

use crate::config::GameConfig;
use crate::constants::{
    READING_O2_CONCENTRATION, READING_O2_SATURATION, READING_SALINITY, READING_TEMPERATURE,
};
use crate::input::StickIndicator;
use crate::inventory::{depth_label, heading_label};
use crate::menu::GameState;
use crate::session::GameSession;
use crate::targeting::StickPose;
use crate::viewport::frame_size;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use chrono::{DateTime, Utc};

/// Shown in place of a target name when nothing is targeted.
const NO_TARGET: &str = "-";
const TARGET_THUMB_PX: f32 = 64.0;
const STICK_PX: f32 = 96.0;
/// Height of the top and bottom HUD bands.
pub const HUD_BAND_PX: f32 = 120.0;
/// Above the viewport, below panels and the win overlay.
const HUD_Z: i32 = 15;

/// Which value a HUD text node displays.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HudField {
    Heading,
    Depth,
    Clock,
    Samples,
    TargetName,
}

#[derive(Component)]
pub struct HudRoot;

#[derive(Component)]
pub struct TargetThumb;

#[derive(Component)]
pub struct StickImage;

/// On-screen key cap lit while its key is held.
#[derive(Component, Debug, Clone, Copy)]
pub struct KeyCap(pub KeyCode);

/// Drives the once-per-tick clock refresh.
#[derive(Resource)]
pub struct HudClock {
    timer: Timer,
}

impl HudClock {
    pub fn new(tick_secs: f32) -> Self {
        Self {
            timer: Timer::from_seconds(tick_secs, TimerMode::Repeating),
        }
    }
}

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct HudPlugin;

impl Plugin for HudPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Playing), setup_hud)
            .add_systems(
                Update,
                (
                    hud_clock_system,
                    hud_text_system.run_if(resource_exists::<GameSession>),
                    target_thumb_system.run_if(resource_exists::<GameSession>),
                    stick_image_system,
                    key_cap_system,
                )
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

// ── Formatting ────────────────────────────────────────────────────────────────

/// `"YYYY-MM-DD HH:MM:SS UTC"`.
pub fn format_utc(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// `"{held} / {capacity}"`.
pub fn samples_label(held: usize, capacity: usize) -> String {
    format!("{held} / {capacity}")
}

// ── Colour helpers ────────────────────────────────────────────────────────────

fn label_color() -> Color {
    Color::srgb(0.42, 0.60, 0.68)
}
fn value_color() -> Color {
    Color::srgb(0.80, 0.96, 1.0)
}
fn panel_bg() -> Color {
    Color::srgba(0.0, 0.05, 0.09, 0.85)
}
fn key_idle() -> Color {
    Color::srgb(0.08, 0.14, 0.18)
}
fn key_active() -> Color {
    Color::srgb(0.20, 0.70, 0.78)
}
fn locked_tint() -> Color {
    Color::srgb(0.25, 0.25, 0.25)
}

// ── OnEnter(Playing): spawn HUD ───────────────────────────────────────────────

/// Layout: a band above and a band below the viewport, never over it.
/// ```text
/// ┌ HEADING 0 *  DEPTH 1200 m  UTC …  SAMPLES 0 / 9 ┐
/// │ TEMP  SALINITY  O2 CON.  O2 SAT.                 │
/// ├──────────────── viewport ────────────────────────┤
/// │ [stick]  ↑ ← ↓ →  Q W A S D E I    TARGET [img]  │
/// └──────────────────────────────────────────────────┘
/// ```
pub fn setup_hud(
    mut commands: Commands,
    config: Res<GameConfig>,
    asset_server: Res<AssetServer>,
    window: Query<&Window, With<PrimaryWindow>>,
) {
    if let Ok(window) = window.single() {
        let band = free_band_height(window.height(), frame_size(&config).y);
        if band < HUD_BAND_PX {
            warn!("window too short: HUD bands need {HUD_BAND_PX} px, {band} px free");
        }
    }
    commands.insert_resource(HudClock::new(config.hud_tick_secs));
    let font_size = config.hud_font_size;
    let now = format_utc(Utc::now());

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                position_type: PositionType::Absolute,
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            ZIndex(HUD_Z),
            HudRoot,
        ))
        .with_children(|root| {
            // ── Top band: arm readouts + ocean readings ───────────────────────
            root.spawn(band_node()).with_children(|band| {
                band.spawn(bar_node()).with_children(|bar| {
                    let depth = depth_label(config.depth_base_m);
                    readout(bar, "HEADING", &heading_label(0), Some(HudField::Heading), font_size);
                    readout(bar, "DEPTH", &depth, Some(HudField::Depth), font_size);
                    readout(bar, "UTC", &now, Some(HudField::Clock), font_size);
                    readout(
                        bar,
                        "SAMPLES",
                        &samples_label(0, config.inventory_capacity),
                        Some(HudField::Samples),
                        font_size,
                    );
                });
                band.spawn(bar_node()).with_children(|bar| {
                    readout(bar, "TEMP", READING_TEMPERATURE, None, font_size);
                    readout(bar, "SALINITY", READING_SALINITY, None, font_size);
                    readout(bar, "O2 CON.", READING_O2_CONCENTRATION, None, font_size);
                    readout(bar, "O2 SAT.", READING_O2_SATURATION, None, font_size);
                });
            });

            // ── Bottom band: controls + target ────────────────────────────────
            root.spawn(band_node()).with_children(|band| {
                band.spawn(bar_node()).with_children(|bar| {
                    bar.spawn((
                        Node {
                            width: Val::Px(STICK_PX),
                            height: Val::Px(STICK_PX),
                            ..default()
                        },
                        ImageNode::new(asset_server.load(StickPose::Stand.image())),
                        StickImage,
                    ));
                    for (code, label) in KEY_CAPS {
                        key_cap(bar, code, label, font_size);
                    }
                    bar.spawn(Node {
                        flex_grow: 1.0,
                        ..default()
                    });
                    readout(bar, "TARGET", NO_TARGET, Some(HudField::TargetName), font_size);
                    bar.spawn((
                        Node {
                            width: Val::Px(TARGET_THUMB_PX),
                            height: Val::Px(TARGET_THUMB_PX),
                            ..default()
                        },
                        ImageNode::default(),
                        Visibility::Hidden,
                        TargetThumb,
                    ));
                });
            });
        });
}

/// Vertical band free of the centred viewport frame in a `window_height`
/// tall window.
pub fn free_band_height(window_height: f32, frame_height: f32) -> f32 {
    ((window_height - frame_height) / 2.0).max(0.0)
}

const KEY_CAPS: [(KeyCode, &str); 11] = [
    (KeyCode::ArrowUp, "↑"),
    (KeyCode::ArrowLeft, "←"),
    (KeyCode::ArrowDown, "↓"),
    (KeyCode::ArrowRight, "→"),
    (KeyCode::KeyQ, "Q"),
    (KeyCode::KeyW, "W"),
    (KeyCode::KeyA, "A"),
    (KeyCode::KeyS, "S"),
    (KeyCode::KeyD, "D"),
    (KeyCode::KeyE, "E"),
    (KeyCode::KeyI, "I"),
];

fn band_node() -> Node {
    Node {
        height: Val::Px(HUD_BAND_PX),
        flex_direction: FlexDirection::Column,
        justify_content: JustifyContent::Center,
        row_gap: Val::Px(6.0),
        padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
        overflow: Overflow::clip(),
        ..default()
    }
}

fn bar_node() -> (Node, BackgroundColor) {
    (
        Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            column_gap: Val::Px(18.0),
            padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
            ..default()
        },
        BackgroundColor(panel_bg()),
    )
}

/// `LABEL value` pair; the value node is tagged with `field` when given.
fn readout(
    parent: &mut ChildSpawnerCommands<'_>,
    label: &str,
    value: &str,
    field: Option<HudField>,
    font_size: f32,
) {
    parent
        .spawn(Node {
            column_gap: Val::Px(6.0),
            ..default()
        })
        .with_children(|pair| {
            pair.spawn((
                Text::new(label),
                TextFont {
                    font_size: font_size * 0.75,
                    ..default()
                },
                TextColor(label_color()),
            ));
            let mut value_text = pair.spawn((
                Text::new(value),
                TextFont {
                    font_size,
                    ..default()
                },
                TextColor(value_color()),
            ));
            if let Some(field) = field {
                value_text.insert(field);
            }
        });
}

fn key_cap(parent: &mut ChildSpawnerCommands<'_>, code: KeyCode, label: &str, font_size: f32) {
    parent
        .spawn((
            Node {
                width: Val::Px(28.0),
                height: Val::Px(28.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(key_idle()),
            BorderColor::all(label_color()),
            KeyCap(code),
        ))
        .with_children(|cap| {
            cap.spawn((
                Text::new(label),
                TextFont {
                    font_size: font_size * 0.8,
                    ..default()
                },
                TextColor(value_color()),
            ));
        });
}

// ── Update (Playing only) ─────────────────────────────────────────────────────

pub fn hud_clock_system(
    time: Res<Time>,
    clock: Option<ResMut<HudClock>>,
    mut query: Query<(&HudField, &mut Text)>,
) {
    let Some(mut clock) = clock else {
        return;
    };
    if !clock.timer.tick(time.delta()).just_finished() {
        return;
    }
    let now = format_utc(Utc::now());
    for (field, mut text) in query.iter_mut() {
        if *field == HudField::Clock {
            *text = Text::new(now.clone());
        }
    }
}

pub fn hud_text_system(session: Res<GameSession>, mut query: Query<(&HudField, &mut Text)>) {
    if !session.is_changed() {
        return;
    }
    let target = session.target_readout();
    for (field, mut text) in query.iter_mut() {
        let value = match field {
            HudField::Heading => heading_label(session.heading()),
            HudField::Depth => depth_label(session.depth()),
            HudField::Samples => {
                samples_label(session.inventory().len(), session.inventory().capacity())
            }
            HudField::TargetName => target
                .as_ref()
                .map_or(NO_TARGET, |t| t.name)
                .to_owned(),
            HudField::Clock => continue,
        };
        *text = Text::new(value);
    }
}

/// Thumbnail of the current target, tinted dark while its species is locked.
pub fn target_thumb_system(
    session: Res<GameSession>,
    asset_server: Res<AssetServer>,
    mut query: Query<(&mut ImageNode, &mut Visibility), With<TargetThumb>>,
) {
    if !session.is_changed() {
        return;
    }
    let readout = session.target_readout();
    for (mut image, mut visibility) in query.iter_mut() {
        match &readout {
            Some(target) => {
                image.image = asset_server.load(target.image);
                image.color = if target.unlocked {
                    Color::WHITE
                } else {
                    locked_tint()
                };
                *visibility = Visibility::Inherited;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}

pub fn stick_image_system(
    stick: Res<StickIndicator>,
    asset_server: Res<AssetServer>,
    mut query: Query<&mut ImageNode, With<StickImage>>,
) {
    if !stick.is_changed() {
        return;
    }
    for mut image in query.iter_mut() {
        image.image = asset_server.load(stick.0.image());
    }
}

/// Key caps follow the held state of their key.
pub fn key_cap_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut query: Query<(&KeyCap, &mut BackgroundColor)>,
) {
    for (cap, mut bg) in query.iter_mut() {
        let color = if keys.pressed(cap.0) {
            key_active()
        } else {
            key_idle()
        };
        if bg.0 != color {
            *bg = BackgroundColor(color);
        }
    }
}
