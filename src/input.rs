//! Keyboard → session commands.
//!
//! Every frame in `Playing` the bindings are scanned in [`KEY_BINDINGS`] order
//! and each key pressed this frame is applied to the [`GameSession`] as one
//! [`SessionCommand`].  The order is fixed so two keys landing in the same
//! frame always resolve the same way (crosshair before arm before catch).
//!
//! ## Bindings
//!
//! | Key          | Command                         |
//! |--------------|---------------------------------|
//! | Arrow keys   | Move the crosshair one step     |
//! | W / S        | Arm depth axis +1 / −1          |
//! | A / D        | Arm heading axis −1 / +1        |
//! | Q            | Catch the targeted creature     |
//! | E            | Toggle the encyclopedia         |
//! | I            | Toggle the inventory            |

use crate::coords::ArmAxis;
use crate::menu::GameState;
use crate::session::{CatchOutcome, GameSession};
use crate::targeting::StickPose;
use bevy::prelude::*;

/// One discrete player action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionCommand {
    /// Crosshair step in screen directions (`dy > 0` is down).
    Crosshair { dx: i32, dy: i32 },
    Arm { axis: ArmAxis, delta: i32 },
    Catch,
    ToggleEncyclopedia,
    ToggleInventory,
}

impl SessionCommand {
    pub fn apply(self, session: &mut GameSession) {
        match self {
            SessionCommand::Crosshair { dx, dy } => session.nudge_crosshair(dx, dy),
            SessionCommand::Arm { axis, delta } => {
                session.apply_arm(axis, delta);
            }
            SessionCommand::Catch => match session.catch() {
                CatchOutcome::Caught {
                    item_id,
                    spawn_id,
                    completed,
                } => {
                    info!("caught {spawn_id} as {item_id}");
                    if completed {
                        info!("every species sampled");
                    }
                }
                CatchOutcome::Ignored(_) => {}
            },
            SessionCommand::ToggleEncyclopedia => session.toggle_encyclopedia(),
            SessionCommand::ToggleInventory => session.toggle_inventory(),
        }
    }

    /// Stick deflection for crosshair commands; `dy > 0` pushes forward.
    pub fn stick_deflection(self) -> Option<(i32, i32)> {
        match self {
            SessionCommand::Crosshair { dx, dy } => Some((dx, -dy)),
            _ => None,
        }
    }
}

/// Key → command table, in application order.
pub const KEY_BINDINGS: [(KeyCode, SessionCommand); 11] = [
    (KeyCode::ArrowUp, SessionCommand::Crosshair { dx: 0, dy: -1 }),
    (KeyCode::ArrowDown, SessionCommand::Crosshair { dx: 0, dy: 1 }),
    (KeyCode::ArrowLeft, SessionCommand::Crosshair { dx: -1, dy: 0 }),
    (KeyCode::ArrowRight, SessionCommand::Crosshair { dx: 1, dy: 0 }),
    (KeyCode::KeyW, SessionCommand::Arm { axis: ArmAxis::Depth, delta: 1 }),
    (KeyCode::KeyS, SessionCommand::Arm { axis: ArmAxis::Depth, delta: -1 }),
    (KeyCode::KeyA, SessionCommand::Arm { axis: ArmAxis::Heading, delta: -1 }),
    (KeyCode::KeyD, SessionCommand::Arm { axis: ArmAxis::Heading, delta: 1 }),
    (KeyCode::KeyQ, SessionCommand::Catch),
    (KeyCode::KeyE, SessionCommand::ToggleEncyclopedia),
    (KeyCode::KeyI, SessionCommand::ToggleInventory),
];

const ARROW_KEYS: [KeyCode; 4] = [
    KeyCode::ArrowUp,
    KeyCode::ArrowDown,
    KeyCode::ArrowLeft,
    KeyCode::ArrowRight,
];

/// Commands for every bound key in `just_pressed`, in binding order.
pub fn commands_for(just_pressed: impl Fn(KeyCode) -> bool) -> Vec<SessionCommand> {
    KEY_BINDINGS
        .iter()
        .filter(|(key, _)| just_pressed(*key))
        .map(|(_, command)| *command)
        .collect()
}

/// Pose of the on-screen control stick.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StickIndicator(pub StickPose);

// ── Plugin ────────────────────────────────────────────────────────────────────

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StickIndicator>().add_systems(
            Update,
            (keyboard_command_system, stick_release_system, tick_session_system)
                .chain()
                .run_if(in_state(GameState::Playing).and(resource_exists::<GameSession>)),
        );
    }
}

// ── Systems ───────────────────────────────────────────────────────────────────

pub fn keyboard_command_system(
    keys: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<GameSession>,
    mut stick: ResMut<StickIndicator>,
) {
    for command in commands_for(|key| keys.just_pressed(key)) {
        if let Some((dx, dy)) = command.stick_deflection() {
            stick.0 = StickPose::from_deflection(dx, dy);
        }
        command.apply(&mut session);
    }
}

/// Releasing an arrow recentres the stick.
pub fn stick_release_system(keys: Res<ButtonInput<KeyCode>>, mut stick: ResMut<StickIndicator>) {
    if keys.any_just_released(ARROW_KEYS) && stick.0 != StickPose::Stand {
        stick.0 = StickPose::Stand;
    }
}

/// Drive the session's delayed tasks from frame time.
pub fn tick_session_system(time: Res<Time>, mut session: ResMut<GameSession>) {
    // Skip the mutable borrow while idle so change detection stays quiet.
    if session.pending_tasks() == 0 {
        return;
    }
    for task in session.advance(time.delta()) {
        debug!("session task fired: {task:?}");
    }
}
