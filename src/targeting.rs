//! Crosshair and target acquisition.
//!
//! The crosshair lives in viewport pixel space and is independent of the
//! camera.  After every crosshair move and every visibility refresh the target
//! is re-evaluated against the boxes placed in that refresh.

use crate::placement::{ScreenBox, Viewport};

/// A creature placed on screen during the latest refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedCreature {
    pub spawn_id: String,
    pub rect: ScreenBox,
}

/// Crosshair centre in viewport pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Crosshair {
    pub x: f32,
    pub y: f32,
}

impl Crosshair {
    /// Move to `(x, y)`, clamped so the whole crosshair stays in the viewport.
    pub fn set(&mut self, x: f32, y: f32, viewport: &Viewport, size: f32) {
        let half = size / 2.0;
        self.x = x.min(viewport.width - half).max(half);
        self.y = y.min(viewport.height - half).max(half);
    }

    pub fn center_in(&mut self, viewport: &Viewport, size: f32) {
        let (cx, cy) = viewport.center();
        self.set(cx, cy, viewport, size);
    }

    /// Nudge by whole steps.
    pub fn nudge(&mut self, dx: i32, dy: i32, step: f32, viewport: &Viewport, size: f32) {
        self.set(
            self.x + dx as f32 * step,
            self.y + dy as f32 * step,
            viewport,
            size,
        );
    }

    /// Top-left corner for rendering.
    pub fn top_left(&self, size: f32) -> (f32, f32) {
        (self.x - size / 2.0, self.y - size / 2.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TargetState {
    #[default]
    NoTarget,
    Targeting { spawn_id: String },
}

impl TargetState {
    pub fn spawn_id(&self) -> Option<&str> {
        match self {
            TargetState::NoTarget => None,
            TargetState::Targeting { spawn_id } => Some(spawn_id),
        }
    }

    pub fn is_targeting(&self) -> bool {
        matches!(self, TargetState::Targeting { .. })
    }
}

/// First placed creature (in placement order) under the crosshair centre.
pub fn evaluate_target(crosshair: &Crosshair, placed: &[PlacedCreature]) -> TargetState {
    placed
        .iter()
        .find(|p| p.rect.contains(crosshair.x, crosshair.y))
        .map_or(TargetState::NoTarget, |p| TargetState::Targeting {
            spawn_id: p.spawn_id.clone(),
        })
}

/// Pose of the on-screen control stick for the last arrow input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StickPose {
    #[default]
    Stand,
    Up,
    Back,
    Left,
    Right,
    /// Any diagonal.
    Side,
}

impl StickPose {
    /// Pose for a stick deflection; `dy > 0` pushes the stick forward.
    pub fn from_deflection(dx: i32, dy: i32) -> Self {
        match (dx.signum(), dy.signum()) {
            (0, 0) => StickPose::Stand,
            (0, 1) => StickPose::Up,
            (0, -1) => StickPose::Back,
            (-1, 0) => StickPose::Left,
            (1, 0) => StickPose::Right,
            _ => StickPose::Side,
        }
    }

    /// Asset path of the stick sprite.
    pub fn image(self) -> &'static str {
        match self {
            StickPose::Stand => "hud/stand.png",
            StickPose::Up => "hud/up.png",
            StickPose::Back => "hud/back.png",
            StickPose::Left => "hud/left.png",
            StickPose::Right => "hud/right.png",
            StickPose::Side => "hud/side.png",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vp() -> Viewport {
        Viewport::new(960.0, 540.0)
    }

    fn placed(id: &str, left: f32, top: f32) -> PlacedCreature {
        PlacedCreature {
            spawn_id: id.to_owned(),
            rect: ScreenBox { left, top, size: 120.0 },
        }
    }

    #[test]
    fn crosshair_clamps_to_half_size() {
        let mut c = Crosshair::default();
        c.set(-50.0, 9999.0, &vp(), 28.0);
        assert_eq!(c, Crosshair { x: 14.0, y: 526.0 });
        assert_eq!(c.top_left(28.0), (0.0, 512.0));
    }

    #[test]
    fn nudge_moves_by_step() {
        let mut c = Crosshair::default();
        c.center_in(&vp(), 28.0);
        c.nudge(1, -1, 20.0, &vp(), 28.0);
        assert_eq!(c, Crosshair { x: 500.0, y: 250.0 });
    }

    #[test]
    fn first_hit_in_placement_order_wins() {
        let c = Crosshair { x: 450.0, y: 250.0 };
        let list = [placed("a", 0.0, 0.0), placed("b", 400.0, 200.0), placed("c", 420.0, 210.0)];
        assert_eq!(
            evaluate_target(&c, &list),
            TargetState::Targeting { spawn_id: "b".into() }
        );
    }

    #[test]
    fn miss_clears_target() {
        let c = Crosshair { x: 900.0, y: 20.0 };
        let list = [placed("a", 0.0, 0.0)];
        assert_eq!(evaluate_target(&c, &list), TargetState::NoTarget);
        assert_eq!(evaluate_target(&c, &[]).spawn_id(), None);
    }

    #[test]
    fn stick_poses() {
        assert_eq!(StickPose::from_deflection(0, 0), StickPose::Stand);
        assert_eq!(StickPose::from_deflection(0, 1), StickPose::Up);
        assert_eq!(StickPose::from_deflection(0, -1), StickPose::Back);
        assert_eq!(StickPose::from_deflection(-1, 0), StickPose::Left);
        assert_eq!(StickPose::from_deflection(1, 0), StickPose::Right);
        assert_eq!(StickPose::from_deflection(1, 1), StickPose::Side);
        assert_eq!(StickPose::from_deflection(-1, -1), StickPose::Side);
    }
}
