//! Coordinate model: arm-axis accumulators → camera heading and depth.
//!
//! The arm is driven by discrete key edges.  Each edge moves one of two
//! unbounded integer accumulators by ±1; heading and depth are derived from
//! them on demand:
//!
//! ```text
//! heading = (heading_axis × heading_step) mod 360      ∈ [0, 360)
//! depth   = clamp(depth_base + depth_axis × depth_step, depth_min, depth_max)
//! ```
//!
//! All angle helpers work in whole degrees.

use crate::config::GameConfig;

/// Degrees in a full turn.
pub const FULL_TURN: i32 = 360;

/// One of the two arm axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArmAxis {
    /// A / D: rotates the camera heading.
    Heading,
    /// W / S: moves the camera depth.
    Depth,
}

/// Integer accumulators behind the camera heading and depth.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArmAxes {
    pub heading_axis: i32,
    pub depth_axis: i32,
}

impl ArmAxes {
    /// Apply one discrete step.  The accumulators themselves are unbounded;
    /// only the derived values wrap or saturate.
    pub fn apply_axis_delta(&mut self, axis: ArmAxis, delta: i32) {
        match axis {
            ArmAxis::Heading => self.heading_axis = self.heading_axis.wrapping_add(delta),
            ArmAxis::Depth => self.depth_axis = self.depth_axis.wrapping_add(delta),
        }
    }

    /// Camera heading in whole degrees, always in `[0, 360)`.
    pub fn heading(&self, config: &GameConfig) -> i32 {
        heading_for(self.heading_axis, config.heading_step_deg)
    }

    /// Camera depth in metres, clamped to the configured range.
    pub fn depth(&self, config: &GameConfig) -> i32 {
        depth_for(
            self.depth_axis,
            config.depth_step_m,
            config.depth_base_m,
            config.depth_min_m,
            config.depth_max_m,
        )
    }
}

/// Heading for a raw accumulator value.
pub fn heading_for(axis: i32, step: i32) -> i32 {
    wrap_degrees(axis as i64 * step as i64)
}

/// Depth for a raw accumulator value.
pub fn depth_for(axis: i32, step: i32, base: i32, min: i32, max: i32) -> i32 {
    let raw = base as i64 + axis as i64 * step as i64;
    raw.max(min as i64).min(max as i64) as i32
}

/// True modulo 360: the result is never negative.
pub fn wrap_degrees(n: i64) -> i32 {
    n.rem_euclid(FULL_TURN as i64) as i32
}

/// Shortest circular distance between two headings, in `[0, 180]`.
pub fn angular_distance(a: i32, b: i32) -> i32 {
    let d = (a as i64 - b as i64).abs().rem_euclid(FULL_TURN as i64) as i32;
    if d > FULL_TURN / 2 {
        FULL_TURN - d
    } else {
        d
    }
}

/// Signed shortest rotation from `from` to `to`, in `(-180, 180]`.
///
/// Positive when `to` lies in the increasing-heading direction from `from`.
/// An exactly opposite heading reports `+180`.
pub fn signed_angular_delta(from: i32, to: i32) -> i32 {
    let d = wrap_degrees(to as i64 - from as i64 + 540) - 180;
    if d == -180 {
        180
    } else {
        d
    }
}

/// Accumulated backdrop offset, in pixels, driven by the same arm steps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Parallax {
    pub x: i32,
    pub y: i32,
}

impl Parallax {
    /// Pan by whole steps.  The stored offset wraps at `step × wrap_steps`
    /// (keeping the sign, like a truncating remainder).
    pub fn pan(&mut self, dx: i32, dy: i32, step: i32, wrap_steps: i32) {
        let wrap = step.saturating_mul(wrap_steps).max(1);
        self.x = (self.x + dx * step) % wrap;
        self.y = (self.y + dy * step) % wrap;
    }

    /// Backdrop draw offset `(-x, -y)`.
    pub fn draw_offset(&self) -> (i32, i32) {
        (-self.x, -self.y)
    }
}

/// Backdrop pan direction for an arm step.
///
/// Panning moves the scenery against the arm: turning right (D) slides the
/// backdrop left.
pub fn parallax_direction(axis: ArmAxis, delta: i32) -> (i32, i32) {
    match axis {
        ArmAxis::Heading => (-delta, 0),
        ArmAxis::Depth => (0, delta),
    }
}
