//! Placement engine: selected spawns → non-overlapping screen boxes.
//!
//! ## Pipeline (per refresh)
//!
//! 1. [`base_position`]: project the spawn's signed heading offset and depth
//!    offset onto the viewport, add its damped anchor jitter, clamp.
//! 2. [`resolve_overlap`]: spiral the box outward until it clears every box
//!    already placed in this pass, or the attempt budget runs out.
//!
//! Geometry is computed here and handed to the renderer as final pixel
//! coordinates; nothing reads rendered layout back.

use crate::anchors::AnchorSlot;
use crate::catalog::CreatureSpawn;
use crate::config::GameConfig;
use crate::coords::signed_angular_delta;

/// Pixel size of the area markers are placed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// Axis-aligned square marker box, top-left anchored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBox {
    pub left: f32,
    pub top: f32,
    pub size: f32,
}

impl ScreenBox {
    /// Interiors intersect on both axes.  Touching edges do not count.
    pub fn overlaps(&self, other: &ScreenBox) -> bool {
        !(self.left + self.size <= other.left
            || other.left + other.size <= self.left
            || self.top + self.size <= other.top
            || other.top + other.size <= self.top)
    }

    /// Point inside the box, edges inclusive.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.left + self.size && y >= self.top && y <= self.top + self.size
    }
}

/// Geometry constants of the placement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementParams {
    pub marker_size: f32,
    pub padding: f32,
    pub span_deg: f32,
    pub span_m: f32,
    pub anchor_damping: f32,
    pub overlap_step_px: f32,
    pub overlap_angle_step_rad: f32,
    pub overlap_max_attempts: u32,
    pub jitter_x: f32,
    pub jitter_y: f32,
}

impl From<&GameConfig> for PlacementParams {
    fn from(config: &GameConfig) -> Self {
        Self {
            marker_size: config.marker_size,
            padding: config.viewport_padding,
            span_deg: config.placement_span_deg,
            span_m: config.placement_span_m,
            anchor_damping: config.anchor_damping,
            overlap_step_px: config.overlap_step_px,
            overlap_angle_step_rad: config.overlap_angle_step_deg.to_radians(),
            overlap_max_attempts: config.overlap_max_attempts,
            jitter_x: config.overlap_jitter_x,
            jitter_y: config.overlap_jitter_y,
        }
    }
}

impl PlacementParams {
    /// Clamp a left coordinate to `[padding, width - padding - size]`.
    fn clamp_left(&self, viewport: &Viewport, left: f32) -> f32 {
        clamp_span(left, self.padding, viewport.width - self.padding - self.marker_size)
    }

    /// Clamp a top coordinate to `[padding, height - padding - size]`.
    fn clamp_top(&self, viewport: &Viewport, top: f32) -> f32 {
        clamp_span(top, self.padding, viewport.height - self.padding - self.marker_size)
    }
}

/// Clamp that tolerates an inverted range by pinning to `lo`.
fn clamp_span(value: f32, lo: f32, hi: f32) -> f32 {
    value.min(hi).max(lo)
}

/// Projected, jittered and clamped box for `spawn` seen from `heading` / `depth`.
pub fn base_position(
    spawn: &CreatureSpawn,
    heading: i32,
    depth: i32,
    anchor: AnchorSlot,
    viewport: &Viewport,
    params: &PlacementParams,
) -> ScreenBox {
    let size = params.marker_size;
    let center_x = viewport.width / 2.0 - size / 2.0;
    let center_y = viewport.height / 2.0 - size / 2.0;
    let kx = (viewport.width / 2.0 - params.padding - size / 2.0) / params.span_deg;
    let ky = (viewport.height / 2.0 - params.padding - size / 2.0) / params.span_m;

    let dh = signed_angular_delta(heading, spawn.heading) as f32;
    let dd = (spawn.depth - depth) as f32;

    ScreenBox {
        left: params.clamp_left(
            viewport,
            center_x + dh * kx + anchor.dx * params.anchor_damping,
        ),
        top: params.clamp_top(
            viewport,
            center_y + dd * ky + anchor.dy * params.anchor_damping,
        ),
        size,
    }
}

/// Spiral `candidate` away from `placed` boxes.
///
/// Best effort: if the box still overlaps after the attempt budget, the last
/// candidate is returned unchanged.
pub fn resolve_overlap(
    placed: &[ScreenBox],
    candidate: ScreenBox,
    viewport: &Viewport,
    params: &PlacementParams,
) -> ScreenBox {
    let mut current = candidate;
    let mut angle = 0.0_f32;
    let mut radius = 0.0_f32;

    for attempt in 0..params.overlap_max_attempts {
        if !placed.iter().any(|p| p.overlaps(&current)) {
            break;
        }
        angle += params.overlap_angle_step_rad;
        radius += params.overlap_step_px;
        let phase = attempt as f32;
        current.left = params.clamp_left(
            viewport,
            current.left + (angle + phase * params.jitter_x).cos() * radius,
        );
        current.top = params.clamp_top(
            viewport,
            current.top + (angle + phase * params.jitter_y).sin() * radius,
        );
    }
    current
}
