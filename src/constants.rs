//! Centralised gameplay and layout constants.
//!
//! All tuneable values live here so they can be found, reasoned-about, and
//! modified in one place.  Every constant is mirrored by a field in
//! [`crate::config::GameConfig`], which can override it from
//! `assets/game.toml` at startup.

// ── Coordinate Model ──────────────────────────────────────────────────────────

/// Degrees of heading added per arm-axis step (A / D).
///
/// 72 steps make a full turn, so the heading is periodic in the accumulator
/// with period `360 / HEADING_STEP_DEG`.
pub const HEADING_STEP_DEG: i32 = 5;

/// Metres of depth added per arm-axis step (W / S).
pub const DEPTH_STEP_M: i32 = 5;

/// Depth reported when the depth accumulator is zero.
pub const DEPTH_BASE_M: i32 = 1200;

/// Shallowest reachable depth.
pub const DEPTH_MIN_M: i32 = 0;

/// Deepest reachable depth.
pub const DEPTH_MAX_M: i32 = 6000;

// ── World Catalog ─────────────────────────────────────────────────────────────

/// Headings of the spawn grid: one column every 60°.
pub const CATALOG_HEADINGS: [i32; 6] = [0, 60, 120, 180, 240, 300];

/// Depths of the spawn grid: 1200 m to 1800 m in 100 m rows.
pub const CATALOG_DEPTHS: [i32; 7] = [1200, 1300, 1400, 1500, 1600, 1700, 1800];

// ── Anchor Layout ─────────────────────────────────────────────────────────────

/// Pixel distance between consecutive anchor rings.
pub const ANCHOR_RING_STEP: f32 = 90.0;

/// Number of rings around the centre slot.  Each ring holds
/// [`ANCHOR_SLOTS_PER_RING`] slots; ring 0 is the single centre slot.
pub const ANCHOR_RINGS: usize = 2;

/// Slots on each non-centre ring.
pub const ANCHOR_SLOTS_PER_RING: usize = 8;

/// Fraction of the anchor offset applied to a marker's base position.
pub const ANCHOR_DAMPING: f32 = 0.2;

// ── Visibility Selector ───────────────────────────────────────────────────────

/// Angular visibility window (degrees).  Also the heading normaliser of the score.
pub const HEADING_WINDOW_DEG: f32 = 40.0;

/// Depth visibility window (metres).  Also the depth normaliser of the score.
pub const DEPTH_WINDOW_M: f32 = 80.0;

/// Maximum number of creatures on screen at once.
pub const MAX_VISIBLE: usize = 4;

// ── Placement Engine ──────────────────────────────────────────────────────────

/// Heading offset (degrees) that maps onto the viewport's horizontal edge.
pub const PLACEMENT_SPAN_DEG: f32 = 50.0;

/// Depth offset (metres) that maps onto the viewport's vertical edge.
pub const PLACEMENT_SPAN_M: f32 = 50.0;

/// Side length of a creature marker (px).
pub const MARKER_SIZE: f32 = 120.0;

/// Minimum gap between a marker and the viewport edge (px).
pub const VIEWPORT_PADDING: f32 = 24.0;

/// Radius growth per spiral step while resolving overlaps (px).
pub const OVERLAP_STEP_PX: f32 = 16.0;

/// Angle advanced per spiral step while resolving overlaps (degrees).
pub const OVERLAP_ANGLE_STEP_DEG: f32 = 60.0;

/// Spiral steps tried before the last candidate is accepted as-is.
pub const OVERLAP_MAX_ATTEMPTS: u32 = 40;

/// Per-attempt phase jitter on the horizontal spiral component (radians).
pub const OVERLAP_JITTER_X: f32 = 0.13;

/// Per-attempt phase jitter on the vertical spiral component (radians).
pub const OVERLAP_JITTER_Y: f32 = 0.11;

// ── Crosshair ─────────────────────────────────────────────────────────────────

/// Visual side length of the crosshair (px).
pub const CROSSHAIR_SIZE: f32 = 28.0;

/// Crosshair movement per arrow-key press (px).
pub const CROSSHAIR_STEP: f32 = 20.0;

// ── Inventory / Catch ─────────────────────────────────────────────────────────

/// Sample slots in the inventory (3×3 grid).
pub const INVENTORY_CAPACITY: usize = 9;

/// Delay between a catch and removal of the marker (ms).
pub const DESPAWN_DELAY_MS: u64 = 180;

/// Delay between a catch and the visibility refresh that repopulates the scene (ms).
pub const RESPAWN_DELAY_MS: u64 = 600;

// ── Scene Transition ──────────────────────────────────────────────────────────

/// Duration of the intro fade-out (ms).
pub const INTRO_FADE_MS: u64 = 400;

/// Delay between the game view becoming visible and scene initialisation (ms).
pub const SCENE_ENTER_DELAY_MS: u64 = 200;

// ── HUD ───────────────────────────────────────────────────────────────────────

/// Interval between HUD clock refreshes (seconds).
pub const HUD_TICK_SECS: f32 = 1.0;

/// Font size of HUD labels.
pub const HUD_FONT_SIZE: f32 = 16.0;

// ── Background Parallax ───────────────────────────────────────────────────────

/// Backdrop pan per arm step (px).
pub const PARALLAX_STEP_PX: i32 = 24;

/// Number of steps after which the stored backdrop offset wraps.
pub const PARALLAX_WRAP_STEPS: i32 = 1000;

// ── Window ────────────────────────────────────────────────────────────────────

/// Initial window size (px).
pub const WINDOW_WIDTH: u32 = 1280;
pub const WINDOW_HEIGHT: u32 = 800;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Width of the game viewport (px).
pub const VIEWPORT_WIDTH: f32 = 960.0;

/// Height of the game viewport (px).
pub const VIEWPORT_HEIGHT: f32 = 540.0;

// ── Ocean readings ────────────────────────────────────────────────────────────

/// Static environmental labels shown in the HUD and snapshotted into samples.
pub const READING_TEMPERATURE: &str = "2.63 °C";
pub const READING_SALINITY: &str = "34.5 PSU";
pub const READING_O2_CONCENTRATION: &str = "183 uM";
pub const READING_O2_SATURATION: &str = "54.3 %";

/// Name shown in the target readout for species that have not been caught yet.
pub const MASKED_NAME: &str = "???????";
