//! Runtime game configuration loaded from `assets/game.toml`.
//!
//! [`GameConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_game_config`] reads
//! `assets/game.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a minimal
//! TOML can override just the values you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<GameConfig>` to any system parameter list and read values
//! with `config.max_visible`, `config.marker_size`, etc.  The session
//! controller keeps its own copy, taken when the session is created.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `GameConfig::default()`.

use crate::constants::*;
use crate::error::{require_positive, validate_viewport, GameError, GameResult};
use bevy::prelude::*;
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration override file.
pub const CONFIG_PATH: &str = "assets/game.toml";

/// Runtime-tunable gameplay and layout configuration.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Coordinate Model ─────────────────────────────────────────────────────
    pub heading_step_deg: i32,
    pub depth_step_m: i32,
    pub depth_base_m: i32,
    pub depth_min_m: i32,
    pub depth_max_m: i32,

    // ── World Catalog ────────────────────────────────────────────────────────
    pub catalog_headings: Vec<i32>,
    pub catalog_depths: Vec<i32>,

    // ── Anchor Layout ────────────────────────────────────────────────────────
    pub anchor_ring_step: f32,
    pub anchor_rings: usize,
    pub anchor_slots_per_ring: usize,
    pub anchor_damping: f32,
    /// Fixed shuffle seed; `None` draws one from OS entropy per session.
    pub layout_seed: Option<u64>,

    // ── Visibility Selector ──────────────────────────────────────────────────
    pub heading_window_deg: f32,
    pub depth_window_m: f32,
    pub max_visible: usize,

    // ── Placement Engine ─────────────────────────────────────────────────────
    pub placement_span_deg: f32,
    pub placement_span_m: f32,
    pub marker_size: f32,
    pub viewport_padding: f32,
    pub overlap_step_px: f32,
    pub overlap_angle_step_deg: f32,
    pub overlap_max_attempts: u32,
    pub overlap_jitter_x: f32,
    pub overlap_jitter_y: f32,

    // ── Crosshair ────────────────────────────────────────────────────────────
    pub crosshair_size: f32,
    pub crosshair_step: f32,

    // ── Inventory / Catch ────────────────────────────────────────────────────
    pub inventory_capacity: usize,
    pub despawn_delay_ms: u64,
    pub respawn_delay_ms: u64,

    // ── Scene Transition ─────────────────────────────────────────────────────
    pub intro_fade_ms: u64,
    pub scene_enter_delay_ms: u64,

    // ── HUD ──────────────────────────────────────────────────────────────────
    pub hud_tick_secs: f32,
    pub hud_font_size: f32,

    // ── Background Parallax ──────────────────────────────────────────────────
    pub parallax_step_px: i32,
    pub parallax_wrap_steps: i32,

    // ── Viewport ─────────────────────────────────────────────────────────────
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            // Coordinate Model
            heading_step_deg: HEADING_STEP_DEG,
            depth_step_m: DEPTH_STEP_M,
            depth_base_m: DEPTH_BASE_M,
            depth_min_m: DEPTH_MIN_M,
            depth_max_m: DEPTH_MAX_M,
            // World Catalog
            catalog_headings: CATALOG_HEADINGS.to_vec(),
            catalog_depths: CATALOG_DEPTHS.to_vec(),
            // Anchor Layout
            anchor_ring_step: ANCHOR_RING_STEP,
            anchor_rings: ANCHOR_RINGS,
            anchor_slots_per_ring: ANCHOR_SLOTS_PER_RING,
            anchor_damping: ANCHOR_DAMPING,
            layout_seed: None,
            // Visibility Selector
            heading_window_deg: HEADING_WINDOW_DEG,
            depth_window_m: DEPTH_WINDOW_M,
            max_visible: MAX_VISIBLE,
            // Placement Engine
            placement_span_deg: PLACEMENT_SPAN_DEG,
            placement_span_m: PLACEMENT_SPAN_M,
            marker_size: MARKER_SIZE,
            viewport_padding: VIEWPORT_PADDING,
            overlap_step_px: OVERLAP_STEP_PX,
            overlap_angle_step_deg: OVERLAP_ANGLE_STEP_DEG,
            overlap_max_attempts: OVERLAP_MAX_ATTEMPTS,
            overlap_jitter_x: OVERLAP_JITTER_X,
            overlap_jitter_y: OVERLAP_JITTER_Y,
            // Crosshair
            crosshair_size: CROSSHAIR_SIZE,
            crosshair_step: CROSSHAIR_STEP,
            // Inventory / Catch
            inventory_capacity: INVENTORY_CAPACITY,
            despawn_delay_ms: DESPAWN_DELAY_MS,
            respawn_delay_ms: RESPAWN_DELAY_MS,
            // Scene Transition
            intro_fade_ms: INTRO_FADE_MS,
            scene_enter_delay_ms: SCENE_ENTER_DELAY_MS,
            // HUD
            hud_tick_secs: HUD_TICK_SECS,
            hud_font_size: HUD_FONT_SIZE,
            // Background Parallax
            parallax_step_px: PARALLAX_STEP_PX,
            parallax_wrap_steps: PARALLAX_WRAP_STEPS,
            // Viewport
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
        }
    }
}

impl GameConfig {
    /// Parse a configuration from TOML text; absent keys keep their defaults.
    pub fn from_toml_str(contents: &str, path: &Path) -> GameResult<Self> {
        toml::from_str::<GameConfig>(contents).map_err(|source| GameError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read and parse a configuration file.
    pub fn read(path: &Path) -> GameResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents, path)
    }

    /// Reject values that would make the coordinate model, selector, or
    /// placement engine degenerate.
    pub fn validate(&self) -> GameResult<()> {
        require_positive("heading_step_deg", self.heading_step_deg as f64)?;
        require_positive("depth_step_m", self.depth_step_m as f64)?;
        if self.depth_min_m > self.depth_max_m {
            return Err(GameError::InvalidConfig {
                name: "depth_min_m",
                value: self.depth_min_m as f64,
                expected: "[.., depth_max_m]",
            });
        }
        require_positive("heading_window_deg", self.heading_window_deg as f64)?;
        require_positive("depth_window_m", self.depth_window_m as f64)?;
        require_positive("max_visible", self.max_visible as f64)?;
        require_positive("placement_span_deg", self.placement_span_deg as f64)?;
        require_positive("placement_span_m", self.placement_span_m as f64)?;
        require_positive("marker_size", self.marker_size as f64)?;
        require_positive("crosshair_size", self.crosshair_size as f64)?;
        require_positive("inventory_capacity", self.inventory_capacity as f64)?;
        require_positive("hud_tick_secs", self.hud_tick_secs as f64)?;
        require_positive("parallax_wrap_steps", self.parallax_wrap_steps as f64)?;
        if self.catalog_headings.is_empty() || self.catalog_depths.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        validate_viewport(
            self.viewport_width,
            self.viewport_height,
            self.marker_size,
            self.viewport_padding,
        )
    }
}

/// Startup system: attempt to load `assets/game.toml` and overwrite the
/// `GameConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  Parse or validation errors
/// are logged and the defaults stay in place.  A missing file is not an error.
pub fn load_game_config(mut config: ResMut<GameConfig>) {
    let path = Path::new(CONFIG_PATH);
    match GameConfig::read(path) {
        Ok(loaded) => match loaded.validate() {
            Ok(()) => {
                *config = loaded;
                info!("Loaded game config from {CONFIG_PATH}");
            }
            Err(e) => warn!("Rejected {CONFIG_PATH}: {e}; using defaults"),
        },
        Err(GameError::ConfigRead { .. }) => {
            info!("No {CONFIG_PATH} found; using compiled defaults");
        }
        Err(e) => warn!("{e}; using defaults"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn partial_toml_overrides_only_given_keys() {
        let cfg = GameConfig::from_toml_str(
            "max_visible = 6\nlayout_seed = 7\n",
            Path::new("inline.toml"),
        )
        .unwrap();
        assert_eq!(cfg.max_visible, 6);
        assert_eq!(cfg.layout_seed, Some(7));
        assert_eq!(cfg.marker_size, MARKER_SIZE);
        assert_eq!(cfg.catalog_depths, CATALOG_DEPTHS.to_vec());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = GameConfig::from_toml_str("max_visible = \"four\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, GameError::ConfigParse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = GameConfig::read(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, GameError::ConfigRead { .. }));
    }

    #[test]
    fn tiny_viewport_is_rejected() {
        let cfg = GameConfig {
            viewport_width: 100.0,
            ..Default::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(GameError::ViewportTooSmall { .. })
        ));
    }

    #[test]
    fn empty_grid_is_rejected() {
        let cfg = GameConfig {
            catalog_headings: Vec::new(),
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(GameError::EmptyCatalog)));
    }
}
