//! Game-specific error types.
//!
//! Only initialisation paths return errors: gameplay actions that cannot be
//! carried out (catch without a target, release of an unknown sample) are
//! silent no-ops rather than failures.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error enum for the game.
#[derive(Debug, Error)]
pub enum GameError {
    /// The viewport node the markers are parented to could not be found.
    #[error("viewport anchor is missing; scene initialisation aborted")]
    MissingViewport,

    /// The viewport cannot hold a single marker inside its padding.
    #[error(
        "viewport {width}x{height} px is too small for {marker} px markers with {padding} px padding"
    )]
    ViewportTooSmall {
        width: f32,
        height: f32,
        marker: f32,
        padding: f32,
    },

    /// The world catalog has no spawn points.
    #[error("world catalog is empty")]
    EmptyCatalog,

    /// A configuration value is outside its usable range.
    #[error("config value '{name}' = {value} is outside {expected}")]
    InvalidConfig {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },

    #[error("failed to read {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error if `value` is not strictly positive.
pub fn require_positive(name: &'static str, value: f64) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            name,
            value,
            expected: "(0, ∞)",
        })
    }
}

/// Returns an error unless a `marker`-sized box fits inside the padded viewport.
pub fn validate_viewport(width: f32, height: f32, marker: f32, padding: f32) -> GameResult<()> {
    let fits = |dim: f32| dim - 2.0 * padding - marker >= 0.0;
    if fits(width) && fits(height) {
        Ok(())
    } else {
        Err(GameError::ViewportTooSmall {
            width,
            height,
            marker,
            padding,
        })
    }
}
