//! Visibility selector: which spawn points are on screen for a camera pose.
//!
//! Every candidate is scored by its normalised distance from the camera,
//!
//! ```text
//! score = √((dh / heading_window)² + (dd / depth_window)²)
//! ```
//!
//! filtered to those inside *either* window, ranked by score, and capped at
//! `max_visible`.  If nothing passes the filter the single best-scoring spawn
//! is shown anyway, so the scene is never empty.

use crate::catalog::CreatureSpawn;
use crate::config::GameConfig;
use crate::coords::angular_distance;
use std::cmp::Ordering;

/// Tolerances and cap used by [`select_visible`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibilityWindow {
    pub heading_deg: f32,
    pub depth_m: f32,
    pub max_visible: usize,
}

impl From<&GameConfig> for VisibilityWindow {
    fn from(config: &GameConfig) -> Self {
        Self {
            heading_deg: config.heading_window_deg,
            depth_m: config.depth_window_m,
            max_visible: config.max_visible,
        }
    }
}

/// A spawn with its distance from the camera.
#[derive(Debug, Clone, Copy)]
pub struct ScoredSpawn<'a> {
    pub spawn: &'a CreatureSpawn,
    /// Shortest angular distance, `[0, 180]`.
    pub dh: i32,
    /// Absolute depth difference.
    pub dd: i32,
    pub score: f32,
}

impl ScoredSpawn<'_> {
    fn in_window(&self, window: &VisibilityWindow) -> bool {
        self.dh as f32 <= window.heading_deg || self.dd as f32 <= window.depth_m
    }
}

/// Score a single spawn against a camera pose.
pub fn score_spawn<'a>(
    spawn: &'a CreatureSpawn,
    heading: i32,
    depth: i32,
    window: &VisibilityWindow,
) -> ScoredSpawn<'a> {
    let dh = angular_distance(heading, spawn.heading);
    let dd = (depth as i64 - spawn.depth as i64).unsigned_abs().min(i32::MAX as u64) as i32;
    let score = (dh as f32 / window.heading_deg).hypot(dd as f32 / window.depth_m);
    ScoredSpawn {
        spawn,
        dh,
        dd,
        score,
    }
}

fn by_score(a: &ScoredSpawn<'_>, b: &ScoredSpawn<'_>) -> Ordering {
    a.score.total_cmp(&b.score)
}

/// Select the spawns to show for camera `heading` / `depth`.
///
/// Ordering is ascending score; equal scores keep candidate order.  Returns an
/// empty list only when `candidates` is empty.
pub fn select_visible<'a, I>(
    candidates: I,
    heading: i32,
    depth: i32,
    window: &VisibilityWindow,
) -> Vec<ScoredSpawn<'a>>
where
    I: IntoIterator<Item = &'a CreatureSpawn>,
{
    let scored: Vec<_> = candidates
        .into_iter()
        .map(|spawn| score_spawn(spawn, heading, depth, window))
        .collect();

    let mut selected: Vec<_> = scored.iter().copied().filter(|s| s.in_window(window)).collect();
    selected.sort_by(by_score);
    selected.truncate(window.max_visible);

    if selected.is_empty() {
        // Fallback: never leave the scene without a target.
        if let Some(best) = scored.into_iter().min_by(by_score) {
            selected.push(best);
        }
    }
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{WorldCatalog, SPECIES_BASE};
    use crate::constants::{CATALOG_DEPTHS, CATALOG_HEADINGS};

    fn window() -> VisibilityWindow {
        VisibilityWindow::from(&GameConfig::default())
    }

    fn ids(selected: &[ScoredSpawn<'_>]) -> Vec<String> {
        selected.iter().map(|s| s.spawn.id.clone()).collect()
    }

    #[test]
    fn home_pose_picks_exact_match_first() {
        let catalog = WorldCatalog::standard(&CATALOG_HEADINGS, &CATALOG_DEPTHS).unwrap();
        let selected = select_visible(catalog.spawns(), 0, 1200, &window());
        assert_eq!(
            ids(&selected),
            vec![
                "batatita_0_1200",
                "el_ojo_del_abismo_0_1300",
                "estrella_culona_60_1200",
                "batatita_300_1200",
            ]
        );
        assert_eq!(selected[0].score, 0.0);
        assert!((selected[1].score - 1.25).abs() < 1e-6);
        assert!((selected[2].score - 1.5).abs() < 1e-6);
    }

    #[test]
    fn either_axis_qualifies() {
        let near_heading = CreatureSpawn::new(&SPECIES_BASE[0], 10, 5000);
        let near_depth = CreatureSpawn::new(&SPECIES_BASE[1], 170, 1210);
        let neither = CreatureSpawn::new(&SPECIES_BASE[2], 170, 5000);
        let spawns = [near_heading, near_depth, neither];
        let selected = select_visible(&spawns, 0, 1200, &window());
        assert_eq!(selected.len(), 2);
        assert!(selected.iter().all(|s| s.spawn.species_id != SPECIES_BASE[2].id));
    }

    #[test]
    fn window_edges_are_inclusive() {
        let spawn = CreatureSpawn::new(&SPECIES_BASE[0], 40, 9000);
        let selected = select_visible(std::slice::from_ref(&spawn), 0, 0, &window());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].dh, 40);
    }

    #[test]
    fn fallback_returns_single_closest() {
        let far = CreatureSpawn::new(&SPECIES_BASE[0], 180, 6000);
        let farther = CreatureSpawn::new(&SPECIES_BASE[1], 180, 9000);
        let spawns = [farther, far];
        let selected = select_visible(&spawns, 0, 0, &window());
        assert_eq!(ids(&selected), vec!["batatita_180_6000"]);
    }

    #[test]
    fn cap_limits_selection() {
        let catalog = WorldCatalog::standard(&CATALOG_HEADINGS, &CATALOG_DEPTHS).unwrap();
        let narrow = VisibilityWindow {
            max_visible: 2,
            ..window()
        };
        assert_eq!(select_visible(catalog.spawns(), 30, 1500, &narrow).len(), 2);
    }

    #[test]
    fn empty_candidates_yield_nothing() {
        let none: [CreatureSpawn; 0] = [];
        assert!(select_visible(&none, 0, 0, &window()).is_empty());
    }
}
