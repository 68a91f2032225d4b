//! Game session controller.
//!
//! [`GameSession`] owns every piece of mutable game state (camera arm,
//! crosshair, anchor layout, placed creatures, inventory, unlocks, delayed
//! tasks) and is the only thing input handlers talk to.  Each operation runs
//! its dependent recomputation before returning:
//!
//! ```text
//! apply_arm        → refresh_visibility → retarget
//! nudge_crosshair  → retarget
//! catch            → schedule marker removal + respawn
//! advance(dt)      → due tasks → (respawn) refresh_visibility → retarget
//! ```
//!
//! Renderers read the results through accessors; nothing flows back in.

use crate::anchors::AnchorLayout;
use crate::catalog::WorldCatalog;
use crate::config::GameConfig;
use crate::constants::MASKED_NAME;
use crate::coords::{parallax_direction, ArmAxes, ArmAxis, Parallax};
use crate::error::{validate_viewport, GameResult};
use crate::inventory::{
    depth_label, heading_label, EnvironmentReadings, Inventory, InventoryItem, UnlockedSpecies,
};
use crate::placement::{base_position, resolve_overlap, PlacementParams, ScreenBox, Viewport};
use crate::scheduler::{Scheduler, TaskHandle};
use crate::targeting::{evaluate_target, Crosshair, PlacedCreature, TargetState};
use crate::visibility::{select_visible, VisibilityWindow};
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use std::time::Duration;

/// Work deferred by a catch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTask {
    /// The removal animation of a caught creature has finished.
    RemoveMarker { spawn_id: String },
    /// A caught spawn point may be shown again.
    Respawn { spawn_id: String },
}

/// Markers that left or joined the scene in one refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl VisibilityDiff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Why a catch request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatchRejection {
    SceneNotStarted,
    NoTarget,
    TargetMissing,
    InventoryFull,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatchOutcome {
    Caught {
        item_id: String,
        spawn_id: String,
        /// Every species is now unlocked.
        completed: bool,
    },
    Ignored(CatchRejection),
}

/// What the HUD shows for the current target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetReadout {
    /// Species name, or a mask while the species is still locked.
    pub name: &'static str,
    pub image: &'static str,
    pub unlocked: bool,
}

/// A caught creature playing its removal animation.
#[derive(Debug, Clone, PartialEq)]
pub struct DespawningMarker {
    pub creature: PlacedCreature,
    handle: TaskHandle,
}

/// Open/closed state of the two mutually exclusive panels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    pub inventory_open: bool,
    pub encyclopedia_open: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    config: GameConfig,
    catalog: WorldCatalog,
    arm: ArmAxes,
    parallax: Parallax,
    crosshair: Crosshair,
    layout: AnchorLayout,
    viewport: Option<Viewport>,
    placed: Vec<PlacedCreature>,
    despawning: Vec<DespawningMarker>,
    depleted: HashSet<String>,
    target: TargetState,
    inventory: Inventory,
    unlocked: UnlockedSpecies,
    panels: PanelState,
    win_visible: bool,
    tasks: Scheduler<SessionTask>,
    rng: StdRng,
}

impl GameSession {
    /// Session over the configured catalog grid, seeded from
    /// `config.layout_seed` or OS entropy.
    pub fn new(config: GameConfig) -> GameResult<Self> {
        let catalog = WorldCatalog::standard(&config.catalog_headings, &config.catalog_depths)?;
        let rng = match config.layout_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self::with_parts(config, catalog, rng))
    }

    pub fn with_parts(config: GameConfig, catalog: WorldCatalog, rng: StdRng) -> Self {
        Self {
            layout: AnchorLayout::from_config(&config),
            inventory: Inventory::new(config.inventory_capacity),
            config,
            catalog,
            arm: ArmAxes::default(),
            parallax: Parallax::default(),
            crosshair: Crosshair::default(),
            viewport: None,
            placed: Vec::new(),
            despawning: Vec::new(),
            depleted: HashSet::new(),
            target: TargetState::NoTarget,
            unlocked: UnlockedSpecies::default(),
            panels: PanelState::default(),
            win_visible: false,
            tasks: Scheduler::new(),
            rng,
        }
    }

    // ── Scene entry ───────────────────────────────────────────────────────────

    /// Initialise the scene once the game view is visible: seed the anchor
    /// order, centre the crosshair, run the first refresh and targeting pass.
    pub fn enter_scene(&mut self, viewport: Viewport) -> GameResult<VisibilityDiff> {
        validate_viewport(
            viewport.width,
            viewport.height,
            self.config.marker_size,
            self.config.viewport_padding,
        )?;
        self.viewport = Some(viewport);
        self.crosshair.center_in(&viewport, self.config.crosshair_size);
        self.layout.seed_layout_order(&mut self.rng);
        Ok(self.refresh_visibility())
    }

    pub fn scene_started(&self) -> bool {
        self.viewport.is_some()
    }

    // ── Input operations ──────────────────────────────────────────────────────

    /// One arm step: move the camera, pan the backdrop, refresh the scene.
    pub fn apply_arm(&mut self, axis: ArmAxis, delta: i32) -> VisibilityDiff {
        self.arm.apply_axis_delta(axis, delta);
        let (dx, dy) = parallax_direction(axis, delta);
        self.parallax.pan(
            dx,
            dy,
            self.config.parallax_step_px,
            self.config.parallax_wrap_steps,
        );
        self.refresh_visibility()
    }

    /// One crosshair step in whole-step units (`dy > 0` moves down).
    pub fn nudge_crosshair(&mut self, dx: i32, dy: i32) {
        let Some(viewport) = self.viewport else {
            return;
        };
        self.crosshair.nudge(
            dx,
            dy,
            self.config.crosshair_step,
            &viewport,
            self.config.crosshair_size,
        );
        self.retarget();
    }

    /// Recompute the visible set, place it, and re-evaluate the target.
    /// Does nothing before the scene has been entered.
    pub fn refresh_visibility(&mut self) -> VisibilityDiff {
        let Some(viewport) = self.viewport else {
            return VisibilityDiff::default();
        };
        let heading = self.heading();
        let depth = self.depth();
        let window = VisibilityWindow::from(&self.config);
        let params = PlacementParams::from(&self.config);

        let depleted = &self.depleted;
        let eligible = self
            .catalog
            .spawns()
            .iter()
            .filter(|s| !depleted.contains(&s.id));
        let selected = select_visible(eligible, heading, depth, &window);

        let mut boxes: Vec<ScreenBox> = Vec::with_capacity(selected.len());
        let mut placed = Vec::with_capacity(selected.len());
        for scored in &selected {
            let anchor = self.layout.slot_for(&scored.spawn.id);
            let base = base_position(scored.spawn, heading, depth, anchor, &viewport, &params);
            let rect = resolve_overlap(&boxes, base, &viewport, &params);
            boxes.push(rect);
            placed.push(PlacedCreature {
                spawn_id: scored.spawn.id.clone(),
                rect,
            });
        }

        let diff = VisibilityDiff {
            added: placed
                .iter()
                .filter(|p| !self.placed.iter().any(|old| old.spawn_id == p.spawn_id))
                .map(|p| p.spawn_id.clone())
                .collect(),
            removed: self
                .placed
                .iter()
                .filter(|old| !placed.iter().any(|p| p.spawn_id == old.spawn_id))
                .map(|old| old.spawn_id.clone())
                .collect(),
        };
        if !diff.is_empty() {
            debug!(
                "visible set at {heading}°/{depth} m: +{:?} -{:?}",
                diff.added, diff.removed
            );
        }

        self.placed = placed;
        self.retarget();
        diff
    }

    fn retarget(&mut self) {
        self.target = evaluate_target(&self.crosshair, &self.placed);
    }

    /// Catch the targeted creature.  Silently ignored without a target or
    /// with a full inventory.
    pub fn catch(&mut self) -> CatchOutcome {
        let outcome = self.try_catch();
        if let CatchOutcome::Ignored(reason) = &outcome {
            debug!("catch ignored: {reason:?}");
        }
        outcome
    }

    fn try_catch(&mut self) -> CatchOutcome {
        use CatchRejection::*;

        if !self.scene_started() {
            return CatchOutcome::Ignored(SceneNotStarted);
        }
        let Some(spawn_id) = self.target.spawn_id().map(str::to_owned) else {
            return CatchOutcome::Ignored(NoTarget);
        };
        let Some(index) = self.placed.iter().position(|p| p.spawn_id == spawn_id) else {
            return CatchOutcome::Ignored(TargetMissing);
        };
        let Some(spawn) = self.catalog.get(&spawn_id).cloned() else {
            return CatchOutcome::Ignored(TargetMissing);
        };
        if self.inventory.is_full() {
            return CatchOutcome::Ignored(InventoryFull);
        }

        let item = InventoryItem {
            id: self.inventory.fresh_id(&mut self.rng),
            name: spawn.name,
            image: spawn.image,
            heading: heading_label(self.heading()),
            depth: depth_label(self.depth()),
            readings: EnvironmentReadings::default(),
        };
        let item_id = item.id.clone();
        if self.inventory.push(item).is_err() {
            return CatchOutcome::Ignored(InventoryFull);
        }
        self.unlocked.unlock(spawn.image);

        let creature = self.placed.remove(index);
        let handle = self.tasks.schedule(
            Duration::from_millis(self.config.despawn_delay_ms),
            SessionTask::RemoveMarker {
                spawn_id: spawn_id.clone(),
            },
        );
        self.despawning.push(DespawningMarker { creature, handle });
        self.depleted.insert(spawn_id.clone());
        self.target = TargetState::NoTarget;
        self.tasks.schedule(
            Duration::from_millis(self.config.respawn_delay_ms),
            SessionTask::Respawn {
                spawn_id: spawn_id.clone(),
            },
        );

        let completed = self.unlocked.len() >= self.catalog.species_count();
        if completed {
            self.win_visible = true;
        }
        CatchOutcome::Caught {
            item_id,
            spawn_id,
            completed,
        }
    }

    /// Release a sample back to the sea.  Unknown ids are ignored; unlocks
    /// are kept.
    pub fn release(&mut self, item_id: &str) -> bool {
        let released = self.inventory.release(item_id).is_some();
        if !released {
            debug!("release ignored: no sample {item_id}");
        }
        released
    }

    /// Clear every sample and unlock and hide the win overlay.
    pub fn reset_progress(&mut self) {
        self.inventory.clear();
        self.unlocked.clear();
        self.win_visible = false;
    }

    pub fn dismiss_win(&mut self) {
        self.win_visible = false;
    }

    pub fn toggle_inventory(&mut self) {
        self.panels.inventory_open = !self.panels.inventory_open;
        if self.panels.inventory_open {
            self.panels.encyclopedia_open = false;
        }
    }

    pub fn toggle_encyclopedia(&mut self) {
        self.panels.encyclopedia_open = !self.panels.encyclopedia_open;
        if self.panels.encyclopedia_open {
            self.panels.inventory_open = false;
        }
    }

    // ── Timers ────────────────────────────────────────────────────────────────

    /// Advance the task clock and apply every task that fell due.
    pub fn advance(&mut self, dt: Duration) -> Vec<SessionTask> {
        let due = self.tasks.advance(dt);
        for task in &due {
            match task {
                SessionTask::RemoveMarker { spawn_id } => {
                    self.despawning.retain(|m| &m.creature.spawn_id != spawn_id);
                }
                SessionTask::Respawn { spawn_id } => {
                    self.depleted.remove(spawn_id);
                    self.refresh_visibility();
                }
            }
        }
        due
    }

    // ── Read access ───────────────────────────────────────────────────────────

    pub fn heading(&self) -> i32 {
        self.arm.heading(&self.config)
    }

    pub fn depth(&self) -> i32 {
        self.arm.depth(&self.config)
    }

    pub fn arm(&self) -> ArmAxes {
        self.arm
    }

    pub fn parallax(&self) -> Parallax {
        self.parallax
    }

    pub fn crosshair(&self) -> Crosshair {
        self.crosshair
    }

    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    pub fn placed(&self) -> &[PlacedCreature] {
        &self.placed
    }

    pub fn despawning(&self) -> &[DespawningMarker] {
        &self.despawning
    }

    /// Removal animation progress in `[0, 1]`.
    pub fn despawn_progress(&self, marker: &DespawningMarker) -> f32 {
        let total = self.config.despawn_delay_ms as f32;
        match self.tasks.remaining(marker.handle) {
            Some(left) if total > 0.0 => 1.0 - (left.as_millis() as f32 / total).min(1.0),
            _ => 1.0,
        }
    }

    pub fn is_depleted(&self, spawn_id: &str) -> bool {
        self.depleted.contains(spawn_id)
    }

    pub fn target(&self) -> &TargetState {
        &self.target
    }

    pub fn target_readout(&self) -> Option<TargetReadout> {
        let spawn = self.catalog.get(self.target.spawn_id()?)?;
        let unlocked = self.unlocked.contains(spawn.image);
        Some(TargetReadout {
            name: if unlocked { spawn.name } else { MASKED_NAME },
            image: spawn.image,
            unlocked,
        })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn unlocked(&self) -> &UnlockedSpecies {
        &self.unlocked
    }

    pub fn catalog(&self) -> &WorldCatalog {
        &self.catalog
    }

    pub fn layout(&self) -> &AnchorLayout {
        &self.layout
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn panels(&self) -> PanelState {
        self.panels
    }

    pub fn win_visible(&self) -> bool {
        self.win_visible
    }

    pub fn pending_tasks(&self) -> usize {
        self.tasks.pending()
    }
}

// ── Startup ───────────────────────────────────────────────────────────────────

/// Build the session from the loaded [`GameConfig`].
///
/// Must run after [`crate::config::load_game_config`].  Game systems are gated
/// on the resource existing, so a failure here leaves the intro usable.
pub fn init_session(mut commands: Commands, config: Res<GameConfig>) {
    match GameSession::new(config.clone()) {
        Ok(session) => {
            info!(
                "session ready: {} spawns, {} species, inventory capacity {}",
                session.catalog().len(),
                session.catalog().species_count(),
                session.inventory().capacity()
            );
            commands.insert_resource(session);
        }
        Err(e) => error!("game session could not be created: {e}"),
    }
}
