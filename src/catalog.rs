//! World catalog: the fixed set of creature spawn points.
//!
//! The catalog is generated once from a heading × depth grid and never
//! mutated.  Species templates are dealt round-robin across the grid, so
//! every species appears at several headings and depths.

use crate::error::{GameError, GameResult};
use std::collections::{HashMap, HashSet};

/// A creature species the player can discover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeciesTemplate {
    pub id: &'static str,
    pub name: &'static str,
    /// Asset path of the creature sprite; doubles as the unlock key.
    pub image: &'static str,
}

/// The five species living in the abyss.
pub const SPECIES_BASE: [SpeciesTemplate; 5] = [
    SpeciesTemplate {
        id: "batatita",
        name: "BATATITA",
        image: "species/batatita.png",
    },
    SpeciesTemplate {
        id: "el_ojo_del_abismo",
        name: "EL OJO DEL ABISMO",
        image: "species/el_ojo_del_abismo.png",
    },
    SpeciesTemplate {
        id: "estrella_culona",
        name: "ESTRELLA CULONA",
        image: "species/estrella_culona.png",
    },
    SpeciesTemplate {
        id: "limon",
        name: "LIMÓN",
        image: "species/limon.png",
    },
    SpeciesTemplate {
        id: "pececito",
        name: "PECECITO",
        image: "species/pececito.png",
    },
];

/// A world-anchored spawn point.  Immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureSpawn {
    /// `"{species}_{heading}_{depth}"`, unique across the catalog.
    pub id: String,
    pub species_id: &'static str,
    pub name: &'static str,
    pub image: &'static str,
    /// Heading in whole degrees, `[0, 360)`.
    pub heading: i32,
    /// Depth in metres.
    pub depth: i32,
}

impl CreatureSpawn {
    pub fn new(template: &SpeciesTemplate, heading: i32, depth: i32) -> Self {
        Self {
            id: format!("{}_{}_{}", template.id, heading, depth),
            species_id: template.id,
            name: template.name,
            image: template.image,
            heading,
            depth,
        }
    }
}

/// Read-only registry of every spawn point in the world.
#[derive(Debug, Clone)]
pub struct WorldCatalog {
    spawns: Vec<CreatureSpawn>,
    index: HashMap<String, usize>,
    templates: Vec<SpeciesTemplate>,
}

impl WorldCatalog {
    /// Instantiate one spawn per (heading, depth) cell, headings outermost,
    /// dealing `templates` round-robin.
    pub fn from_grid(
        headings: &[i32],
        depths: &[i32],
        templates: &[SpeciesTemplate],
    ) -> GameResult<Self> {
        if templates.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        let spawns = headings
            .iter()
            .flat_map(|&h| depths.iter().map(move |&d| (h, d)))
            .enumerate()
            .map(|(i, (h, d))| CreatureSpawn::new(&templates[i % templates.len()], h, d))
            .collect();
        Self::from_spawns(spawns, templates)
    }

    /// Build from an explicit spawn list.  Duplicate ids keep the first entry.
    pub fn from_spawns(
        spawns: Vec<CreatureSpawn>,
        templates: &[SpeciesTemplate],
    ) -> GameResult<Self> {
        if spawns.is_empty() {
            return Err(GameError::EmptyCatalog);
        }
        let mut index = HashMap::with_capacity(spawns.len());
        for (i, spawn) in spawns.iter().enumerate() {
            index.entry(spawn.id.clone()).or_insert(i);
        }
        Ok(Self {
            spawns,
            index,
            templates: templates.to_vec(),
        })
    }

    /// The default 6 × 7 grid over the five base species.
    pub fn standard(headings: &[i32], depths: &[i32]) -> GameResult<Self> {
        Self::from_grid(headings, depths, &SPECIES_BASE)
    }

    pub fn spawns(&self) -> &[CreatureSpawn] {
        &self.spawns
    }

    pub fn get(&self, id: &str) -> Option<&CreatureSpawn> {
        self.index.get(id).map(|&i| &self.spawns[i])
    }

    pub fn len(&self) -> usize {
        self.spawns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spawns.is_empty()
    }

    /// Species templates in encyclopedia order.
    pub fn templates(&self) -> &[SpeciesTemplate] {
        &self.templates
    }

    /// Number of distinct species images; catching all of them wins the game.
    pub fn species_count(&self) -> usize {
        self.templates
            .iter()
            .map(|t| t.image)
            .collect::<HashSet<_>>()
            .len()
    }
}
