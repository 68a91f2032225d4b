//! Caught samples and the species encyclopedia.

use crate::constants::{
    READING_O2_CONCENTRATION, READING_O2_SATURATION, READING_SALINITY, READING_TEMPERATURE,
};
use rand::Rng;
use std::collections::HashSet;

/// Environmental labels snapshotted into each sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentReadings {
    pub temperature: &'static str,
    pub salinity: &'static str,
    pub o2_concentration: &'static str,
    pub o2_saturation: &'static str,
}

impl Default for EnvironmentReadings {
    fn default() -> Self {
        Self {
            temperature: READING_TEMPERATURE,
            salinity: READING_SALINITY,
            o2_concentration: READING_O2_CONCENTRATION,
            o2_saturation: READING_O2_SATURATION,
        }
    }
}

/// A caught creature.  Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryItem {
    /// `"AN-nnn"`, unique within the inventory.
    pub id: String,
    pub name: &'static str,
    pub image: &'static str,
    /// Heading label at catch time, e.g. `"60 *"`.
    pub heading: String,
    /// Depth label at catch time, e.g. `"1300 m"`.
    pub depth: String,
    pub readings: EnvironmentReadings,
}

/// Heading as shown in the HUD and on sample cards.
pub fn heading_label(heading: i32) -> String {
    format!("{heading} *")
}

/// Depth as shown in the HUD and on sample cards.
pub fn depth_label(depth: i32) -> String {
    format!("{depth} m")
}

/// Capacity-bounded list of caught samples, in catch order.
#[derive(Debug, Clone)]
pub struct Inventory {
    items: Vec<InventoryItem>,
    capacity: usize,
}

impl Inventory {
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.items.iter().any(|i| i.id == id)
    }

    /// Draw a fresh `"AN-nnn"` token not used by any held sample.
    ///
    /// Only a full `AN-000`..`AN-999` range falls back to a sequential suffix.
    pub fn fresh_id<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        for _ in 0..64 {
            let candidate = format!("AN-{:03}", rng.gen_range(0..1000));
            if !self.contains_id(&candidate) {
                return candidate;
            }
        }
        (1000..)
            .map(|n| format!("AN-{n}"))
            .find(|c| !self.contains_id(c))
            .unwrap_or_default()
    }

    /// Append a sample.  Hands the item back when the inventory is full.
    pub fn push(&mut self, item: InventoryItem) -> Result<(), InventoryItem> {
        if self.is_full() {
            return Err(item);
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove the sample with `id`.  Unknown ids are ignored.
    pub fn release(&mut self, id: &str) -> Option<InventoryItem> {
        let index = self.items.iter().position(|i| i.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// Species image keys ever caught.  Grows until an explicit reset.
#[derive(Debug, Clone, Default)]
pub struct UnlockedSpecies(HashSet<String>);

impl UnlockedSpecies {
    /// Returns `true` if the species was newly unlocked.
    pub fn unlock(&mut self, image: &str) -> bool {
        self.0.insert(image.to_owned())
    }

    pub fn contains(&self, image: &str) -> bool {
        self.0.contains(image)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn item(id: &str) -> InventoryItem {
        InventoryItem {
            id: id.to_owned(),
            name: "LIMÓN",
            image: "species/limon.png",
            heading: heading_label(0),
            depth: depth_label(1200),
            readings: EnvironmentReadings::default(),
        }
    }

    #[test]
    fn labels_match_hud_format() {
        assert_eq!(heading_label(355), "355 *");
        assert_eq!(depth_label(1200), "1200 m");
    }

    #[test]
    fn push_stops_at_capacity() {
        let mut inv = Inventory::new(2);
        assert!(inv.push(item("AN-001")).is_ok());
        assert!(inv.push(item("AN-002")).is_ok());
        let rejected = inv.push(item("AN-003")).unwrap_err();
        assert_eq!(rejected.id, "AN-003");
        assert_eq!(inv.len(), 2);
        assert!(inv.is_full());
    }

    #[test]
    fn release_removes_exactly_one() {
        let mut inv = Inventory::new(9);
        for id in ["AN-001", "AN-002", "AN-003"] {
            inv.push(item(id)).unwrap();
        }
        assert_eq!(inv.release("AN-002").map(|i| i.id), Some("AN-002".to_owned()));
        let ids: Vec<_> = inv.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, ["AN-001", "AN-003"]);
        assert!(inv.release("AN-404").is_none());
        assert_eq!(inv.len(), 2);
    }

    #[test]
    fn fresh_ids_avoid_held_samples() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut inv = Inventory::new(9);
        for _ in 0..9 {
            let id = inv.fresh_id(&mut rng);
            assert!(id.starts_with("AN-"));
            assert!(!inv.contains_id(&id));
            inv.push(item(&id)).unwrap();
        }
    }

    #[test]
    fn unlock_is_idempotent() {
        let mut unlocked = UnlockedSpecies::default();
        assert!(unlocked.unlock("species/limon.png"));
        assert!(!unlocked.unlock("species/limon.png"));
        assert_eq!(unlocked.len(), 1);
        unlocked.clear();
        assert!(unlocked.is_empty());
    }
}
