//! Anchor layout: per-session screen offsets that spread simultaneous markers.
//!
//! Slots sit on concentric rings around the viewport centre (one centre slot,
//! then `slots_per_ring` slots per ring).  At the start of a session the slot
//! indices are shuffled; creatures take the next slot from that order the first
//! time they are placed and keep it for the rest of the session, even while
//! off-screen.  Once every slot is taken the order is reused cyclically;
//! resulting collisions are left to the placement engine's overlap pass.

use crate::config::GameConfig;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;
use std::f32::consts::TAU;

/// Pixel offset from the marker's base position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnchorSlot {
    pub dx: f32,
    pub dy: f32,
}

/// Build the ring layout: centre first, then ring 1, ring 2, ...
pub fn ring_slots(rings: usize, slots_per_ring: usize, ring_step: f32) -> Vec<AnchorSlot> {
    let mut slots = vec![AnchorSlot::default()];
    for ring in 1..=rings {
        let radius = ring as f32 * ring_step;
        for i in 0..slots_per_ring {
            let angle = i as f32 / slots_per_ring as f32 * TAU;
            slots.push(AnchorSlot {
                dx: angle.cos() * radius,
                dy: angle.sin() * radius,
            });
        }
    }
    slots
}

#[derive(Debug, Clone, Default)]
pub struct AnchorLayout {
    slots: Vec<AnchorSlot>,
    order: Vec<usize>,
    assigned: HashMap<String, usize>,
}

impl AnchorLayout {
    pub fn new(slots: Vec<AnchorSlot>) -> Self {
        Self {
            order: (0..slots.len()).collect(),
            slots,
            assigned: HashMap::new(),
        }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(ring_slots(
            config.anchor_rings,
            config.anchor_slots_per_ring,
            config.anchor_ring_step,
        ))
    }

    /// Shuffle the slot order and forget every assignment.
    pub fn seed_layout_order<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.order = (0..self.slots.len()).collect();
        self.order.shuffle(rng);
        self.assigned.clear();
    }

    /// Slot index for `entity_id`, assigning the next one from the shuffled
    /// order on first sight.  `None` only when the layout has no slots.
    pub fn slot_index_for(&mut self, entity_id: &str) -> Option<usize> {
        if let Some(&index) = self.assigned.get(entity_id) {
            return Some(index);
        }
        if self.order.is_empty() {
            return None;
        }
        let index = self.order[self.assigned.len() % self.order.len()];
        self.assigned.insert(entity_id.to_owned(), index);
        Some(index)
    }

    /// Offset for `entity_id`; a layout without slots yields no offset.
    pub fn slot_for(&mut self, entity_id: &str) -> AnchorSlot {
        self.slot_index_for(entity_id)
            .and_then(|i| self.slots.get(i).copied())
            .unwrap_or_default()
    }

    /// Previously assigned slot index, without assigning.
    pub fn assigned_slot(&self, entity_id: &str) -> Option<usize> {
        self.assigned.get(entity_id).copied()
    }

    pub fn slots(&self) -> &[AnchorSlot] {
        &self.slots
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn assigned_count(&self) -> usize {
        self.assigned.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn seeded(seed: u64) -> AnchorLayout {
        let mut layout = AnchorLayout::from_config(&GameConfig::default());
        layout.seed_layout_order(&mut StdRng::seed_from_u64(seed));
        layout
    }

    #[test]
    fn ring_layout_has_centre_and_two_rings() {
        let slots = ring_slots(2, 8, 90.0);
        assert_eq!(slots.len(), 17);
        assert_eq!(slots[0], AnchorSlot::default());
        assert!((slots[1].dx - 90.0).abs() < 1e-4);
        assert!((slots[9].dx - 180.0).abs() < 1e-4);
        // Quarter turn on ring 1 points straight down the +y axis.
        assert!(slots[3].dx.abs() < 1e-3);
        assert!((slots[3].dy - 90.0).abs() < 1e-3);
    }

    #[test]
    fn order_is_a_permutation() {
        let layout = seeded(11);
        let mut sorted = layout.order().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..17).collect::<Vec<_>>());
    }

    #[test]
    fn same_seed_same_order() {
        assert_eq!(seeded(99).order(), seeded(99).order());
    }

    #[test]
    fn first_assignments_follow_the_order() {
        let mut layout = seeded(3);
        let order = layout.order().to_vec();
        assert_eq!(layout.slot_index_for("a"), Some(order[0]));
        assert_eq!(layout.slot_index_for("b"), Some(order[1]));
        assert_eq!(layout.slot_index_for("a"), Some(order[0]), "assignment is sticky");
        assert_eq!(layout.assigned_count(), 2);
    }

    #[test]
    fn assignments_wrap_once_slots_run_out() {
        let mut layout = seeded(5);
        let order = layout.order().to_vec();
        for i in 0..17 {
            layout.slot_index_for(&format!("spawn{i}"));
        }
        assert_eq!(layout.slot_index_for("late"), Some(order[0]));
    }

    #[test]
    fn reseeding_forgets_assignments() {
        let mut layout = seeded(1);
        layout.slot_index_for("a");
        layout.seed_layout_order(&mut StdRng::seed_from_u64(2));
        assert_eq!(layout.assigned_slot("a"), None);
        assert_eq!(layout.assigned_count(), 0);
    }

    #[test]
    fn empty_layout_gives_zero_offset() {
        let mut layout = AnchorLayout::new(Vec::new());
        assert_eq!(layout.slot_for("x"), AnchorSlot::default());
        assert_eq!(layout.slot_index_for("x"), None);
    }
}
