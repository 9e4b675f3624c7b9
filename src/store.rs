//! Dual-indexed storage for vehicle positions: `O(log n)` ordered queries
//! within a lane, `O(1)` lookup by id.

use std::collections::HashMap;

use crate::error::StoreError;
use crate::network::LaneHandle;

/// Opaque vehicle identity. Never reused within a store's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(u128);

/// Positions of every vehicle in a network, indexed two ways: by lane (kept
/// sorted by position, ascending, for sweeps along a lane) and by id (for
/// direct lookup).
///
/// Invariant: every `(lane, slot)` stored in `by_id` is valid into
/// `by_lane[lane]`, and every entry in every `by_lane` vector has a
/// corresponding `by_id` entry — the two indices are kept in lockstep by
/// every mutating method.
#[derive(Debug, Clone, Default)]
pub struct VehicleStore {
    by_lane: HashMap<LaneHandle, Vec<(f64, VehicleId)>>,
    by_id: HashMap<VehicleId, (LaneHandle, usize)>,
    next_id: u128,
}

impl VehicleStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_id(&mut self) -> VehicleId {
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Inserts a new vehicle at `position` on `lane`. Ties on position are
    /// broken by insertion order: the new vehicle lands after any existing
    /// vehicle at the same position.
    pub fn create_vehicle(&mut self, lane: LaneHandle, position: f64) -> VehicleId {
        let id = self.fresh_id();
        let slots = self.by_lane.entry(lane.clone()).or_default();
        let index = slots.partition_point(|&(p, _)| p <= position);
        slots.insert(index, (position, id));
        self.reindex_from(&lane, index);
        id
    }

    /// Rebuilds `by_id` slot numbers for `slots[from..]` of `lane` after an
    /// insertion or removal shifted them.
    fn reindex_from(&mut self, lane: &LaneHandle, from: usize) {
        let slots = &self.by_lane[lane];
        for (slot, &(_, id)) in slots.iter().enumerate().skip(from) {
            self.by_id.insert(id, (lane.clone(), slot));
        }
    }

    pub fn get(&self, id: VehicleId) -> Result<(LaneHandle, f64), StoreError> {
        let (lane, slot) = self
            .by_id
            .get(&id)
            .ok_or(StoreError::UnknownVehicle(id))?;
        let (position, _) = self.by_lane[lane][*slot];
        Ok((lane.clone(), position))
    }

    /// Updates `id`'s position in place, preserving its slot (callers are
    /// responsible for only advancing positions in ways that keep the lane
    /// sorted; see [`crate::stepper::Stepper`]).
    pub fn set_position(&mut self, id: VehicleId, position: f64) -> Result<(), StoreError> {
        let &(ref lane, slot) = self.by_id.get(&id).ok_or(StoreError::UnknownVehicle(id))?;
        let lane = lane.clone();
        self.by_lane.get_mut(&lane).unwrap()[slot].0 = position;
        Ok(())
    }

    /// Moves `id` onto `lane` at `position`, removing it from its previous
    /// lane first.
    pub fn switch_lane(
        &mut self,
        id: VehicleId,
        lane: LaneHandle,
        position: f64,
    ) -> Result<(), StoreError> {
        self.remove(id)?;
        let slots = self.by_lane.entry(lane.clone()).or_default();
        let index = slots.partition_point(|&(p, _)| p <= position);
        slots.insert(index, (position, id));
        self.reindex_from(&lane, index);
        Ok(())
    }

    pub fn remove(&mut self, id: VehicleId) -> Result<(), StoreError> {
        let (lane, slot) = self
            .by_id
            .remove(&id)
            .ok_or(StoreError::UnknownVehicle(id))?;
        let slots = self.by_lane.get_mut(&lane).unwrap();
        slots.remove(slot);
        self.reindex_from(&lane, slot);
        Ok(())
    }

    /// Positions on `lane`, sorted ascending.
    #[must_use]
    pub fn positions_by_lane(&self, lane: &LaneHandle) -> &[(f64, VehicleId)] {
        self.by_lane.get(lane).map_or(&[], Vec::as_slice)
    }

    /// Vehicle ids on `lane`, in position order.
    #[must_use]
    pub fn ids_by_lane(&self, lane: &LaneHandle) -> Vec<VehicleId> {
        self.positions_by_lane(lane).iter().map(|&(_, id)| id).collect()
    }

    /// All non-empty lanes and the vehicles on each, in position order.
    #[must_use]
    pub fn group_by_lane(&self) -> HashMap<LaneHandle, Vec<VehicleId>> {
        self.by_lane
            .iter()
            .filter(|(_, slots)| !slots.is_empty())
            .map(|(lane, slots)| (lane.clone(), slots.iter().map(|&(_, id)| id).collect()))
            .collect()
    }

    /// A deep, independent copy: mutating the clone never affects `self`.
    #[must_use]
    pub fn snapshot(&self) -> Self {
        self.clone()
    }
}
