//! Drives one simulation tick: refreshes wait flags, advances vehicles
//! under speed-limit and following-distance constraints, then plans and
//! applies lane-boundary transitions.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::network::{LaneHandle, Network};
use crate::priority::{priority_wait, WaitFlags};
use crate::store::{VehicleId, VehicleStore};

/// Minimum allowed gap between consecutive vehicles on the same lane
/// before the follower is held for the tick.
pub const SEPARATION_MIN: f64 = 5.0;

enum Change {
    Move {
        id: VehicleId,
        lane: LaneHandle,
        position: f64,
    },
    Remove(VehicleId),
}

/// Owns the mutable vehicle store and drives it forward tick by tick
/// against a read-only network.
pub struct Stepper<'n> {
    network: &'n Network,
    store: VehicleStore,
    wait_flags: Option<WaitFlags>,
    planned_next_lane: HashMap<VehicleId, LaneHandle>,
    rng: ChaCha8Rng,
}

impl<'n> Stepper<'n> {
    #[must_use]
    pub fn new(network: &'n Network, store: VehicleStore, seed: u64) -> Self {
        Self {
            network,
            store,
            wait_flags: None,
            planned_next_lane: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    #[must_use]
    pub fn store(&self) -> &VehicleStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut VehicleStore {
        &mut self.store
    }

    #[must_use]
    pub fn wait_flags(&self) -> Option<&WaitFlags> {
        self.wait_flags.as_ref()
    }

    /// Advances the simulation by `dt`. A non-positive `dt` still refreshes
    /// wait flags but moves nothing.
    pub fn step(&mut self, dt: f64) {
        let flags = priority_wait(self.network, &self.store);
        log::trace!("wait flags refreshed: {} lane(s) waiting", flags_len(&flags));
        self.wait_flags = Some(flags);
        self.advance_positions(dt);
        let changes = self.plan_transitions();
        self.apply_changes(changes);
    }

    fn advance_positions(&mut self, dt: f64) {
        if dt <= 0.0 {
            return;
        }
        for lane in self.network.all_lanes() {
            let Ok(limit) = self.network.speed_limit(&lane) else {
                continue;
            };
            let step_distance = limit * dt;
            let slots = self.store.positions_by_lane(&lane).to_vec();
            if slots.is_empty() {
                continue;
            }
            let mut increments = vec![step_distance; slots.len()];
            for i in 0..slots.len().saturating_sub(1) {
                let gap = slots[i + 1].0 - slots[i].0;
                if gap < SEPARATION_MIN {
                    increments[i] = 0.0;
                }
            }
            for (i, &(position, id)) in slots.iter().enumerate() {
                if increments[i] != 0.0 {
                    self.store
                        .set_position(id, position + increments[i])
                        .expect("id came from this store's own positions_by_lane");
                }
            }
        }
    }

    fn plan_transitions(&mut self) -> Vec<Change> {
        let mut changes = Vec::new();
        let wait_flags = self.wait_flags.clone().unwrap_or_default();

        for lane in self.network.all_lanes() {
            let Ok(length) = self.network.lane(&lane).map(crate::geometry::Curve::length) else {
                continue;
            };
            let Ok(limit) = self.network.speed_limit(&lane) else {
                continue;
            };
            let past_end: Vec<(f64, VehicleId)> = self
                .store
                .positions_by_lane(&lane)
                .iter()
                .copied()
                .filter(|&(position, _)| position >= length)
                .collect();

            for (position, id) in past_end {
                let next_lane = if let Some(planned) = self.planned_next_lane.get(&id) {
                    Some(planned.clone())
                } else {
                    let connected = self.network.connected_lanes(&lane);
                    let choice = connected.choose(&mut self.rng).cloned();
                    if let Some(choice) = &choice {
                        self.planned_next_lane.insert(id, choice.clone());
                    }
                    choice
                };

                match next_lane {
                    None => {
                        log::debug!("retiring vehicle {id:?}: no outgoing connection from {lane:?}");
                        changes.push(Change::Remove(id));
                    }
                    Some(next) if wait_flags.get(&next) => {
                        log::trace!("vehicle {id:?} blocked at boundary of {lane:?}");
                        changes.push(Change::Move {
                            id,
                            lane: lane.clone(),
                            position: length,
                        });
                    }
                    Some(next) => {
                        let Ok(next_limit) = self.network.speed_limit(&next) else {
                            continue;
                        };
                        let excess_time = (position - length) / limit;
                        let new_position = excess_time * next_limit;
                        self.planned_next_lane.remove(&id);
                        changes.push(Change::Move {
                            id,
                            lane: next,
                            position: new_position,
                        });
                    }
                }
            }
        }

        changes
    }

    fn apply_changes(&mut self, changes: Vec<Change>) {
        for change in changes {
            match change {
                Change::Remove(id) => {
                    self.store
                        .remove(id)
                        .expect("id was read from this tick's own store snapshot");
                }
                Change::Move { id, lane, position } => {
                    self.store
                        .switch_lane(id, lane, position)
                        .expect("id was read from this tick's own store snapshot");
                }
            }
        }
    }
}

fn flags_len(flags: &WaitFlags) -> usize {
    flags.waiting_lanes().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point2;
    use crate::junction::Road;
    use crate::network::Network;

    fn straight_road(label: &str, length: f64, limit: f64) -> (Network, LaneHandle) {
        let mut network = Network::new();
        let road_label = network
            .add_junction(
                Road::new(Point2::new(0.0, 0.0), 0.0, length, 4.0),
                Some(label.to_owned()),
                Some(limit),
            )
            .unwrap();
        (network, LaneHandle::new(road_label, "a"))
    }

    #[test]
    fn simple_step_advances_by_limit_times_dt() {
        let (network, lane) = straight_road("road", 100.0, 6.5);
        let mut store = VehicleStore::new();
        let id = store.create_vehicle(lane.clone(), 0.0);
        let mut stepper = Stepper::new(&network, store, 0);
        stepper.step(0.1);
        let (_, position) = stepper.store().get(id).unwrap();
        assert!((position - 0.65).abs() < 1e-9);
    }

    #[test]
    fn transition_to_faster_lane_crosses_with_excess_time() {
        let mut network = Network::new();
        let r1 = network
            .add_junction(
                Road::new(Point2::new(0.0, 0.0), 0.0, 7.0, 4.0),
                Some("r1".to_owned()),
                Some(10.0),
            )
            .unwrap();
        let r2 = network
            .add_junction(
                Road::new(Point2::new(0.0, 100.0), 0.0, 10.0, 4.0),
                Some("r2".to_owned()),
                Some(20.0),
            )
            .unwrap();
        let from = LaneHandle::new(r1, "a");
        let to = LaneHandle::new(r2, "a");
        network.connect_lanes(from.clone(), to.clone()).unwrap();

        let mut store = VehicleStore::new();
        let id = store.create_vehicle(from.clone(), 0.0);
        let mut stepper = Stepper::new(&network, store, 0);

        let expected = [1.5, 3.0, 4.5, 6.0];
        for &want in &expected {
            stepper.step(0.15);
            let (lane, position) = stepper.store().get(id).unwrap();
            assert_eq!(lane, from);
            assert!((position - want).abs() < 1e-9);
        }
        stepper.step(0.15);
        let (lane, position) = stepper.store().get(id).unwrap();
        assert_eq!(lane, to);
        assert!((position - 1.0).abs() < 1e-9);
    }

    #[test]
    fn follow_distance_suppresses_blocked_follower() {
        let (network, lane) = straight_road("road", 100.0, 10.0);
        let mut store = VehicleStore::new();
        let follower = store.create_vehicle(lane.clone(), 0.0);
        let leader = store.create_vehicle(lane.clone(), 4.5);
        let mut stepper = Stepper::new(&network, store, 0);

        stepper.step(0.1);
        assert!((stepper.store().get(leader).unwrap().1 - 5.5).abs() < 1e-9);
        assert!((stepper.store().get(follower).unwrap().1 - 0.0).abs() < 1e-9);

        stepper.step(0.1);
        assert!((stepper.store().get(leader).unwrap().1 - 6.5).abs() < 1e-9);
        assert!((stepper.store().get(follower).unwrap().1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn stacked_vehicles_break_tie_by_insertion_order() {
        let (network, lane) = straight_road("road", 100.0, 10.0);
        let mut store = VehicleStore::new();
        let first = store.create_vehicle(lane.clone(), 0.0);
        let second = store.create_vehicle(lane.clone(), 0.0);
        let mut stepper = Stepper::new(&network, store, 0);
        stepper.step(0.1);
        assert!((stepper.store().get(first).unwrap().1 - 0.0).abs() < 1e-9);
        assert!((stepper.store().get(second).unwrap().1 - 1.0).abs() < 1e-9);
    }

    #[test]
    fn retires_vehicle_with_no_outgoing_connection() {
        let (network, lane) = straight_road("road", 5.0, 10.0);
        let mut store = VehicleStore::new();
        let id = store.create_vehicle(lane, 4.9);
        let mut stepper = Stepper::new(&network, store, 0);
        stepper.step(0.1);
        assert!(stepper.store().get(id).is_err());
    }

    #[test]
    fn non_positive_dt_refreshes_flags_without_moving() {
        let (network, lane) = straight_road("road", 100.0, 10.0);
        let mut store = VehicleStore::new();
        let id = store.create_vehicle(lane, 3.0);
        let mut stepper = Stepper::new(&network, store, 0);
        stepper.step(0.0);
        assert!((stepper.store().get(id).unwrap().1 - 3.0).abs() < 1e-9);
        assert!(stepper.wait_flags().is_some());
    }
}
