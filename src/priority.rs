//! Pure computation of which lanes must currently yield: a lane is flagged
//! when a lane with priority over it is directly occupied, or when a
//! feeder of such a priority lane projects a vehicle arriving before the
//! waiting lane's own entrant could clear it.

use std::collections::{HashMap, HashSet};

use crate::geometry::Curve;
use crate::network::{LaneHandle, Network};
use crate::store::VehicleStore;

/// The set of lanes currently required to wait before entering.
#[derive(Debug, Clone, Default)]
pub struct WaitFlags {
    waiting: HashSet<LaneHandle>,
}

impl WaitFlags {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, lane: &LaneHandle) -> bool {
        self.waiting.contains(lane)
    }

    pub fn set(&mut self, lane: LaneHandle, waiting: bool) {
        if waiting {
            self.waiting.insert(lane);
        } else {
            self.waiting.remove(&lane);
        }
    }

    #[must_use]
    pub fn waiting_lanes(&self) -> impl Iterator<Item = &LaneHandle> {
        self.waiting.iter()
    }
}

/// Time a vehicle at the start of `lane` needs to fully clear it at the
/// speed limit.
fn clear_time(network: &Network, lane: &LaneHandle) -> Option<f64> {
    let length = network.lane(lane).ok().map(Curve::length)?;
    let limit = network.speed_limit(lane).ok()?;
    Some(length / limit)
}

fn is_occupied(store: &VehicleStore, lane: &LaneHandle) -> bool {
    !store.positions_by_lane(lane).is_empty()
}

/// Projected time for the leading (largest-position) vehicle on `lane` to
/// reach its end, or `None` if `lane` is empty.
fn leader_time_to_end(network: &Network, store: &VehicleStore, lane: &LaneHandle) -> Option<f64> {
    let length = network.lane(lane).ok().map(Curve::length)?;
    let limit = network.speed_limit(lane).ok()?;
    let last_position = store.positions_by_lane(lane).last()?.0;
    Some((length - last_position) / limit)
}

/// Derives the current wait flags for every lane with at least one
/// priority lane, given the network topology and vehicle positions.
#[must_use]
pub fn priority_wait(network: &Network, store: &VehicleStore) -> WaitFlags {
    let mut flags = WaitFlags::new();
    let mut feeder_cache: HashMap<LaneHandle, Vec<LaneHandle>> = HashMap::new();

    for lane in network.all_lanes() {
        let priority_lanes = network.priority_lanes(&lane);
        if priority_lanes.is_empty() {
            continue;
        }

        let Some(lane_clear_time) = clear_time(network, &lane) else {
            continue;
        };

        let mut must_wait = false;
        'priority: for priority_lane in &priority_lanes {
            if is_occupied(store, priority_lane) {
                must_wait = true;
                break 'priority;
            }

            let feeders = feeder_cache
                .entry(priority_lane.clone())
                .or_insert_with(|| network.feeder_lanes(priority_lane));
            for feeder in feeders.iter() {
                if let Some(eta) = leader_time_to_end(network, store, feeder) {
                    if eta < lane_clear_time {
                        must_wait = true;
                        break 'priority;
                    }
                }
            }
        }
        flags.set(lane, must_wait);
    }

    flags
}
