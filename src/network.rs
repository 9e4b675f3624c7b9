//! A directed network of junctions and the lanes connecting them.

use std::collections::HashMap;

use crate::error::NetworkError;
use crate::geometry::Lane;
use crate::junction::Junction;

/// Default speed limit (length units per time unit) applied to a junction
/// when none is given to [`Network::add_junction`].
pub const DEFAULT_SPEED_LIMIT: f64 = 10.0;

/// A reference to one lane within one junction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LaneHandle {
    pub junction_label: String,
    pub lane_label: String,
}

impl LaneHandle {
    pub fn new(junction_label: impl Into<String>, lane_label: impl Into<String>) -> Self {
        Self {
            junction_label: junction_label.into(),
            lane_label: lane_label.into(),
        }
    }
}

/// Owns the network's junctions and the directed connections between their
/// lanes.
#[derive(Debug, Clone, Default)]
pub struct Network {
    junctions: HashMap<String, Junction>,
    speed_limits: HashMap<String, f64>,
    connections: HashMap<LaneHandle, Vec<LaneHandle>>,
}

impl Network {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower-cased type name followed by the smallest unused positive
    /// integer suffix among existing labels with that same prefix.
    fn make_junction_label(&self, junction: &Junction) -> String {
        let prefix = junction.type_prefix();
        let next = self
            .junctions
            .keys()
            .filter_map(|label| label.strip_prefix(prefix))
            .filter_map(|suffix| suffix.parse::<u32>().ok())
            .max()
            .map_or(1, |max| max + 1);
        format!("{prefix}{next}")
    }

    /// Inserts `junction`, returning the label it was stored under. Uses
    /// `label` if given, otherwise synthesizes one from the junction's type.
    pub fn add_junction(
        &mut self,
        junction: impl Into<Junction>,
        label: Option<String>,
        speed_limit: Option<f64>,
    ) -> Result<String, NetworkError> {
        let junction = junction.into();
        let label = match label {
            Some(label) => {
                if self.junctions.contains_key(&label) {
                    return Err(NetworkError::DuplicateLabel(label));
                }
                label
            }
            None => self.make_junction_label(&junction),
        };
        self.speed_limits
            .insert(label.clone(), speed_limit.unwrap_or(DEFAULT_SPEED_LIMIT));
        self.junctions.insert(label.clone(), junction);
        Ok(label)
    }

    pub fn junction(&self, label: &str) -> Result<&Junction, NetworkError> {
        self.junctions
            .get(label)
            .ok_or_else(|| NetworkError::UnknownLabel {
                junction: label.to_owned(),
                lane: None,
            })
    }

    pub fn junction_labels(&self) -> impl Iterator<Item = &str> {
        self.junctions.keys().map(String::as_str)
    }

    pub fn lane_labels(&self, junction_label: &str) -> Result<&'static [&'static str], NetworkError> {
        Ok(self.junction(junction_label)?.lane_labels())
    }

    pub fn lane(&self, handle: &LaneHandle) -> Result<&Lane, NetworkError> {
        let junction = self.junction(&handle.junction_label)?;
        junction
            .lane(&handle.lane_label)
            .ok_or_else(|| NetworkError::UnknownLabel {
                junction: handle.junction_label.clone(),
                lane: Some(handle.lane_label.clone()),
            })
    }

    pub fn speed_limit(&self, lane: &LaneHandle) -> Result<f64, NetworkError> {
        self.lane(lane)?;
        Ok(self.speed_limits[&lane.junction_label])
    }

    /// All `(junction_label, lane_label)` pairs in the network, in
    /// unspecified order.
    #[must_use]
    pub fn all_lanes(&self) -> Vec<LaneHandle> {
        self.junctions
            .iter()
            .flat_map(|(label, junction)| {
                junction
                    .lane_labels()
                    .iter()
                    .map(move |lane_label| LaneHandle::new(label.clone(), *lane_label))
            })
            .collect()
    }

    /// Connects `from` to `to`: a vehicle reaching the end of `from` may
    /// continue onto `to`. Duplicate connections are preserved (a lane may
    /// legitimately connect to the same successor twice via different
    /// calls, though in practice callers avoid this).
    pub fn connect_lanes(&mut self, from: LaneHandle, to: LaneHandle) -> Result<(), NetworkError> {
        self.lane(&from)?;
        self.lane(&to)?;
        self.connections.entry(from).or_default().push(to);
        Ok(())
    }

    #[must_use]
    pub fn connected_lanes(&self, from: &LaneHandle) -> &[LaneHandle] {
        self.connections
            .get(from)
            .map_or(&[] as &[LaneHandle], Vec::as_slice)
    }

    /// Lanes that connect directly into `to` — the reverse of
    /// [`Network::connected_lanes`].
    #[must_use]
    pub fn feeder_lanes(&self, to: &LaneHandle) -> Vec<LaneHandle> {
        self.connections
            .iter()
            .filter(|(_, successors)| successors.contains(to))
            .map(|(from, _)| from.clone())
            .collect()
    }

    /// Lanes within the same junction as `lane` that have right of way over
    /// it.
    #[must_use]
    pub fn priority_lanes(&self, lane: &LaneHandle) -> Vec<LaneHandle> {
        let Ok(junction) = self.junction(&lane.junction_label) else {
            return Vec::new();
        };
        junction
            .priority_over_lane(&lane.lane_label)
            .iter()
            .map(|label| LaneHandle::new(lane.junction_label.clone(), *label))
            .collect()
    }
}
