use junctions::geometry::Point2;
use junctions::junction::{Road, Tee};
use junctions::network::{LaneHandle, Network};

/// A T-junction (speed limit 2) fed by a long straight road (speed limit
/// 4, twice the junction's) connected into the Tee's main lane `a`.
///
/// `branch_radius = 7.5` and `lane_separation = 5.0` give the turning arcs
/// their characteristic lengths: inner lanes (`c`, `e`) are `7.5 * pi/2`,
/// outer lanes (`d`, `f`) are `12.5 * pi/2`.
pub fn simple_t_junction_network() -> (Network, String, String) {
    let mut network = Network::new();
    let tee = network
        .add_junction(
            Tee::new(Point2::new(0.0, 0.0), 0.0, 20.0, 5.0),
            Some("tee1".to_owned()),
            Some(2.0),
        )
        .unwrap();
    let feeder = network
        .add_junction(
            Road::new(Point2::new(0.0, -1000.0), 0.0, 1000.0, 4.0),
            Some("feeder1".to_owned()),
            Some(4.0),
        )
        .unwrap();
    network
        .connect_lanes(
            LaneHandle::new(feeder.clone(), "a"),
            LaneHandle::new(tee.clone(), "a"),
        )
        .unwrap();
    (network, tee, feeder)
}
