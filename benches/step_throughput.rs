use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use junctions::geometry::Point2;
use junctions::junction::Road;
use junctions::network::{LaneHandle, Network};
use junctions::stepper::Stepper;
use junctions::store::VehicleStore;

fn populated_network(vehicle_count: usize) -> (Network, LaneHandle, VehicleStore) {
    let mut network = Network::new();
    let label = network
        .add_junction(
            Road::new(Point2::new(0.0, 0.0), 0.0, 10_000.0, 4.0),
            None,
            Some(15.0),
        )
        .unwrap();
    let lane = LaneHandle::new(label, "a");
    let mut store = VehicleStore::new();
    for i in 0..vehicle_count {
        store.create_vehicle(lane.clone(), i as f64 * 10.0);
    }
    (network, lane, store)
}

pub fn step_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    for &vehicle_count in &[10_usize, 100, 500] {
        group.bench_with_input(
            BenchmarkId::from_parameter(vehicle_count),
            &vehicle_count,
            |b, &vehicle_count| {
                let (network, _, store) = populated_network(vehicle_count);
                b.iter_batched(
                    || Stepper::new(&network, store.snapshot(), 42),
                    |mut stepper| stepper.step(0.1),
                    criterion::BatchSize::SmallInput,
                );
            },
        );
    }
    group.finish();
}

criterion_group!(benches, step_throughput);
criterion_main!(benches);
