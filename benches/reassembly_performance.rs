//! Criterion benchmarks for reassembly throughput and field extraction.
//!
//! This benchmark suite covers:
//! - routing well-formed replies of several sizes through a `FrameRouter`,
//! - replaying a battery status reply through the Kia decode tables, and
//! - bounds-checked field reads from an assembled payload.

use criterion::{BenchmarkId, Criterion, Throughput, black_box};
use pollframe::{
    DecoderRegistry,
    FrameRouter,
    KiaNiroEv,
    MessageType,
    MetricStore,
    ModuleId,
    ParameterId,
    SessionKey,
    signal::{read_int_be, read_uint_be},
};
use pollframe_testing::{split_reply, test_key};

const REPLY_SIZES: [usize; 3] = [7, 62, 512];

fn payload(len: usize) -> Vec<u8> { (0..len).map(|i| (i % 251) as u8).collect() }

fn benchmark_reassembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("reassembly/route");

    for size in REPLY_SIZES {
        let frames = split_reply(test_key(), &payload(size), 3, 7);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_function(BenchmarkId::from_parameter(size), |b| {
            let mut router = FrameRouter::new(DecoderRegistry::new(), MetricStore::default());
            b.iter(|| {
                for frame in &frames {
                    black_box(router.route(frame));
                }
            });
        });
    }

    group.finish();
}

fn benchmark_vehicle_decode(c: &mut Criterion) {
    let key = SessionKey::new(ModuleId(0x7ec), MessageType::OBDII_EXTENDED, ParameterId(0x0101));
    let frames = split_reply(key, &payload(59), 3, 7);
    let mut router = match FrameRouter::for_vehicle(&KiaNiroEv::default(), MetricStore::default()) {
        Ok(router) => router,
        Err(err) => panic!("vehicle benchmark setup failed: {err}"),
    };

    c.bench_function("reassembly/kia_battery_status", |b| {
        b.iter(|| router.route_all(black_box(&frames)));
    });
}

fn benchmark_extraction(c: &mut Criterion) {
    let data = payload(62);
    let mut group = c.benchmark_group("signal/read");

    for width in [1usize, 2, 4, 8] {
        group.bench_function(BenchmarkId::new("uint", width), |b| {
            b.iter(|| black_box(read_uint_be(black_box(&data), black_box(30), width)));
        });
        group.bench_function(BenchmarkId::new("int", width), |b| {
            b.iter(|| black_box(read_int_be(black_box(&data), black_box(30), width)));
        });
    }

    group.finish();
}

fn main() {
    let mut criterion = Criterion::default().configure_from_args();
    benchmark_reassembly(&mut criterion);
    benchmark_vehicle_decode(&mut criterion);
    benchmark_extraction(&mut criterion);
    criterion.final_summary();
}
