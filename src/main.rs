//! Replay binary for `pollframe`.
//!
//! Reads a recorded frame stream, routes it through the decode tables of the
//! selected vehicle and prints the final value of every published metric.

mod cli;

use std::{error::Error, fs};

use clap::Parser;
use cli::{Cli, OdometerArg, VehicleArg};
use pollframe::{
    CaptureFormat,
    FrameRouter,
    KiaNiroEv,
    MetricSink,
    MetricStore,
    OdometerUnit,
    PollFrame,
    PollframeError,
    Vehicle,
    VehicleTraits,
};
use tracing::info;

fn main() -> Result<(), Box<dyn Error>> {
    // Applications embedding the library should install their own subscriber.
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let bytes = fs::read(&cli.capture).map_err(PollframeError::from)?;
    let frames = CaptureFormat::default().decode(&bytes)?;
    info!(
        capture = %cli.capture.display(),
        frames = frames.len(),
        "capture loaded"
    );

    let traits = VehicleTraits {
        left_hand_drive: !cli.right_hand_drive,
        odometer_unit: match cli.odometer_unit {
            OdometerArg::Km => OdometerUnit::Kilometers,
            OdometerArg::Miles => OdometerUnit::Miles,
        },
    };
    let vehicle = match cli.vehicle {
        VehicleArg::KiaNiroEv => KiaNiroEv::new(traits),
    };

    if cli.prometheus {
        return replay_with_prometheus(&vehicle, &frames);
    }

    let store = replay(&vehicle, &frames, MetricStore::default())?;
    print_store(&store);
    Ok(())
}

fn replay<S: MetricSink>(
    vehicle: &dyn Vehicle,
    frames: &[PollFrame],
    sink: S,
) -> pollframe::Result<S> {
    let mut router = FrameRouter::for_vehicle(vehicle, sink)?;
    router.route_all(frames);
    Ok(router.into_sink())
}

#[cfg(feature = "metrics")]
fn replay_with_prometheus(
    vehicle: &dyn Vehicle,
    frames: &[PollFrame],
) -> Result<(), Box<dyn Error>> {
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pollframe::RecorderSink;

    let handle = PrometheusBuilder::new().install_recorder()?;
    let (store, _) = replay(vehicle, frames, (MetricStore::default(), RecorderSink))?;
    print_store(&store);
    println!();
    print!("{}", handle.render());
    Ok(())
}

#[cfg(not(feature = "metrics"))]
fn replay_with_prometheus(
    vehicle: &dyn Vehicle,
    frames: &[PollFrame],
) -> Result<(), Box<dyn Error>> {
    tracing::warn!("built without the `metrics` feature; ignoring --prometheus");
    let store = replay(vehicle, frames, MetricStore::default())?;
    print_store(&store);
    Ok(())
}

fn print_store(store: &MetricStore) {
    for (name, reading) in store.iter() {
        println!("{name}\t{}\t{}", reading.value, reading.unit);
    }
}
