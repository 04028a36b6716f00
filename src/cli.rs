//! Command line interface for the `pollframe` replay binary.
//!
//! Kept free of crate imports so the build script can render a man page
//! from it.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// Vehicles the binary can decode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum VehicleArg {
    /// Kia Niro EV / e-Niro.
    #[default]
    KiaNiroEv,
}

/// Unit of the vehicle's odometer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OdometerArg {
    /// Kilometres.
    #[default]
    Km,
    /// Miles.
    Miles,
}

/// Command line arguments for the `pollframe` binary.
#[derive(Debug, Parser)]
#[command(
    name = "pollframe",
    version,
    about = "Replay a recorded poll capture and print decoded values"
)]
pub struct Cli {
    /// Recorded frame stream to replay.
    pub capture: PathBuf,

    /// Vehicle whose decode tables are used.
    #[arg(short, long, value_enum, default_value_t)]
    pub vehicle: VehicleArg,

    /// The vehicle is a right-hand-drive build.
    #[arg(long)]
    pub right_hand_drive: bool,

    /// Unit the odometer reports in.
    #[arg(long, value_enum, default_value_t)]
    pub odometer_unit: OdometerArg,

    /// Also print a Prometheus scrape of the engine counters and gauges.
    #[arg(long)]
    pub prometheus: bool,
}
