//! Vehicle definitions.
//!
//! A vehicle contributes decode routines to a [`DecoderRegistry`] at start-up.
//! Each vehicle owns its per-instance configuration in [`VehicleTraits`] and
//! hands copies of what a routine needs into the routine's closure, so no
//! decode state is shared between vehicles.

use derive_more::Display;

use crate::{error::Result, registry::DecoderRegistry, sink::Unit};

pub mod kia_niro_ev;
pub mod names;

pub use kia_niro_ev::KiaNiroEv;

/// A vehicle type supported by the engine.
pub trait Vehicle {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Register the vehicle's decode routines.
    ///
    /// # Errors
    ///
    /// Returns an error if two routines are registered for the same key.
    fn register_decoders(&self, registry: &mut DecoderRegistry) -> Result<()>;
}

/// Unit the instrument cluster reports the odometer in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Display)]
pub enum OdometerUnit {
    /// Kilometres.
    #[default]
    #[display("km")]
    Kilometers,
    /// Miles.
    #[display("miles")]
    Miles,
}

impl From<OdometerUnit> for Unit {
    fn from(value: OdometerUnit) -> Self {
        match value {
            OdometerUnit::Kilometers => Unit::Kilometers,
            OdometerUnit::Miles => Unit::Miles,
        }
    }
}

/// Per-vehicle configuration consulted by decode routines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VehicleTraits {
    /// Steering wheel on the left. Door and seat-belt bit assignments mirror
    /// for right-hand-drive builds.
    pub left_hand_drive: bool,
    /// Unit of the raw odometer reading.
    pub odometer_unit: OdometerUnit,
}

impl Default for VehicleTraits {
    fn default() -> Self {
        Self {
            left_hand_drive: true,
            odometer_unit: OdometerUnit::Kilometers,
        }
    }
}
