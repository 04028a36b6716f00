#![doc(html_root_url = "https://docs.rs/pollframe/latest")]
//! Public API for the `pollframe` library.
//!
//! This crate reassembles multi-frame diagnostic replies polled from vehicle
//! control modules and dispatches each completed reply to a vehicle-specific
//! decode routine. Decoded values are published through a [`MetricSink`].
//!
//! Frames enter through [`FrameRouter::route`]; the router owns the single
//! [`ReassemblySession`] and the [`DecoderRegistry`] populated by a
//! [`Vehicle`].

pub mod config;
pub mod error;
pub mod frame;
pub mod metrics;
pub mod reassembly;
pub mod registry;
pub mod router;
pub mod signal;
pub mod sink;
#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
pub mod vehicle;

pub use config::CaptureFormat;
pub use error::{PollframeError, Result};
pub use frame::{BusId, FrameIndex, MessageType, ModuleId, ParameterId, PollFrame, SessionKey};
pub use metrics::{FRAMES_DROPPED, FRAMES_PROCESSED, MESSAGES_ASSEMBLED, UNKNOWN_TARGETS};
pub use reassembly::{AssembledMessage, DropReason, FrameOutcome, ReassemblySession, SessionState};
pub use registry::{DecodeRoutine, DecoderRegistry, DispatchOutcome, FrameDecodeRoutine};
pub use router::{FrameRouter, RouteOutcome};
#[cfg(feature = "metrics")]
pub use sink::RecorderSink;
pub use sink::{MetricSink, MetricStore, MetricValue, Reading, Unit};
pub use vehicle::{KiaNiroEv, OdometerUnit, Vehicle, VehicleTraits};
