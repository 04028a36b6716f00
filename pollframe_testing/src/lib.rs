//! Utilities for exercising the `pollframe` engine in tests.
//!
//! The crate re-exports the frame builders from `pollframe::test_helpers`
//! and adds shared fixtures for log capture and metric recording.
//!
//! ```rust
//! use pollframe::{DecoderRegistry, FrameRouter, MetricStore, RouteOutcome};
//! use pollframe_testing::{split_reply, test_key};
//!
//! let mut router = FrameRouter::new(DecoderRegistry::new(), MetricStore::default());
//! let frames = split_reply(test_key(), &[1, 2, 3, 4, 5], 3, 7);
//! assert_eq!(router.route(&frames[0]), RouteOutcome::Pending);
//! ```

pub mod logging;
pub mod recorder;

pub use logging::{LoggerHandle, logger};
pub use pollframe::test_helpers::{TEST_MODULE, frame, split_reply, test_key};
pub use recorder::{counter_value, record_metrics};
