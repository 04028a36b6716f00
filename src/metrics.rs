//! Engine counters for `pollframe`.
//!
//! This module defines metric names and simple helper functions wrapping the
//! [`metrics`](https://docs.rs/metrics) crate. Without the `metrics` feature
//! the helpers compile to no-ops.

#[cfg(feature = "metrics")]
use metrics::counter;

use crate::reassembly::DropReason;

/// Name of the counter tracking frames handed to the router.
pub const FRAMES_PROCESSED: &str = "pollframe_frames_processed_total";
/// Name of the counter tracking dropped frames, labelled by `reason`.
pub const FRAMES_DROPPED: &str = "pollframe_frames_dropped_total";
/// Name of the counter tracking completed replies.
pub const MESSAGES_ASSEMBLED: &str = "pollframe_messages_assembled_total";
/// Name of the counter tracking completed replies without a decode routine.
pub const UNKNOWN_TARGETS: &str = "pollframe_unknown_targets_total";

/// Record a frame received from the transport.
pub fn inc_frames() {
    #[cfg(feature = "metrics")]
    counter!(FRAMES_PROCESSED).increment(1);
}

/// Record a dropped frame.
pub fn inc_dropped(reason: &DropReason) {
    #[cfg(feature = "metrics")]
    counter!(FRAMES_DROPPED, "reason" => reason.as_str()).increment(1);
    #[cfg(not(feature = "metrics"))]
    let _ = reason;
}

/// Record a completed reply.
pub fn inc_assembled() {
    #[cfg(feature = "metrics")]
    counter!(MESSAGES_ASSEMBLED).increment(1);
}

/// Record a completed reply that no routine claimed.
pub fn inc_unknown_targets() {
    #[cfg(feature = "metrics")]
    counter!(UNKNOWN_TARGETS).increment(1);
}
