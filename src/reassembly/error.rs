//! Outcome and drop-reason types for reply reassembly.
//!
//! Drops are ordinary values rather than failures: the router logs them and
//! carries on with the next frame.

use thiserror::Error;

use super::AssembledMessage;
use crate::frame::{FrameIndex, SessionKey};

/// Result of feeding one frame into a [`ReassemblySession`](super::ReassemblySession).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The reply still expects more frames.
    Incomplete,
    /// The frame completed the reply.
    Completed(AssembledMessage),
    /// The frame was not used.
    Dropped(DropReason),
}

impl FrameOutcome {
    /// Whether the frame completed a reply.
    #[must_use]
    pub const fn is_completed(&self) -> bool { matches!(self, Self::Completed(_)) }

    /// Return the drop reason, if the frame was dropped.
    #[must_use]
    pub const fn drop_reason(&self) -> Option<&DropReason> {
        match self {
            Self::Dropped(reason) => Some(reason),
            _ => None,
        }
    }
}

/// Why a continuation frame was not appended to the active reply.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DropReason {
    /// The active reply was aborted; waiting for a new index-0 frame.
    #[error("reply aborted; waiting for a new first frame")]
    Aborted,
    /// No reply is being assembled.
    #[error("no reply in progress")]
    NoActiveSession,
    /// The frame belongs to a different exchange than the active reply.
    #[error("key mismatch: expected {expected}, found {found}")]
    KeyMismatch {
        /// Key of the reply being assembled.
        expected: SessionKey,
        /// Key carried by the incoming frame.
        found: SessionKey,
    },
    /// The frame index is not the successor of the last accepted frame.
    #[error("frame sequence error: expected {expected}, found {found}")]
    SequenceError {
        /// Index the session expected next.
        expected: FrameIndex,
        /// Index carried by the frame.
        found: FrameIndex,
    },
    /// The last accepted frame index has no successor.
    #[error("frame index overflow after {last}")]
    IndexOverflow {
        /// Last index accepted before overflow.
        last: FrameIndex,
    },
}

impl DropReason {
    /// Short label used for logs and metric dimensions.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Aborted => "aborted",
            Self::NoActiveSession => "no_active_session",
            Self::KeyMismatch { .. } => "key_mismatch",
            Self::SequenceError { .. } => "sequence_error",
            Self::IndexOverflow { .. } => "index_overflow",
        }
    }

    /// Whether this drop aborted the active reply.
    #[must_use]
    pub const fn aborts_session(&self) -> bool {
        matches!(self, Self::SequenceError { .. } | Self::IndexOverflow { .. })
    }
}
