//! Single-reply reassembly state machine.
//!
//! `ReassemblySession` owns the one reply buffer of the engine. It is driven
//! synchronously, one frame per call, in the order frames arrive from the
//! transport.

use bytes::BytesMut;
use log::debug;

use super::{AssembledMessage, DropReason, FrameOutcome};
use crate::frame::{FrameIndex, PollFrame, SessionKey};

/// Lifecycle state of a [`ReassemblySession`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No reply is being assembled.
    #[default]
    Idle,
    /// A reply has started and awaits further frames.
    Collecting,
    /// The reply was abandoned after a sequence error.
    Aborted,
}

/// Stateful accumulator for one multi-frame reply at a time.
///
/// # Examples
///
/// ```
/// use pollframe::{
///     frame::{BusId, FrameIndex, MessageType, ModuleId, ParameterId, PollFrame},
///     reassembly::{FrameOutcome, ReassemblySession},
/// };
///
/// let frame = |index: u16, remaining: u16, chunk: &[u8]| PollFrame {
///     bus: BusId(1),
///     module_sent: ModuleId(0x7e4),
///     module_recv: ModuleId(0x7ec),
///     message_type: MessageType::OBDII_EXTENDED,
///     parameter_id: ParameterId(0x0105),
///     frame_index: FrameIndex::new(index),
///     remaining_bytes: remaining,
///     chunk: chunk.to_vec(),
/// };
///
/// let mut session = ReassemblySession::new();
/// assert_eq!(session.on_frame(&frame(0, 2, b"abc")), FrameOutcome::Incomplete);
/// let FrameOutcome::Completed(msg) = session.on_frame(&frame(1, 0, b"de")) else {
///     panic!("reply should complete");
/// };
/// assert_eq!(msg.payload(), b"abcde");
/// ```
#[derive(Debug, Default)]
pub struct ReassemblySession {
    key: Option<SessionKey>,
    buffer: BytesMut,
    last_index: FrameIndex,
    declared_len: usize,
    state: SessionState,
}

impl ReassemblySession {
    /// Create an idle session.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> SessionState { self.state }

    /// Key of the reply most recently started, if it has not completed.
    #[must_use]
    pub const fn key(&self) -> Option<SessionKey> { self.key }

    /// Index of the last accepted frame.
    #[must_use]
    pub const fn last_index(&self) -> FrameIndex { self.last_index }

    /// Number of payload bytes buffered for the reply in progress.
    #[must_use]
    pub fn buffered_len(&self) -> usize { self.buffer.len() }

    /// Feed one frame into the session.
    ///
    /// An index-0 frame always restarts assembly, discarding any reply in
    /// progress. Continuation frames are appended only when they carry the
    /// active key and the successor of the last accepted index; a sequence
    /// violation aborts the reply until the next index-0 frame.
    pub fn on_frame(&mut self, frame: &PollFrame) -> FrameOutcome {
        if frame.is_first() {
            self.start(frame)
        } else {
            self.append(frame)
        }
    }

    fn start(&mut self, frame: &PollFrame) -> FrameOutcome {
        let key = frame.key();
        if self.state == SessionState::Collecting {
            debug!(
                "discarding reply in progress: key={:?}, buffered={}",
                self.key,
                self.buffer.len()
            );
        }

        self.key = Some(key);
        self.last_index = FrameIndex::zero();
        self.declared_len = frame
            .chunk_len()
            .saturating_add(usize::from(frame.remaining_bytes));
        self.buffer.clear();
        self.buffer.reserve(self.declared_len);
        self.buffer.extend_from_slice(&frame.chunk);
        debug!("reply started: key={key}, declared_len={}", self.declared_len);

        if frame.is_last() {
            return FrameOutcome::Completed(self.finish(frame));
        }
        self.state = SessionState::Collecting;
        FrameOutcome::Incomplete
    }

    fn append(&mut self, frame: &PollFrame) -> FrameOutcome {
        match self.state {
            SessionState::Aborted => return FrameOutcome::Dropped(DropReason::Aborted),
            SessionState::Idle => return FrameOutcome::Dropped(DropReason::NoActiveSession),
            SessionState::Collecting => {}
        }

        let Some(expected_key) = self.key else {
            return FrameOutcome::Dropped(DropReason::NoActiveSession);
        };
        let found_key = frame.key();
        if found_key != expected_key {
            return FrameOutcome::Dropped(DropReason::KeyMismatch {
                expected: expected_key,
                found: found_key,
            });
        }

        let Some(expected) = self.last_index.checked_increment() else {
            self.abort();
            return FrameOutcome::Dropped(DropReason::IndexOverflow {
                last: self.last_index,
            });
        };
        if frame.frame_index != expected {
            self.abort();
            return FrameOutcome::Dropped(DropReason::SequenceError {
                expected,
                found: frame.frame_index,
            });
        }

        self.last_index = expected;
        self.buffer.extend_from_slice(&frame.chunk);

        if frame.is_last() {
            FrameOutcome::Completed(self.finish(frame))
        } else {
            FrameOutcome::Incomplete
        }
    }

    fn abort(&mut self) {
        self.state = SessionState::Aborted;
        self.buffer.clear();
    }

    fn finish(&mut self, last: &PollFrame) -> AssembledMessage {
        let payload = self.buffer.split().freeze();
        if payload.len() != self.declared_len {
            debug!(
                "reply length differs from declared total: key={}, declared={}, assembled={}",
                last.key(),
                self.declared_len,
                payload.len()
            );
        }
        self.state = SessionState::Idle;
        self.key = None;

        AssembledMessage::new(
            last.message_type,
            last.module_sent,
            last.module_recv,
            last.parameter_id,
            payload,
        )
    }
}
