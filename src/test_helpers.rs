#![cfg(any(test, feature = "test-helpers"))]
//! Test-only builders for poll frames and replies.

use crate::frame::{BusId, FrameIndex, MessageType, ModuleId, ParameterId, PollFrame, SessionKey};

/// Replying module used by default in tests.
pub const TEST_MODULE: ModuleId = ModuleId(0x7ec);

/// Default exchange key used by tests: battery management, PID `0x0101`.
#[must_use]
pub const fn test_key() -> SessionKey {
    SessionKey::new(TEST_MODULE, MessageType::OBDII_EXTENDED, ParameterId(0x0101))
}

/// Build a frame for `key` with the given index, remaining count and chunk.
///
/// The request address is derived from the replying module using the usual
/// `reply = request + 8` addressing.
#[must_use]
pub fn frame(key: SessionKey, index: u16, remaining: u16, chunk: &[u8]) -> PollFrame {
    PollFrame {
        bus: BusId(1),
        module_sent: ModuleId(key.module_recv.0.saturating_sub(8)),
        module_recv: key.module_recv,
        message_type: key.message_type,
        parameter_id: key.parameter_id,
        frame_index: FrameIndex::new(index),
        remaining_bytes: remaining,
        chunk: chunk.to_vec(),
    }
}

/// Split `payload` into a well-formed frame sequence for `key`.
///
/// The first frame carries up to `first_len` bytes and every following frame
/// up to `chunk_len` bytes. Indices and remaining counters are filled in the
/// way the transport would report them.
#[must_use]
pub fn split_reply(
    key: SessionKey,
    payload: &[u8],
    first_len: usize,
    chunk_len: usize,
) -> Vec<PollFrame> {
    let chunk_len = chunk_len.max(1);
    let (first, mut rest) = payload.split_at(first_len.min(payload.len()));
    let mut frames = vec![frame(key, 0, remaining_u16(rest.len()), first)];

    let mut index: u16 = 1;
    while !rest.is_empty() {
        let (chunk, tail) = rest.split_at(chunk_len.min(rest.len()));
        frames.push(frame(key, index, remaining_u16(tail.len()), chunk));
        rest = tail;
        index = index.saturating_add(1);
    }
    frames
}

fn remaining_u16(len: usize) -> u16 { u16::try_from(len).unwrap_or(u16::MAX) }
