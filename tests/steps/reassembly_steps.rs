//! Steps for reply reassembly behavioural tests.
use cucumber::{given, then, when};
use pollframe::{DropReason, FrameIndex, RouteOutcome};

use crate::worlds::ReassemblyWorld;

#[given(
    expr = "a reply of {int} bytes split into {int}-byte first and {int}-byte following chunks"
)]
fn given_reply(world: &mut ReassemblyWorld, len: u8, first_len: usize, chunk_len: usize) {
    world.queue_reply(len, first_len, chunk_len);
}

#[given(expr = "frame {int} is lost in transit")]
fn given_lost(world: &mut ReassemblyWorld, index: u16) { world.lose_frame(index); }

#[given(expr = "a complete reply of {int} bytes follows")]
fn given_next_reply(world: &mut ReassemblyWorld, len: u8) { world.queue_reply(len, 3, 7); }

#[when("the frames are routed")]
fn when_routed(world: &mut ReassemblyWorld) { world.route(); }

#[then(expr = "{int} payload(s) is/are delivered")]
fn then_delivered(world: &mut ReassemblyWorld, count: usize) {
    assert_eq!(world.delivered().len(), count);
}

#[then(expr = "the delivered payload counts up from 1 to {int}")]
fn then_counting(world: &mut ReassemblyWorld, len: u8) { world.verify_counting_payload(len); }

#[then(expr = "frame {int} is dropped as a sequence error expecting {int}")]
fn then_sequence_error(world: &mut ReassemblyWorld, found: u16, expected: u16) {
    assert_eq!(
        world.outcome_of(found),
        RouteOutcome::Dropped(DropReason::SequenceError {
            expected: FrameIndex::new(expected),
            found: FrameIndex::new(found),
        })
    );
}

#[then(expr = "frame {int} is dropped as aborted")]
fn then_aborted(world: &mut ReassemblyWorld, index: u16) {
    assert_eq!(
        world.outcome_of(index),
        RouteOutcome::Dropped(DropReason::Aborted)
    );
}

#[given(expr = "the assembled payload {string}")]
fn given_payload(world: &mut ReassemblyWorld, hex: String) {
    let payload = hex
        .split_whitespace()
        .map(|byte| u8::from_str_radix(byte, 16).expect("hex byte"))
        .collect();
    world.set_payload(payload);
}

#[when(expr = "an unsigned {int}-byte field is read at offset {int}")]
fn when_read(world: &mut ReassemblyWorld, width: usize, offset: usize) {
    world.read_field(offset, width);
}

#[then(expr = "the field value is {int}")]
fn then_value(world: &mut ReassemblyWorld, value: u64) { assert_eq!(world.field(), Some(value)); }

#[then("the field read fails")]
fn then_fails(world: &mut ReassemblyWorld) { assert_eq!(world.field(), None); }
