//! Test world for reply reassembly scenarios.
//!
//! Frames are queued by `given` steps and routed in one pass so every
//! outcome can be inspected afterwards.

use std::{cell::RefCell, rc::Rc};

use cucumber::World;
use pollframe::{
    DecoderRegistry,
    FrameRouter,
    MetricSink,
    MetricStore,
    PollFrame,
    RouteOutcome,
    signal::read_uint_be,
};
use pollframe_testing::{split_reply, test_key};

#[derive(Debug, Default, World)]
pub struct ReassemblyWorld {
    frames: Vec<PollFrame>,
    outcomes: Vec<(u16, RouteOutcome)>,
    delivered: Vec<Vec<u8>>,
    payload: Vec<u8>,
    field: Option<u64>,
}

/// Payload whose bytes count up from one.
fn counting_payload(len: u8) -> Vec<u8> { (1..=len).collect() }

impl ReassemblyWorld {
    /// Queue a well-formed reply of `len` counting bytes.
    pub fn queue_reply(&mut self, len: u8, first_len: usize, chunk_len: usize) {
        self.frames
            .extend(split_reply(test_key(), &counting_payload(len), first_len, chunk_len));
    }

    /// Remove the first queued frame carrying `index`.
    ///
    /// # Panics
    ///
    /// Panics if no queued frame has that index.
    pub fn lose_frame(&mut self, index: u16) {
        let position = self
            .frames
            .iter()
            .position(|frame| frame.frame_index.get() == index)
            .expect("frame index not queued");
        self.frames.remove(position);
    }

    /// Route every queued frame, recording outcomes and delivered payloads.
    ///
    /// # Panics
    ///
    /// Panics if the recording routine cannot be registered.
    pub fn route(&mut self) {
        let key = test_key();
        let delivered = Rc::new(RefCell::new(Vec::new()));
        let seen = Rc::clone(&delivered);
        let mut registry = DecoderRegistry::new();
        registry
            .register(
                key.module_recv,
                key.message_type,
                key.parameter_id,
                move |payload: &[u8], _sink: &mut dyn MetricSink| {
                    seen.borrow_mut().push(payload.to_vec());
                },
            )
            .expect("register routine");

        let mut router = FrameRouter::new(registry, MetricStore::default());
        self.outcomes = self
            .frames
            .iter()
            .map(|frame| (frame.frame_index.get(), router.route(frame)))
            .collect();
        self.delivered = delivered.take();
    }

    /// Outcome recorded for the first routed frame carrying `index`.
    ///
    /// # Panics
    ///
    /// Panics if no frame with that index was routed.
    #[must_use]
    pub fn outcome_of(&self, index: u16) -> RouteOutcome {
        self.outcomes
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, outcome)| *outcome)
            .expect("frame index not routed")
    }

    #[must_use]
    pub fn delivered(&self) -> &[Vec<u8>] { &self.delivered }

    /// Check that the only delivered payload counts up from one to `len`.
    ///
    /// # Panics
    ///
    /// Panics if the payload differs.
    pub fn verify_counting_payload(&self, len: u8) {
        assert_eq!(self.delivered.last(), Some(&counting_payload(len)));
    }

    pub fn set_payload(&mut self, payload: Vec<u8>) { self.payload = payload; }

    pub fn read_field(&mut self, offset: usize, width: usize) {
        self.field = read_uint_be(&self.payload, offset, width);
    }

    #[must_use]
    pub fn field(&self) -> Option<u64> { self.field }
}
