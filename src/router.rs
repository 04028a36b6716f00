//! Frame routing from the transport into reassembly and dispatch.
//!
//! [`FrameRouter`] is the engine's single entry point. Each frame is first
//! offered to any per-frame routine registered for its exchange, then fed to
//! the one [`ReassemblySession`]. Completed replies are dispatched
//! synchronously to the [`DecoderRegistry`]; dropped frames are logged and
//! never reported back to the transport as errors.

use log::{debug, info};

use crate::{
    error::Result,
    frame::PollFrame,
    metrics,
    reassembly::{DropReason, FrameOutcome, ReassemblySession},
    registry::{DecoderRegistry, DispatchOutcome},
    sink::MetricSink,
    vehicle::Vehicle,
};

/// What happened to a routed frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The frame was buffered; the reply is not complete yet.
    Pending,
    /// The frame completed a reply, which was dispatched.
    Dispatched(DispatchOutcome),
    /// The frame was dropped by the session.
    Dropped(DropReason),
}

/// Routes frames into the active reassembly session and dispatches replies.
///
/// # Examples
///
/// ```
/// use pollframe::{
///     frame::{BusId, FrameIndex, MessageType, ModuleId, ParameterId, PollFrame},
///     registry::{DecoderRegistry, DispatchOutcome},
///     router::{FrameRouter, RouteOutcome},
///     sink::MetricStore,
/// };
///
/// let mut router = FrameRouter::new(DecoderRegistry::new(), MetricStore::default());
/// let frame = PollFrame {
///     bus: BusId(1),
///     module_sent: ModuleId(0x7e4),
///     module_recv: ModuleId(0x7ec),
///     message_type: MessageType::OBDII_EXTENDED,
///     parameter_id: ParameterId(0x0105),
///     frame_index: FrameIndex::zero(),
///     remaining_bytes: 0,
///     chunk: vec![0x62, 0x01, 0x05],
/// };
/// assert_eq!(
///     router.route(&frame),
///     RouteOutcome::Dispatched(DispatchOutcome::UnknownTarget)
/// );
/// ```
#[derive(Debug)]
pub struct FrameRouter<S> {
    session: ReassemblySession,
    registry: DecoderRegistry,
    sink: S,
}

impl<S: MetricSink> FrameRouter<S> {
    /// Create a router over a populated registry and a metric sink.
    #[must_use]
    pub fn new(registry: DecoderRegistry, sink: S) -> Self {
        Self {
            session: ReassemblySession::new(),
            registry,
            sink,
        }
    }

    /// Create a router with the decode routines of `vehicle`.
    ///
    /// # Errors
    ///
    /// Returns an error if the vehicle registers two routines for one key.
    pub fn for_vehicle(vehicle: &dyn Vehicle, sink: S) -> Result<Self> {
        let mut registry = DecoderRegistry::new();
        vehicle.register_decoders(&mut registry)?;
        debug!(
            "decoders registered: vehicle={}, count={}",
            vehicle.name(),
            registry.len()
        );
        Ok(Self::new(registry, sink))
    }

    /// Route one frame received from the transport.
    ///
    /// Frames must be delivered one at a time, in arrival order.
    pub fn route(&mut self, frame: &PollFrame) -> RouteOutcome {
        metrics::inc_frames();
        self.registry.dispatch_frame(frame, &mut self.sink);

        match self.session.on_frame(frame) {
            FrameOutcome::Incomplete => RouteOutcome::Pending,
            FrameOutcome::Completed(message) => {
                metrics::inc_assembled();
                debug!(
                    "reply assembled: key={}, len={}",
                    message.key(),
                    message.payload().len()
                );
                RouteOutcome::Dispatched(self.registry.dispatch(&message, &mut self.sink))
            }
            FrameOutcome::Dropped(reason) => {
                metrics::inc_dropped(&reason);
                info!(
                    "frame dropped: bus={}, key={}, index={}, reason={reason}",
                    frame.bus,
                    frame.key(),
                    frame.frame_index
                );
                RouteOutcome::Dropped(reason)
            }
        }
    }

    /// Route every frame of `frames` in order.
    pub fn route_all<'a>(&mut self, frames: impl IntoIterator<Item = &'a PollFrame>) {
        for frame in frames {
            self.route(frame);
        }
    }

    /// The reassembly session, for inspection.
    #[must_use]
    pub fn session(&self) -> &ReassemblySession { &self.session }

    /// Borrow the metric sink.
    #[must_use]
    pub fn sink(&self) -> &S { &self.sink }

    /// Mutably borrow the metric sink.
    pub fn sink_mut(&mut self) -> &mut S { &mut self.sink }

    /// Consume the router, returning the metric sink.
    #[must_use]
    pub fn into_sink(self) -> S { self.sink }
}
