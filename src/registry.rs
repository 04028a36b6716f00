//! Decode routine registry keyed by exchange.
//!
//! A [`DecoderRegistry`] maps `(module, message type, parameter id)` to the
//! routine that turns an assembled reply into metric values. Registration is
//! start-up configuration; dispatch runs synchronously for every completed
//! reply.

use std::collections::{HashMap, hash_map::Entry};

use log::info;

use crate::{
    error::{PollframeError, Result},
    frame::{MessageType, ModuleId, ParameterId, PollFrame, SessionKey},
    metrics,
    reassembly::AssembledMessage,
    sink::MetricSink,
};

/// Vehicle-specific logic reading fields from an assembled reply.
///
/// Routines read each field independently: a field that cannot be read is
/// skipped without preventing its siblings from being published.
pub trait DecodeRoutine {
    /// Decode `payload` and publish the fields it contains.
    fn decode(&mut self, payload: &[u8], sink: &mut dyn MetricSink);
}

impl<F> DecodeRoutine for F
where
    F: FnMut(&[u8], &mut dyn MetricSink),
{
    fn decode(&mut self, payload: &[u8], sink: &mut dyn MetricSink) { self(payload, sink); }
}

/// Logic decoding each frame of a reply on its own, before reassembly.
pub trait FrameDecodeRoutine {
    /// Decode one frame and publish whatever it carries.
    fn decode_frame(&mut self, frame: &PollFrame, sink: &mut dyn MetricSink);
}

impl<F> FrameDecodeRoutine for F
where
    F: FnMut(&PollFrame, &mut dyn MetricSink),
{
    fn decode_frame(&mut self, frame: &PollFrame, sink: &mut dyn MetricSink) { self(frame, sink); }
}

/// Result of dispatching an assembled reply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A routine was found and invoked.
    Decoded,
    /// No routine is registered for the reply's key.
    UnknownTarget,
}

/// Registry of decode routines.
///
/// # Examples
///
/// ```
/// use pollframe::{
///     frame::{MessageType, ModuleId, ParameterId},
///     registry::DecoderRegistry,
///     signal::read_uint_be,
///     sink::{MetricSink, MetricValue, Unit},
/// };
///
/// let mut registry = DecoderRegistry::new();
/// registry
///     .register(
///         ModuleId(0x7ec),
///         MessageType::OBDII_EXTENDED,
///         ParameterId(0x0105),
///         |payload: &[u8], sink: &mut dyn MetricSink| {
///             if let Some(raw) = read_uint_be(payload, 31, 1) {
///                 let soc = MetricValue::Float(raw as f64 / 2.0);
///                 sink.set_metric("v.b.soc", soc, Unit::Percentage);
///             }
///         },
///     )
///     .expect("first registration for this key");
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Default)]
pub struct DecoderRegistry {
    routines: HashMap<SessionKey, Box<dyn DecodeRoutine>>,
    frame_routines: HashMap<SessionKey, Box<dyn FrameDecodeRoutine>>,
}

impl DecoderRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self { Self::default() }

    /// Associate a decode routine with an exchange.
    ///
    /// # Errors
    ///
    /// Returns [`PollframeError::DuplicateDecoder`] if a routine is already
    /// registered for the same key.
    pub fn register(
        &mut self,
        module: ModuleId,
        message_type: MessageType,
        parameter_id: ParameterId,
        routine: impl DecodeRoutine + 'static,
    ) -> Result<()> {
        let key = SessionKey::new(module, message_type, parameter_id);
        match self.routines.entry(key) {
            Entry::Occupied(_) => Err(PollframeError::DuplicateDecoder(key)),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(routine));
                Ok(())
            }
        }
    }

    /// Associate a per-frame routine with an exchange.
    ///
    /// Per-frame routines see every frame of the exchange as it arrives,
    /// independently of reassembly.
    ///
    /// # Errors
    ///
    /// Returns [`PollframeError::DuplicateDecoder`] if a per-frame routine is
    /// already registered for the same key.
    pub fn register_per_frame(
        &mut self,
        module: ModuleId,
        message_type: MessageType,
        parameter_id: ParameterId,
        routine: impl FrameDecodeRoutine + 'static,
    ) -> Result<()> {
        let key = SessionKey::new(module, message_type, parameter_id);
        match self.frame_routines.entry(key) {
            Entry::Occupied(_) => Err(PollframeError::DuplicateDecoder(key)),
            Entry::Vacant(slot) => {
                slot.insert(Box::new(routine));
                Ok(())
            }
        }
    }

    /// Whether a routine is registered for assembled replies of `key`.
    #[must_use]
    pub fn contains(&self, key: &SessionKey) -> bool { self.routines.contains_key(key) }

    /// Number of routines registered for assembled replies.
    #[must_use]
    pub fn len(&self) -> usize { self.routines.len() }

    /// Whether no routine is registered for assembled replies.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.routines.is_empty() }

    /// Invoke the routine registered for `message`, if any.
    ///
    /// A missing routine is not an error: it is logged and reported as
    /// [`DispatchOutcome::UnknownTarget`].
    pub fn dispatch(
        &mut self,
        message: &AssembledMessage,
        sink: &mut dyn MetricSink,
    ) -> DispatchOutcome {
        let key = message.key();
        let Some(routine) = self.routines.get_mut(&key) else {
            info!(
                "unknown target: key={key}, payload_len={}",
                message.payload().len()
            );
            metrics::inc_unknown_targets();
            return DispatchOutcome::UnknownTarget;
        };
        routine.decode(message.payload(), sink);
        DispatchOutcome::Decoded
    }

    /// Invoke the per-frame routine registered for `frame`'s exchange.
    ///
    /// Returns `false` when no per-frame routine is registered.
    pub fn dispatch_frame(&mut self, frame: &PollFrame, sink: &mut dyn MetricSink) -> bool {
        let Some(routine) = self.frame_routines.get_mut(&frame.key()) else {
            return false;
        };
        routine.decode_frame(frame, sink);
        true
    }
}

impl std::fmt::Debug for DecoderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.routines.keys().collect();
        keys.sort();
        let mut frame_keys: Vec<_> = self.frame_routines.keys().collect();
        frame_keys.sort();
        f.debug_struct("DecoderRegistry")
            .field("routines", &keys)
            .field("frame_routines", &frame_keys)
            .finish()
    }
}
