//! Inbound frame model for diagnostic poll replies.
//!
//! The transport demultiplexes raw bus traffic into [`PollFrame`] records
//! before they reach the engine. Each record carries the identifiers of the
//! exchange it belongs to, its position in a multi-frame reply and the chunk
//! of payload bytes it contributes.

use bincode::{Decode, Encode};
use derive_more::{Display, From};

/// Identifies the physical bus a frame was received on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Encode, Decode, Display, From)]
#[display("can{_0}")]
pub struct BusId(pub u8);

/// Bus address of a vehicle module, either the request target or the replier.
///
/// # Examples
///
/// ```
/// use pollframe::frame::ModuleId;
///
/// assert_eq!(ModuleId(0x7ec).to_string(), "7ec");
/// ```
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode, Display, From,
)]
#[display("{_0:03x}")]
pub struct ModuleId(pub u32);

/// Diagnostic service used by the poll request (for example `0x22`).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode, Display, From,
)]
#[display("{_0:#04x}")]
pub struct MessageType(pub u16);

impl MessageType {
    /// Service `0x1a`: read ECU identification.
    pub const OBDII_1A: Self = Self(0x1a);
    /// Service `0x21`: read data by local identifier (grouped reads).
    pub const OBDII_GROUP: Self = Self(0x21);
    /// Service `0x22`: read data by 16-bit identifier.
    pub const OBDII_EXTENDED: Self = Self(0x22);
}

/// Data item requested within a diagnostic service.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Encode, Decode, Display, From,
)]
#[display("{_0:#06x}")]
pub struct ParameterId(pub u16);

/// Zero-based position of a frame within a multi-frame reply.
///
/// # Examples
///
/// ```
/// use pollframe::frame::FrameIndex;
///
/// let index = FrameIndex::new(3);
/// assert_eq!(index.get(), 3);
/// assert_eq!(index.checked_increment(), Some(FrameIndex::new(4)));
/// assert!(FrameIndex::new(u16::MAX).checked_increment().is_none());
/// ```
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Encode,
    Decode,
    Display,
    From,
)]
#[display("{_0}")]
pub struct FrameIndex(u16);

impl FrameIndex {
    /// Construct an index from a raw counter value.
    #[must_use]
    pub const fn new(value: u16) -> Self { Self(value) }

    /// Index carried by the frame that starts a reply.
    #[must_use]
    pub const fn zero() -> Self { Self(0) }

    /// Return the underlying counter value.
    #[must_use]
    pub const fn get(self) -> u16 { self.0 }

    /// Whether this index marks the start of a new reply.
    #[must_use]
    pub const fn is_start(self) -> bool { self.0 == 0 }

    /// Increment the index, returning `None` on overflow.
    #[must_use]
    pub fn checked_increment(self) -> Option<Self> { self.0.checked_add(1).map(Self) }
}

impl From<FrameIndex> for u16 {
    fn from(value: FrameIndex) -> Self { value.0 }
}

/// Identifies one logical request/reply exchange.
///
/// Frames belong to the same reply when they share the replying module, the
/// diagnostic service and the parameter id. The same triple selects the
/// decode routine once the reply is complete.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Display)]
#[display("{module_recv}/{message_type}/{parameter_id}")]
pub struct SessionKey {
    /// Module that sent the reply.
    pub module_recv: ModuleId,
    /// Diagnostic service of the exchange.
    pub message_type: MessageType,
    /// Parameter requested in the exchange.
    pub parameter_id: ParameterId,
}

impl SessionKey {
    /// Construct a key from its three components.
    #[must_use]
    pub const fn new(
        module_recv: ModuleId,
        message_type: MessageType,
        parameter_id: ParameterId,
    ) -> Self {
        Self {
            module_recv,
            message_type,
            parameter_id,
        }
    }
}

impl From<(ModuleId, MessageType, ParameterId)> for SessionKey {
    fn from(
        (module_recv, message_type, parameter_id): (ModuleId, MessageType, ParameterId),
    ) -> Self {
        Self::new(module_recv, message_type, parameter_id)
    }
}

/// One fragment of a diagnostic poll reply, as delivered by the transport.
///
/// `frame_index == 0` starts a new reply and `remaining_bytes` on that frame
/// announces how many payload bytes follow in later frames. A frame with
/// `remaining_bytes == 0` terminates the reply.
#[derive(Clone, Debug, PartialEq, Eq, Encode, Decode)]
pub struct PollFrame {
    /// Bus the frame arrived on.
    pub bus: BusId,
    /// Module the poll request was addressed to.
    pub module_sent: ModuleId,
    /// Module that produced this reply.
    pub module_recv: ModuleId,
    /// Diagnostic service of the exchange.
    pub message_type: MessageType,
    /// Parameter requested in the exchange.
    pub parameter_id: ParameterId,
    /// Position of this frame within the reply.
    pub frame_index: FrameIndex,
    /// Payload bytes still to come after this frame.
    pub remaining_bytes: u16,
    /// Payload bytes carried by this frame.
    pub chunk: Vec<u8>,
}

impl PollFrame {
    /// Exchange key this frame belongs to.
    #[must_use]
    pub const fn key(&self) -> SessionKey {
        SessionKey::new(self.module_recv, self.message_type, self.parameter_id)
    }

    /// Whether this frame starts a new reply.
    #[must_use]
    pub const fn is_first(&self) -> bool { self.frame_index.is_start() }

    /// Whether this frame terminates its reply.
    #[must_use]
    pub const fn is_last(&self) -> bool { self.remaining_bytes == 0 }

    /// Number of payload bytes carried by this frame.
    #[must_use]
    pub fn chunk_len(&self) -> usize { self.chunk.len() }
}
