//! Output type for completed replies.

use bytes::Bytes;

use crate::frame::{MessageType, ModuleId, ParameterId, SessionKey};

/// Container for a fully assembled poll reply.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use pollframe::{
///     frame::{MessageType, ModuleId, ParameterId},
///     reassembly::AssembledMessage,
/// };
///
/// let msg = AssembledMessage::new(
///     MessageType::OBDII_EXTENDED,
///     ModuleId(0x7e4),
///     ModuleId(0x7ec),
///     ParameterId(0x0101),
///     Bytes::from_static(&[0x62, 0x01, 0x01]),
/// );
/// assert_eq!(msg.module_recv(), ModuleId(0x7ec));
/// assert_eq!(msg.payload(), &[0x62, 0x01, 0x01]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssembledMessage {
    message_type: MessageType,
    module_sent: ModuleId,
    module_recv: ModuleId,
    parameter_id: ParameterId,
    payload: Bytes,
}

impl AssembledMessage {
    /// Create a new assembled message.
    #[must_use]
    pub fn new(
        message_type: MessageType,
        module_sent: ModuleId,
        module_recv: ModuleId,
        parameter_id: ParameterId,
        payload: Bytes,
    ) -> Self {
        Self {
            message_type,
            module_sent,
            module_recv,
            parameter_id,
            payload,
        }
    }

    /// Diagnostic service of the exchange.
    #[must_use]
    pub const fn message_type(&self) -> MessageType { self.message_type }

    /// Module the request was addressed to.
    #[must_use]
    pub const fn module_sent(&self) -> ModuleId { self.module_sent }

    /// Module that produced the reply.
    #[must_use]
    pub const fn module_recv(&self) -> ModuleId { self.module_recv }

    /// Parameter requested in the exchange.
    #[must_use]
    pub const fn parameter_id(&self) -> ParameterId { self.parameter_id }

    /// Key used to look up the decode routine.
    #[must_use]
    pub const fn key(&self) -> SessionKey {
        SessionKey::new(self.module_recv, self.message_type, self.parameter_id)
    }

    /// Reassembled payload bytes.
    #[must_use]
    pub fn payload(&self) -> &[u8] { &self.payload }

    /// Consume and return the payload bytes.
    #[must_use]
    pub fn into_payload(self) -> Bytes { self.payload }
}
