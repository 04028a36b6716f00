//! Capture format configuration.
//!
//! Recorded frame streams let a poll session be replayed through the engine
//! offline. This module selects how such captures are encoded.

use bincode::{
    config::{self, Configuration},
    error::DecodeError,
};

use crate::{error::Result, frame::PollFrame};

/// Encodings supported for recorded frame streams.
#[non_exhaustive]
#[derive(Clone, Copy, Debug)]
pub enum CaptureFormat {
    /// `bincode` with its standard configuration.
    Bincode,
}

impl CaptureFormat {
    /// The library default (currently [`Bincode`](Self::Bincode)).
    pub const DEFAULT: CaptureFormat = CaptureFormat::Bincode;

    const fn bincode_config() -> Configuration { config::standard() }

    /// Encode a frame stream into bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PollframeError::CaptureEncode`](crate::error::PollframeError::CaptureEncode)
    /// if serialization fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use pollframe::{
    ///     config::CaptureFormat,
    ///     frame::{BusId, FrameIndex, MessageType, ModuleId, ParameterId, PollFrame},
    /// };
    ///
    /// let frames = vec![PollFrame {
    ///     bus: BusId(1),
    ///     module_sent: ModuleId(0x7e4),
    ///     module_recv: ModuleId(0x7ec),
    ///     message_type: MessageType::OBDII_EXTENDED,
    ///     parameter_id: ParameterId(0x0105),
    ///     frame_index: FrameIndex::zero(),
    ///     remaining_bytes: 0,
    ///     chunk: vec![0x62, 0x01, 0x05],
    /// }];
    /// let bytes = CaptureFormat::DEFAULT.encode(&frames).expect("encode");
    /// assert_eq!(CaptureFormat::DEFAULT.decode(&bytes).expect("decode"), frames);
    /// ```
    pub fn encode(self, frames: &[PollFrame]) -> Result<Vec<u8>> {
        match self {
            CaptureFormat::Bincode => Ok(bincode::encode_to_vec(frames, Self::bincode_config())?),
        }
    }

    /// Decode a frame stream from bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PollframeError::CaptureDecode`](crate::error::PollframeError::CaptureDecode)
    /// if the bytes are not a valid capture, including a valid capture
    /// followed by trailing bytes.
    pub fn decode(self, bytes: &[u8]) -> Result<Vec<PollFrame>> {
        match self {
            CaptureFormat::Bincode => {
                let (frames, consumed) =
                    bincode::decode_from_slice(bytes, Self::bincode_config())?;
                if consumed != bytes.len() {
                    return Err(DecodeError::OtherString(format!(
                        "{} trailing bytes after capture",
                        bytes.len() - consumed
                    ))
                    .into());
                }
                Ok(frames)
            }
        }
    }
}

impl Default for CaptureFormat {
    fn default() -> Self { CaptureFormat::DEFAULT }
}
