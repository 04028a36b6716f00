//! Canonical error and result types for the crate.
//!
//! Frame-level problems (drops, unknown targets, short buffers) are handled
//! where they are detected and never surface here. `PollframeError` covers
//! start-up configuration and capture replay only.

use std::io;

use thiserror::Error;

use crate::frame::SessionKey;

/// Top-level error type exposed by `pollframe`.
#[derive(Debug, Error)]
pub enum PollframeError {
    /// A decode routine for the key was already registered.
    #[error("decoder for {0} was already registered")]
    DuplicateDecoder(SessionKey),
    /// A recorded frame stream could not be decoded.
    #[error("capture decode error: {0}")]
    CaptureDecode(#[from] bincode::error::DecodeError),
    /// A frame stream could not be encoded.
    #[error("capture encode error: {0}")]
    CaptureEncode(#[from] bincode::error::EncodeError),
    /// Reading or writing a capture failed.
    #[error("capture I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Canonical result alias used by `pollframe` public APIs.
pub type Result<T> = std::result::Result<T, PollframeError>;
