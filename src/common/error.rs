// src/common/error.rs

use core::convert::Infallible;
use core::fmt::Debug;

use super::response::DecodeError;

/// Errors raised while polling the ventilator.
///
/// `E` is the transport error, `P` the publisher error.
#[derive(Debug, thiserror::Error)]
pub enum PollError<E = (), P = Infallible>
where
    E: Debug,
    P: Debug,
{
    /// Underlying I/O error from the serial implementation.
    #[error("I/O error: {0:?}")] // Format string requires Debug on E
    Io(E),

    /// The publisher refused a reading.
    #[error("publish error: {0:?}")]
    Publish(P),

    /// No response byte arrived in time.
    #[error("operation timed out")]
    Timeout,

    /// The line went quiet before a frame ended with `ETX CR`.
    #[error("truncated frame: {len} bytes without ETX CR")]
    Truncated { len: usize },

    /// The device sent more bytes than the read buffer holds.
    #[error("buffer overflow: needed {needed}, got {got}")]
    BufferOverflow { needed: usize, got: usize },

    /// A complete frame was received but could not be classified.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The device answered `RERROR` to the request.
    #[error("device rejected identifier {identifier}")]
    Rejected { identifier: u8 },

    /// A valid frame arrived, but not the kind the request expects.
    #[error("unexpected response to identifier {identifier}")]
    UnexpectedResponse { identifier: u8 },
}

impl<E: Debug, P: Debug> PollError<E, P> {
    /// Whether repeating the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, PollError::Timeout | PollError::Truncated { .. })
    }
}
