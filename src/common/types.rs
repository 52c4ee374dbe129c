// src/common/types.rs

use arrayvec::{ArrayVec, CapacityError};
use core::fmt;

// --- Value Payload ---

/// Largest value payload carried by any response frame (Type A).
pub const MAX_PAYLOAD_LEN: usize = 5;

/// Value bytes of a numeric/identification response, as received.
///
/// Numeric parameters arrive as space-padded ASCII (e.g. `b" 12.5"`); device
/// identification payloads are opaque bytes. The payload never allocates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Payload(ArrayVec<u8, MAX_PAYLOAD_LEN>);

impl Payload {
    /// Copies a wire slice the decoder has already bounded to `MAX_PAYLOAD_LEN`.
    pub(crate) fn from_wire(bytes: &[u8]) -> Self {
        Payload(bytes.iter().copied().take(MAX_PAYLOAD_LEN).collect())
    }

    /// Returns the payload as a byte slice.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Attempts to interpret the payload as a UTF-8 string slice.
    pub fn as_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(&self.0)
    }

    /// Interprets the payload as an ASCII decimal number, ignoring padding spaces.
    ///
    /// Returns `None` for non-ASCII payloads and for the dash/blank fillers the
    /// ventilator sends when a parameter is currently unavailable.
    pub fn to_f32(&self) -> Option<f32> {
        self.as_str().ok()?.trim().parse::<f32>().ok()
    }
}

impl AsRef<[u8]> for Payload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Payload {
    type Error = CapacityError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        ArrayVec::try_from(bytes).map(Payload)
    }
}

impl<const N: usize> PartialEq<[u8; N]> for Payload {
    fn eq(&self, other: &[u8; N]) -> bool {
        self.as_bytes() == other.as_slice()
    }
}

impl fmt::Display for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Ok(s) => f.write_str(s),
            Err(_) => write!(f, "{:02X?}", self.as_bytes()),
        }
    }
}

// --- Parameter Labels ---

/// Identifier → parameter name table, supplied by the integrator.
///
/// The crate ships no names of its own; the table is static configuration
/// that the poller attaches to numeric readings.
#[derive(Debug, Copy, Clone, Default)]
pub struct ParameterLabels<'a> {
    entries: &'a [(u8, &'a str)],
}

impl<'a> ParameterLabels<'a> {
    pub const EMPTY: ParameterLabels<'static> = ParameterLabels { entries: &[] };

    pub const fn new(entries: &'a [(u8, &'a str)]) -> Self {
        ParameterLabels { entries }
    }

    /// Name of `identifier`, if the table has one. First entry wins on duplicates.
    pub fn label(&self, identifier: u8) -> Option<&'a str> {
        self.entries
            .iter()
            .find(|(id, _)| *id == identifier)
            .map(|(_, name)| *name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
