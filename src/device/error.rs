// src/device/error.rs

/// Why a response cannot be put on the wire as-is.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum EncodeError {
    /// The payload does not fit the variant's frame layout.
    #[error("payload of {len} bytes, frame layout needs {expected}")]
    PayloadLength { expected: usize, len: usize },

    /// A `TypeC120` frame cannot carry the CO2 waveform identifier; it would decode as `TypeC34`.
    #[error("identifier {identifier} is reserved for the CO2 waveform frame")]
    ReservedWaveformIdentifier { identifier: u8 },

    /// The identifier would make the decoder pick a different 9-byte layout.
    #[error("identifier {identifier} does not select this frame layout")]
    IdentifierMismatch { identifier: u8 },

    /// The encoded bytes equal the `RERROR` sentinel.
    #[error("frame is indistinguishable from RERROR")]
    CollidesWithRError,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    #[test]
    fn test_error_messages() {
        let mut output = HeaplessString::<64>::new();
        write!(output, "{}", EncodeError::PayloadLength { expected: 4, len: 5 }).unwrap();
        assert_eq!(output.as_str(), "payload of 5 bytes, frame layout needs 4");
    }
}
