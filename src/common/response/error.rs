// src/common/response/error.rs

/// Why a raw buffer could not be classified as a response frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum DecodeError {
    /// Buffer length matches none of the response shapes (8, 9 or 13 bytes).
    #[error("invalid frame length: {len} bytes")]
    InvalidLength { len: usize },

    /// Length identifies a 9-byte frame, but the identifier byte is outside every known range.
    #[error("unrecognized identifier {identifier} ({identifier:#04x}) in 9-byte frame")]
    UnrecognizedIdentifier { identifier: u8 },

    /// Frame is not wrapped in `STX ... ETX CR` (only reported when delimiter checks are enabled).
    #[error("frame is not delimited by STX ... ETX CR")]
    MissingDelimiters,
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    #[test]
    fn test_error_messages() {
        let mut output = HeaplessString::<64>::new();
        write!(output, "{}", DecodeError::InvalidLength { len: 7 }).unwrap();
        assert_eq!(output.as_str(), "invalid frame length: 7 bytes");

        output.clear();
        write!(output, "{}", DecodeError::UnrecognizedIdentifier { identifier: 120 }).unwrap();
        assert_eq!(output.as_str(), "unrecognized identifier 120 (0x78) in 9-byte frame");
    }
}
