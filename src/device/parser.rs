// src/device/parser.rs

use crate::common::{
    command::CommandFrame,
    frame::{self, COMMAND_FRAME_LEN},
    response::DecodeError,
};

/// Parses a raw command frame as received by the ventilator.
///
/// Expects exactly `STX <identifier> ETX CR`. Every identifier byte is
/// accepted; whether the device knows it is up to the responder.
pub fn parse_command(bytes: &[u8]) -> Result<CommandFrame, DecodeError> {
    if bytes.len() != COMMAND_FRAME_LEN {
        return Err(DecodeError::InvalidLength { len: bytes.len() });
    }
    match frame::frame_body(bytes) {
        Some(&[identifier]) => Ok(CommandFrame::new(identifier)),
        _ => Err(DecodeError::MissingDelimiters),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::command::{encode, WAVEFORM_BLOCK};

    #[test]
    fn test_parse_valid_commands() {
        assert_eq!(parse_command(&[0x02, 120, 0x03, 0x0D]).unwrap().identifier(), WAVEFORM_BLOCK);
        assert_eq!(parse_command(&[0x02, 0x56, 0x03, 0x0D]).unwrap().identifier(), 0x56);
    }

    #[test]
    fn test_parse_accepts_every_encoded_identifier() {
        for identifier in 0..=u8::MAX {
            let frame = encode(identifier);
            assert_eq!(parse_command(frame.as_bytes()), Ok(frame));
        }
    }

    #[test]
    fn test_parse_wrong_length() {
        assert_eq!(parse_command(&[]), Err(DecodeError::InvalidLength { len: 0 }));
        assert_eq!(parse_command(&[0x02, 40, 0x03]), Err(DecodeError::InvalidLength { len: 3 }));
        assert_eq!(
            parse_command(&[0x02, 40, 41, 0x03, 0x0D]),
            Err(DecodeError::InvalidLength { len: 5 })
        );
    }

    #[test]
    fn test_parse_missing_delimiters() {
        assert_eq!(parse_command(&[0x00, 40, 0x03, 0x0D]), Err(DecodeError::MissingDelimiters));
        assert_eq!(parse_command(&[0x02, 40, 0x0D, 0x03]), Err(DecodeError::MissingDelimiters));
        assert_eq!(parse_command(b"40\r\n"), Err(DecodeError::MissingDelimiters));
    }
}
