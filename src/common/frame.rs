// src/common/frame.rs

/// Start-of-text byte opening every frame.
pub const STX: u8 = 0x02;
/// End-of-text byte closing the frame body.
pub const ETX: u8 = 0x03;
/// Carriage return trailing every frame.
pub const CR: u8 = 0x0D;

/// Framed `RERROR`, sent by the ventilator when it rejects the last command.
pub const RERROR_FRAME: [u8; 9] = [STX, b'R', b'E', b'R', b'R', b'O', b'R', ETX, CR];

/// Bytes spent on framing (`STX` + `ETX` + `CR`).
pub const FRAMING_OVERHEAD: usize = 3;

/// Length of an outbound command frame.
pub const COMMAND_FRAME_LEN: usize = 4;

/// Longest response frame on the wire (waveform status frames).
pub const MAX_RESPONSE_LEN: usize = 13;

/// Returns `true` if `raw` starts with `STX` and ends with `ETX CR`.
#[inline]
pub fn is_delimited(raw: &[u8]) -> bool {
    raw.len() >= FRAMING_OVERHEAD && raw[0] == STX && raw.ends_with(&[ETX, CR])
}

/// Returns the bytes between `STX` and `ETX CR`, if `raw` is delimited.
#[inline]
pub fn frame_body(raw: &[u8]) -> Option<&[u8]> {
    if is_delimited(raw) {
        Some(&raw[1..raw.len() - 2])
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rerror_frame_spells_rerror() {
        assert_eq!(frame_body(&RERROR_FRAME), Some(&b"RERROR"[..]));
    }

    #[test]
    fn test_is_delimited() {
        assert!(is_delimited(&[STX, 0x41, ETX, CR]));
        assert!(is_delimited(&[STX, ETX, CR]));
        assert!(!is_delimited(&[STX, 0x41, ETX]));
        assert!(!is_delimited(&[0x00, 0x41, ETX, CR]));
        assert!(!is_delimited(&[STX, 0x41, CR, ETX]));
        assert!(!is_delimited(&[]));
    }

    #[test]
    fn test_frame_body_rejects_undelimited() {
        assert_eq!(frame_body(&[STX, 0x41, 0x42, ETX, CR]), Some(&[0x41, 0x42][..]));
        assert_eq!(frame_body(&[0x41, 0x42]), None);
    }
}
