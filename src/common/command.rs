//! Outbound command frames.
//!
//! Every request to the ventilator is the same four bytes: `STX <identifier> ETX CR`.
//! The identifier selects which parameter (numeric value, waveform block,
//! device identification, ...) the device should answer with.

use core::fmt;

use super::frame::{COMMAND_FRAME_LEN, CR, ETX, STX};

/// Identifier requesting the device identification (`'V'`).
pub const IDENTIFY_DEVICE: u8 = 0x56;

/// Identifier requesting the pressure/flow/volume waveform block.
pub const WAVEFORM_BLOCK: u8 = 120;

/// Identifier requesting the waveform block that carries CO2 instead of optional pressure.
pub const CO2_WAVEFORM_BLOCK: u8 = 34;

/// A framed request for one device parameter.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CommandFrame([u8; COMMAND_FRAME_LEN]);

impl CommandFrame {
    /// Builds the frame requesting `identifier`.
    #[inline]
    pub const fn new(identifier: u8) -> Self {
        CommandFrame([STX, identifier, ETX, CR])
    }

    /// The requested identifier.
    #[inline]
    pub const fn identifier(&self) -> u8 {
        self.0[1]
    }

    /// The four wire bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; COMMAND_FRAME_LEN] {
        &self.0
    }

    #[inline]
    pub const fn into_bytes(self) -> [u8; COMMAND_FRAME_LEN] {
        self.0
    }
}

impl AsRef<[u8]> for CommandFrame {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<u8> for CommandFrame {
    fn from(identifier: u8) -> Self {
        CommandFrame::new(identifier)
    }
}

impl From<CommandFrame> for [u8; COMMAND_FRAME_LEN] {
    fn from(frame: CommandFrame) -> Self {
        frame.0
    }
}

/// Hex dump of the wire bytes, e.g. `02 56 03 0D`.
impl fmt::Display for CommandFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X} {:02X} {:02X} {:02X}", self.0[0], self.0[1], self.0[2], self.0[3])
    }
}

/// Encodes the request for `identifier`. Total: every byte is a valid identifier.
#[inline]
pub const fn encode(identifier: u8) -> CommandFrame {
    CommandFrame::new(identifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::fmt::Write;
    use heapless::String as HeaplessString;

    #[test]
    fn test_encode_every_identifier() {
        for identifier in 0..=u8::MAX {
            let frame = encode(identifier);
            assert_eq!(frame.as_bytes(), &[0x02, identifier, 0x03, 0x0D]);
            assert_eq!(frame.identifier(), identifier);
        }
    }

    #[test]
    fn test_known_requests() {
        assert_eq!(encode(IDENTIFY_DEVICE).into_bytes(), [0x02, 0x56, 0x03, 0x0D]);
        assert_eq!(encode(WAVEFORM_BLOCK).into_bytes(), [0x02, 0x78, 0x03, 0x0D]);
        assert_eq!(<[u8; 4]>::from(CommandFrame::from(0x40)), [0x02, 0x40, 0x03, 0x0D]);
    }

    #[test]
    fn test_display_hex_dump() {
        let mut output = HeaplessString::<16>::new();
        write!(output, "{}", encode(IDENTIFY_DEVICE)).unwrap();
        assert_eq!(output.as_str(), "02 56 03 0D");
    }
}
