//! Waveform sample decoding.
//!
//! Waveform status frames carry each 12-bit sample as two status bytes. Only
//! the low six bits of each byte are significant; the twelve bits are sent in
//! reverse order relative to plain binary, so the decoder rebuilds the bit
//! array, reverses it and reads it most-significant bit first. The result is
//! centred on zero by subtracting 2048.

use arrayvec::ArrayVec;
use core::fmt;

/// Significant bits per status byte.
const BITS_PER_BYTE: usize = 6;

/// Bits in one reassembled sample.
pub const SAMPLE_BITS: usize = 2 * BITS_PER_BYTE;

/// Offset subtracted from the raw 12-bit value.
pub const SAMPLE_OFFSET: i16 = 1 << (SAMPLE_BITS - 1);

/// Most channels any waveform status frame carries.
pub const MAX_CHANNELS: usize = 4;

/// A centred waveform point in `[-2048, 2047]`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct WaveformSample(i16);

impl WaveformSample {
    pub const MIN: WaveformSample = WaveformSample(-SAMPLE_OFFSET);
    pub const MAX: WaveformSample = WaveformSample(SAMPLE_OFFSET - 1);

    #[inline]
    pub const fn get(self) -> i16 {
        self.0
    }
}

impl From<WaveformSample> for i16 {
    fn from(sample: WaveformSample) -> Self {
        sample.0
    }
}

impl From<WaveformSample> for i32 {
    fn from(sample: WaveformSample) -> Self {
        i32::from(sample.0)
    }
}

impl fmt::Display for WaveformSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The undecoded `(low, high)` status byte pair of one channel.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct RawSample {
    pub low: u8,
    pub high: u8,
}

impl RawSample {
    #[inline]
    pub const fn new(low: u8, high: u8) -> Self {
        RawSample { low, high }
    }

    #[inline]
    pub fn to_sample(self) -> WaveformSample {
        to_sample(self.low, self.high)
    }
}

/// Decodes one waveform sample from its status byte pair.
pub fn to_sample(low: u8, high: u8) -> WaveformSample {
    let bits = concatenate(extract_bits(low), extract_bits(high));
    let reversed = reverse(bits);
    let value = interpret_msb_first(&reversed);
    // value < 4096, fits i16
    WaveformSample(value as i16 - SAMPLE_OFFSET)
}

/// Bits 0..6 of `byte`, least significant first.
fn extract_bits(byte: u8) -> [u8; BITS_PER_BYTE] {
    let mut bits = [0u8; BITS_PER_BYTE];
    for (i, bit) in bits.iter_mut().enumerate() {
        *bit = (byte >> i) & 1;
    }
    bits
}

fn concatenate(low: [u8; BITS_PER_BYTE], high: [u8; BITS_PER_BYTE]) -> [u8; SAMPLE_BITS] {
    let mut bits = [0u8; SAMPLE_BITS];
    bits[..BITS_PER_BYTE].copy_from_slice(&low);
    bits[BITS_PER_BYTE..].copy_from_slice(&high);
    bits
}

fn reverse(mut bits: [u8; SAMPLE_BITS]) -> [u8; SAMPLE_BITS] {
    bits.reverse();
    bits
}

/// `Σ bit[i] · 2^(11 - i)`
fn interpret_msb_first(bits: &[u8; SAMPLE_BITS]) -> u16 {
    bits.iter().fold(0u16, |acc, bit| (acc << 1) | u16::from(*bit))
}

// --- Channels ---

/// Physiological signal a waveform sample belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum WaveformChannel {
    PatientPressure,
    OptionalPressure,
    Flow,
    Volume,
    Co2,
}

impl WaveformChannel {
    /// Stable key used when the sample is handed to a publisher.
    pub const fn key(self) -> &'static str {
        match self {
            WaveformChannel::PatientPressure => "P_PATIENT",
            WaveformChannel::OptionalPressure => "P_OPTIONAL",
            WaveformChannel::Flow => "FLOW",
            WaveformChannel::Volume => "VOLUME",
            WaveformChannel::Co2 => "CO2",
        }
    }
}

impl fmt::Display for WaveformChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Decoded samples of one waveform status frame, in wire order.
pub type WaveformSet = ArrayVec<(WaveformChannel, WaveformSample), MAX_CHANNELS>;
