// src/common/response/mod.rs

mod classify;
mod config;
mod error;
pub mod parse; // Make parse functions public

// Re-export items for external use
pub use classify::{
    classify_identifier, matching_rule, IdentifierRule, IdentifierSet, NineByteShape,
    FORMAT2_IDENTIFIERS, IDENTIFIER_RULES,
};
pub use config::{DecoderConfig, ProtocolRevision, UnknownIdentifierPolicy};
pub use error::DecodeError;
pub use parse::{decode, decode_with};

use crate::common::types::Payload;
use crate::common::waveform::{RawSample, WaveformChannel, WaveformSet};

/// Length of a Type B Format 3 frame.
pub const FORMAT3_FRAME_LEN: usize = 8;
/// Length of Type A, Type B Format 1/2 frames and of the `RERROR` sentinel.
pub const NINE_BYTE_FRAME_LEN: usize = 9;
/// Length of both waveform status frames.
pub const WAVEFORM_FRAME_LEN: usize = 13;

/// Waveform status answer to identifier 34 (carries CO2).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Co2WaveformFrame {
    pub ventilator_status: u8,
    pub patient_pressure: RawSample,
    pub flow: RawSample,
    pub volume: RawSample,
    pub co2: RawSample,
}

/// Waveform status answer to any other identifier (carries optional pressure).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WaveformFrame {
    pub identifier: u8,
    pub ventilator_status: u8,
    pub patient_pressure: RawSample,
    pub optional_pressure: RawSample,
    pub flow: RawSample,
    pub volume: RawSample,
}

/// Any response frame the ventilator can send.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Response {
    /// `RERROR`: the device rejected the last command.
    RError,
    /// Numeric parameter value (`STX id v v v v v ETX CR`).
    TypeA { identifier: u8, values: Payload },
    /// Value of a multi-channel parameter (`STX id dev v v v v ETX CR`).
    TypeBFormat1 { identifier: u8, device_id: u8, values: Payload },
    /// Identification-style answer (`STX dev dev v v v v ETX CR`).
    TypeBFormat2 { device_id: [u8; 2], values: Payload },
    /// Short answer (`STX dev v v v v ETX CR`).
    TypeBFormat3 { device_id: u8, values: Payload },
    /// 13-byte waveform status with CO2.
    TypeC34(Co2WaveformFrame),
    /// 13-byte waveform status with optional pressure.
    TypeC120(WaveformFrame),
}

impl Response {
    /// Identifier echoed by the frame. B Format 2/3 frames carry none.
    pub fn identifier(&self) -> Option<u8> {
        match self {
            Response::TypeA { identifier, .. } => Some(*identifier),
            Response::TypeBFormat1 { identifier, .. } => Some(*identifier),
            Response::TypeC34(_) => Some(crate::common::command::CO2_WAVEFORM_BLOCK),
            Response::TypeC120(frame) => Some(frame.identifier),
            Response::RError | Response::TypeBFormat2 { .. } | Response::TypeBFormat3 { .. } => None,
        }
    }

    /// Value bytes of numeric/identification frames.
    pub fn values(&self) -> Option<&Payload> {
        match self {
            Response::TypeA { values, .. }
            | Response::TypeBFormat1 { values, .. }
            | Response::TypeBFormat2 { values, .. }
            | Response::TypeBFormat3 { values, .. } => Some(values),
            Response::RError | Response::TypeC34(_) | Response::TypeC120(_) => None,
        }
    }

    /// Device identifier bytes of B-type frames.
    pub fn device_id(&self) -> Option<&[u8]> {
        match self {
            Response::TypeBFormat1 { device_id, .. } | Response::TypeBFormat3 { device_id, .. } => {
                Some(core::slice::from_ref(device_id))
            }
            Response::TypeBFormat2 { device_id, .. } => Some(device_id),
            _ => None,
        }
    }

    /// Ventilator status byte of waveform frames.
    pub fn ventilator_status(&self) -> Option<u8> {
        match self {
            Response::TypeC34(frame) => Some(frame.ventilator_status),
            Response::TypeC120(frame) => Some(frame.ventilator_status),
            _ => None,
        }
    }

    #[inline]
    pub fn is_rejection(&self) -> bool {
        matches!(self, Response::RError)
    }

    #[inline]
    pub fn is_waveform(&self) -> bool {
        matches!(self, Response::TypeC34(_) | Response::TypeC120(_))
    }

    /// Raw channel byte pairs of waveform frames, in wire order. Empty otherwise.
    pub fn raw_waveforms(&self) -> [Option<(WaveformChannel, RawSample)>; 4] {
        match self {
            Response::TypeC34(frame) => [
                Some((WaveformChannel::PatientPressure, frame.patient_pressure)),
                Some((WaveformChannel::Flow, frame.flow)),
                Some((WaveformChannel::Volume, frame.volume)),
                Some((WaveformChannel::Co2, frame.co2)),
            ],
            Response::TypeC120(frame) => [
                Some((WaveformChannel::PatientPressure, frame.patient_pressure)),
                Some((WaveformChannel::OptionalPressure, frame.optional_pressure)),
                Some((WaveformChannel::Flow, frame.flow)),
                Some((WaveformChannel::Volume, frame.volume)),
            ],
            _ => [None; 4],
        }
    }

    /// Decoded samples of waveform frames. Empty for every other variant.
    pub fn waveforms(&self) -> WaveformSet {
        self.raw_waveforms()
            .into_iter()
            .flatten()
            .map(|(channel, raw)| (channel, raw.to_sample()))
            .collect()
    }
}
