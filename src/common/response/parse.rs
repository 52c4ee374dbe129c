// src/common/response/parse.rs

use super::classify::{classify_identifier, NineByteShape};
use super::config::{DecoderConfig, ProtocolRevision};
use super::error::DecodeError;
use super::{
    Co2WaveformFrame, Response, WaveformFrame, FORMAT3_FRAME_LEN, NINE_BYTE_FRAME_LEN,
    WAVEFORM_FRAME_LEN,
};

use crate::common::command::CO2_WAVEFORM_BLOCK;
use crate::common::frame::{self, RERROR_FRAME};
use crate::common::types::Payload;
use crate::common::waveform::RawSample;

// --- Public Parsing Functions ---

/// Classifies one complete response frame using the default [`DecoderConfig`].
#[inline]
pub fn decode(raw: &[u8]) -> Result<Response, DecodeError> {
    decode_with(raw, &DecoderConfig::default())
}

/// Classifies one complete response frame.
///
/// First match wins: the `RERROR` sentinel, then the frame length
/// (8, 13, 9 bytes), then for 9-byte frames the identifier table.
pub fn decode_with(raw: &[u8], config: &DecoderConfig) -> Result<Response, DecodeError> {
    if raw == RERROR_FRAME {
        return Ok(Response::RError);
    }

    let len = raw.len();
    if !matches!(len, FORMAT3_FRAME_LEN | NINE_BYTE_FRAME_LEN | WAVEFORM_FRAME_LEN) {
        return Err(DecodeError::InvalidLength { len });
    }
    if config.require_delimiters && !frame::is_delimited(raw) {
        return Err(DecodeError::MissingDelimiters);
    }

    match len {
        FORMAT3_FRAME_LEN => Ok(parse_format3(raw, config.revision)),
        WAVEFORM_FRAME_LEN => Ok(parse_waveform_status(raw)),
        _ => parse_nine_byte(raw, config),
    }
}

// --- Internal Helpers ---

fn parse_format3(raw: &[u8], revision: ProtocolRevision) -> Response {
    Response::TypeBFormat3 {
        device_id: raw[1],
        values: Payload::from_wire(&raw[revision.format3_values()]),
    }
}

fn parse_waveform_status(raw: &[u8]) -> Response {
    let identifier = raw[1];
    let ventilator_status = raw[2];
    let pair = |at: usize| RawSample::new(raw[at], raw[at + 1]);

    if identifier == CO2_WAVEFORM_BLOCK {
        Response::TypeC34(Co2WaveformFrame {
            ventilator_status,
            patient_pressure: pair(3),
            flow: pair(5),
            volume: pair(7),
            co2: pair(9),
        })
    } else {
        Response::TypeC120(WaveformFrame {
            identifier,
            ventilator_status,
            patient_pressure: pair(3),
            optional_pressure: pair(5),
            flow: pair(7),
            volume: pair(9),
        })
    }
}

fn parse_nine_byte(raw: &[u8], config: &DecoderConfig) -> Result<Response, DecodeError> {
    let identifier = raw[1];
    let response = match classify_identifier(identifier, config.unknown_identifiers)? {
        NineByteShape::TypeA => Response::TypeA {
            identifier,
            values: Payload::from_wire(&raw[2..7]),
        },
        NineByteShape::TypeBFormat1 => Response::TypeBFormat1 {
            identifier,
            device_id: raw[2],
            values: Payload::from_wire(&raw[3..7]),
        },
        NineByteShape::TypeBFormat2 => Response::TypeBFormat2 {
            device_id: [raw[1], raw[2]],
            values: Payload::from_wire(&raw[config.revision.format2_values()]),
        },
    };
    Ok(response)
}
