// src/device/formatter.rs

use arrayvec::ArrayVec;

use super::error::EncodeError;
use crate::common::{
    command::CO2_WAVEFORM_BLOCK,
    frame::{CR, ETX, MAX_RESPONSE_LEN, RERROR_FRAME, STX},
    response::{
        classify_identifier, Co2WaveformFrame, NineByteShape, Response, UnknownIdentifierPolicy,
        WaveformFrame,
    },
    types::{Payload, MAX_PAYLOAD_LEN},
    waveform::RawSample,
};

/// Wire bytes of one response frame.
pub type ResponseBytes = ArrayVec<u8, MAX_RESPONSE_LEN>;

/// Value bytes of Type B frames under the current protocol revision.
const TYPE_B_PAYLOAD_LEN: usize = 4;

/// Formats a response the way the ventilator sends it.
///
/// Value frames are laid out as `STX <header> <values> ETX CR`, where the
/// header is the identifier and/or device identifier of the variant. Only
/// responses the current protocol revision can carry are accepted, so every
/// encoded frame decodes back to the same response.
pub fn encode_response(response: &Response) -> Result<ResponseBytes, EncodeError> {
    let mut out = ResponseBytes::new();
    match response {
        Response::RError => out.extend(RERROR_FRAME),
        Response::TypeA { identifier, values } => {
            check_shape(*identifier, NineByteShape::TypeA)?;
            check_payload(values, MAX_PAYLOAD_LEN)?;
            push_framed(&mut out, &[*identifier], values.as_bytes());
        }
        Response::TypeBFormat1 { identifier, device_id, values } => {
            check_shape(*identifier, NineByteShape::TypeBFormat1)?;
            check_payload(values, TYPE_B_PAYLOAD_LEN)?;
            push_framed(&mut out, &[*identifier, *device_id], values.as_bytes());
        }
        Response::TypeBFormat2 { device_id, values } => {
            check_shape(device_id[0], NineByteShape::TypeBFormat2)?;
            check_payload(values, TYPE_B_PAYLOAD_LEN)?;
            push_framed(&mut out, device_id, values.as_bytes());
        }
        Response::TypeBFormat3 { device_id, values } => {
            check_payload(values, TYPE_B_PAYLOAD_LEN)?;
            push_framed(&mut out, &[*device_id], values.as_bytes());
        }
        Response::TypeC34(frame) => push_co2_waveform(&mut out, frame),
        Response::TypeC120(frame) => {
            if frame.identifier == CO2_WAVEFORM_BLOCK {
                return Err(EncodeError::ReservedWaveformIdentifier { identifier: frame.identifier });
            }
            push_waveform(&mut out, frame);
        }
    }

    if !response.is_rejection() && out.as_slice() == RERROR_FRAME.as_slice() {
        return Err(EncodeError::CollidesWithRError);
    }
    Ok(out)
}

// --- Internal Helpers ---

// The leading byte of a 9-byte frame must select the same layout on decode.
fn check_shape(identifier: u8, shape: NineByteShape) -> Result<(), EncodeError> {
    match classify_identifier(identifier, UnknownIdentifierPolicy::Reject) {
        Ok(found) if found == shape => Ok(()),
        _ => Err(EncodeError::IdentifierMismatch { identifier }),
    }
}

fn check_payload(values: &Payload, expected: usize) -> Result<(), EncodeError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(EncodeError::PayloadLength { expected, len: values.len() })
    }
}

// Headers are at most two bytes and payloads at most five, so a value
// frame never exceeds ten bytes.
fn push_framed(out: &mut ResponseBytes, header: &[u8], values: &[u8]) {
    out.push(STX);
    out.extend(header.iter().copied());
    out.extend(values.iter().copied());
    out.extend([ETX, CR]);
}

fn push_samples(out: &mut ResponseBytes, samples: [RawSample; 4]) {
    for sample in samples {
        out.extend([sample.low, sample.high]);
    }
}

fn push_co2_waveform(out: &mut ResponseBytes, frame: &Co2WaveformFrame) {
    out.extend([STX, CO2_WAVEFORM_BLOCK, frame.ventilator_status]);
    push_samples(out, [frame.patient_pressure, frame.flow, frame.volume, frame.co2]);
    out.extend([ETX, CR]);
}

fn push_waveform(out: &mut ResponseBytes, frame: &WaveformFrame) {
    out.extend([STX, frame.identifier, frame.ventilator_status]);
    push_samples(
        out,
        [frame.patient_pressure, frame.optional_pressure, frame.flow, frame.volume],
    );
    out.extend([ETX, CR]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::response::decode;

    fn payload(bytes: &[u8]) -> Payload {
        Payload::try_from(bytes).unwrap()
    }

    #[test]
    fn test_encode_rerror_is_sentinel() {
        assert_eq!(encode_response(&Response::RError).unwrap().as_slice(), &RERROR_FRAME);
    }

    #[test]
    fn test_encode_value_frames() {
        let a = Response::TypeA { identifier: 30, values: payload(&[0x00, 0x01, 0x02, 0x03, 46]) };
        assert_eq!(
            encode_response(&a).unwrap().as_slice(),
            &[0x02, 30, 0x00, 0x01, 0x02, 0x03, 46, 0x03, 0x0D]
        );

        let f1 = Response::TypeBFormat1 { identifier: 0x7C, device_id: 0x47, values: payload(b"0200") };
        assert_eq!(
            encode_response(&f1).unwrap().as_slice(),
            &[0x02, 0x7C, 0x47, 0x30, 0x32, 0x30, 0x30, 0x03, 0x0D]
        );

        let f2 = Response::TypeBFormat2 { device_id: [0x41, 0x35], values: payload(&[0x33, 0x34, 0x32, 0x6A]) };
        assert_eq!(
            encode_response(&f2).unwrap().as_slice(),
            &[0x02, 0x41, 0x35, 0x33, 0x34, 0x32, 0x6A, 0x03, 0x0D]
        );

        let f3 = Response::TypeBFormat3 { device_id: 0x43, values: payload(b"9999") };
        assert_eq!(
            encode_response(&f3).unwrap().as_slice(),
            &[0x02, 0x43, 0x39, 0x39, 0x39, 0x39, 0x03, 0x0D]
        );
    }

    #[test]
    fn test_encode_co2_waveform_frame() {
        let c34 = Response::TypeC34(Co2WaveformFrame {
            ventilator_status: 0x05,
            patient_pressure: RawSample::new(0x10, 0x11),
            flow: RawSample::new(0x20, 0x21),
            volume: RawSample::new(0x30, 0x31),
            co2: RawSample::new(0x3F, 0x3F),
        });
        let bytes = encode_response(&c34).unwrap();
        assert_eq!(
            bytes.as_slice(),
            &[0x02, 34, 0x05, 0x10, 0x11, 0x20, 0x21, 0x30, 0x31, 0x3F, 0x3F, 0x03, 0x0D]
        );
        assert_eq!(decode(&bytes), Ok(c34));
    }

    #[test]
    fn test_encode_waveform_frame_channel_order() {
        let c120 = Response::TypeC120(WaveformFrame {
            identifier: 120,
            ventilator_status: 0x07,
            patient_pressure: RawSample::new(0x01, 0x11),
            optional_pressure: RawSample::new(0x02, 0x12),
            flow: RawSample::new(0x03, 0x13),
            volume: RawSample::new(0x04, 0x14),
        });
        let bytes = encode_response(&c120).unwrap();
        assert_eq!(
            bytes.as_slice(),
            &[0x02, 120, 0x07, 0x01, 0x11, 0x02, 0x12, 0x03, 0x13, 0x04, 0x14, 0x03, 0x0D]
        );
        assert_eq!(decode(&bytes), Ok(c120));
    }

    #[test]
    fn test_waveform_frame_rejects_co2_identifier() {
        let frame = Response::TypeC120(WaveformFrame {
            identifier: CO2_WAVEFORM_BLOCK,
            ventilator_status: 0,
            patient_pressure: RawSample::new(1, 1),
            optional_pressure: RawSample::new(2, 2),
            flow: RawSample::new(3, 3),
            volume: RawSample::new(4, 4),
        });
        assert_eq!(
            encode_response(&frame),
            Err(EncodeError::ReservedWaveformIdentifier { identifier: 34 })
        );
    }

    #[test]
    fn test_payload_length_must_fit_layout() {
        let long_f1 = Response::TypeBFormat1 { identifier: 0x7C, device_id: 0x47, values: payload(b"12345") };
        assert_eq!(encode_response(&long_f1), Err(EncodeError::PayloadLength { expected: 4, len: 5 }));

        let long_f2 = Response::TypeBFormat2 { device_id: [0x41, 0x35], values: payload(b"12345") };
        assert_eq!(encode_response(&long_f2), Err(EncodeError::PayloadLength { expected: 4, len: 5 }));

        let short_f3 = Response::TypeBFormat3 { device_id: 0x43, values: payload(b"999") };
        assert_eq!(encode_response(&short_f3), Err(EncodeError::PayloadLength { expected: 4, len: 3 }));

        let short_a = Response::TypeA { identifier: 40, values: payload(b"5.0") };
        assert_eq!(encode_response(&short_a), Err(EncodeError::PayloadLength { expected: 5, len: 3 }));
    }

    #[test]
    fn test_identifier_must_select_variant_layout() {
        // 0x41 decodes as Format 2, 40 as Type A
        let a = Response::TypeA { identifier: 0x41, values: payload(b"12345") };
        assert_eq!(encode_response(&a), Err(EncodeError::IdentifierMismatch { identifier: 0x41 }));

        let f1 = Response::TypeBFormat1 { identifier: 40, device_id: 0x47, values: payload(b"0200") };
        assert_eq!(encode_response(&f1), Err(EncodeError::IdentifierMismatch { identifier: 40 }));

        let f2 = Response::TypeBFormat2 { device_id: [0x05, 0x35], values: payload(b"342j") };
        assert_eq!(encode_response(&f2), Err(EncodeError::IdentifierMismatch { identifier: 0x05 }));
    }

    #[test]
    fn test_format2_spelling_rerror_is_refused() {
        let frame = Response::TypeBFormat2 { device_id: [0x52, 0x45], values: payload(b"RROR") };
        assert_eq!(encode_response(&frame), Err(EncodeError::CollidesWithRError));
    }

    #[test]
    fn test_simulated_device_answer_decodes() {
        let answer = Response::TypeA { identifier: 40, values: payload(b"  5.0") };
        let decoded = decode(&encode_response(&answer).unwrap()).unwrap();
        assert_eq!(decoded.values().and_then(Payload::to_f32), Some(5.0));
        assert_eq!(decoded, answer);
    }
}
