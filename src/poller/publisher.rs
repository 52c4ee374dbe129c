// src/poller/publisher.rs

use core::fmt::Debug;

use crate::common::types::Payload;
use crate::common::waveform::{WaveformChannel, WaveformSample};

/// One decoded value handed to the downstream consumer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Reading<'a> {
    /// Numeric parameter, with its configured name when one exists.
    Numeric { identifier: u8, label: Option<&'a str>, value: f32 },
    /// One point of a waveform channel.
    Waveform { channel: WaveformChannel, sample: WaveformSample },
    /// Identification bytes reported by the device.
    DeviceIdentity { values: Payload },
}

impl Reading<'_> {
    /// Key a consumer can file the reading under, if it has one.
    pub fn key(&self) -> Option<&str> {
        match self {
            Reading::Numeric { label, .. } => *label,
            Reading::Waveform { channel, .. } => Some(channel.key()),
            Reading::DeviceIdentity { .. } => None,
        }
    }
}

/// Sink for decoded readings (message queue producer, logger, ...).
pub trait Publisher {
    type Error: Debug;

    fn publish(&mut self, reading: &Reading<'_>) -> Result<(), Self::Error>;
}

impl<T: Publisher + ?Sized> Publisher for &mut T {
    type Error = T::Error;

    fn publish(&mut self, reading: &Reading<'_>) -> Result<(), Self::Error> {
        (**self).publish(reading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_keys() {
        let numeric = Reading::Numeric { identifier: 40, label: Some("PEEP"), value: 5.0 };
        assert_eq!(numeric.key(), Some("PEEP"));
        let unnamed = Reading::Numeric { identifier: 41, label: None, value: 1.0 };
        assert_eq!(unnamed.key(), None);
        let wave = Reading::Waveform { channel: WaveformChannel::Flow, sample: WaveformSample::MIN };
        assert_eq!(wave.key(), Some("FLOW"));
    }

    struct Counter(usize);

    impl Publisher for Counter {
        type Error = ();
        fn publish(&mut self, _reading: &Reading<'_>) -> Result<(), ()> {
            self.0 += 1;
            Ok(())
        }
    }

    fn publish_twice<P: Publisher>(mut publisher: P) {
        let reading = Reading::DeviceIdentity { values: Payload::default() };
        publisher.publish(&reading).unwrap();
        publisher.publish(&reading).unwrap();
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut counter = Counter(0);
        publish_twice(&mut counter);
        assert_eq!(counter.0, 2);
    }
}
