// src/poller/config.rs

use core::time::Duration;

use crate::common::response::DecoderConfig;
use crate::common::types::ParameterLabels;
use crate::common::{timing, WAVEFORM_BLOCK};

/// Numeric parameters polled round-robin by default, one per cycle.
pub const DEFAULT_NUMERIC_SCHEDULE: &[u8] = &[
    40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 87, 104, 105, 106, 107, 108, 110, 111,
    35, 36, 37, 38, 39, 60, 61, 62, 63, 64, 65, 66, 67, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79,
    103, 113, 114, 115, 116, 117, 118, 121, 122,
];

/// Default number of attempts per request (first try included).
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;

/// Settings of a [`Poller`](super::Poller).
#[derive(Debug, Copy, Clone)]
pub struct PollerConfig<'a> {
    /// How response frames are classified.
    pub decoder: DecoderConfig,
    /// Numeric identifiers polled round-robin after each waveform request.
    pub schedule: &'a [u8],
    /// Names attached to numeric readings.
    pub labels: ParameterLabels<'a>,
    /// Identifier requested for waveform samples.
    pub waveform_identifier: u8,
    /// Wait between writing a command and reading the answer.
    pub settle_delay: Duration,
    /// Wait for the first response byte.
    pub response_timeout: Duration,
    /// Line silence that ends a frame.
    pub quiet_period: Duration,
    /// Attempts per request for timeouts and truncated frames. Zero behaves like one.
    pub max_attempts: usize,
}

impl Default for PollerConfig<'static> {
    fn default() -> Self {
        PollerConfig {
            decoder: DecoderConfig::new(),
            schedule: DEFAULT_NUMERIC_SCHEDULE,
            labels: ParameterLabels::EMPTY,
            waveform_identifier: WAVEFORM_BLOCK,
            settle_delay: timing::SETTLE_DELAY,
            response_timeout: timing::RESPONSE_TIMEOUT,
            quiet_period: timing::QUIET_PERIOD,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl<'a> PollerConfig<'a> {
    pub fn with_decoder(mut self, decoder: DecoderConfig) -> Self {
        self.decoder = decoder;
        self
    }

    pub fn with_schedule<'b>(self, schedule: &'b [u8]) -> PollerConfig<'b>
    where
        'a: 'b,
    {
        let mut config: PollerConfig<'b> = self;
        config.schedule = schedule;
        config
    }

    pub fn with_labels<'b>(self, labels: ParameterLabels<'b>) -> PollerConfig<'b>
    where
        'a: 'b,
    {
        let mut config: PollerConfig<'b> = self;
        config.labels = labels;
        config
    }

    pub fn with_waveform_identifier(mut self, identifier: u8) -> Self {
        self.waveform_identifier = identifier;
        self
    }

    pub fn with_settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    pub fn with_response_timeout(mut self, timeout: Duration) -> Self {
        self.response_timeout = timeout;
        self
    }

    pub fn with_quiet_period(mut self, quiet: Duration) -> Self {
        self.quiet_period = quiet;
        self
    }

    pub fn with_max_attempts(mut self, attempts: usize) -> Self {
        self.max_attempts = attempts;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::response::{decode, DecodeError};

    #[test]
    fn test_default_schedule_is_numeric() {
        // every scheduled identifier must answer with a 9-byte value frame
        for &id in DEFAULT_NUMERIC_SCHEDULE {
            let raw = [0x02, id, b' ', b' ', b'1', b'.', b'0', 0x03, 0x0D];
            assert!(decode(&raw).map(|r| r.values().is_some()).unwrap_or(false), "identifier {}", id);
        }
        assert!(!DEFAULT_NUMERIC_SCHEDULE.contains(&WAVEFORM_BLOCK));
    }

    #[test]
    fn test_waveform_identifier_is_not_a_nine_byte_identifier() {
        let raw = [0x02, WAVEFORM_BLOCK, 0, 0, 0, 0, 0, 0x03, 0x0D];
        assert_eq!(decode(&raw), Err(DecodeError::UnrecognizedIdentifier { identifier: WAVEFORM_BLOCK }));
    }

    #[test]
    fn test_builders_narrow_lifetimes() {
        let schedule = [40u8, 41];
        let names = [(40u8, "PEEP")];
        let config = PollerConfig::default()
            .with_schedule(&schedule)
            .with_labels(ParameterLabels::new(&names))
            .with_max_attempts(1)
            .with_settle_delay(Duration::from_millis(50));
        assert_eq!(config.schedule, &[40, 41]);
        assert_eq!(config.labels.label(40), Some("PEEP"));
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.settle_delay, Duration::from_millis(50));
        assert_eq!(config.waveform_identifier, 120);
    }
}
