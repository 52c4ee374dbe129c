// src/poller/mod.rs

//! Blocking polling driver.
//!
//! [`Poller`] owns a serial transport and a [`Publisher`]. Each cycle it
//! requests one waveform block and one numeric parameter from a round-robin
//! schedule, decodes the answers and hands the resulting [`Reading`]s to the
//! publisher.

mod config;
mod io_helpers;
mod publisher;
mod transaction;

pub use config::{PollerConfig, DEFAULT_MAX_ATTEMPTS, DEFAULT_NUMERIC_SCHEDULE};
pub use publisher::{Publisher, Reading};

use arrayvec::ArrayVec;
use core::convert::Infallible;

use crate::common::{
    command::IDENTIFY_DEVICE,
    error::PollError,
    hal_traits::{VentSerial, VentTimer},
    response::Response,
    types::Payload,
    waveform::WaveformSet,
};

/// Capacity of the frame read buffer. Longer answers are reported as overflow.
pub(crate) const READ_BUFFER_LEN: usize = 32;

pub(crate) type FrameBuffer = ArrayVec<u8, READ_BUFFER_LEN>;

pub(crate) type PollResult<T, IF, P> =
    Result<T, PollError<<IF as VentSerial>::Error, <P as Publisher>::Error>>;

/// Ventilator polling driver over a generic transport.
#[derive(Debug)]
pub struct Poller<'a, IF, P>
where
    IF: VentSerial + VentTimer,
    P: Publisher,
{
    interface: IF,
    publisher: P,
    config: PollerConfig<'a>,
    schedule_pos: usize,
}

impl<'a, IF, P> Poller<'a, IF, P>
where
    IF: VentSerial + VentTimer,
    P: Publisher,
{
    pub fn new(interface: IF, publisher: P, config: PollerConfig<'a>) -> Self {
        Poller {
            interface,
            publisher,
            config,
            schedule_pos: 0,
        }
    }

    pub fn config(&self) -> &PollerConfig<'a> {
        &self.config
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    /// Releases the transport and the publisher.
    pub fn into_parts(self) -> (IF, P) {
        (self.interface, self.publisher)
    }

    // --- Public Blocking Methods ---

    /// Sends one command and returns the decoded answer.
    ///
    /// An `RERROR` answer is reported as [`PollError::Rejected`].
    pub fn request(&mut self, identifier: u8) -> PollResult<Response, IF, P> {
        self.execute_transaction(identifier)
    }

    /// Requests the device identification and publishes it.
    ///
    /// Accepts a Type B Format 2 or a Type A answer; any other frame is an
    /// unexpected response.
    pub fn identify(&mut self) -> PollResult<Payload, IF, P> {
        let values = match self.execute_transaction(IDENTIFY_DEVICE)? {
            Response::TypeBFormat2 { values, .. } | Response::TypeA { values, .. } => values,
            _ => return Err(PollError::UnexpectedResponse { identifier: IDENTIFY_DEVICE }),
        };

        log::debug!("device identification: {}", values);
        self.publish(&Reading::DeviceIdentity { values: values.clone() })?;
        Ok(values)
    }

    /// Requests one waveform block and publishes every sample it carries.
    pub fn poll_waveforms(&mut self) -> PollResult<WaveformSet, IF, P> {
        let identifier = self.config.waveform_identifier;
        let response = self.execute_transaction(identifier)?;
        if !response.is_waveform() {
            return Err(PollError::UnexpectedResponse { identifier });
        }

        let samples = response.waveforms();
        for &(channel, sample) in &samples {
            self.publish(&Reading::Waveform { channel, sample })?;
        }
        Ok(samples)
    }

    /// Requests a numeric parameter and publishes its value.
    ///
    /// Returns `Ok(None)` when the device answered with a payload that is not
    /// a number (e.g. `" ----"` for an unavailable parameter); nothing is
    /// published in that case.
    pub fn poll_numeric(&mut self, identifier: u8) -> PollResult<Option<f32>, IF, P> {
        let response = self.execute_transaction(identifier)?;
        let values = response
            .values()
            .ok_or(PollError::UnexpectedResponse { identifier })?;

        let Some(value) = values.to_f32() else {
            log::warn!("identifier {}: non-numeric payload {}", identifier, values);
            return Ok(None);
        };

        let label = self.config.labels.label(identifier);
        self.publish(&Reading::Numeric { identifier, label, value })?;
        Ok(Some(value))
    }

    /// One polling cycle: a waveform block, then the next scheduled numeric parameter.
    pub fn step(&mut self) -> PollResult<(), IF, P> {
        self.poll_waveforms()?;

        if let Some(identifier) = self.next_scheduled() {
            self.poll_numeric(identifier)?;
        }
        Ok(())
    }

    /// Runs [`step`](Self::step) forever.
    ///
    /// Failed cycles are logged and skipped. Only transport and publisher
    /// errors end the loop.
    pub fn run(&mut self) -> PollResult<Infallible, IF, P> {
        loop {
            match self.step() {
                Ok(()) => {}
                Err(e @ (PollError::Io(_) | PollError::Publish(_))) => return Err(e),
                Err(e) => log::warn!("poll cycle skipped: {}", e),
            }
        }
    }

    // --- Internal Helpers ---

    fn next_scheduled(&mut self) -> Option<u8> {
        let schedule = self.config.schedule;
        if schedule.is_empty() {
            return None;
        }
        let identifier = schedule[self.schedule_pos % schedule.len()];
        self.schedule_pos = (self.schedule_pos + 1) % schedule.len();
        Some(identifier)
    }

    fn publish(&mut self, reading: &Reading<'_>) -> PollResult<(), IF, P> {
        self.publisher.publish(reading).map_err(PollError::Publish)
    }
}
