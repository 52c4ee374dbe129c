// src/poller/io_helpers.rs

use super::{FrameBuffer, PollResult, Poller, Publisher, READ_BUFFER_LEN};
use crate::common::{
    error::PollError,
    frame::{CR, ETX},
    hal_traits::{VentSerial, VentTimer},
    timing,
};
use core::time::Duration;
use embedded_hal::delay::DelayNs;
use nb::Result as NbResult;

// Implementation block for I/O related helpers
impl<'a, IF, P> Poller<'a, IF, P>
where
    IF: VentSerial + VentTimer,
    P: Publisher,
{
    /// Executes a non-blocking I/O operation (`f`) repeatedly until it
    /// stops returning `WouldBlock`, returning the final result or a timeout error.
    pub(super) fn execute_blocking_io_with_timeout<FN, T>(
        &mut self,
        timeout: Duration,
        mut f: FN,
    ) -> PollResult<T, IF, P>
    where
        FN: FnMut(&mut IF) -> NbResult<T, IF::Error>,
    {
        let deadline = self.interface.now() + timeout;

        loop {
            match f(&mut self.interface) {
                Ok(result) => return Ok(result),
                Err(nb::Error::WouldBlock) => {
                    if self.interface.now() >= deadline {
                        return Err(PollError::Timeout);
                    }
                    self.interface.delay_us(timing::POLL_INTERVAL_US);
                }
                Err(nb::Error::Other(e)) => return Err(PollError::Io(e)),
            }
        }
    }

    /// Discards bytes left over from an earlier answer. Returns how many were dropped.
    pub(super) fn drain_input(&mut self) -> PollResult<usize, IF, P> {
        let mut discarded = 0;
        loop {
            match self.interface.read_byte() {
                Ok(_) => discarded += 1,
                Err(nb::Error::WouldBlock) => break,
                Err(nb::Error::Other(e)) => return Err(PollError::Io(e)),
            }
        }
        if discarded > 0 {
            log::warn!("discarded {} stale bytes before request", discarded);
        }
        Ok(discarded)
    }

    /// Sends an encoded frame and waits for the transmitter to drain.
    pub(super) fn send_frame_bytes(&mut self, frame: &[u8]) -> PollResult<(), IF, P> {
        for byte in frame {
            self.execute_blocking_io_with_timeout(timing::WRITE_TIMEOUT, |iface| {
                iface.write_byte(*byte)
            })?;
        }

        // the whole frame may still be in the transmitter
        let flush_timeout = timing::FLUSH_TIMEOUT + timing::BYTE_DURATION * frame.len() as u32;
        self.execute_blocking_io_with_timeout(flush_timeout, |iface| iface.flush())?;

        Ok(())
    }

    /// Blocks for `duration`. Microsecond resolution; delays too long for a
    /// `u32` of microseconds fall back to milliseconds, saturating at `u32::MAX`.
    pub(super) fn delay_for(&mut self, duration: Duration) {
        match u32::try_from(duration.as_micros()) {
            Ok(us) => self.interface.delay_us(us),
            Err(_) => {
                let ms = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
                self.interface.delay_ms(ms);
            }
        }
    }

    /// Reads one response frame.
    ///
    /// Bytes are collected until the line stays quiet for `quiet_period`; the
    /// frame must then end with `ETX CR`. Waiting on quiet rather than on the
    /// first `ETX CR` keeps waveform frames intact, since their status bytes
    /// can take the values `0x03 0x0D`.
    pub(super) fn read_frame(&mut self) -> PollResult<FrameBuffer, IF, P> {
        let first_byte_deadline = self.interface.now() + self.config.response_timeout;
        let mut quiet_deadline = None;
        let mut frame = FrameBuffer::new();

        loop {
            match self.interface.read_byte() {
                Ok(byte) => {
                    if frame.try_push(byte).is_err() {
                        return Err(PollError::BufferOverflow {
                            needed: READ_BUFFER_LEN + 1,
                            got: READ_BUFFER_LEN,
                        });
                    }
                    quiet_deadline = Some(self.interface.now() + self.config.quiet_period);
                }
                Err(nb::Error::WouldBlock) => {
                    let now = self.interface.now();
                    match quiet_deadline {
                        Some(deadline) if now >= deadline => break,
                        None if now >= first_byte_deadline => return Err(PollError::Timeout),
                        _ => self.interface.delay_us(timing::POLL_INTERVAL_US),
                    }
                }
                Err(nb::Error::Other(e)) => return Err(PollError::Io(e)),
            }
        }

        if frame.ends_with(&[ETX, CR]) {
            Ok(frame)
        } else {
            Err(PollError::Truncated { len: frame.len() })
        }
    }
}
