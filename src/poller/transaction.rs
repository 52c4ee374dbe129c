// src/poller/transaction.rs

use super::{PollResult, Poller, Publisher};
use crate::common::{
    command::encode,
    error::PollError,
    hal_traits::{VentSerial, VentTimer},
    response::{decode_with, Response},
};

impl<'a, IF, P> Poller<'a, IF, P>
where
    IF: VentSerial + VentTimer,
    P: Publisher,
{
    /// Executes a full request/response transaction with retries.
    ///
    /// Timeouts and truncated frames are retried; I/O errors, decode errors
    /// and `RERROR` answers are returned immediately.
    pub(super) fn execute_transaction(&mut self, identifier: u8) -> PollResult<Response, IF, P> {
        let command = encode(identifier);
        let attempts = self.config.max_attempts.max(1);
        let mut last_error = PollError::Timeout;

        for attempt in 1..=attempts {
            self.drain_input()?;

            log::trace!("request {} ({}), attempt {}/{}", identifier, command, attempt, attempts);
            self.send_frame_bytes(command.as_bytes())?;
            self.delay_for(self.config.settle_delay);

            let frame = match self.read_frame() {
                Ok(frame) => frame,
                Err(e) if e.is_transient() => {
                    log::warn!("identifier {}: {} (attempt {}/{})", identifier, e, attempt, attempts);
                    last_error = e;
                    continue;
                }
                Err(e) => return Err(e),
            };

            let response = match decode_with(&frame, &self.config.decoder) {
                Ok(response) => response,
                Err(e) => {
                    log::warn!("identifier {}: {} in frame {:02X?}", identifier, e, frame.as_slice());
                    return Err(e.into());
                }
            };
            log::debug!("identifier {} -> {:?}", identifier, response);

            if response.is_rejection() {
                return Err(PollError::Rejected { identifier });
            }
            return Ok(response);
        }

        Err(last_error)
    }
}
