// src/common/hal_traits.rs

use core::fmt::Debug;
use core::ops::Add;
use core::time::Duration;
use embedded_hal::delay::DelayNs;

/// Monotonic timestamp the poller computes deadlines with.
pub trait PollInstant: Copy + Ord + Add<Duration, Output = Self> {}

impl<T> PollInstant for T where T: Copy + Ord + Add<Duration, Output = T> {}

/// Clock and delay source for the poller.
///
/// Delays come from `embedded_hal::delay::DelayNs`, so any HAL delay provider
/// only needs to add a monotonic `now()`.
pub trait VentTimer: DelayNs {
    type Instant: PollInstant;

    /// Current monotonic time.
    fn now(&self) -> Self::Instant;
}

/// Abstraction for non-blocking serial communication with the ventilator.
pub trait VentSerial {
    /// Associated error type for communication errors.
    type Error: Debug;

    /// Attempts to read a single byte from the serial interface.
    ///
    /// Returns `Ok(byte)` if a byte was read, or `Err(nb::Error::WouldBlock)`
    /// if no byte is available yet. Other errors are returned as `Err(nb::Error::Other(Self::Error))`.
    fn read_byte(&mut self) -> nb::Result<u8, Self::Error>;

    /// Attempts to write a single byte to the serial interface.
    ///
    /// Returns `Err(nb::Error::WouldBlock)` if the write buffer is full.
    fn write_byte(&mut self, byte: u8) -> nb::Result<(), Self::Error>;

    /// Attempts to flush the transmit buffer, ensuring all written bytes have been sent.
    fn flush(&mut self) -> nb::Result<(), Self::Error>;
}
