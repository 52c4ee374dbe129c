// src/common/timing.rs

use core::time::Duration;

// === Request/Response Timing ===

/// Minimum wait between writing a command and reading its answer.
/// The ventilator needs more than 36 ms to start responding.
pub const SETTLE_DELAY: Duration = Duration::from_millis(36);

/// Maximum wait for the first response byte after the settle delay.
pub const RESPONSE_TIMEOUT: Duration = Duration::from_millis(500);

/// Line silence that ends a response frame once bytes have arrived.
/// Roughly four character times at 9600 baud.
pub const QUIET_PERIOD: Duration = Duration::from_millis(5);

/// Maximum wait for a single byte to be accepted by the transmitter.
pub const WRITE_TIMEOUT: Duration = Duration::from_millis(50);

/// Maximum wait for the transmit buffer to drain.
pub const FLUSH_TIMEOUT: Duration = Duration::from_millis(20);

/// Pause between busy polls of a non-blocking transport.
pub const POLL_INTERVAL_US: u32 = 100;

// === Byte Timing at 9600 Baud (8E2) ===
// 1 start bit + 8 data bits + 1 parity bit + 2 stop bits = 12 bits per byte
// Time per byte = 12 / 9600 s = 1.25 ms

/// Nominal duration of a single byte at 9600 baud, 8E2.
pub const BYTE_DURATION: Duration = Duration::from_micros(1250);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_period_spans_several_bytes() {
        assert!(QUIET_PERIOD >= BYTE_DURATION * 3);
    }

    #[test]
    fn test_longest_frame_fits_write_timeout() {
        assert!(BYTE_DURATION * 13 < WRITE_TIMEOUT);
    }
}
