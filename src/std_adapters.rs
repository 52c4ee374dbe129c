// src/std_adapters.rs

//! Adapters for running the poller on a hosted platform.
//!
//! [`StdInterface`] wraps any `std::io::Read + Write` stream (an opened serial
//! port, a TCP bridge, a pipe) and pairs it with the system clock.

use std::io::{self, ErrorKind, Read, Write};
use std::thread;
use std::time::{Duration, Instant};

use embedded_hal::delay::DelayNs;

use crate::common::hal_traits::{VentSerial, VentTimer};

/// A std stream plus `std::time` as a poller transport.
///
/// The stream should be configured with a short read timeout (or
/// non-blocking mode) so that reads return instead of blocking; timeouts,
/// `WouldBlock` and zero-byte reads are reported as `nb::Error::WouldBlock`.
#[derive(Debug)]
pub struct StdInterface<T> {
    stream: T,
}

impl<T: Read + Write> StdInterface<T> {
    pub fn new(stream: T) -> Self {
        StdInterface { stream }
    }

    pub fn get_ref(&self) -> &T {
        &self.stream
    }

    pub fn get_mut(&mut self) -> &mut T {
        &mut self.stream
    }

    pub fn into_inner(self) -> T {
        self.stream
    }
}

fn is_retryable(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::WouldBlock | ErrorKind::TimedOut | ErrorKind::Interrupted)
}

fn nb_io(e: io::Error) -> nb::Error<io::Error> {
    if is_retryable(e.kind()) {
        nb::Error::WouldBlock
    } else {
        nb::Error::Other(e)
    }
}

impl<T: Read + Write> VentSerial for StdInterface<T> {
    type Error = io::Error;

    fn read_byte(&mut self) -> nb::Result<u8, io::Error> {
        let mut byte = [0u8; 1];
        match self.stream.read(&mut byte) {
            Ok(0) => Err(nb::Error::WouldBlock),
            Ok(_) => Ok(byte[0]),
            Err(e) => Err(nb_io(e)),
        }
    }

    fn write_byte(&mut self, byte: u8) -> nb::Result<(), io::Error> {
        match self.stream.write(&[byte]) {
            Ok(0) => Err(nb::Error::WouldBlock),
            Ok(_) => Ok(()),
            Err(e) => Err(nb_io(e)),
        }
    }

    fn flush(&mut self) -> nb::Result<(), io::Error> {
        self.stream.flush().map_err(nb_io)
    }
}

impl<T> DelayNs for StdInterface<T> {
    fn delay_ns(&mut self, ns: u32) {
        thread::sleep(Duration::from_nanos(u64::from(ns)));
    }
}

impl<T: Read + Write> VentTimer for StdInterface<T> {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }
}
