// src/lib.rs

#![cfg_attr(not(any(test, feature = "std")), no_std)] // no_std unless tests or the std adapters need it

pub mod common;
pub mod device;
pub mod poller;

#[cfg(feature = "std")]
pub mod std_adapters;

// Re-export key types for convenience
pub use common::{decode, decode_with, encode, to_sample};
pub use common::{CommandFrame, DecodeError, DecoderConfig, PollError, Response, WaveformSample};
pub use poller::{Poller, PollerConfig, Publisher, Reading};
