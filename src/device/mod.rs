// src/device/mod.rs

//! Ventilator-side helpers.
//!
//! The inverse of the poller: accept command frames and put typed responses
//! on the wire. Useful for simulators and for scripting test transports.

mod error;
mod formatter;
mod parser;

pub use error::EncodeError;
pub use formatter::{encode_response, ResponseBytes};
pub use parser::parse_command;
