// src/common/mod.rs

// --- Declare all public modules within common ---
pub mod command;
pub mod error;
pub mod frame;
pub mod hal_traits;
pub mod response;
pub mod timing;
pub mod types;
pub mod waveform;

// --- Re-export key types/traits/functions for easier access ---

// From command.rs
pub use command::{encode, CommandFrame, CO2_WAVEFORM_BLOCK, IDENTIFY_DEVICE, WAVEFORM_BLOCK};

// From error.rs
pub use error::PollError;

// From frame.rs
pub use frame::{CR, ETX, RERROR_FRAME, STX};

// From hal_traits.rs
pub use hal_traits::{PollInstant, VentSerial, VentTimer};

// From response/mod.rs (and its sub-modules via its own `pub use`)
pub use response::{
    decode,       // From response/parse.rs
    decode_with,  // From response/parse.rs
    Co2WaveformFrame,
    DecodeError,  // From response/error.rs
    DecoderConfig, // From response/config.rs
    ProtocolRevision,
    Response,
    UnknownIdentifierPolicy,
    WaveformFrame,
};

// From types.rs
pub use types::{ParameterLabels, Payload};

// From waveform.rs
pub use waveform::{to_sample, RawSample, WaveformChannel, WaveformSample, WaveformSet};
