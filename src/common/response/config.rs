// src/common/response/config.rs

use core::ops::Range;

/// Payload layout of the short B-type frames.
///
/// Field captures disagree on where the Format 2 and Format 3 value bytes sit.
/// Both layouts are kept so a deployment can match the firmware it talks to.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum ProtocolRevision {
    /// Format 3 values at `raw[2..6]`, Format 2 values at `raw[3..7]`.
    #[default]
    Current,
    /// Format 3 values at `raw[2..5]` (three bytes), Format 2 values at `raw[2..7]`.
    Legacy,
}

impl ProtocolRevision {
    /// Value byte range of an 8-byte Type B Format 3 frame.
    pub fn format3_values(self) -> Range<usize> {
        match self {
            ProtocolRevision::Current => 2..6,
            ProtocolRevision::Legacy => 2..5,
        }
    }

    /// Value byte range of a 9-byte Type B Format 2 frame.
    pub fn format2_values(self) -> Range<usize> {
        match self {
            ProtocolRevision::Current => 3..7,
            ProtocolRevision::Legacy => 2..7,
        }
    }
}

/// What to do with a 9-byte frame whose identifier is in no known range.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum UnknownIdentifierPolicy {
    /// Report `DecodeError::UnrecognizedIdentifier`.
    #[default]
    Reject,
    /// Treat the frame as Type B Format 2.
    FallbackToFormat2,
}

/// Decoder settings. The default is the current revision, strict identifiers,
/// no delimiter check.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct DecoderConfig {
    pub revision: ProtocolRevision,
    pub unknown_identifiers: UnknownIdentifierPolicy,
    /// Reject recognized-length buffers that are not `STX ... ETX CR`.
    pub require_delimiters: bool,
}

impl DecoderConfig {
    pub const fn new() -> Self {
        DecoderConfig {
            revision: ProtocolRevision::Current,
            unknown_identifiers: UnknownIdentifierPolicy::Reject,
            require_delimiters: false,
        }
    }

    pub const fn with_revision(mut self, revision: ProtocolRevision) -> Self {
        self.revision = revision;
        self
    }

    pub const fn with_unknown_identifiers(mut self, policy: UnknownIdentifierPolicy) -> Self {
        self.unknown_identifiers = policy;
        self
    }

    pub const fn with_require_delimiters(mut self, require: bool) -> Self {
        self.require_delimiters = require;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_new() {
        assert_eq!(DecoderConfig::default(), DecoderConfig::new());
        assert_eq!(DecoderConfig::default().revision, ProtocolRevision::Current);
        assert_eq!(DecoderConfig::default().unknown_identifiers, UnknownIdentifierPolicy::Reject);
        assert!(!DecoderConfig::default().require_delimiters);
    }

    #[test]
    fn test_builders() {
        let config = DecoderConfig::new()
            .with_revision(ProtocolRevision::Legacy)
            .with_unknown_identifiers(UnknownIdentifierPolicy::FallbackToFormat2)
            .with_require_delimiters(true);
        assert_eq!(config.revision, ProtocolRevision::Legacy);
        assert_eq!(config.unknown_identifiers, UnknownIdentifierPolicy::FallbackToFormat2);
        assert!(config.require_delimiters);
    }

    #[test]
    fn test_revision_ranges_stay_inside_frames() {
        for revision in [ProtocolRevision::Current, ProtocolRevision::Legacy] {
            // ETX CR occupy the last two bytes
            assert!(revision.format3_values().end <= 8 - 2);
            assert!(revision.format2_values().end <= 9 - 2);
        }
        assert_eq!(ProtocolRevision::Legacy.format3_values().len(), 3);
        assert_eq!(ProtocolRevision::Legacy.format2_values().len(), 5);
    }
}
