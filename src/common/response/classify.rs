// src/common/response/classify.rs

//! Identifier table for 9-byte response frames.
//!
//! Rules are evaluated top to bottom and the first rule containing the
//! identifier wins. The Format 2 members all fall inside the wide Type A span,
//! so they must stay ahead of it.

use super::config::UnknownIdentifierPolicy;
use super::error::DecodeError;

/// Layout of a 9-byte response frame.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum NineByteShape {
    /// `STX id v v v v v ETX CR`
    TypeA,
    /// `STX id dev v v v v ETX CR`
    TypeBFormat1,
    /// `STX dev dev v v v v ETX CR`
    TypeBFormat2,
}

/// Identifiers a rule applies to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum IdentifierSet {
    Members(&'static [u8]),
    /// Inclusive on both ends.
    Span { first: u8, last: u8 },
}

impl IdentifierSet {
    pub fn contains(&self, identifier: u8) -> bool {
        match *self {
            IdentifierSet::Members(members) => members.contains(&identifier),
            IdentifierSet::Span { first, last } => (first..=last).contains(&identifier),
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct IdentifierRule {
    pub set: IdentifierSet,
    pub shape: NineByteShape,
}

/// Device-identification style answers (`'A'`, `'V'`, `'B'`, `'R'`, `'C'`).
pub const FORMAT2_IDENTIFIERS: &[u8] = &[0x41, 0x56, 0x42, 0x52, 0x43];

/// Ordered classification rules; first match wins.
pub const IDENTIFIER_RULES: &[IdentifierRule] = &[
    IdentifierRule { set: IdentifierSet::Members(FORMAT2_IDENTIFIERS), shape: NineByteShape::TypeBFormat2 },
    IdentifierRule { set: IdentifierSet::Span { first: 30, last: 33 }, shape: NineByteShape::TypeA },
    IdentifierRule { set: IdentifierSet::Span { first: 35, last: 119 }, shape: NineByteShape::TypeA },
    IdentifierRule { set: IdentifierSet::Span { first: 121, last: 123 }, shape: NineByteShape::TypeA },
    IdentifierRule { set: IdentifierSet::Span { first: 124, last: 127 }, shape: NineByteShape::TypeBFormat1 },
];

/// Returns the first rule matching `identifier`, if any.
pub fn matching_rule(identifier: u8) -> Option<&'static IdentifierRule> {
    IDENTIFIER_RULES.iter().find(|rule| rule.set.contains(identifier))
}

/// Picks the 9-byte layout for `identifier`, applying `policy` when no rule matches.
pub fn classify_identifier(
    identifier: u8,
    policy: UnknownIdentifierPolicy,
) -> Result<NineByteShape, DecodeError> {
    match (matching_rule(identifier), policy) {
        (Some(rule), _) => Ok(rule.shape),
        (None, UnknownIdentifierPolicy::FallbackToFormat2) => Ok(NineByteShape::TypeBFormat2),
        (None, UnknownIdentifierPolicy::Reject) => {
            Err(DecodeError::UnrecognizedIdentifier { identifier })
        }
    }
}
