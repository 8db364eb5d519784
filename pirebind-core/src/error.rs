//! Error types for pirebind-core.

use thiserror::Error;

/// A registry entry violates one of its construction invariants.
///
/// Raised while the registry is being built, before any template is touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// An option short alias must be empty or exactly one character.
    #[error("invalid spec: short letter {letter:?} of option {option:?} is longer than one character")]
    InvalidShortLetter { option: String, letter: String },

    /// Two entries of the same collection share a key that must be unique.
    #[error("invalid spec: duplicate {kind} {name:?}")]
    Duplicate { kind: &'static str, name: String },
}
