//! Domain types describing the generated Pire bindings.
//!
//! Every type serializes into the shape templates see; see
//! `pirebind_renderer::context` for the top-level binding names.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::SpecError;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// A C++ type spelled the way it appears in generated code, e.g. `const Fsm&`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TypeName(pub String);

impl fmt::Display for TypeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Operators
// ---------------------------------------------------------------------------

/// A structural composition operator over `Fsm`, e.g. `fsm + other`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryOperatorSpec {
    pub symbol: char,
    pub name: String,
    pub rhs_type: TypeName,
    pub result_type: TypeName,
}

impl BinaryOperatorSpec {
    pub fn new(
        symbol: char,
        name: impl Into<String>,
        rhs_type: impl Into<TypeName>,
        result_type: impl Into<TypeName>,
    ) -> Self {
        Self {
            symbol,
            name: name.into(),
            rhs_type: rhs_type.into(),
            result_type: result_type.into(),
        }
    }
}

/// Templates receive `(symbol, name, rhs_type, result_type)` tuples.
impl Serialize for BinaryOperatorSpec {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.symbol, &self.name, &self.rhs_type, &self.result_type).serialize(serializer)
    }
}

/// An in-place `Fsm` mutation that returns the same instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct UnaryOperatorSpec {
    pub name: String,
}

impl From<&str> for UnaryOperatorSpec {
    fn from(s: &str) -> Self {
        Self { name: s.to_owned() }
    }
}

// ---------------------------------------------------------------------------
// Scanners
// ---------------------------------------------------------------------------

/// Per-match state carried by a scanner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateType {
    /// A plain C++ type that generated code can copy around directly.
    Primitive(String),
    /// A structured state needing hand-written handling in generated code.
    Nontrivial,
}

impl StateType {
    /// Sentinel string templates compare against.
    pub const NONTRIVIAL: &'static str = "__nontrivial__";

    pub fn as_str(&self) -> &str {
        match self {
            StateType::Primitive(ty) => ty,
            StateType::Nontrivial => Self::NONTRIVIAL,
        }
    }

    pub fn is_nontrivial(&self) -> bool {
        matches!(self, StateType::Nontrivial)
    }
}

impl Default for StateType {
    fn default() -> Self {
        StateType::Primitive("size_t".to_string())
    }
}

impl From<&str> for StateType {
    fn from(s: &str) -> Self {
        if s == Self::NONTRIVIAL {
            StateType::Nontrivial
        } else {
            StateType::Primitive(s.to_owned())
        }
    }
}

impl fmt::Display for StateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StateType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Generation switches for one scanner class.
///
/// Methods in `ignored_methods` must not be emitted for the scanner.
/// `extra_methods` lists methods to emit on top of the default set; no shipped
/// scanner uses it yet, and templates decide what a populated set means.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScannerSpec {
    pub state_type: StateType,
    pub extra_methods: BTreeSet<String>,
    pub ignored_methods: BTreeSet<String>,
}

impl ScannerSpec {
    pub fn with_state_type(mut self, state_type: impl Into<StateType>) -> Self {
        self.state_type = state_type.into();
        self
    }

    pub fn ignoring<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignored_methods.extend(methods.into_iter().map(Into::into));
        self
    }

    pub fn with_extra_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_methods.extend(methods.into_iter().map(Into::into));
        self
    }

    /// Whether generated code may contain `method` for this scanner.
    pub fn emits(&self, method: &str) -> bool {
        !self.ignored_methods.contains(method)
    }
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// A regexp compilation feature exposed by name and optional one-letter flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionSpec {
    getter_expression: String,
    short_letter: String,
}

impl OptionSpec {
    /// Fails with [`SpecError::InvalidShortLetter`] naming `option` when
    /// `short_letter` has more than one character.
    pub fn new(
        option: &str,
        getter_expression: impl Into<String>,
        short_letter: impl Into<String>,
    ) -> Result<Self, SpecError> {
        let short_letter = short_letter.into();
        if short_letter.chars().count() > 1 {
            return Err(SpecError::InvalidShortLetter {
                option: option.to_string(),
                letter: short_letter,
            });
        }
        Ok(Self {
            getter_expression: getter_expression.into(),
            short_letter,
        })
    }

    /// Literal C++ call returning the engine feature object.
    pub fn getter_expression(&self) -> &str {
        &self.getter_expression
    }

    /// Empty when the option has no single-letter alias.
    pub fn short_letter(&self) -> &str {
        &self.short_letter
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
