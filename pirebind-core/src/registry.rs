//! The frozen catalogue of everything the generated bindings expose.
//!
//! # Contents
//!
//! | Collection         | Shape                                   |
//! |--------------------|-----------------------------------------|
//! | binary operators   | ordered, 4 entries (`+`, `|`, `&`, `*`) |
//! | unary operators    | ordered, 11 in-place mutations          |
//! | options            | name → [`OptionSpec`]                   |
//! | scanners           | name → [`ScannerSpec`]                  |
//! | special chars      | ordered, 5 constant names               |
//!
//! [`Registry::build`] is the only constructor. The result is never mutated;
//! callers share it by reference.

use std::collections::{BTreeMap, HashSet};

use crate::error::SpecError;
use crate::types::{BinaryOperatorSpec, OptionSpec, ScannerSpec, UnaryOperatorSpec};

// ---------------------------------------------------------------------------
// 1. Shipped tables
// ---------------------------------------------------------------------------

const BINARIES: &[(char, &str, &str, &str)] = &[
    ('+', "add", "const Fsm&", "Fsm"),
    ('|', "or", "const Fsm&", "Fsm"),
    ('&', "and", "const Fsm&", "Fsm"),
    ('*', "mul", "size_t", "size_t"),
];

const INPLACE_UNARIES: &[&str] = &[
    "AppendDot",
    "Surround",
    "Iterate",
    "Complement",
    "MakePrefix",
    "MakeSuffix",
    "PrependAnything",
    "AppendAnything",
    "Reverse",
    "Canonize",
    "Minimize",
];

const OPTIONS: &[(&str, &str, &str)] = &[
    ("LATIN1", "Pire::Encodings::Latin1()", "l"),
    ("UTF8", "Pire::Encodings::Utf8()", "u"),
    ("I", "Pire::Features::CaseInsensitive()", "i"),
    ("ANDNOT", "Pire::Features::AndNotSupport()", "a"),
    ("GLUE_SIMILAR_GLYPHS", "Pire::Features::GlueSimilarGlyphs()", "y"),
];

const SPECIAL_CHARS: &[&str] = &["Epsilon", "BeginMark", "EndMark", "MaxCharUnaligned", "MaxChar"];

fn shipped_scanners() -> Vec<(&'static str, ScannerSpec)> {
    vec![
        ("Scanner", ScannerSpec::default()),
        ("NonrelocScanner", ScannerSpec::default()),
        ("ScannerNoMask", ScannerSpec::default()),
        ("NonrelocScannerNoMask", ScannerSpec::default()),
        (
            "SimpleScanner",
            ScannerSpec::default().ignoring(["AcceptedRegexps", "Glue"]),
        ),
        (
            "SlowScanner",
            ScannerSpec::default()
                .with_state_type("yvector[size_t]")
                .ignoring(["Glue", "Size", "LettersCount"]),
        ),
        (
            "CapturingScanner",
            ScannerSpec::default()
                .with_state_type("__nontrivial__")
                .ignoring(["AcceptedRegexps", "Glue"]),
        ),
        (
            "CountingScanner",
            ScannerSpec::default()
                .with_state_type("__nontrivial__")
                .ignoring(["AcceptedRegexps"]),
        ),
    ]
}

// ---------------------------------------------------------------------------
// 2. Registry
// ---------------------------------------------------------------------------

/// Read-only specification catalogue consumed by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    binary_operators: Vec<BinaryOperatorSpec>,
    unary_operators: Vec<UnaryOperatorSpec>,
    options: BTreeMap<String, OptionSpec>,
    scanners: BTreeMap<String, ScannerSpec>,
    special_chars: Vec<String>,
}

impl Registry {
    /// Build the shipped catalogue.
    ///
    /// Deterministic and input-free. Returns [`SpecError`] if any entry breaks
    /// an invariant (over-long option letter, duplicated operator or letter).
    pub fn build() -> Result<Self, SpecError> {
        let binary_operators = BINARIES
            .iter()
            .map(|&(symbol, name, rhs, result)| BinaryOperatorSpec::new(symbol, name, rhs, result))
            .collect::<Vec<_>>();

        let unary_operators = INPLACE_UNARIES
            .iter()
            .map(|&name| UnaryOperatorSpec::from(name))
            .collect::<Vec<_>>();

        let mut options = BTreeMap::new();
        for &(name, getter, letter) in OPTIONS {
            insert_unique(&mut options, "option", name, OptionSpec::new(name, getter, letter)?)?;
        }

        let mut scanners = BTreeMap::new();
        for (name, spec) in shipped_scanners() {
            insert_unique(&mut scanners, "scanner", name, spec)?;
        }

        let registry = Registry {
            binary_operators,
            unary_operators,
            options,
            scanners,
            special_chars: SPECIAL_CHARS.iter().map(|s| s.to_string()).collect(),
        };
        registry.validate()?;
        Ok(registry)
    }

    pub fn binary_operators(&self) -> &[BinaryOperatorSpec] {
        &self.binary_operators
    }

    pub fn unary_operators(&self) -> &[UnaryOperatorSpec] {
        &self.unary_operators
    }

    pub fn options(&self) -> &BTreeMap<String, OptionSpec> {
        &self.options
    }

    pub fn scanners(&self) -> &BTreeMap<String, ScannerSpec> {
        &self.scanners
    }

    /// Ordering is significant; generated enums follow it.
    pub fn special_chars(&self) -> &[String] {
        &self.special_chars
    }

    pub fn option(&self, name: &str) -> Option<&OptionSpec> {
        self.options.get(name)
    }

    pub fn scanner(&self, name: &str) -> Option<&ScannerSpec> {
        self.scanners.get(name)
    }

    fn validate(&self) -> Result<(), SpecError> {
        ensure_unique(
            "binary operator symbol",
            self.binary_operators.iter().map(|op| op.symbol.to_string()),
        )?;
        ensure_unique(
            "binary operator name",
            self.binary_operators.iter().map(|op| op.name.clone()),
        )?;
        ensure_unique(
            "unary operator",
            self.unary_operators.iter().map(|op| op.name.clone()),
        )?;
        ensure_unique(
            "option short letter",
            self.options
                .values()
                .map(|opt| opt.short_letter().to_string())
                .filter(|letter| !letter.is_empty()),
        )?;
        ensure_unique("special char", self.special_chars.iter().cloned())
    }
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn insert_unique<V>(
    map: &mut BTreeMap<String, V>,
    kind: &'static str,
    name: &str,
    value: V,
) -> Result<(), SpecError> {
    if map.insert(name.to_string(), value).is_some() {
        return Err(SpecError::Duplicate { kind, name: name.to_string() });
    }
    Ok(())
}

fn ensure_unique(
    kind: &'static str,
    names: impl IntoIterator<Item = String>,
) -> Result<(), SpecError> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name.clone()) {
            return Err(SpecError::Duplicate { kind, name });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
