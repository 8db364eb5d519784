//! Core library for pirebind: the specification registry behind generated Pire bindings.
//!
//! - [`types`]: operator, scanner and option specs
//! - [`error`]: [`SpecError`]
//! - [`registry`]: [`Registry::build`] and read accessors

pub mod error;
pub mod registry;
pub mod types;

pub use error::SpecError;
pub use registry::Registry;
pub use types::{
    BinaryOperatorSpec, OptionSpec, ScannerSpec, StateType, TypeName, UnaryOperatorSpec,
};
