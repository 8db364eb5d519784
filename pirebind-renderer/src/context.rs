//! Template context: the fixed set of top-level names a template can see.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use pirebind_core::{BinaryOperatorSpec, OptionSpec, Registry, ScannerSpec, UnaryOperatorSpec};

use crate::error::RenderError;

/// Every top-level variable bound into a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingName {
    FsmBinaries,
    FsmInplaceUnaries,
    Options,
    Scanners,
    SpecialChars,
}

impl BindingName {
    /// All bindings in a stable order.
    pub const ALL: [BindingName; 5] = [
        BindingName::FsmBinaries,
        BindingName::FsmInplaceUnaries,
        BindingName::Options,
        BindingName::Scanners,
        BindingName::SpecialChars,
    ];

    /// Name as written in templates.
    pub fn as_str(&self) -> &'static str {
        match self {
            BindingName::FsmBinaries       => "FSM_BINARIES",
            BindingName::FsmInplaceUnaries => "FSM_INPLACE_UNARIES",
            BindingName::Options           => "OPTIONS",
            BindingName::Scanners          => "SCANNERS",
            BindingName::SpecialChars      => "SPECIAL_CHARS",
        }
    }
}

impl fmt::Display for BindingName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Borrowed view of a [`Registry`] shaped for templates.
///
/// Field renames must stay in sync with [`BindingName::as_str`];
/// [`Bindings::to_tera_context`] checks this on every call.
#[derive(Debug, Clone, Serialize)]
pub struct Bindings<'a> {
    #[serde(rename = "FSM_BINARIES")]
    pub fsm_binaries: &'a [BinaryOperatorSpec],
    #[serde(rename = "FSM_INPLACE_UNARIES")]
    pub fsm_inplace_unaries: &'a [UnaryOperatorSpec],
    #[serde(rename = "OPTIONS")]
    pub options: &'a BTreeMap<String, OptionSpec>,
    #[serde(rename = "SCANNERS")]
    pub scanners: &'a BTreeMap<String, ScannerSpec>,
    #[serde(rename = "SPECIAL_CHARS")]
    pub special_chars: &'a [String],
}

impl<'a> Bindings<'a> {
    pub fn from_registry(registry: &'a Registry) -> Self {
        Bindings {
            fsm_binaries: registry.binary_operators(),
            fsm_inplace_unaries: registry.unary_operators(),
            options: registry.options(),
            scanners: registry.scanners(),
            special_chars: registry.special_chars(),
        }
    }

    /// Convert to a [`tera::Context`], rejecting any drift from the schema.
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        let value = serde_json::to_value(self)?;
        check_schema(&value)?;
        tera::Context::from_value(value).map_err(RenderError::from)
    }
}

fn check_schema(value: &serde_json::Value) -> Result<(), RenderError> {
    let bound: Vec<&str> = value
        .as_object()
        .map(|obj| obj.keys().map(String::as_str).collect())
        .unwrap_or_default();
    let expected: Vec<&str> = BindingName::ALL.iter().map(BindingName::as_str).collect();

    let missing: Vec<String> = expected
        .iter()
        .filter(|name| !bound.contains(*name))
        .map(|name| name.to_string())
        .collect();
    let unexpected: Vec<String> = bound
        .iter()
        .filter(|name| !expected.contains(*name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() && unexpected.is_empty() {
        Ok(())
    } else {
        Err(RenderError::Schema { missing, unexpected })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn registry() -> Registry {
        Registry::build().expect("registry")
    }

    #[test]
    fn exactly_five_top_level_names() {
        let reg = registry();
        let value = serde_json::to_value(Bindings::from_registry(&reg)).expect("serialize");
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            ["FSM_BINARIES", "FSM_INPLACE_UNARIES", "OPTIONS", "SCANNERS", "SPECIAL_CHARS"]
        );
    }

    #[test]
    fn entry_shapes() {
        let reg = registry();
        let value = serde_json::to_value(Bindings::from_registry(&reg)).expect("serialize");
        assert_eq!(value["FSM_BINARIES"][0], json!(["+", "add", "const Fsm&", "Fsm"]));
        assert_eq!(value["FSM_INPLACE_UNARIES"][0], json!("AppendDot"));
        assert_eq!(
            value["OPTIONS"]["UTF8"],
            json!({"getter_expression": "Pire::Encodings::Utf8()", "short_letter": "u"})
        );
        assert_eq!(value["SCANNERS"]["CountingScanner"]["state_type"], "__nontrivial__");
        assert_eq!(value["SPECIAL_CHARS"][4], "MaxChar");
    }

    #[test]
    fn to_tera_context_succeeds() {
        let reg = registry();
        let ctx = Bindings::from_registry(&reg).to_tera_context().expect("context");
        for name in BindingName::ALL {
            assert!(ctx.contains_key(name.as_str()), "{name} not bound");
        }
    }

    #[test]
    fn schema_check_reports_missing_and_unexpected() {
        let value = json!({"FSM_BINARIES": [], "OPTIONS": {}, "SCANNERS": {}, "SPECIAL_CHARS": [], "EXTRA": 1});
        match check_schema(&value).unwrap_err() {
            RenderError::Schema { missing, unexpected } => {
                assert_eq!(missing, ["FSM_INPLACE_UNARIES"]);
                assert_eq!(unexpected, ["EXTRA"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
