//! Declared variable values
//!
//! Terraform defaults are dynamically typed. tfsync only handles three shapes,
//! so they are modelled as a closed variant with explicit rendering rules.

use std::fmt;

use serde_json::{Map, Number, Value};

use crate::{Error, Result};

/// The default value of a declared variable
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredValue {
    /// A string (booleans are stored as `"true"` / `"false"`)
    Scalar(String),
    /// A number, rendered the way JSON renders it
    Numeric(Number),
    /// A map of arbitrary values
    Mapping(Map<String, Value>),
}

impl DeclaredValue {
    /// The empty-string default synthesized for variables without one
    pub fn empty() -> Self {
        Self::Scalar(String::new())
    }

    /// Convert an evaluated JSON value for the variable `name`
    ///
    /// `null` becomes the empty default. Lists are rejected.
    pub fn from_json(name: &str, value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::empty()),
            Value::Bool(b) => Ok(Self::Scalar(b.to_string())),
            Value::Number(n) => Ok(Self::Numeric(n)),
            Value::String(s) => Ok(Self::Scalar(s)),
            Value::Object(map) => Ok(Self::Mapping(map)),
            Value::Array(_) => Err(Error::UnsupportedValue {
                name: name.to_string(),
                kind: "list",
            }),
        }
    }

    /// String representation used when comparing against remote values
    ///
    /// Mappings render as compact JSON object text, which is also a valid
    /// HCL object expression. Template sequences inside it are escaped so the
    /// remote reads `${` and `%{` literally.
    pub fn render(&self) -> String {
        match self {
            Self::Scalar(s) => s.clone(),
            Self::Numeric(n) => n.to_string(),
            Self::Mapping(map) => escape_templates(&Value::Object(map.clone()).to_string()),
        }
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Self::Mapping(_))
    }

    /// True when the rendered value has zero length
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Scalar(s) => s.is_empty(),
            Self::Numeric(_) | Self::Mapping(_) => false,
        }
    }

    /// Whether this value may overwrite an existing remote value
    ///
    /// Only non-empty scalars qualify. Mappings and empty strings are never
    /// pushed as updates.
    pub fn is_update_eligible(&self) -> bool {
        !self.is_mapping() && !self.is_empty()
    }
}

impl Default for DeclaredValue {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for DeclaredValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

impl From<&str> for DeclaredValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for DeclaredValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

fn escape_templates(hcl: &str) -> String {
    hcl.replace("${", "$${").replace("%{", "%%{")
}

impl From<i64> for DeclaredValue {
    fn from(value: i64) -> Self {
        Self::Numeric(value.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn render_scalar_is_verbatim() {
        assert_eq!(DeclaredValue::from("eu-west-1").render(), "eu-west-1");
    }

    #[test]
    fn render_numbers_like_json() {
        assert_eq!(DeclaredValue::from(3_i64).render(), "3");
        let float = DeclaredValue::from_json("x", json!(1.5)).unwrap();
        assert_eq!(float.render(), "1.5");
    }

    #[test]
    fn render_mapping_as_compact_object() {
        let value = DeclaredValue::from_json("tags", json!({"env": "prod"})).unwrap();
        assert_eq!(value.render(), r#"{"env":"prod"}"#);

        let empty = DeclaredValue::from_json("tags", json!({})).unwrap();
        assert_eq!(empty.render(), "{}");
    }

    #[test]
    fn render_mapping_escapes_template_sequences() {
        let value = DeclaredValue::from_json(
            "tags",
            json!({"name": "${var.env}-web", "rule": "%{if x}y%{endif}"}),
        )
        .unwrap();
        assert_eq!(
            value.render(),
            r#"{"name":"$${var.env}-web","rule":"%%{if x}y%%{endif}"}"#
        );
    }

    #[test]
    fn render_scalar_keeps_template_sequences() {
        assert_eq!(DeclaredValue::from("${var.env}").render(), "${var.env}");
    }

    #[test]
    fn null_and_bool_become_scalars() {
        assert_eq!(
            DeclaredValue::from_json("x", Value::Null).unwrap(),
            DeclaredValue::empty()
        );
        assert_eq!(
            DeclaredValue::from_json("x", json!(true)).unwrap(),
            DeclaredValue::from("true")
        );
    }

    #[test]
    fn lists_are_rejected() {
        let err = DeclaredValue::from_json("zones", json!(["a", "b"])).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValue { ref name, kind: "list" } if name == "zones"));
    }

    #[test]
    fn update_eligibility() {
        assert!(DeclaredValue::from("1").is_update_eligible());
        assert!(DeclaredValue::from(0_i64).is_update_eligible());
        assert!(!DeclaredValue::empty().is_update_eligible());
        assert!(!DeclaredValue::Mapping(Map::new()).is_update_eligible());
    }
}
