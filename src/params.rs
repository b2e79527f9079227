//! Named filter parameters.
//!
//! Every filter declares its parameters as a static slice of [`ParamSpec`],
//! each with a default. Callers pass a [`Params`] map; names that are missing
//! take the default, while unknown names, wrong types and out-of-range values
//! are rejected with [`FilterError::InvalidParameter`] before the filter
//! touches the grid.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{FilterError, Result};

/// A single parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
        }
    }
}

/// Type and range precondition of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    /// Integer strictly greater than zero.
    PositiveInt,
}

impl ParamKind {
    /// Coerce command-line text into a value of this kind.
    ///
    /// Only the type is checked here; range checks happen in [`ParamSpec::check`].
    pub fn parse(self, text: &str) -> std::result::Result<ParamValue, String> {
        let text = text.trim();
        match self {
            Self::Bool => match text {
                "true" | "True" | "1" | "yes" => Ok(ParamValue::Bool(true)),
                "false" | "False" | "0" | "no" => Ok(ParamValue::Bool(false)),
                _ => Err(format!("`{text}` is not a boolean")),
            },
            Self::PositiveInt => text
                .parse::<i64>()
                .map(ParamValue::Int)
                .map_err(|e| format!("`{text}` is not an integer: {e}")),
        }
    }

    pub const fn describe(self) -> &'static str {
        match self {
            Self::Bool => "a boolean",
            Self::PositiveInt => "an integer > 0",
        }
    }
}

/// Declaration of one named parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: ParamValue,
    pub doc: &'static str,
}

impl ParamSpec {
    /// Check `value` against this parameter's type and range.
    pub fn check(&self, filter: &'static str, value: ParamValue) -> Result<ParamValue> {
        match (self.kind, value) {
            (ParamKind::Bool, ParamValue::Bool(_)) => Ok(value),
            (ParamKind::PositiveInt, ParamValue::Int(n)) if n > 0 => Ok(value),
            (ParamKind::PositiveInt, ParamValue::Int(n)) => Err(FilterError::invalid(
                filter,
                self.name,
                format!("must be > 0, got {n}"),
            )),
            (kind, other) => Err(FilterError::invalid(
                filter,
                self.name,
                format!("expected {}, got {other}", kind.describe()),
            )),
        }
    }

    /// `name (doc)`, or just `name` when undocumented.
    pub fn usage(&self) -> String {
        if self.doc.is_empty() {
            self.name.to_string()
        } else {
            format!("{} ({})", self.name, self.doc)
        }
    }
}

/// Parameter values supplied by a caller, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<ParamValue> {
        self.0.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, ParamValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Coerce `(name, text)` pairs for `filter` into typed values.
    pub fn from_pairs<'a, I>(filter: &'static str, specs: &[ParamSpec], pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut params = Self::new();
        for (name, text) in pairs {
            let spec = find_spec(filter, specs, name)?;
            let value = spec
                .kind
                .parse(text)
                .map_err(|reason| FilterError::invalid(filter, name, reason))?;
            params.insert(name, spec.check(filter, value)?);
        }
        Ok(params)
    }

    /// Reject names the filter does not declare.
    pub(crate) fn ensure_known(&self, filter: &'static str, specs: &[ParamSpec]) -> Result<()> {
        for name in self.0.keys() {
            find_spec(filter, specs, name)?;
        }
        Ok(())
    }

    /// Resolved value of a boolean parameter.
    pub(crate) fn flag(&self, filter: &'static str, spec: &ParamSpec) -> Result<bool> {
        match self.resolve(filter, spec)? {
            ParamValue::Bool(v) => Ok(v),
            other => Err(FilterError::invalid(
                filter,
                spec.name,
                format!("expected a boolean, got {other}"),
            )),
        }
    }

    /// Resolved value of a positive integer parameter.
    pub(crate) fn positive(&self, filter: &'static str, spec: &ParamSpec) -> Result<usize> {
        match self.resolve(filter, spec)? {
            ParamValue::Int(n) => usize::try_from(n).map_err(|_| {
                FilterError::invalid(filter, spec.name, format!("{n} is out of range"))
            }),
            other => Err(FilterError::invalid(
                filter,
                spec.name,
                format!("expected an integer, got {other}"),
            )),
        }
    }

    fn resolve(&self, filter: &'static str, spec: &ParamSpec) -> Result<ParamValue> {
        spec.check(filter, self.get(spec.name).unwrap_or(spec.default))
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for Params {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        for (k, v) in iter {
            params.insert(k, v);
        }
        params
    }
}

fn find_spec<'s>(filter: &'static str, specs: &'s [ParamSpec], name: &str) -> Result<&'s ParamSpec> {
    specs.iter().find(|s| s.name == name).ok_or_else(|| {
        let known: Vec<String> = specs.iter().map(ParamSpec::usage).collect();
        let reason = if known.is_empty() {
            "filter takes no parameters".to_string()
        } else {
            format!("unknown parameter, expected one of: {}", known.join(", "))
        };
        FilterError::invalid(filter, name, reason)
    })
}
