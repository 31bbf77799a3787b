//! Parameter overrides and tool options.
//!
//! Both bags are backed by `BTreeMap` so iteration is sorted by key. The
//! generated scripts depend on that order, and identical inputs must give
//! identical artifacts.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Value of a top-level parameter override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl ParamValue {
    /// Parse a value given on the command line.
    ///
    /// `true`/`false` become booleans, anything that parses as an integer
    /// becomes an integer, everything else stays a string.
    pub fn parse_cli(raw: &str) -> Self {
        match raw {
            "true" => ParamValue::Bool(true),
            "false" => ParamValue::Bool(false),
            _ => raw
                .parse::<i64>()
                .map(ParamValue::Int)
                .unwrap_or_else(|_| ParamValue::Str(raw.to_string())),
        }
    }

    /// Render as a literal for tool scripts.
    ///
    /// Booleans render as `1`/`0`. Strings are wrapped in double quotes
    /// when `strings_in_quotes` is set.
    pub fn to_literal(&self, strings_in_quotes: bool) -> String {
        match self {
            ParamValue::Bool(true) => "1".to_string(),
            ParamValue::Bool(false) => "0".to_string(),
            ParamValue::Int(i) => i.to_string(),
            ParamValue::Str(s) if strings_in_quotes => format!("\"{}\"", s),
            ParamValue::Str(s) => s.clone(),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_literal(false))
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

impl From<i64> for ParamValue {
    fn from(i: i64) -> Self {
        ParamValue::Int(i)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Str(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Str(s)
    }
}

/// Per-build parameter overrides, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterOverrides {
    values: BTreeMap<String, ParamValue>,
}

impl ParameterOverrides {
    pub fn new() -> Self {
        ParameterOverrides::default()
    }

    /// Set a parameter, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`ParameterOverrides::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Overlay `other` on top of this set (other wins).
    pub fn merge(&mut self, other: ParameterOverrides) {
        self.values.extend(other.values);
    }

    /// Iterate in sorted key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<ParamValue>> FromIterator<(K, V)> for ParameterOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = ParameterOverrides::new();
        for (k, v) in iter {
            params.set(k, v);
        }
        params
    }
}

/// Tool-specific option tokens, keyed by option name.
///
/// Unknown keys are carried but ignored by backends that don't use them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToolOptions {
    options: BTreeMap<String, Vec<String>>,
}

impl ToolOptions {
    pub fn new() -> Self {
        ToolOptions::default()
    }

    /// Set the tokens for an option.
    pub fn set<I, S>(&mut self, name: impl Into<String>, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options
            .insert(name.into(), tokens.into_iter().map(Into::into).collect());
    }

    /// Builder-style variant of [`ToolOptions::set`].
    pub fn with<I, S>(mut self, name: impl Into<String>, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set(name, tokens);
        self
    }

    /// Tokens for an option, or an empty slice if unset.
    pub fn get(&self, name: &str) -> &[String] {
        self.options.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Tokens for an option joined by single spaces.
    pub fn joined(&self, name: &str) -> String {
        self.get(name).join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
