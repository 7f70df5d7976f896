//! Minimal command-line option scanner.
//!
//! The grammar is deliberately small: a table of value flags (`-d DIR`),
//! any other dash-prefixed token is a boolean flag (`--debug`), and
//! everything else is positional. Parsing is a single left-to-right pass
//! that returns an immutable [`ParsedOptions`].
use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

const FLAG_PREFIX: char = '-';

/// A flag that takes a value, the configuration key it binds and its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    pub flag: &'static str,
    pub key: &'static str,
    pub default: Option<&'static str>,
}

impl OptionSpec {
    pub const fn new(flag: &'static str, key: &'static str, default: Option<&'static str>) -> Self {
        Self { flag, key, default }
    }
}

/// Registry of value flags, built once at startup.
#[derive(Debug, Clone)]
pub struct OptionTable {
    specs: Vec<OptionSpec>,
}

impl OptionTable {
    pub fn new(specs: impl IntoIterator<Item = OptionSpec>) -> Self {
        Self {
            specs: specs.into_iter().collect(),
        }
    }

    fn lookup(&self, token: &str) -> Option<&OptionSpec> {
        self.specs.iter().find(|spec| spec.flag == token)
    }

    /// Scan `args` (without the program name).
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingOptionValue`] when a value flag is the last token.
    pub fn parse<I, S>(&self, args: I) -> Result<ParsedOptions>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = ParsedOptions::default();
        for spec in &self.specs {
            if let Some(default) = spec.default {
                parsed.values.insert(spec.key.to_string(), default.to_string());
            }
        }

        let mut tokens = args.into_iter().map(Into::<String>::into);
        while let Some(token) = tokens.next() {
            if let Some(spec) = self.lookup(&token) {
                let value = tokens.next().ok_or_else(|| Error::MissingOptionValue {
                    flag: token.clone(),
                })?;
                parsed.values.insert(spec.key.to_string(), value);
            } else if token.starts_with(FLAG_PREFIX) {
                parsed.flags.insert(token);
            } else {
                parsed.positional.push(token);
            }
        }
        Ok(parsed)
    }
}

/// Result of one scan: key/value options, boolean flags and positionals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedOptions {
    values: BTreeMap<String, String>,
    flags: BTreeSet<String>,
    positional: Vec<String>,
}

impl ParsedOptions {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn has_flag(&self, flag: &str) -> bool {
        self.flags.contains(flag)
    }

    pub fn flags(&self) -> impl Iterator<Item = &str> {
        self.flags.iter().map(String::as_str)
    }

    pub fn positional(&self) -> &[String] {
        &self.positional
    }

    /// Parse `key` as a signed 64-bit integer. `Ok(None)` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptionValue`] if the stored value is not an integer.
    pub fn get_i64(&self, key: &str) -> Result<Option<i64>> {
        self.get(key)
            .map(|value| {
                value.trim().parse::<i64>().map_err(|_| Error::InvalidOptionValue {
                    key: key.to_string(),
                    value: value.to_string(),
                })
            })
            .transpose()
    }

    /// Parse `key` as a float. `Ok(None)` when unset.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidOptionValue`] if the stored value is not a finite number.
    pub fn get_f64(&self, key: &str) -> Result<Option<f64>> {
        self.get(key)
            .map(|value| match value.trim().parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => Ok(parsed),
                _ => Err(Error::InvalidOptionValue {
                    key: key.to_string(),
                    value: value.to_string(),
                }),
            })
            .transpose()
    }
}
