//! Typed accessors over the raw YAML bundle description.
//!
//! Each accessor reports the section and key it was looking at so that
//! validation errors point straight at the offending line of `bundle.yaml`.

use crate::bundler::error::{Error, Result};
use serde_yaml::{Mapping, Value};

/// A named mapping from the bundle description (`global`, `osx`, ...).
pub(super) struct Section<'a> {
    name: &'static str,
    values: &'a Mapping,
}

impl<'a> Section<'a> {
    pub(super) fn new(name: &'static str, values: &'a Mapping) -> Self {
        Self { name, values }
    }

    /// Looks up `key`, treating an explicit `null` like an absent key.
    fn lookup(&self, key: &str) -> Option<&'a Value> {
        self.values.get(key).filter(|value| !value.is_null())
    }

    fn missing(&self, key: &'static str) -> Error {
        Error::MissingKey {
            section: self.name,
            key,
        }
    }

    fn invalid(&self, key: &'static str, expected: &'static str) -> Error {
        Error::InvalidValue {
            section: self.name,
            key,
            expected,
        }
    }

    /// Optional string, empty when absent.
    pub(super) fn single(&self, key: &'static str) -> Result<String> {
        match self.lookup(key) {
            None => Ok(String::new()),
            Some(value) => value
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| self.invalid(key, "single string")),
        }
    }

    /// Required string.
    pub(super) fn required_single(&self, key: &'static str) -> Result<String> {
        if self.lookup(key).is_none() {
            return Err(self.missing(key));
        }
        self.single(key)
    }

    /// Optional list of strings, empty when absent.
    ///
    /// A bare string is rejected rather than treated as a one-element list.
    pub(super) fn list(&self, key: &'static str) -> Result<Vec<String>> {
        let Some(value) = self.lookup(key) else {
            return Ok(Vec::new());
        };
        let items = value.as_sequence().ok_or_else(|| self.invalid(key, "list"))?;
        items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| self.invalid(key, "list of strings"))
            })
            .collect()
    }

    /// Optional nested section, empty when absent.
    pub(super) fn dict(&self, key: &'static str) -> Result<Option<Section<'a>>> {
        match self.lookup(key) {
            None => Ok(None),
            Some(Value::Mapping(values)) => Ok(Some(Section::new(key, values))),
            Some(_) => Err(self.invalid(key, "dict")),
        }
    }
}
