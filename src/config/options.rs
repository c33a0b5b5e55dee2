//! Provider option strings.
//!
//! A provider is configured by a single argument of the form
//! `key1=value1,key2=value2`. Only the first `=` of a segment splits it, so
//! values may carry `=` and `:` (URLs, base64 secrets).

use serde::Serialize;

/// Ordered `key -> value` options of one provider.
///
/// Insertion order is kept so providers are constructed from the same
/// sequence the operator wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OptionSet(Vec<(String, String)>);

impl OptionSet {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert an option. A repeated key keeps its original position and
    /// takes the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove an option, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let idx = self.0.iter().position(|(k, _)| k == key)?;
        Some(self.0.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for OptionSet {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut set = OptionSet::new();
        for (k, v) in iter {
            set.insert(k, v);
        }
        set
    }
}

/// A segment of an option string that has no `=`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedOption {
    pub segment: String,
}

/// Parse `k1=v1,k2=v2,...` into an ordered option set.
///
/// The empty string is rejected, as is any segment without `=`.
pub fn parse_options(input: &str) -> Result<OptionSet, MalformedOption> {
    let mut options = OptionSet::new();
    for segment in input.split(',') {
        let (key, value) = segment.split_once('=').ok_or_else(|| MalformedOption {
            segment: segment.to_string(),
        })?;
        options.insert(key, value);
    }
    Ok(options)
}
