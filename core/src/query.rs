//! Query-string formatting.
//!
//! Values are emitted raw: no percent-encoding is applied here. Several
//! endpoints rely on the literal commas that join multi-valued parameters
//! (`?components=100,200`), and path escaping is handled by the caller.

use std::fmt::Display;

use indexmap::IndexMap;

/// Ordered mapping from parameter name to its list of values.
///
/// Iteration order is insertion order; re-inserting a name replaces its
/// values but keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: IndexMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `values`, stringifying each value.
    pub fn insert<I, V>(&mut self, name: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        let values = values.into_iter().map(|v| v.to_string()).collect();
        self.params.insert(name.to_string(), values);
        self
    }

    /// Builder-style `insert`.
    pub fn with<I, V>(mut self, name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Display,
    {
        self.insert(name, values);
        self
    }

    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.params.get(name).map(Vec::as_slice)
    }

    /// True when no parameter has any value.
    pub fn is_empty(&self) -> bool {
        self.params.values().all(Vec::is_empty)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// Render as `?name=v1,v2&other=v3`, or `""` when every list is empty.
    pub fn to_query_string(&self) -> String {
        let segments: Vec<String> = self
            .iter()
            .filter(|(_, values)| !values.is_empty())
            .map(|(name, values)| format!("{name}={}", values.join(",")))
            .collect();
        if segments.is_empty() {
            return String::new();
        }
        format!("?{}", segments.join("&"))
    }
}

impl<K, V> FromIterator<(K, Vec<V>)> for QueryParams
where
    K: AsRef<str>,
    V: Display,
{
    fn from_iter<T: IntoIterator<Item = (K, Vec<V>)>>(iter: T) -> Self {
        let mut params = QueryParams::new();
        for (name, values) in iter {
            params.insert(name.as_ref(), values);
        }
        params
    }
}
