use std::collections::BTreeMap;

/// Multi-valued property storage for model elements
///
/// Mirrors the host's `prop(key, multi)` lookup: each key maps to an ordered
/// list of string values, the first of which is the single-valued answer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Properties {
    data: BTreeMap<String, Vec<String>>,
}

impl Properties {
    /// Create a new empty Properties instance
    pub fn new() -> Self {
        Self {
            data: BTreeMap::new(),
        }
    }

    /// First value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.data
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values stored under `key`, in insertion order
    pub fn get_all(&self, key: &str) -> &[String] {
        self.data.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Append a value under `key`
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.data.entry(key.into()).or_default().push(value.into());
    }

    /// Check if a key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Get the number of distinct keys
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if there are no properties
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<BTreeMap<String, Vec<String>>> for Properties {
    fn from(data: BTreeMap<String, Vec<String>>) -> Self {
        Self { data }
    }
}
