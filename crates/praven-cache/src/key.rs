//! Deterministic cache keys.
//!
//! A key is the blake3 hash of the canonical JSON encoding of
//! `[call_name, [positional...], {keyword...}]`. Keyword arguments are held in
//! a `BTreeMap`, so their insertion order never changes the key.

use std::collections::BTreeMap;

use serde_json::Value;

/// Builder for the call signature behind a cache key.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CacheKey {
    call_name: String,
    positional: Vec<Value>,
    keyword: BTreeMap<String, Value>,
}

impl CacheKey {
    pub fn new(call_name: impl Into<String>) -> Self {
        Self {
            call_name: call_name.into(),
            ..Default::default()
        }
    }

    /// Append a positional argument. Order matters.
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a keyword argument. Order does not matter.
    pub fn kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    pub fn call_name(&self) -> &str {
        &self.call_name
    }

    /// Canonical JSON of the signature.
    pub fn canonical(&self) -> String {
        let keyword: serde_json::Map<String, Value> = self
            .keyword
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        Value::Array(vec![
            Value::String(self.call_name.clone()),
            Value::Array(self.positional.clone()),
            Value::Object(keyword),
        ])
        .to_string()
    }

    /// Hex blake3 digest of the canonical signature.
    pub fn digest(&self) -> String {
        blake3::hash(self.canonical().as_bytes()).to_hex().to_string()
    }
}
