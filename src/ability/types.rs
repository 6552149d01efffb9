use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Caller-supplied options for a single check.
///
/// `type` is the only key the engine understands. Everything else is carried
/// opaquely into the cache key and handed to the rule evaluator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Explicit type tag, e.g. "topic". Wins over the resource's own model name.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of_type(type_name: impl Into<String>) -> Self {
        Self {
            type_name: Some(type_name.into()),
            extra: BTreeMap::new(),
        }
    }

    /// Add a caller-defined key. A string under `type` sets the type tag;
    /// any other value under `type` is dropped.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let key = key.into();
        let value = value.into();
        if key == "type" {
            if let Value::String(type_name) = value {
                self.type_name = Some(type_name);
            }
            return self;
        }
        self.extra.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// Something an action can be checked against.
///
/// `to_record` produces the plain record the rule evaluator sees and the cache
/// key is derived from. `type_name` is the model-name convention: a resource
/// that knows its own category reports it here.
pub trait Resource: Sync {
    fn to_record(&self) -> serde_json::Result<Value>;

    fn type_name(&self) -> Option<String> {
        None
    }
}

impl Resource for Value {
    fn to_record(&self) -> serde_json::Result<Value> {
        Ok(self.clone())
    }
}

/// A record paired with the name of the model it was loaded from.
#[derive(Debug, Clone, PartialEq)]
pub struct Model<T> {
    name: String,
    record: T,
}

impl<T> Model<T> {
    pub fn new(name: impl Into<String>, record: T) -> Self {
        Self {
            name: name.into(),
            record,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn record(&self) -> &T {
        &self.record
    }
}

impl<T: Serialize + Sync> Resource for Model<T> {
    fn to_record(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.record)
    }

    fn type_name(&self) -> Option<String> {
        Some(self.name.clone())
    }
}

/// Outcome of one `check` call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Check {
    pub allow: bool,
    pub action: String,
    #[serde(rename = "type")]
    pub type_name: Option<String>,
    pub resource: Option<Value>,
}

/// The read/update/delete decisions for one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Abilities {
    pub read: bool,
    pub update: bool,
    pub delete: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheStatus {
    /// Caching is disabled for this engine.
    Unused,
    Hit,
    Miss,
}

impl std::fmt::Display for CacheStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CacheStatus::Unused => "unused",
            CacheStatus::Hit => "hit",
            CacheStatus::Miss => "miss",
        };
        f.write_str(s)
    }
}

/// What the decision log receives for every evaluated check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionEvent {
    pub action: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub allow: bool,
    pub cache: CacheStatus,
    pub resource: Value,
}
