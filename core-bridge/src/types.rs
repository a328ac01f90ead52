use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Unique identifier of one bridge action.
///
/// The companion app echoes it back in its response so the caller can match
/// the reply to the request that produced it.
///
/// # Examples
///
/// ```
/// use core_bridge::ActionId;
///
/// let generated = ActionId::new();
/// let supplied = ActionId::from("share-42");
///
/// assert_ne!(generated, ActionId::new());
/// assert_eq!(supplied.as_str(), "share-42");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(String);

impl ActionId {
    /// Generate a fresh identifier (uppercase UUID v4).
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ActionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ActionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ActionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A parameter or user-info value.
///
/// Restricted to kinds with exact equality and hashing; floating point values
/// should be passed as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Boolean(bool),
    Integer(i64),
    String(String),
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterValue::String(value) => f.write_str(value),
            ParameterValue::Integer(value) => write!(f, "{}", value),
            ParameterValue::Boolean(value) => write!(f, "{}", value),
        }
    }
}

impl From<String> for ParameterValue {
    fn from(value: String) -> Self {
        ParameterValue::String(value)
    }
}

impl From<&str> for ParameterValue {
    fn from(value: &str) -> Self {
        ParameterValue::String(value.to_string())
    }
}

impl From<i64> for ParameterValue {
    fn from(value: i64) -> Self {
        ParameterValue::Integer(value)
    }
}

impl From<i32> for ParameterValue {
    fn from(value: i32) -> Self {
        ParameterValue::Integer(i64::from(value))
    }
}

impl From<u32> for ParameterValue {
    fn from(value: u32) -> Self {
        ParameterValue::Integer(i64::from(value))
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        ParameterValue::Boolean(value)
    }
}

/// Named parameters of a bridge action. Iteration order is sorted by key.
pub type Parameters = BTreeMap<String, ParameterValue>;

/// Build [`Parameters`] from `(key, value)` pairs.
///
/// ```
/// use core_bridge::{parameters, ParameterValue};
///
/// let params = parameters([("href", ParameterValue::from("https://example.com")), ("quote", "hi".into())]);
/// assert_eq!(params.len(), 2);
/// ```
pub fn parameters<I, K>(pairs: I) -> Parameters
where
    I: IntoIterator<Item = (K, ParameterValue)>,
    K: Into<String>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value))
        .collect()
}
