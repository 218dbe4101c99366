//! Documents accepted by the index and the streaming scanner.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::util::lenient::lenient_string;

/// A searchable document.
///
/// `title` and `body` tolerate malformed input: a missing field or `null`
/// becomes an empty string, numbers and booleans are stringified.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(default, alias = "text", alias = "content", deserialize_with = "lenient_string")]
    pub body: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, Value>,
}

impl Document {
    pub fn new<I, T, B>(id: I, title: T, body: B) -> Self
    where
        I: Into<String>,
        T: Into<String>,
        B: Into<String>,
    {
        Document {
            id: id.into(),
            title: title.into(),
            body: body.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata<K: Into<String>>(mut self, key: K, value: Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }

    /// Title and body joined by a space.
    pub fn full_text(&self) -> String {
        match (self.title.is_empty(), self.body.is_empty()) {
            (true, _) => self.body.clone(),
            (_, true) => self.title.clone(),
            _ => format!("{} {}", self.title, self.body),
        }
    }
}
