// src/message.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One social-media message as stored in the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    pub user_age: i32,
    pub topic: String,
    pub message_text: String,
    pub timestamp: String,
}

/// Equality filter over top-level document fields. The empty filter matches
/// everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, Value>);

impl Filter {
    pub fn all() -> Self {
        Filter::default()
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Filter::all().and(field, value)
    }

    pub fn and(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, document: &Value) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Message {
        Message {
            id: "msg_001".into(),
            user_id: "user_001".into(),
            user_age: 30,
            topic: "health".into(),
            message_text: "Hello (Topic: health)".into(),
            timestamp: "2025-11-20T10:30:00".into(),
        }
    }

    #[test]
    fn id_is_stored_under_underscore_id() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["_id"], "msg_001");
        assert!(value.get("id").is_none());
    }

    #[test]
    fn filter_serializes_as_plain_object() {
        let filter = Filter::eq("user_id", "user_001").and("topic", "health");
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({ "topic": "health", "user_id": "user_001" })
        );
        assert_eq!(serde_json::to_value(Filter::all()).unwrap(), json!({}));
    }

    #[test]
    fn filter_matching() {
        let doc = serde_json::to_value(sample()).unwrap();
        assert!(Filter::all().matches(&doc));
        assert!(Filter::eq("user_id", "user_001").matches(&doc));
        assert!(Filter::eq("user_age", 30).matches(&doc));
        assert!(!Filter::eq("user_id", "user_002").matches(&doc));
        assert!(!Filter::eq("missing", "x").matches(&doc));
    }
}
