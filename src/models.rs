//! Frontend Models
//!
//! Data structures matching the task server's JSON payloads.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Display color for categories that arrive without one
pub const DEFAULT_CATEGORY_COLOR: &str = "#6c757d";

/// Opaque record identifier (the server may send numbers or strings)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// Category data structure (inlined on each task)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

impl Category {
    /// Grouping key; `None` when the category carries no usable name
    pub fn group_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    pub fn display_color(&self) -> &str {
        self.color
            .as_deref()
            .filter(|color| !color.is_empty())
            .unwrap_or(DEFAULT_CATEGORY_COLOR)
    }
}

/// Task data structure (matches server)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: RecordId,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub due_date: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub estimated_time: String,
    /// Always within 0..=100
    #[serde(default, deserialize_with = "deserialize_progress")]
    pub progress: u8,
    #[serde(default)]
    pub category: Option<Category>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.progress == 100
    }

    /// Category name used for grouping, if any
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().and_then(Category::group_name)
    }
}

/// Clamp a raw progress value into 0..=100, rounding fractions
pub fn clamp_progress(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.round().clamp(0.0, 100.0) as u8
}

fn deserialize_progress<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(clamp_progress(raw.unwrap_or(0.0)))
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decoded task-list payload
///
/// A payload that parses as JSON but is not a list of tasks is kept as
/// `Malformed` so the board can show a placeholder instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub enum TaskFeed {
    Tasks(Vec<Task>),
    Malformed(String),
}

impl Default for TaskFeed {
    fn default() -> Self {
        TaskFeed::Tasks(Vec::new())
    }
}

impl TaskFeed {
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Array(_) => match serde_json::from_value::<Vec<Task>>(value) {
                Ok(tasks) => TaskFeed::Tasks(tasks),
                Err(e) => TaskFeed::Malformed(format!("invalid task record: {}", e)),
            },
            Value::Null => TaskFeed::Malformed("task list is missing".to_string()),
            other => TaskFeed::Malformed(format!("expected a task list, got {}", json_kind(&other))),
        }
    }

    /// Tasks in server order (empty for a malformed feed)
    pub fn tasks(&self) -> &[Task] {
        match self {
            TaskFeed::Tasks(tasks) => tasks,
            TaskFeed::Malformed(_) => &[],
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Who authored a conversation entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn css_class(self) -> &'static str {
        match self {
            Role::User => "user-message",
            Role::Assistant => "ai-message",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationEntry {
    pub role: Role,
    pub text: String,
}

impl ConversationEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self { role: Role::User, text: text.into() }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self { role: Role::Assistant, text: text.into() }
    }
}

/// Append-only conversation history for the current page session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationLog {
    entries: Vec<ConversationEntry>,
}

impl ConversationLog {
    pub fn push(&mut self, entry: ConversationEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_decodes_server_shape() {
        let task: Task = serde_json::from_value(json!({
            "id": 7,
            "title": "Write report",
            "due_date": "2024-05-01",
            "estimated_time": "2h",
            "progress": 40,
            "is_deleted": false,
            "category": {"id": 3, "name": "Work", "color": "#f00"}
        }))
        .unwrap();

        assert_eq!(task.id, RecordId::Number(7));
        assert_eq!(task.progress, 40);
        assert_eq!(task.category_name(), Some("Work"));
        assert_eq!(task.category.unwrap().display_color(), "#f00");
    }

    #[test]
    fn test_progress_is_clamped() {
        let over: Task = serde_json::from_value(json!({"id": 1, "progress": 140})).unwrap();
        let under: Task = serde_json::from_value(json!({"id": 2, "progress": -5})).unwrap();
        let missing: Task = serde_json::from_value(json!({"id": "a"})).unwrap();
        let null: Task = serde_json::from_value(json!({"id": "b", "progress": null})).unwrap();
        let fraction: Task = serde_json::from_value(json!({"id": 3, "progress": 49.5})).unwrap();

        assert_eq!(over.progress, 100);
        assert_eq!(under.progress, 0);
        assert_eq!(missing.progress, 0);
        assert_eq!(null.progress, 0);
        assert_eq!(fraction.progress, 50);
    }

    #[test]
    fn test_null_text_fields_become_empty() {
        let task: Task = serde_json::from_value(json!({
            "id": 1, "title": "A", "due_date": null, "estimated_time": null
        }))
        .unwrap();
        assert_eq!(task.due_date, "");
        assert_eq!(task.estimated_time, "");
    }

    #[test]
    fn test_category_without_name_is_uncategorized() {
        let task: Task = serde_json::from_value(json!({
            "id": 1, "category": {"name": "", "color": "#0f0"}
        }))
        .unwrap();
        assert_eq!(task.category_name(), None);

        let no_color = Category { id: None, name: Some("Home".into()), color: None };
        assert_eq!(no_color.display_color(), DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn test_feed_from_value() {
        let ok = TaskFeed::from_value(json!([{"id": 1, "title": "A", "progress": 10}]));
        assert_eq!(ok.tasks().len(), 1);

        let object = TaskFeed::from_value(json!({"error": "nope"}));
        assert!(matches!(object, TaskFeed::Malformed(ref reason) if reason.contains("an object")));
        assert!(object.tasks().is_empty());

        let bad_record = TaskFeed::from_value(json!([{"title": "no id"}]));
        assert!(matches!(bad_record, TaskFeed::Malformed(_)));
    }

    #[test]
    fn test_record_id_display() {
        assert_eq!(RecordId::Number(12).to_string(), "12");
        assert_eq!(RecordId::Text("t-9".into()).to_string(), "t-9");
    }
}
