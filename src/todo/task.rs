use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::tag::GroupKey;

/// A single to-do entry as it is stored for a user.
///
/// Field names serialize in camelCase (`isFavorite`, `dueDate`, `createdAt`)
/// so that stored records keep the schema they have always had.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Creation timestamp in epoch milliseconds, unique within a user's list.
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_tag")]
    pub tag: Option<String>,
    /// Position hint recorded at creation. Display order is list position.
    #[serde(default)]
    pub order: i64,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(
        id: i64,
        text: impl Into<String>,
        due_date: Option<NaiveDate>,
        tag: Option<&str>,
        order: i64,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            is_favorite: false,
            due_date,
            tag: normalize_tag(tag),
            order,
            created_at,
        }
    }

    pub fn group_key(&self) -> GroupKey {
        GroupKey::from_tag(self.tag.as_deref())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tag.as_deref() == Some(tag)
    }
}

/// Trim a user-supplied tag, mapping empty input to "untagged".
pub fn normalize_tag(tag: Option<&str>) -> Option<String> {
    tag.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn deserialize_tag<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(normalize_tag(raw.as_deref()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn created() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_new_defaults() {
        let task = Task::new(1, "Write report", None, Some(" work "), 0, created());
        assert!(!task.completed);
        assert!(!task.is_favorite);
        assert_eq!(task.tag.as_deref(), Some("work"));
    }

    #[test]
    fn test_blank_tag_is_untagged() {
        let task = Task::new(1, "Call mom", None, Some("   "), 0, created());
        assert_eq!(task.tag, None);
        assert_eq!(task.group_key(), GroupKey::Untagged);
    }

    #[test]
    fn test_serializes_camel_case() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let task = Task::new(1710495000000, "A", Some(date), None, 3, created());
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["isFavorite"], false);
        assert_eq!(json["dueDate"], "2024-03-15");
        assert_eq!(json["tag"], serde_json::Value::Null);
        assert_eq!(json["order"], 3);
        assert!(json.get("createdAt").is_some());
    }

    #[test]
    fn test_deserialize_record() {
        let json = r#"{
            "id": 1710495000000,
            "text": "Buy milk",
            "completed": true,
            "isFavorite": true,
            "dueDate": "2024-03-15",
            "tag": "home",
            "order": 2,
            "createdAt": "2024-03-15T09:30:00.000Z"
        }"#;

        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, 1710495000000);
        assert!(task.completed);
        assert!(task.is_favorite);
        assert_eq!(task.due_date, NaiveDate::from_ymd_opt(2024, 3, 15));
        assert_eq!(task.tag.as_deref(), Some("home"));
        assert_eq!(task.created_at, created());
    }

    #[test]
    fn test_deserialize_empty_tag_and_null_due_date() {
        let json = r#"{"id": 1, "text": "x", "dueDate": null, "tag": "", "order": 0}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.tag, None);
        assert_eq!(task.due_date, None);
    }
}
