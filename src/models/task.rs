use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Page size used when `limit` is not supplied.
pub const DEFAULT_PAGE_LIMIT: u32 = 100;

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    /// The title of the task. Never empty.
    pub title: String,
    /// Free-form description, `""` when none was given.
    pub description: String,
    pub completed: bool,
    /// Identifier of the user who owns the task.
    pub owner_id: i64,
}

/// Payload for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskCreate {
    /// Must be between 1 and 200 characters.
    #[validate(length(min = 1, max = 200))]
    pub title: String,

    /// Maximum length of 1000 characters if provided. Defaults to `""`.
    #[validate(length(max = 1000))]
    #[serde(default)]
    pub description: Option<String>,

    /// Defaults to `false`.
    #[serde(default)]
    pub completed: Option<bool>,
}

/// Partial update for a task.
///
/// A field that is absent from the payload keeps its stored value. A field that is present
/// must carry a value: an explicit `null` fails deserialization.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 200))]
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[validate(length(max = 1000))]
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

/// Query parameters for listing tasks.
#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    /// Number of tasks to skip. Defaults to 0.
    pub skip: Option<u32>,
    /// Maximum number of tasks returned. Defaults to [`DEFAULT_PAGE_LIMIT`].
    pub limit: Option<u32>,
}

impl TaskQuery {
    pub fn skip(&self) -> u32 {
        self.skip.unwrap_or(0)
    }

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }
}

// Only reached when the key is present; `T` itself rejects `null`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_task_create_defaults() {
        let input: TaskCreate = serde_json::from_value(json!({ "title": "T1" })).unwrap();
        assert_eq!(input.title, "T1");
        assert_eq!(input.description, None);
        assert_eq!(input.completed, None);
    }

    #[test]
    fn test_task_validation() {
        let valid_input = TaskCreate {
            title: "Valid Task".to_string(),
            description: Some("Valid Description".to_string()),
            completed: None,
        };
        assert!(valid_input.validate().is_ok());

        let empty_title = TaskCreate {
            title: "".to_string(),
            description: None,
            completed: None,
        };
        assert!(empty_title.validate().is_err());

        let long_title = TaskCreate {
            title: "a".repeat(201),
            description: None,
            completed: None,
        };
        assert!(long_title.validate().is_err());

        let long_description = TaskCreate {
            title: "Valid title".to_string(),
            description: Some("b".repeat(1001)),
            completed: None,
        };
        assert!(long_description.validate().is_err());
    }

    #[test]
    fn test_update_distinguishes_absent_fields() {
        let update: TaskUpdate = serde_json::from_value(json!({ "completed": true })).unwrap();
        assert_eq!(update.completed, Some(true));
        assert_eq!(update.title, None);
        assert_eq!(update.description, None);

        let empty: TaskUpdate = serde_json::from_value(json!({})).unwrap();
        assert_eq!(empty.title, None);
        assert_eq!(empty.completed, None);
    }

    #[test]
    fn test_update_rejects_explicit_null() {
        assert!(serde_json::from_value::<TaskUpdate>(json!({ "title": null })).is_err());
        assert!(serde_json::from_value::<TaskUpdate>(json!({ "completed": null })).is_err());
    }

    #[test]
    fn test_update_rejects_empty_title() {
        let update: TaskUpdate = serde_json::from_value(json!({ "title": "" })).unwrap();
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_query_defaults() {
        let query = TaskQuery::default();
        assert_eq!(query.skip(), 0);
        assert_eq!(query.limit(), DEFAULT_PAGE_LIMIT);
    }
}
