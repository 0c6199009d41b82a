use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Priority of a task. Serialized capitalized on the wire (`"Medium"`),
/// stored lowercase in the `task_priority` Postgres enum.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

/// A task ("mission log") as stored and as returned by the API.
///
/// `user_id` is the owner and is immutable after creation; every read,
/// update, or delete of a task checks the caller's identity against it.
/// `created_at` is server-assigned once.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub text: String,
    pub details: Option<String>,
    pub priority: TaskPriority,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a task. An omitted priority defaults to Medium; an
/// explicit value outside Low/Medium/High fails deserialization and is
/// rejected as a 400 rather than silently coerced.
#[derive(Debug, Deserialize, Validate)]
pub struct TaskInput {
    #[validate(custom = "non_blank")]
    pub text: String,
    pub details: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
}

/// Partial update for a task. Omitted fields retain their prior value.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    pub text: Option<String>,
    pub details: Option<String>,
    pub priority: Option<TaskPriority>,
}

fn non_blank(text: &str) -> Result<(), ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::new("text_required"));
    }
    Ok(())
}

/// The fixed onboarding checklist seeded once per new user at registration.
const ONBOARDING_TASKS: [(&str, &str, TaskPriority); 4] = [
    (
        "Connect to command console",
        "Check mission logs and familiarize with the UI.",
        TaskPriority::High,
    ),
    (
        "Add new mission targets",
        "Use the input fields below to add new tasks to the list.",
        TaskPriority::Medium,
    ),
    (
        "Neutralize a target",
        "Click the priority label (e.g. // HIGH) to complete a task.",
        TaskPriority::Low,
    ),
    (
        "Edit a target",
        "Long-press or long-click on a mission log to load it into the editor below.",
        TaskPriority::Medium,
    ),
];

impl Task {
    /// Creates a new `Task` owned by `owner`, assigning a fresh id and the
    /// current server time. Text and details are trimmed.
    pub fn new(input: TaskInput, owner: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id: owner,
            text: input.text.trim().to_string(),
            details: input.details.map(|d| d.trim().to_string()),
            priority: input.priority,
            created_at: Utc::now(),
        }
    }

    /// The four default tasks created for a freshly registered user.
    pub fn onboarding_for(owner: Uuid) -> Vec<Task> {
        ONBOARDING_TASKS
            .iter()
            .map(|(text, details, priority)| Task {
                id: Uuid::new_v4(),
                user_id: owner,
                text: (*text).to_string(),
                details: Some((*details).to_string()),
                priority: *priority,
                created_at: Utc::now(),
            })
            .collect()
    }

    /// Applies a partial update; fields absent from the patch are kept.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(text) = patch.text {
            self.text = text.trim().to_string();
        }
        if let Some(details) = patch.details {
            self.details = Some(details.trim().to_string());
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_task_creation_assigns_owner_id_and_timestamp() {
        let owner = Uuid::new_v4();
        let input = TaskInput {
            text: "  Patrol sector 7  ".to_string(),
            details: None,
            priority: TaskPriority::default(),
        };

        let task = Task::new(input, owner);
        assert_eq!(task.text, "Patrol sector 7");
        assert_eq!(task.user_id, owner);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert!(!task.id.is_nil());
    }

    #[test]
    fn test_priority_defaults_to_medium_when_omitted() {
        let input: TaskInput = serde_json::from_str(r#"{"text": "Patrol sector 7"}"#).unwrap();
        assert_eq!(input.priority, TaskPriority::Medium);

        let input: TaskInput =
            serde_json::from_str(r#"{"text": "Patrol sector 7", "priority": "High"}"#).unwrap();
        assert_eq!(input.priority, TaskPriority::High);
    }

    #[test]
    fn test_invalid_priority_is_rejected_not_coerced() {
        let result: Result<TaskInput, _> =
            serde_json::from_str(r#"{"text": "Patrol sector 7", "priority": "Urgent"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_priority_wire_format_is_capitalized() {
        assert_eq!(
            serde_json::to_string(&TaskPriority::Medium).unwrap(),
            "\"Medium\""
        );
        assert_eq!(serde_json::to_string(&TaskPriority::Low).unwrap(), "\"Low\"");
    }

    #[test]
    fn test_blank_text_fails_validation() {
        let input = TaskInput {
            text: "   ".to_string(),
            details: None,
            priority: TaskPriority::Medium,
        };
        assert!(input.validate().is_err());

        let input = TaskInput {
            text: "Patrol sector 7".to_string(),
            details: None,
            priority: TaskPriority::Medium,
        };
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_onboarding_tasks_are_four_and_owned() {
        let owner = Uuid::new_v4();
        let tasks = Task::onboarding_for(owner);
        assert_eq!(tasks.len(), 4);
        assert!(tasks.iter().all(|t| t.user_id == owner));
        assert_eq!(tasks[0].text, "Connect to command console");
        assert_eq!(tasks[0].priority, TaskPriority::High);
    }

    #[test]
    fn test_patch_retains_omitted_fields() {
        let owner = Uuid::new_v4();
        let mut task = Task::new(
            TaskInput {
                text: "Patrol sector 7".to_string(),
                details: Some("Night shift".to_string()),
                priority: TaskPriority::High,
            },
            owner,
        );
        let created_at = task.created_at;

        task.apply(TaskPatch {
            details: Some("Day shift".to_string()),
            ..TaskPatch::default()
        });

        assert_eq!(task.text, "Patrol sector 7");
        assert_eq!(task.details.as_deref(), Some("Day shift"));
        assert_eq!(task.priority, TaskPriority::High);
        assert_eq!(task.created_at, created_at);
        assert_eq!(task.user_id, owner);
    }
}
