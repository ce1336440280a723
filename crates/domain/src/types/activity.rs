//! Derived activity feed types
//!
//! Activity entries are synthesized client-side from projects and tasks on
//! every refresh. They are never persisted and never mutated after being
//! built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::constants::{SYSTEM_USERNAME, SYSTEM_USER_ID};
use crate::impl_wire_enum_conversions;

/// Kind of event an entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityType {
    ProjectCreated,
    TaskCreated,
    TaskUpdated,
    TaskCompleted,
}

impl_wire_enum_conversions!(ActivityType {
    ProjectCreated => "PROJECT_CREATED",
    TaskCreated => "TASK_CREATED",
    TaskUpdated => "TASK_UPDATED",
    TaskCompleted => "TASK_COMPLETED",
});

impl ActivityType {
    /// Wire name lower-cased with underscores as spaces (`"task completed"`)
    pub fn humanized(&self) -> String {
        self.as_str().to_ascii_lowercase().replace('_', " ")
    }
}

/// Kind of record an entry points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "lowercase")]
pub enum TargetType {
    Project,
    Task,
}

/// Resolved actor of an activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ActivityUser {
    pub id: String,
    pub username: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

impl ActivityUser {
    /// Placeholder for references that cannot be resolved
    pub fn system() -> Self {
        Self {
            id: SYSTEM_USER_ID.to_string(),
            username: SYSTEM_USERNAME.to_string(),
            email: String::new(),
            avatar: None,
        }
    }

    pub fn is_system(&self) -> bool {
        self.id == SYSTEM_USER_ID
    }
}

/// Free-form context rendered next to an entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ActivityMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
}

/// One line of the recent-activity feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// `project-<id>` or `task-<id>`
    pub id: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub action: String,
    pub target: String,
    pub target_id: String,
    pub target_type: TargetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub user: ActivityUser,
    #[serde(default)]
    pub metadata: ActivityMetadata,
}
