//! Wire records returned by the task manager API
//!
//! Records are deliberately lenient: every field is optional so that a
//! single partial record never invalidates an entire collection. Consumers
//! decide which fields are required for their purpose (the activity feed,
//! for instance, requires a truthy `id`).

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use crate::impl_wire_enum_conversions;

/// Opaque record identifier; the backend emits numbers, older payloads strings
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl RecordId {
    /// Whether the id can key a record: non-zero numbers and non-blank text.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Number(n) => *n != 0,
            Self::Text(s) => !s.trim().is_empty(),
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Returns the id when it is present and truthy.
pub fn present_id(id: Option<&RecordId>) -> Option<&RecordId> {
    id.filter(|id| id.is_present())
}

/* -------------------------------------------------------------------------- */
/* Enumerations */
/* -------------------------------------------------------------------------- */

/// Task workflow status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl_wire_enum_conversions!(TaskStatus {
    Pending => "PENDING",
    InProgress => "IN_PROGRESS",
    Completed => "COMPLETED",
    Cancelled => "CANCELLED",
});

impl TaskStatus {
    /// All statuses in dashboard display order
    pub const ALL: [Self; 4] = [Self::Pending, Self::InProgress, Self::Completed, Self::Cancelled];

    /// Human-readable label used by the status summary chart
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl_wire_enum_conversions!(TaskPriority {
    Low => "LOW",
    Medium => "MEDIUM",
    High => "HIGH",
});

/// Coarse user role derived from the backend's role names
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    /// Normalizes role strings such as `ROLE_ADMIN`, `admin` or `Admin`.
    pub fn from_role_name(raw: &str) -> Self {
        let trimmed = raw.trim();
        let bare = trimmed
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("role_"))
            .map_or(trimmed, |_| &trimmed[5..]);

        if bare.eq_ignore_ascii_case("admin") {
            Self::Admin
        } else {
            Self::User
        }
    }
}

/* -------------------------------------------------------------------------- */
/* Records */
/* -------------------------------------------------------------------------- */

/// Nested user reference embedded in project/task payloads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRef {
    pub id: Option<RecordId>,
    pub email: Option<String>,
    pub username: Option<String>,
    /// Display name written by older clients instead of `username`
    pub name: Option<String>,
}

/// Project owner as embedded by the backend: a user reference or a bare name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OwnerField {
    Ref(UserRef),
    Name(String),
}

/// Project as returned by `GET /v1/projects`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub id: Option<RecordId>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub owner_id: Option<RecordId>,
    pub owner_name: Option<String>,
    pub owner: Option<OwnerField>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<String>,
}

/// Task as returned by `GET /v1/tasks`
///
/// `status` and `priority` are kept as sent; use [`TaskRecord::parsed_status`]
/// and [`TaskRecord::parsed_priority`] for the typed view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRecord {
    pub id: Option<RecordId>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub due_date: Option<String>,
    pub project_id: Option<RecordId>,
    pub assignee_id: Option<RecordId>,
    pub assignee: Option<UserRef>,
    pub creator_id: Option<RecordId>,
    pub creator: Option<UserRef>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub created_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_timestamp")]
    pub updated_at: Option<String>,
}

impl TaskRecord {
    /// Typed status, `None` when absent or unrecognised
    pub fn parsed_status(&self) -> Option<TaskStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }

    /// Typed priority, `None` when absent or unrecognised
    pub fn parsed_priority(&self) -> Option<TaskPriority> {
        self.priority.as_deref().and_then(|s| s.parse().ok())
    }
}

/// User as returned by `GET /v1/users`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: Option<RecordId>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<String>,
    /// `active` / `inactive`
    pub status: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
}

impl UserRecord {
    /// Highest role held by the user
    pub fn primary_role(&self) -> UserRole {
        if self.roles.iter().any(|r| UserRole::from_role_name(r) == UserRole::Admin) {
            UserRole::Admin
        } else {
            UserRole::User
        }
    }
}

/// Timestamps arrive as strings or as epoch milliseconds. Numbers are kept
/// in their decimal form for `parse_timestamp`; other JSON kinds read as
/// absent.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(raw)) => Some(raw),
        Some(Value::Number(millis)) => Some(millis.to_string()),
        _ => None,
    })
}
