//! Task list filters and their query-string encoding

use serde::{Deserialize, Serialize};

/// Filters accepted by `GET /v1/tasks`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFilters {
    #[serde(default)]
    pub status: Vec<String>,
    #[serde(default)]
    pub priority: Vec<String>,
    #[serde(default)]
    pub assignee_id: Vec<String>,
    pub project_id: Option<String>,
    pub search: Option<String>,
    pub due_date_from: Option<String>,
    pub due_date_to: Option<String>,
}

impl TaskFilters {
    /// Query parameters for one page of results.
    ///
    /// Multi-valued status/priority filters are comma-joined; the backend only
    /// honours a single assignee, so only the first is sent. Empty values are
    /// omitted.
    pub fn to_query_pairs(&self, page: u32, size: u32) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", page.to_string()), ("size", size.to_string())];

        if !self.status.is_empty() {
            pairs.push(("status", self.status.join(",")));
        }
        if !self.priority.is_empty() {
            pairs.push(("priority", self.priority.join(",")));
        }
        if let Some(assignee) = self.assignee_id.first() {
            pairs.push(("assigneeId", assignee.clone()));
        }

        let optional = [
            ("projectId", &self.project_id),
            ("search", &self.search),
            ("dueDateFrom", &self.due_date_from),
            ("dueDateTo", &self.due_date_to),
        ];
        for (key, value) in optional {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                pairs.push((key, value.to_string()));
            }
        }

        pairs
    }
}
