//! Activity feed builder
//!
//! # Algorithm
//! 1. Normalize projects, tasks and users into [`Listing`]s (raw JSON entry
//!    points only; a shape outside the bare-list/envelope union is an error)
//! 2. Build a [`UserDirectory`] from the users
//! 3. Drop projects and tasks without a truthy `id`
//! 4. One `PROJECT_CREATED` entry per project, attributed to its owner
//! 5. One task entry per task, classified by [`classify_task`] and attributed
//!    to the assignee, else the creator, else `System`
//! 6. Stable sort newest first, drop repeated ids, truncate to the cap
//!
//! Unresolvable users fall back to `System` and unparseable timestamps to the
//! builder's reference time, so typed input never fails. Records that do not
//! decode are dropped one at a time in step 1. Raw JSON input fails only when
//! a whole payload has the wrong shape: [`try_build_activity_feed`] reports it,
//! [`build_activity_feed`] logs it and returns an empty feed.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde_json::Value;
use taskdash_domain::constants::{
    MAX_ACTIVITY_ENTRIES, PROJECT_CREATED_ACTION, PROJECT_ENTRY_PREFIX, TASK_ENTRY_PREFIX,
    UNTITLED_PROJECT, UNTITLED_TASK,
};
use taskdash_domain::{
    parse_timestamp, present_id, ActivityEntry, ActivityMetadata, ActivityType, ActivityUser,
    Listing, OwnerField, ProjectRecord, Result, TargetType, TaskRecord, TaskStatus, UserRecord,
};
use tracing::{debug, error};

use super::users::UserDirectory;

/// Builds the recent-activity feed for one refresh cycle
#[derive(Debug, Clone)]
pub struct ActivityFeedBuilder {
    max_entries: usize,
    now: DateTime<Utc>,
}

impl Default for ActivityFeedBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityFeedBuilder {
    /// Builder capped at 20 entries, using the current time as "now"
    pub fn new() -> Self {
        Self { max_entries: MAX_ACTIVITY_ENTRIES, now: Utc::now() }
    }

    pub fn with_max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    /// Instant substituted for missing or unparseable timestamps
    pub fn with_reference_time(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    /// Build the feed from normalized collections.
    pub fn build(
        &self,
        projects: &Listing<ProjectRecord>,
        tasks: &Listing<TaskRecord>,
        users: &[UserRecord],
    ) -> Vec<ActivityEntry> {
        let directory = UserDirectory::new(users);

        let mut entries: Vec<ActivityEntry> = projects
            .items()
            .iter()
            .filter_map(|project| self.project_entry(project, &directory))
            .chain(tasks.items().iter().filter_map(|task| self.task_entry(task, &directory)))
            .collect();

        let derived = entries.len();

        // Stable: equal timestamps keep input order (projects before tasks)
        entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let mut seen = HashSet::with_capacity(entries.len());
        entries.retain(|entry| seen.insert(entry.id.clone()));
        entries.truncate(self.max_entries);

        debug!(
            projects = projects.len(),
            tasks = tasks.len(),
            users = directory.len(),
            derived,
            kept = entries.len(),
            "built activity feed"
        );

        entries
    }

    /// Normalize raw JSON payloads and build the feed.
    ///
    /// `null` collections count as empty, so an absent user list simply
    /// attributes everything to `System`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDashError::MalformedShape`] when a payload is neither a
    /// list nor a `{data: [...]}` envelope. Individual records that cannot be
    /// decoded are logged and dropped, never failing the feed.
    ///
    /// [`TaskDashError::MalformedShape`]: taskdash_domain::TaskDashError::MalformedShape
    pub fn try_build_from_values(
        &self,
        projects: &Value,
        tasks: &Value,
        users: &Value,
    ) -> Result<Vec<ActivityEntry>> {
        let projects = Listing::<ProjectRecord>::from_value(projects)?;
        let tasks = Listing::<TaskRecord>::from_value(tasks)?;
        let users = Listing::<UserRecord>::from_value(users)?;

        Ok(self.build(&projects, &tasks, users.items()))
    }

    /// Like [`Self::try_build_from_values`], but failures are logged and
    /// yield an empty feed.
    pub fn build_from_values(
        &self,
        projects: &Value,
        tasks: &Value,
        users: &Value,
    ) -> Vec<ActivityEntry> {
        match self.try_build_from_values(projects, tasks, users) {
            Ok(entries) => entries,
            Err(err) => {
                error!(error = %err, "Failed to build activity feed; returning empty feed");
                Vec::new()
            }
        }
    }

    fn project_entry(
        &self,
        project: &ProjectRecord,
        directory: &UserDirectory,
    ) -> Option<ActivityEntry> {
        let id = present_id(project.id.as_ref())?.to_string();
        let name = non_blank(project.name.as_deref()).unwrap_or(UNTITLED_PROJECT).to_string();

        Some(ActivityEntry {
            id: format!("{PROJECT_ENTRY_PREFIX}{id}"),
            activity_type: ActivityType::ProjectCreated,
            action: PROJECT_CREATED_ACTION.to_string(),
            target: name.clone(),
            target_id: id.clone(),
            target_type: TargetType::Project,
            status: None,
            timestamp: self.first_timestamp(&[project.created_at.as_deref()]),
            user: resolve_owner(project, directory),
            metadata: ActivityMetadata {
                project_id: Some(id),
                project_name: Some(name),
                description: project.description.clone(),
                ..Default::default()
            },
        })
    }

    fn task_entry(&self, task: &TaskRecord, directory: &UserDirectory) -> Option<ActivityEntry> {
        let id = present_id(task.id.as_ref())?.to_string();
        let title = non_blank(task.title.as_deref()).unwrap_or(UNTITLED_TASK).to_string();
        let activity_type = classify_task(task);

        // Attribution policy: whoever currently holds the task, else whoever opened it.
        // An id-only reference the directory cannot resolve is a last resort.
        let assignee = (task.assignee.as_ref(), task.assignee_id.as_ref());
        let creator = (task.creator.as_ref(), task.creator_id.as_ref());
        let user = directory
            .resolve(assignee.0, assignee.1)
            .or_else(|| directory.resolve(creator.0, creator.1))
            .or_else(|| UserDirectory::placeholder(assignee.0, assignee.1))
            .or_else(|| UserDirectory::placeholder(creator.0, creator.1))
            .unwrap_or_else(ActivityUser::system);

        Some(ActivityEntry {
            id: format!("{TASK_ENTRY_PREFIX}{id}"),
            activity_type,
            action: activity_type.humanized(),
            target: title.clone(),
            target_id: id.clone(),
            target_type: TargetType::Task,
            status: task
                .parsed_status()
                .map(|s| s.as_str().to_string())
                .or_else(|| task.status.clone()),
            timestamp: self
                .first_timestamp(&[task.updated_at.as_deref(), task.created_at.as_deref()]),
            user,
            metadata: ActivityMetadata {
                project_id: present_id(task.project_id.as_ref()).map(ToString::to_string),
                task_id: Some(id),
                task_title: Some(title),
                due_date: task.due_date.clone(),
                priority: task
                    .parsed_priority()
                    .map(|p| p.as_str().to_string())
                    .or_else(|| task.priority.clone()),
                ..Default::default()
            },
        })
    }

    /// First candidate that parses, else the reference time.
    fn first_timestamp(&self, candidates: &[Option<&str>]) -> DateTime<Utc> {
        candidates.iter().flatten().find_map(|raw| parse_timestamp(raw)).unwrap_or(self.now)
    }
}

/// Classify a task's latest activity.
///
/// `COMPLETED` wins; a `PENDING` task whose `updatedAt` equals `createdAt`
/// has never been touched and counts as created; everything else is an
/// update.
///
/// The two timestamps are compared as instants when both parse, so
/// `2024-01-01T00:00:00` and `2024-01-01T00:00:00Z` are equal (offset-less
/// values are UTC). When either fails to parse the raw strings are compared
/// literally, and two missing timestamps count as equal.
pub fn classify_task(task: &TaskRecord) -> ActivityType {
    match task.parsed_status() {
        Some(TaskStatus::Completed) => ActivityType::TaskCompleted,
        Some(TaskStatus::Pending)
            if same_instant(task.created_at.as_deref(), task.updated_at.as_deref()) =>
        {
            ActivityType::TaskCreated
        }
        _ => ActivityType::TaskUpdated,
    }
}

/// Build a feed from raw JSON payloads with the default cap and the current
/// time, reporting failures.
///
/// # Errors
///
/// See [`ActivityFeedBuilder::try_build_from_values`].
pub fn try_build_activity_feed(
    projects: &Value,
    tasks: &Value,
    users: &Value,
) -> Result<Vec<ActivityEntry>> {
    ActivityFeedBuilder::new().try_build_from_values(projects, tasks, users)
}

/// Build a feed from raw JSON payloads. Never fails: a malformed payload
/// is logged and produces an empty feed, indistinguishable from "no recent
/// activity".
pub fn build_activity_feed(projects: &Value, tasks: &Value, users: &Value) -> Vec<ActivityEntry> {
    ActivityFeedBuilder::new().build_from_values(projects, tasks, users)
}

fn resolve_owner(project: &ProjectRecord, directory: &UserDirectory) -> ActivityUser {
    let nested = match &project.owner {
        Some(OwnerField::Ref(reference)) => Some(reference),
        _ => None,
    };

    if let Some(user) = directory.resolve(nested, project.owner_id.as_ref()) {
        return user;
    }

    let owner_name = match &project.owner {
        Some(OwnerField::Name(name)) => non_blank(Some(name.as_str())),
        _ => None,
    }
    .or_else(|| non_blank(project.owner_name.as_deref()));

    match owner_name {
        Some(name) => ActivityUser {
            id: present_id(project.owner_id.as_ref())
                .map_or_else(|| name.to_string(), ToString::to_string),
            username: name.to_string(),
            email: String::new(),
            avatar: None,
        },
        None => UserDirectory::placeholder(nested, project.owner_id.as_ref())
            .unwrap_or_else(ActivityUser::system),
    }
}

fn same_instant(a: Option<&str>, b: Option<&str>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => match (parse_timestamp(a), parse_timestamp(b)) {
            (Some(a), Some(b)) => a == b,
            _ => a == b,
        },
        _ => false,
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
