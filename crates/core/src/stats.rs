//! Dashboard overview statistics

use taskdash_domain::{DashboardStats, Listing, ProjectRecord, StatusCount, TaskRecord, TaskStatus};

/// Aggregate overview counts.
///
/// Totals prefer the envelope `total` so a paginated fetch still reports the
/// size of the whole collection; per-status counts only cover the tasks
/// actually received. Tasks with an unrecognised status count toward the
/// total but no bucket.
pub fn compute_dashboard_stats(
    projects: &Listing<ProjectRecord>,
    tasks: &Listing<TaskRecord>,
) -> DashboardStats {
    let count = |status: TaskStatus| -> u64 {
        tasks.items().iter().filter(|task| task.parsed_status() == Some(status)).count() as u64
    };

    let status_summary: Vec<StatusCount> = TaskStatus::ALL
        .iter()
        .map(|status| StatusCount { status: status.label().to_string(), value: count(*status) })
        .collect();

    DashboardStats {
        total_projects: projects.total(),
        total_tasks: tasks.total(),
        completed_tasks: count(TaskStatus::Completed),
        pending_tasks: count(TaskStatus::Pending),
        status_summary,
    }
}
