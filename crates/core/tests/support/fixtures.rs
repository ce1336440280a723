//! JSON fixtures shaped like task manager API responses

use serde_json::{json, Value};

/// Project created `day` days into January 2024 (1-based)
pub fn project(id: i64, name: &str, owner_id: i64, day: u32) -> Value {
    json!({
        "id": id,
        "name": name,
        "description": format!("{name} description"),
        "ownerId": owner_id,
        "createdAt": format!("2024-01-{day:02}T09:00:00Z"),
    })
}

/// Task with explicit status and timestamps
pub fn task(id: i64, title: &str, status: &str, created_at: &str, updated_at: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "status": status,
        "priority": "MEDIUM",
        "projectId": 1,
        "creatorId": 1,
        "createdAt": created_at,
        "updatedAt": updated_at,
    })
}

pub fn user(id: i64, username: &str, email: &str) -> Value {
    json!({ "id": id, "username": username, "email": email })
}

/// Wrap a bare array in the paginated envelope the backend sometimes returns
pub fn envelope(items: &Value) -> Value {
    let total = items.as_array().map_or(0, Vec::len);
    json!({
        "data": items,
        "total": total,
        "page": 1,
        "limit": 10,
        "totalPages": 1,
    })
}

/// A mixed workload: projects and tasks interleaved in time, some tasks
/// untouched, some updated, some completed.
pub fn mixed_workload(projects: usize, tasks: usize) -> (Value, Value, Value) {
    let projects: Vec<Value> = (1..=projects)
        .map(|i| {
            let owner = (i % 3) as i64 + 1;
            project(i as i64, &format!("Project {i}"), owner, (i % 28) as u32 + 1)
        })
        .collect();

    let statuses = ["PENDING", "IN_PROGRESS", "COMPLETED", "CANCELLED"];
    let tasks: Vec<Value> = (1..=tasks)
        .map(|i| {
            let day = (i % 28) + 1;
            let created = format!("2024-02-{day:02}T08:00:00");
            let updated =
                if i % 5 == 0 { created.clone() } else { format!("2024-02-{day:02}T17:30:00") };
            let status = statuses[i % statuses.len()];
            let mut value = task(i as i64, &format!("Task {i}"), status, &created, &updated);
            value["assigneeId"] = json!((i % 4) as i64 + 1);
            value
        })
        .collect();

    let users = json!([
        user(1, "alice", "alice@example.com"),
        user(2, "bob", "bob@example.com"),
        user(3, "carol", "carol@example.com"),
    ]);

    (Value::Array(projects), Value::Array(tasks), users)
}
