//! Conversions from external infrastructure errors into domain errors.

use reqwest::Error as HttpError;
use serde_json::Error as JsonError;
use taskdash_domain::TaskDashError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub TaskDashError);

impl From<InfraError> for TaskDashError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<TaskDashError> for InfraError {
    fn from(value: TaskDashError) -> Self {
        InfraError(value)
    }
}

trait IntoTaskDashError {
    fn into_taskdash(self) -> TaskDashError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TaskDashError */
/* -------------------------------------------------------------------------- */

impl IntoTaskDashError for HttpError {
    fn into_taskdash(self) -> TaskDashError {
        if self.is_timeout() {
            return TaskDashError::Network("HTTP request timed out".into());
        }

        if self.is_connect() {
            return TaskDashError::Network("HTTP connection failure".into());
        }

        if self.is_decode() {
            return TaskDashError::Decode(format!("HTTP response body: {self}"));
        }

        if self.is_builder() {
            return TaskDashError::InvalidInput(format!("invalid HTTP request: {self}"));
        }

        if let Some(status) = self.status() {
            let code = status.as_u16();
            let message =
                format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

            return match code {
                401 | 403 => TaskDashError::Auth(message),
                404 => TaskDashError::NotFound(message),
                400..=499 if code != 429 => TaskDashError::InvalidInput(message),
                _ => TaskDashError::Network(message),
            };
        }

        TaskDashError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_taskdash())
    }
}

/* -------------------------------------------------------------------------- */
/* serde_json::Error → TaskDashError */
/* -------------------------------------------------------------------------- */

impl IntoTaskDashError for JsonError {
    fn into_taskdash(self) -> TaskDashError {
        if self.is_syntax() || self.is_eof() {
            TaskDashError::Decode(format!(
                "invalid JSON at line {} column {}: {self}",
                self.line(),
                self.column()
            ))
        } else {
            TaskDashError::Decode(self.to_string())
        }
    }
}

impl From<JsonError> for InfraError {
    fn from(value: JsonError) -> Self {
        InfraError(value.into_taskdash())
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
