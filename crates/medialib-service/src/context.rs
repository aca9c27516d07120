//! Request context carrying the caller identity and role.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use medialib_core::error::AppError;
use medialib_core::result::AppResult;

/// What a caller may do with the library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May read and mutate.
    Admin,
    /// May only read.
    Viewer,
}

/// Context for the current call.
///
/// Passed into every service method so that each operation knows who is
/// acting and can refuse mutations from read-only callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// Caller name recorded on emitted events.
    pub actor: String,
    /// The caller's role.
    pub role: Role,
    /// When the call started.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(actor: impl Into<String>, role: Role) -> Self {
        Self {
            actor: actor.into(),
            role,
            request_time: Utc::now(),
        }
    }

    /// An administrator context.
    pub fn admin(actor: impl Into<String>) -> Self {
        Self::new(actor, Role::Admin)
    }

    /// A read-only context.
    pub fn viewer(actor: impl Into<String>) -> Self {
        Self::new(actor, Role::Viewer)
    }

    /// Returns whether the caller is an admin.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Fail with `Permission` unless the caller is an admin.
    pub fn require_admin(&self, operation: &str) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::permission(format!(
                "{} may not {operation}: admin role required",
                self.actor
            )))
        }
    }

    /// Actor name as stored on events.
    pub(crate) fn actor(&self) -> Option<String> {
        Some(self.actor.clone())
    }
}
