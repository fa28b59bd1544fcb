//! Core access control types

use serde::{Deserialize, Serialize};

use crate::scope::scope_prefix;

/// Action name (e.g. "dashboards:read")
pub type ActionName = String;

/// A single permission: an action granted on a scope
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    /// Action name (e.g. "dashboards:read" or an action set such as "dashboards:edit")
    pub action: ActionName,

    /// Scope the action applies to (e.g. "dashboards:uid:abc")
    #[serde(default)]
    pub scope: String,
}

impl Permission {
    /// Create a new permission
    pub fn new(action: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            scope: scope.into(),
        }
    }

    /// Returns the prefix of the permission's scope
    pub fn scope_prefix(&self) -> String {
        scope_prefix(&self.scope)
    }
}
