/// Scope parsing and cache key types

use std::fmt;

/// Separator between scope parts
pub const SCOPE_SEPARATOR: char = ':';

/// Number of leading parts that make up a scope prefix
pub const MAX_PREFIX_PARTS: usize = 2;

/// Returns the resolver-dispatching prefix of a scope
///
/// Scopes with more than two parts are cut after the second part and keep a
/// trailing separator. Shorter scopes are their own prefix.
///
/// ```
/// use cretoai_accesscontrol::scope::scope_prefix;
///
/// assert_eq!(scope_prefix("dashboards:id:1"), "dashboards:id:");
/// assert_eq!(scope_prefix("dashboards:uid:a:b"), "dashboards:uid:");
/// assert_eq!(scope_prefix("dashboards:*"), "dashboards:*");
/// assert_eq!(scope_prefix("dashboards"), "dashboards");
/// ```
pub fn scope_prefix(scope: &str) -> String {
    let parts: Vec<&str> = scope.split(SCOPE_SEPARATOR).collect();
    if parts.len() <= MAX_PREFIX_PARTS {
        return scope.to_string();
    }

    let mut prefix = String::with_capacity(scope.len());
    for part in &parts[..MAX_PREFIX_PARTS] {
        prefix.push_str(part);
        prefix.push(SCOPE_SEPARATOR);
    }
    prefix
}

/// Builds a scope from its parts, skipping empty ones
pub fn scope(parts: &[&str]) -> String {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(":")
}

/// Splits a scope into kind, attribute and identifier
///
/// The identifier keeps any remaining separators; missing parts are empty.
pub fn split_scope(scope: &str) -> (&str, &str, &str) {
    let mut parts = scope.splitn(3, SCOPE_SEPARATOR);
    let kind = parts.next().unwrap_or_default();
    let attribute = parts.next().unwrap_or_default();
    let identifier = parts.next().unwrap_or_default();
    (kind, attribute, identifier)
}

/// Cache key for a scope resolved within an organization
///
/// Holds both parts separately so that no (org, scope) pair can collide
/// with another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeKey {
    /// Organization the scope was resolved for
    pub org_id: i64,
    /// Unresolved scope string
    pub scope: String,
}

impl ScopeKey {
    /// Creates a new key
    pub fn new(org_id: i64, scope: impl Into<String>) -> Self {
        Self {
            org_id,
            scope: scope.into(),
        }
    }
}

impl fmt::Display for ScopeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.scope, self.org_id)
    }
}
