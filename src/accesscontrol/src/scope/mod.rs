/// Scope string helpers
///
/// Scopes are colon-separated strings such as `dashboards:id:1`. The first
/// two parts identify the resource kind and attribute and make up the
/// prefix used to dispatch scopes to resolvers.
///
/// # Examples
///
/// ```
/// use cretoai_accesscontrol::scope::{scope, scope_prefix};
///
/// let s = scope(&["dashboards", "id", "1"]);
/// assert_eq!(s, "dashboards:id:1");
/// assert_eq!(scope_prefix(&s), "dashboards:id:");
/// ```

mod types;


pub use types::{scope, scope_prefix, split_scope, ScopeKey, MAX_PREFIX_PARTS, SCOPE_SEPARATOR};
