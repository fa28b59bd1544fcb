//! Action set expansion

use tracing::debug;

use super::Resolvers;
use crate::context::Context;

/// Expands an action into the action sets that imply it, plus itself
#[derive(Clone)]
pub struct ActionSetResolver {
    resolvers: Resolvers,
}

impl ActionSetResolver {
    pub(crate) fn new(resolvers: Resolvers) -> Self {
        Self { resolvers }
    }

    /// Returns the resolved actions followed by `action` itself
    ///
    /// Without an action resolver this is just `[action]`. Duplicates are kept.
    pub fn resolve(&self, _ctx: &Context, action: &str) -> Vec<String> {
        let Some(resolver) = self.resolvers.action_resolver() else {
            return vec![action.to_string()];
        };

        let mut actions = resolver.resolve_action(action);
        actions.push(action.to_string());
        debug!(action, resolved_actions = ?actions, "Resolved action");
        actions
    }
}
