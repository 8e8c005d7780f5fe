//! Frozen (environment, event) -> action mapping.

use std::collections::HashMap;

use crate::error::{Result, RemedyError};
use crate::model::{Action, Environment, EventType};

use super::allowlist::AllowedActionSet;

/// Static decision mapping plus the allow-lists it is filtered against.
/// Construct once at startup, then share via Arc.
#[derive(Debug, Clone)]
pub struct PolicyTable {
    entries: HashMap<(Environment, EventType), Action>,
    allowed: AllowedActionSet,
}

impl PolicyTable {
    /// Build a table from explicit entries.
    ///
    /// Every (environment, event) pair must be present exactly once. Entries
    /// may propose any action, including ones outside the allow-list; the
    /// engine's scope filter handles those.
    pub fn new<I>(entries: I, allowed: AllowedActionSet) -> Result<Self>
    where
        I: IntoIterator<Item = ((Environment, EventType), Action)>,
    {
        let mut map = HashMap::with_capacity(Environment::ALL.len() * EventType::ALL.len());
        for (key, action) in entries {
            if map.insert(key, action).is_some() {
                return Err(RemedyError::IncompleteTable(format!(
                    "duplicate entry for ({}, {})",
                    key.0, key.1
                )));
            }
        }

        let missing: Vec<String> = Environment::ALL
            .into_iter()
            .flat_map(|env| EventType::ALL.into_iter().map(move |ev| (env, ev)))
            .filter(|key| !map.contains_key(key))
            .map(|(env, ev)| format!("({env}, {ev})"))
            .collect();
        if !missing.is_empty() {
            return Err(RemedyError::IncompleteTable(format!(
                "missing entries: {}",
                missing.join(", ")
            )));
        }

        Ok(Self {
            entries: map,
            allowed,
        })
    }

    /// The literal production table.
    pub fn frozen() -> Result<Self> {
        use Action::*;
        use Environment::*;
        use EventType::*;

        Self::new(
            [
                ((Dev, Crash), Restart),
                ((Dev, Overload), ScaleUp),
                ((Dev, FalseFailure), Noop),
                ((Stage, Crash), Noop),
                ((Stage, Overload), ScaleUp),
                ((Stage, FalseFailure), Noop),
                ((Prod, Crash), Restart),
                ((Prod, Overload), Noop),
                ((Prod, FalseFailure), Noop),
            ],
            AllowedActionSet::frozen()?,
        )
    }

    /// Table entry for the pair; `noop` when absent.
    pub fn proposed_action(&self, env: Environment, event: EventType) -> Action {
        self.entries
            .get(&(env, event))
            .copied()
            .unwrap_or(Action::Noop)
    }

    pub fn allowed_actions(&self, env: Environment) -> impl Iterator<Item = Action> + '_ {
        self.allowed.actions(env)
    }

    pub fn is_allowed(&self, env: Environment, action: Action) -> bool {
        self.allowed.is_allowed(env, action)
    }

    pub fn allow_lists(&self) -> &AllowedActionSet {
        &self.allowed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frozen_table_literals() {
        let t = PolicyTable::frozen().unwrap();
        assert_eq!(t.proposed_action(Environment::Dev, EventType::Crash), Action::Restart);
        assert_eq!(t.proposed_action(Environment::Dev, EventType::Overload), Action::ScaleUp);
        assert_eq!(t.proposed_action(Environment::Stage, EventType::Crash), Action::Noop);
        assert_eq!(t.proposed_action(Environment::Stage, EventType::Overload), Action::ScaleUp);
        assert_eq!(t.proposed_action(Environment::Prod, EventType::Crash), Action::Restart);
        assert_eq!(t.proposed_action(Environment::Prod, EventType::Overload), Action::Noop);
        for env in Environment::ALL {
            assert_eq!(t.proposed_action(env, EventType::FalseFailure), Action::Noop);
        }
    }

    #[test]
    fn missing_pairs_are_reported() {
        let err = PolicyTable::new(
            [((Environment::Dev, EventType::Crash), Action::Restart)],
            AllowedActionSet::frozen().unwrap(),
        )
        .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("(prod, false_failure)"), "{msg}");
        assert!(!msg.contains("(dev, crash)"), "{msg}");
    }

    #[test]
    fn duplicate_pair_is_rejected() {
        let mut entries: Vec<_> = Environment::ALL
            .into_iter()
            .flat_map(|e| EventType::ALL.into_iter().map(move |t| ((e, t), Action::Noop)))
            .collect();
        entries.push(((Environment::Prod, EventType::Crash), Action::Restart));

        let err = PolicyTable::new(entries, AllowedActionSet::frozen().unwrap()).unwrap_err();
        assert!(err.to_string().contains("duplicate entry for (prod, crash)"));
    }

    #[test]
    fn absent_entry_defaults_to_noop() {
        // Bypasses the exhaustiveness check on purpose.
        let t = PolicyTable {
            entries: HashMap::new(),
            allowed: AllowedActionSet::frozen().unwrap(),
        };
        assert_eq!(t.proposed_action(Environment::Dev, EventType::Crash), Action::Noop);
    }
}
