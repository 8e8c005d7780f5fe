//! Per-environment allow-lists.
//!
//! An allow-list is the complete set of actions that may leave the engine for
//! a given environment. `noop` must be a member of every list: it is the
//! downgrade target of the scope filter.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::error::{Result, RemedyError};
use crate::model::{Action, Environment};

/// Ordered set of permitted actions, keyed by environment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AllowedActionSet {
    by_env: BTreeMap<Environment, BTreeSet<Action>>,
}

impl AllowedActionSet {
    /// Compile raw `(environment, actions)` rules into an allow-list set.
    ///
    /// Every environment must appear exactly once and its list must contain
    /// `noop`.
    pub fn new<I, A>(rules: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Environment, A)>,
        A: IntoIterator<Item = Action>,
    {
        let mut by_env = BTreeMap::new();
        for (env, actions) in rules {
            let set: BTreeSet<Action> = actions.into_iter().collect();
            if !set.contains(&Action::Noop) {
                return Err(RemedyError::IncompleteTable(format!(
                    "allow-list for {env} must contain noop"
                )));
            }
            if by_env.insert(env, set).is_some() {
                return Err(RemedyError::IncompleteTable(format!(
                    "duplicate allow-list for {env}"
                )));
            }
        }

        for env in Environment::ALL {
            if !by_env.contains_key(&env) {
                return Err(RemedyError::IncompleteTable(format!(
                    "missing allow-list for {env}"
                )));
            }
        }

        Ok(Self { by_env })
    }

    /// The fixed production allow-lists.
    pub fn frozen() -> Result<Self> {
        Self::new([
            (
                Environment::Dev,
                vec![Action::Noop, Action::ScaleUp, Action::ScaleDown, Action::Restart],
            ),
            (
                Environment::Stage,
                vec![Action::Noop, Action::ScaleUp, Action::ScaleDown],
            ),
            (Environment::Prod, vec![Action::Noop, Action::Restart]),
        ])
    }

    /// Allow-list for one environment. Construction guarantees presence.
    pub fn actions(&self, env: Environment) -> impl Iterator<Item = Action> + '_ {
        self.by_env.get(&env).into_iter().flatten().copied()
    }

    pub fn is_allowed(&self, env: Environment, action: Action) -> bool {
        self.by_env
            .get(&env)
            .is_some_and(|set| set.contains(&action))
    }
}
