//! Decision engine: table lookup, scope filter, decision record assembly.
//!
//! The engine is immutable after construction. `decide` is a pure function of
//! its inputs plus wall-clock time, so one instance can be shared by any
//! number of concurrent callers.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;
use crate::model::{Action, Environment, EventType};
use crate::policy::{AllowedActionSet, PolicyTable};

/// The policy never adapts.
pub const LEARNING_ENABLED: bool = false;
/// No exploration: every lookup is the table entry.
pub const EXPLORATION_RATE: f64 = 0.0;

/// Output record of one policy evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    /// Seconds since the Unix epoch.
    pub timestamp: f64,
    pub environment: Environment,
    pub event_type: EventType,
    /// Caller payload, echoed unmodified.
    pub event_data: Value,
    /// Table entry before the scope filter.
    pub proposed_action: Action,
    /// Action after the scope filter; always a member of the environment's allow-list.
    pub final_action: Action,
    pub action_filtered: bool,
    pub demo_mode: bool,
    pub learning_enabled: bool,
    pub exploration_rate: f64,
}

/// Static engine configuration, for status queries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemStatus {
    pub demo_mode: bool,
    pub learning_enabled: bool,
    pub exploration_rate: f64,
    pub allowed_actions: AllowedActionSet,
}

#[derive(Debug, Clone)]
pub struct DecisionEngine {
    table: PolicyTable,
    demo_mode: bool,
}

impl DecisionEngine {
    pub fn new(table: PolicyTable, demo_mode: bool) -> Self {
        tracing::info!(demo_mode, "decision engine initialized (static policy table)");
        Self { table, demo_mode }
    }

    /// Engine over the literal production table.
    pub fn frozen(demo_mode: bool) -> Result<Self> {
        Ok(Self::new(PolicyTable::frozen()?, demo_mode))
    }

    pub fn table(&self) -> &PolicyTable {
        &self.table
    }

    pub fn demo_mode(&self) -> bool {
        self.demo_mode
    }

    /// Evaluate one event, stamped with the current wall-clock time.
    pub fn decide(&self, env: Environment, event: EventType, event_data: Value) -> Decision {
        self.decide_at(env, event, event_data, unix_now_secs())
    }

    /// Evaluate one event with a caller-supplied timestamp.
    pub fn decide_at(
        &self,
        env: Environment,
        event: EventType,
        event_data: Value,
        timestamp: f64,
    ) -> Decision {
        let proposed = self.table.proposed_action(env, event);

        // Out-of-scope actions always fall back to noop, never to a sibling action.
        let (final_action, filtered) = if self.table.is_allowed(env, proposed) {
            (proposed, false)
        } else {
            tracing::warn!(
                environment = %env,
                event_type = %event,
                proposed = %proposed,
                "action not allowed in environment, downgraded to noop"
            );
            (Action::Noop, true)
        };

        tracing::debug!(
            environment = %env,
            event_type = %event,
            proposed = %proposed,
            final_action = %final_action,
            filtered,
            "decision made"
        );

        Decision {
            timestamp,
            environment: env,
            event_type: event,
            event_data,
            proposed_action: proposed,
            final_action,
            action_filtered: filtered,
            demo_mode: self.demo_mode,
            learning_enabled: LEARNING_ENABLED,
            exploration_rate: EXPLORATION_RATE,
        }
    }

    pub fn status(&self) -> SystemStatus {
        SystemStatus {
            demo_mode: self.demo_mode,
            learning_enabled: LEARNING_ENABLED,
            exploration_rate: EXPLORATION_RATE,
            allowed_actions: self.table.allow_lists().clone(),
        }
    }
}

fn unix_now_secs() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn engine() -> DecisionEngine {
        DecisionEngine::frozen(true).unwrap()
    }

    #[test]
    fn fixed_metadata_on_every_record() {
        let d = engine().decide(Environment::Dev, EventType::Crash, json!({}));
        assert!(d.demo_mode);
        assert!(!d.learning_enabled);
        assert_eq!(d.exploration_rate, 0.0);
        assert!(d.timestamp > 0.0);
    }

    #[test]
    fn demo_mode_is_echoed() {
        let e = DecisionEngine::frozen(false).unwrap();
        let d = e.decide(Environment::Prod, EventType::Crash, json!({}));
        assert!(!d.demo_mode);
        assert!(!e.status().demo_mode);
    }

    #[test]
    fn event_data_passes_through_unmodified() {
        let data = json!({"service": "api-server", "nested": {"n": [1, 2, 3]}});
        let d = engine().decide(Environment::Stage, EventType::Overload, data.clone());
        assert_eq!(d.event_data, data);
    }

    #[test]
    fn decide_at_uses_given_timestamp() {
        let d = engine().decide_at(Environment::Dev, EventType::Overload, json!({}), 42.5);
        assert_eq!(d.timestamp, 42.5);
        assert_eq!(d.final_action, Action::ScaleUp);
    }

    #[test]
    fn record_serializes_with_wire_names() {
        let d = engine().decide_at(
            Environment::Prod,
            EventType::FalseFailure,
            json!({"alert": "network_blip"}),
            1.0,
        );
        let v = serde_json::to_value(&d).unwrap();
        assert_eq!(v["environment"], "prod");
        assert_eq!(v["event_type"], "false_failure");
        assert_eq!(v["proposed_action"], "noop");
        assert_eq!(v["final_action"], "noop");
        assert_eq!(v["action_filtered"], false);
        assert_eq!(v["learning_enabled"], false);
        assert_eq!(v["exploration_rate"], 0.0);
        assert_eq!(v["event_data"]["alert"], "network_blip");
        assert_eq!(v.as_object().unwrap().len(), 10);
    }

    #[test]
    fn status_exposes_allow_lists() {
        let v = serde_json::to_value(engine().status()).unwrap();
        assert_eq!(v["demo_mode"], true);
        assert_eq!(v["learning_enabled"], false);
        assert_eq!(v["allowed_actions"]["dev"], json!(["noop", "scale_up", "scale_down", "restart"]));
    }
}
