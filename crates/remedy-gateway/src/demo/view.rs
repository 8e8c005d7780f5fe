//! Demo-shaped rendering of a single decision.

use serde::Serialize;
use serde_json::Value;

use remedy_core::{Action, Decision};

#[derive(Debug, Clone, Serialize)]
pub struct DemoDecisionView {
    pub runtime_event: RuntimeEvent,
    pub rl_decision: PolicyOutcome,
    pub safety_result: SafetyResult,
    pub system_status: StatusFlags,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuntimeEvent {
    pub environment: String,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Value,
    pub timestamp: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyOutcome {
    pub proposed_action: Action,
    pub final_action: Action,
    pub action_filtered: bool,
    pub reasoning: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SafetyResult {
    /// A non-noop action would run.
    pub executed: bool,
    /// The scope filter rejected the proposed action.
    pub refused: bool,
    pub safe_for_demo: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusFlags {
    pub demo_mode: bool,
    pub learning_disabled: bool,
    pub deterministic: bool,
}

impl From<Decision> for DemoDecisionView {
    fn from(d: Decision) -> Self {
        Self {
            rl_decision: PolicyOutcome {
                proposed_action: d.proposed_action,
                final_action: d.final_action,
                action_filtered: d.action_filtered,
                reasoning: format!(
                    "Deterministic decision for {} in {}",
                    d.event_type, d.environment
                ),
            },
            safety_result: SafetyResult {
                executed: d.final_action != Action::Noop,
                refused: d.action_filtered,
                safe_for_demo: true,
            },
            system_status: StatusFlags {
                demo_mode: d.demo_mode,
                learning_disabled: !d.learning_enabled,
                deterministic: true,
            },
            runtime_event: RuntimeEvent {
                environment: d.environment.to_string(),
                event_type: d.event_type.to_string(),
                data: d.event_data,
                timestamp: d.timestamp,
            },
        }
    }
}
