//! Live self-check of the running engine.
//!
//! Replays the demo catalog and sweeps every (environment, event) pair for
//! determinism, scope, and prod restrictions. The report is what the demo
//! shows as proof that the frozen policy behaves as advertised.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use serde_json::json;

use remedy_core::{Action, DecisionEngine, Environment, EventType, SystemStatus};

use super::scenarios::catalog;

const REPEATS: usize = 3;

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: &'static str,
    pub passed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub name: &'static str,
    pub expected: Action,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_action: Option<Action>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_filtered: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub passed: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub test_timestamp: f64,
    pub system_status: SystemStatus,
    pub checks: Vec<CheckResult>,
    pub scenarios: Vec<ScenarioOutcome>,
    pub passed: bool,
}

pub fn run_validation(engine: &DecisionEngine) -> ValidationReport {
    let checks = vec![
        check_deterministic(engine),
        check_action_scope(engine),
        check_prod_restrictions(engine),
    ];
    let scenarios = replay_catalog(engine);

    let passed = checks.iter().all(|c| c.passed) && scenarios.iter().all(|s| s.passed);
    if !passed {
        tracing::warn!("demo validation failed");
    }

    ValidationReport {
        test_timestamp: SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs_f64(),
        system_status: engine.status(),
        checks,
        scenarios,
        passed,
    }
}

fn pairs() -> impl Iterator<Item = (Environment, EventType)> {
    Environment::ALL
        .into_iter()
        .flat_map(|e| EventType::ALL.into_iter().map(move |t| (e, t)))
}

fn finish(name: &'static str, violations: Vec<String>) -> CheckResult {
    CheckResult {
        name,
        passed: violations.is_empty(),
        violations,
    }
}

fn check_deterministic(engine: &DecisionEngine) -> CheckResult {
    let mut violations = Vec::new();
    for (env, ev) in pairs() {
        let data = json!({"check": "determinism"});
        let first = engine.decide_at(env, ev, data.clone(), 0.0);
        for _ in 1..REPEATS {
            if engine.decide_at(env, ev, data.clone(), 0.0) != first {
                violations.push(format!("{env}/{ev}: decision changed between calls"));
                break;
            }
        }
    }
    finish("deterministic_behavior", violations)
}

fn check_action_scope(engine: &DecisionEngine) -> CheckResult {
    let violations = pairs()
        .map(|(env, ev)| (env, ev, engine.decide(env, ev, json!({}))))
        .filter(|(env, _, d)| !engine.table().is_allowed(*env, d.final_action))
        .map(|(env, ev, d)| format!("{env}/{ev}: {} not in allowed actions", d.final_action))
        .collect();
    finish("action_scope_enforcement", violations)
}

fn check_prod_restrictions(engine: &DecisionEngine) -> CheckResult {
    let violations = EventType::ALL
        .into_iter()
        .map(|ev| (ev, engine.decide(Environment::Prod, ev, json!({})).final_action))
        .filter(|(_, a)| matches!(a, Action::ScaleUp | Action::ScaleDown | Action::Rollback))
        .map(|(ev, a)| format!("prod/{ev}: illegal action {a}"))
        .collect();
    finish("prod_restrictions", violations)
}

fn replay_catalog(engine: &DecisionEngine) -> Vec<ScenarioOutcome> {
    catalog()
        .scenarios
        .into_iter()
        .map(|s| match s.input.validate() {
            Ok(input) => {
                let d = engine.decide(input.environment, input.event_type, input.event_data);
                ScenarioOutcome {
                    name: s.name,
                    expected: s.expected,
                    final_action: Some(d.final_action),
                    action_filtered: Some(d.action_filtered),
                    error: None,
                    passed: d.final_action == s.expected,
                }
            }
            Err(e) => ScenarioOutcome {
                name: s.name,
                expected: s.expected,
                final_action: None,
                action_filtered: None,
                error: Some(e.to_string()),
                passed: false,
            },
        })
        .collect()
}
