//! Fixed catalog of demo scenarios.

use serde::Serialize;
use serde_json::json;

use remedy_core::protocol::DecisionRequest;
use remedy_core::Action;

#[derive(Debug, Clone, Serialize)]
pub struct Scenario {
    pub name: &'static str,
    pub input: DecisionRequest,
    pub expected: Action,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioCatalog {
    pub scenarios: Vec<Scenario>,
}

pub fn catalog() -> ScenarioCatalog {
    ScenarioCatalog {
        scenarios: vec![
            Scenario {
                name: "Dev Crash Recovery",
                input: DecisionRequest::new("dev", "crash", json!({"service": "api-server"})),
                expected: Action::Restart,
            },
            Scenario {
                name: "Stage Overload Scaling",
                input: DecisionRequest::new("stage", "overload", json!({"cpu": 85})),
                expected: Action::ScaleUp,
            },
            Scenario {
                name: "Prod Conservative Response",
                input: DecisionRequest::new("prod", "overload", json!({"memory": 90})),
                expected: Action::Noop,
            },
            Scenario {
                name: "False Failure Ignored",
                input: DecisionRequest::new("prod", "false_failure", json!({"alert": "network_blip"})),
                expected: Action::Noop,
            },
        ],
    }
}
