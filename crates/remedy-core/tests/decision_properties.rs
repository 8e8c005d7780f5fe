//! Engine-wide properties over every (environment, event) pair.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::thread;

use serde_json::json;

use remedy_core::{Action, AllowedActionSet, DecisionEngine, Environment, EventType, PolicyTable};

fn all_pairs() -> impl Iterator<Item = (Environment, EventType)> {
    Environment::ALL
        .into_iter()
        .flat_map(|e| EventType::ALL.into_iter().map(move |t| (e, t)))
}

/// Full table proposing `action` everywhere.
fn uniform_table(action: Action) -> PolicyTable {
    PolicyTable::new(
        all_pairs().map(|k| (k, action)),
        AllowedActionSet::frozen().unwrap(),
    )
    .unwrap()
}

#[test]
fn repeated_calls_are_identical_except_timestamp() {
    let engine = DecisionEngine::frozen(true).unwrap();
    for (env, ev) in all_pairs() {
        let data = json!({"source": format!("{env}/{ev}")});
        let first = engine.decide(env, ev, data.clone());
        for _ in 0..50 {
            let mut d = engine.decide(env, ev, data.clone());
            d.timestamp = first.timestamp;
            assert_eq!(d, first);
        }
    }
}

#[test]
fn separate_instances_agree() {
    let a = DecisionEngine::frozen(true).unwrap();
    let b = DecisionEngine::frozen(true).unwrap();
    for (env, ev) in all_pairs() {
        let da = a.decide_at(env, ev, json!({}), 0.0);
        let db = b.decide_at(env, ev, json!({}), 0.0);
        assert_eq!(da, db);
    }
}

#[test]
fn concurrent_callers_see_the_same_decisions() {
    let engine = Arc::new(DecisionEngine::frozen(true).unwrap());
    let expected: Vec<_> = all_pairs()
        .map(|(e, t)| engine.decide_at(e, t, json!({}), 0.0))
        .collect();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                (0..200)
                    .flat_map(|_| all_pairs())
                    .map(|(e, t)| engine.decide_at(e, t, json!({}), 0.0))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for h in handles {
        let got = h.join().unwrap();
        for chunk in got.chunks(expected.len()) {
            assert_eq!(chunk, expected.as_slice());
        }
    }
}

#[test]
fn final_action_always_in_scope() {
    let engine = DecisionEngine::frozen(true).unwrap();
    for (env, ev) in all_pairs() {
        let d = engine.decide(env, ev, json!({}));
        let allowed: Vec<_> = engine.table().allowed_actions(env).collect();
        assert!(
            allowed.contains(&d.final_action),
            "{env}/{ev}: {} not in {allowed:?}",
            d.final_action
        );
    }
}

#[test]
fn filtered_iff_actions_differ() {
    let tables = [
        PolicyTable::frozen().unwrap(),
        uniform_table(Action::Restart),
        uniform_table(Action::ScaleDown),
        uniform_table(Action::Rollback),
    ];
    for table in tables {
        let engine = DecisionEngine::new(table, true);
        for (env, ev) in all_pairs() {
            let d = engine.decide(env, ev, json!({}));
            assert_eq!(d.action_filtered, d.proposed_action != d.final_action);
        }
    }
}

#[test]
fn never_rollback_and_prod_is_conservative() {
    let engine = DecisionEngine::frozen(true).unwrap();
    for (env, ev) in all_pairs() {
        let d = engine.decide(env, ev, json!({}));
        assert_ne!(d.final_action, Action::Rollback);
        if env == Environment::Prod {
            assert!(matches!(d.final_action, Action::Noop | Action::Restart));
        }
    }
}

#[test]
fn frozen_table_never_needs_filtering() {
    let engine = DecisionEngine::frozen(true).unwrap();
    for (env, ev) in all_pairs() {
        assert!(!engine.decide(env, ev, json!({})).action_filtered);
    }
}

#[test]
fn demo_scenarios() {
    let engine = DecisionEngine::frozen(true).unwrap();
    let cases = [
        (Environment::Dev, EventType::Crash, json!({"service": "api-server"}), Action::Restart),
        (Environment::Stage, EventType::Overload, json!({"cpu": 85}), Action::ScaleUp),
        (Environment::Prod, EventType::Overload, json!({"memory": 90}), Action::Noop),
        (Environment::Prod, EventType::FalseFailure, json!({"alert": "network_blip"}), Action::Noop),
        (Environment::Stage, EventType::Crash, json!({}), Action::Noop),
    ];
    for (env, ev, data, expected) in cases {
        let d = engine.decide(env, ev, data.clone());
        assert_eq!(d.final_action, expected, "{env}/{ev}");
        assert_eq!(d.proposed_action, expected, "{env}/{ev}");
        assert!(!d.action_filtered);
        assert_eq!(d.event_data, data);
    }
}

#[test]
fn rollback_proposal_is_downgraded_to_noop() {
    let engine = DecisionEngine::new(uniform_table(Action::Rollback), true);
    for (env, ev) in all_pairs() {
        let d = engine.decide(env, ev, json!({}));
        assert_eq!(d.proposed_action, Action::Rollback);
        assert_eq!(d.final_action, Action::Noop);
        assert!(d.action_filtered);
    }
}

#[test]
fn out_of_scope_sibling_still_downgrades_to_noop() {
    // restart is allowed in prod but not stage; the filter must not pick another allowed action.
    let engine = DecisionEngine::new(uniform_table(Action::Restart), true);

    let stage = engine.decide(Environment::Stage, EventType::Overload, json!({}));
    assert_eq!(stage.final_action, Action::Noop);
    assert!(stage.action_filtered);

    let prod = engine.decide(Environment::Prod, EventType::Overload, json!({}));
    assert_eq!(prod.final_action, Action::Restart);
    assert!(!prod.action_filtered);
}
