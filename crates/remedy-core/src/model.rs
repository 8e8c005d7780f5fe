//! Closed tag sets: deployment tier, runtime event class, remediation action.
//!
//! Each tag serializes as its lowercase wire name (`"false_failure"`,
//! `"scale_up"`, ...). Parsing from a string is the only place an unknown
//! identifier can appear, and it fails with a client-visible error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RemedyError;

/// Deployment tier bounding which actions are permissible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    Dev,
    Stage,
    Prod,
}

impl Environment {
    pub const ALL: [Environment; 3] = [Environment::Dev, Environment::Stage, Environment::Prod];

    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Stage => "stage",
            Environment::Prod => "prod",
        }
    }
}

impl FromStr for Environment {
    type Err = RemedyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| RemedyError::UnknownEnvironment(s.to_string()))
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classified runtime signal requiring a remediation decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Crash,
    Overload,
    FalseFailure,
}

impl EventType {
    pub const ALL: [EventType; 3] = [EventType::Crash, EventType::Overload, EventType::FalseFailure];

    pub fn as_str(self) -> &'static str {
        match self {
            EventType::Crash => "crash",
            EventType::Overload => "overload",
            EventType::FalseFailure => "false_failure",
        }
    }
}

impl FromStr for EventType {
    type Err = RemedyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventType::ALL
            .into_iter()
            .find(|e| e.as_str() == s)
            .ok_or_else(|| RemedyError::UnknownEventType(s.to_string()))
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Remediation operation.
///
/// Variant order is the canonical allow-list order. `Rollback` is reserved:
/// it appears in no frozen table entry and no allow-list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Noop,
    ScaleUp,
    ScaleDown,
    Restart,
    Rollback,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Noop,
        Action::ScaleUp,
        Action::ScaleDown,
        Action::Restart,
        Action::Rollback,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Action::Noop => "noop",
            Action::ScaleUp => "scale_up",
            Action::ScaleDown => "scale_down",
            Action::Restart => "restart",
            Action::Rollback => "rollback",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
