//! Shared application state for the remedy gateway.
//!
//! Holds the one immutable `DecisionEngine` built at startup plus the
//! gateway's own collaborators (metrics, optional decision log). Cloning is
//! cheap: everything lives behind a single `Arc`.

use std::sync::Arc;

use remedy_core::error::Result;
use remedy_core::{Decision, DecisionEngine};

use crate::audit::DecisionLog;
use crate::config::GatewayConfig;
use crate::obs::RemedyMetrics;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    cfg: GatewayConfig,
    engine: DecisionEngine,
    metrics: RemedyMetrics,
    decision_log: Option<DecisionLog>,
}

impl AppState {
    /// Build application state over the frozen policy table.
    /// Fails when the table does not cover every (environment, event) pair.
    pub fn new(cfg: GatewayConfig, decision_log: Option<DecisionLog>) -> Result<Self> {
        let engine = DecisionEngine::frozen(cfg.gateway.demo_mode)?;
        Ok(Self::with_engine(cfg, engine, decision_log))
    }

    /// Build application state over an explicit engine.
    pub fn with_engine(
        cfg: GatewayConfig,
        engine: DecisionEngine,
        decision_log: Option<DecisionLog>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                cfg,
                engine,
                metrics: RemedyMetrics::default(),
                decision_log,
            }),
        }
    }

    pub fn cfg(&self) -> &GatewayConfig {
        &self.inner.cfg
    }

    pub fn engine(&self) -> &DecisionEngine {
        &self.inner.engine
    }

    pub fn metrics(&self) -> &RemedyMetrics {
        &self.inner.metrics
    }

    pub fn set_draining(&self) {
        self.inner.metrics.set_draining();
    }

    pub fn is_draining(&self) -> bool {
        self.inner.metrics.is_draining()
    }

    /// Hand a decision to the durable log, if one is configured. Never blocks.
    pub fn record_decision(&self, decision: &Decision) {
        if let Some(log) = &self.inner.decision_log {
            if !log.try_record(decision) {
                self.inner.metrics.decision_log_dropped.inc(&[]);
            }
        }
    }
}
