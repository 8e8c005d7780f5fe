//! remedy gateway
//!
//! - `POST /v1/decision` and `POST /api/decision` (demo view)
//! - Status, demo catalog, and live self-check under `/api`
//! - Health, readiness, and Prometheus metrics
//! - Graceful shutdown on Ctrl-C (readiness flips to draining)

use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::{fmt, EnvFilter};

use remedy_gateway::{app_state::AppState, audit::DecisionLog, config, router};

const LOG_FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let path = config::config_path();
    let cfg = match config::load_from_file(&path) {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!(%path, error = %e, "config load failed");
            return ExitCode::FAILURE;
        }
    };
    let listen = match cfg.gateway.listen_addr() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!(error = %e, "invalid listen address");
            return ExitCode::FAILURE;
        }
    };

    let (decision_log, log_writer) = match DecisionLog::from_config(&cfg.decision_log) {
        Some((log, handle)) => (Some(log), Some(handle)),
        None => (None, None),
    };

    let state = match AppState::new(cfg, decision_log) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            return ExitCode::FAILURE;
        }
    };
    let app = router::build_router(state.clone());

    let listener = match tokio::net::TcpListener::bind(listen).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(%listen, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(%listen, demo_mode = state.engine().demo_mode(), "remedy-gateway starting");

    let drain = state.clone();
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let _ = tokio::signal::ctrl_c().await;
            drain.set_draining();
            tracing::info!("shutdown requested, draining");
        })
        .await;

    // Last AppState clone: dropping it closes the decision log queue.
    drop(state);
    if let Some(handle) = log_writer {
        if tokio::time::timeout(LOG_FLUSH_TIMEOUT, handle).await.is_err() {
            tracing::warn!("decision log did not flush before timeout");
        }
    }

    match served {
        Ok(()) => {
            tracing::info!("remedy-gateway stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "server failed");
            ExitCode::FAILURE
        }
    }
}
