use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;

use remedy_core::Decision;

use crate::config::DecisionLogSection;

/// Enqueue handle for the JSONL writer task.
#[derive(Debug, Clone)]
pub struct DecisionLog {
    tx: mpsc::Sender<Decision>,
}

impl DecisionLog {
    /// Spawn the writer task. It exits once every `DecisionLog` clone is dropped
    /// and the queue has drained.
    pub fn spawn(path: impl Into<PathBuf>, queue_capacity: usize) -> (Self, JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        let handle = tokio::spawn(writer_loop(path.into(), rx));
        (Self { tx }, handle)
    }

    /// `None` when the log is disabled in config.
    pub fn from_config(cfg: &DecisionLogSection) -> Option<(Self, JoinHandle<()>)> {
        cfg.enabled
            .then(|| Self::spawn(cfg.path.clone(), cfg.queue_capacity))
    }

    /// Queue with no writer task; the caller holds the receiving end.
    #[cfg(test)]
    pub(crate) fn detached(queue_capacity: usize) -> (Self, mpsc::Receiver<Decision>) {
        let (tx, rx) = mpsc::channel(queue_capacity.max(1));
        (Self { tx }, rx)
    }

    /// Non-blocking enqueue. Returns false when the record was dropped.
    pub fn try_record(&self, decision: &Decision) -> bool {
        match self.tx.try_send(decision.clone()) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) => {
                tracing::warn!("decision log queue full, record dropped");
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::warn!("decision log writer gone, record dropped");
                false
            }
        }
    }
}

async fn writer_loop(path: PathBuf, mut rx: mpsc::Receiver<Decision>) {
    let mut file: Option<File> = None;

    while let Some(decision) = rx.recv().await {
        let mut line = match serde_json::to_vec(&decision) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "decision log encode failed");
                continue;
            }
        };
        line.push(b'\n');

        // Reopen lazily so a transient failure (missing dir, full disk) heals.
        if file.is_none() {
            file = open_append(&path).await;
        }
        let Some(f) = file.as_mut() else { continue };

        if let Err(e) = write_line(f, &line).await {
            tracing::warn!(path = %path.display(), error = %e, "decision log write failed");
            file = None;
        }
    }

    tracing::debug!(path = %path.display(), "decision log writer stopped");
}

async fn open_append(path: &Path) -> Option<File> {
    match OpenOptions::new().create(true).append(true).open(path).await {
        Ok(f) => Some(f),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "decision log open failed");
            None
        }
    }
}

async fn write_line(f: &mut File, line: &[u8]) -> std::io::Result<()> {
    f.write_all(line).await?;
    f.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use remedy_core::{DecisionEngine, Environment, EventType};
    use serde_json::json;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("remedy-{}-{}.jsonl", name, std::process::id()))
    }

    #[tokio::test]
    async fn writes_one_json_line_per_decision() {
        let path = temp_path("writes");
        let _ = std::fs::remove_file(&path);

        let engine = DecisionEngine::frozen(true).unwrap();
        let (log, handle) = DecisionLog::spawn(&path, 16);
        assert!(log.try_record(&engine.decide(Environment::Dev, EventType::Crash, json!({"n": 1}))));
        assert!(log.try_record(&engine.decide(Environment::Prod, EventType::Overload, json!({"n": 2}))));
        drop(log);
        handle.await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["final_action"], "restart");
        assert_eq!(lines[1]["environment"], "prod");
        assert_eq!(lines[1]["event_data"]["n"], 2);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn full_queue_drops_instead_of_blocking() {
        let (log, _rx) = DecisionLog::detached(1);
        let engine = DecisionEngine::frozen(true).unwrap();
        let d = engine.decide(Environment::Stage, EventType::Crash, json!({}));

        assert!(log.try_record(&d));
        assert!(!log.try_record(&d));
    }

    #[tokio::test]
    async fn unwritable_path_does_not_stop_the_writer() {
        let path = std::env::temp_dir()
            .join("remedy-missing-dir-for-test")
            .join("nested")
            .join("decisions.jsonl");
        let (log, handle) = DecisionLog::spawn(&path, 4);
        let engine = DecisionEngine::frozen(true).unwrap();
        assert!(log.try_record(&engine.decide(Environment::Dev, EventType::Overload, json!({}))));
        drop(log);
        handle.await.unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn disabled_config_spawns_nothing() {
        assert!(DecisionLog::from_config(&DecisionLogSection::default()).is_none());
    }
}
