//! Session state persistence
//!
//! Stores one record per session id, overwritten on every write
//! (last-write-wins, no merge). Persistence is best-effort from the
//! loop's perspective: the transcript is also returned inline, so a
//! failed write never fails the session.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{Result, Transcript};

/// Persisted record for one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub conversation: Transcript,
}

/// Trait for persisting session transcripts
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Persist a snapshot of the transcript under the session id.
    ///
    /// Writing the same id again replaces the previous record.
    async fn persist(&self, session_id: &str, transcript: &Transcript) -> Result<()>;
}

/// File-backed store: one JSON file per session id
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self, session_id: &str) -> PathBuf {
        self.dir.join(format!("{session_id}.json"))
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn persist(&self, session_id: &str, transcript: &Transcript) -> Result<()> {
        let record = SessionRecord {
            session_id: session_id.to_string(),
            timestamp: Utc::now(),
            conversation: transcript.clone(),
        };

        tokio::fs::create_dir_all(&self.dir).await?;
        let contents = serde_json::to_vec_pretty(&record)?;
        tokio::fs::write(self.record_path(session_id), contents).await?;
        Ok(())
    }
}

/// No-op store used when persistence is unconfigured
pub struct NullStateStore;

#[async_trait]
impl StateStore for NullStateStore {
    async fn persist(&self, _session_id: &str, _transcript: &Transcript) -> Result<()> {
        Ok(())
    }
}
