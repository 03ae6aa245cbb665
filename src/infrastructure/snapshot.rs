use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::sync::mpsc;

use crate::domain::{Board, BoardError};

/// File-backed store for one serialized board snapshot.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> SnapshotStore {
        SnapshotStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last stored snapshot, or `None` on first run. A corrupt snapshot is
    /// treated like first run (logged) so a bad write can never wedge startup.
    pub async fn load(&self) -> Result<Option<Board>, BoardError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_slice(&raw) {
            Ok(board) => Ok(Some(board)),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "snapshot unreadable, starting fresh");
                Ok(None)
            }
        }
    }

    /// Write the snapshot via a temp file + rename so a crash mid-write
    /// leaves the previous snapshot intact.
    pub async fn save(&self, board: &Board) -> Result<(), BoardError> {
        let raw = serde_json::to_vec_pretty(board)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::debug!(path = %self.path.display(), cards = board.card_count(), "board saved");
        Ok(())
    }
}

/// Fire-and-forget persistence: coalesces rapid successive snapshots into a
/// single write after a quiet period. Write failures are logged and never
/// reach the mutation path.
#[derive(Debug)]
pub struct DebouncedSaver {
    tx: mpsc::UnboundedSender<Board>,
}

impl DebouncedSaver {
    pub fn spawn(store: SnapshotStore, quiet: Duration) -> DebouncedSaver {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(store, quiet, rx));
        DebouncedSaver { tx }
    }

    pub fn queue(&self, board: &Board) {
        if self.tx.send(board.clone()).is_err() {
            tracing::warn!("snapshot saver task is gone, board change not persisted");
        }
    }
}

async fn run(store: SnapshotStore, quiet: Duration, mut rx: mpsc::UnboundedReceiver<Board>) {
    while let Some(mut latest) = rx.recv().await {
        // Keep absorbing updates until the board has been quiet long enough.
        loop {
            match tokio::time::timeout(quiet, rx.recv()).await {
                Ok(Some(board)) => latest = board,
                Ok(None) | Err(_) => break,
            }
        }
        if let Err(err) = store.save(&latest).await {
            tracing::warn!(error = %err, "failed to persist board snapshot");
        }
    }
}
