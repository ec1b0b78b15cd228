//! JSON-lines event log
//!
//! Serializes every [`GameEvent`] into one JSON object per line and appends
//! it to a file. Writing happens on a dedicated tokio runtime fed through an
//! unbounded channel, so the game loop never waits on disk. Write failures
//! stop the writer; gameplay is unaffected.
//!
//! ```text
//! {"type":"new_game","epoch":1}
//! {"type":"spawned","epoch":1,"shape":"t","color":"sky"}
//! {"type":"locked","epoch":1,"shape":"t","color":"sky","cells":[[4,18],[3,19],[4,19],[5,19]]}
//! {"type":"rows_cleared","epoch":1,"rows":[19],"points":11,"score":11}
//! ```

use anyhow::{Context, Result};
use serde::Serialize;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::core::{GameEvent, StampedEvent};

/// Serialized form of a [`GameEvent`], stamped with its game's epoch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventRecord {
    NewGame {
        epoch: u32,
    },
    Spawned {
        epoch: u32,
        shape: &'static str,
        color: &'static str,
    },
    Locked {
        epoch: u32,
        shape: &'static str,
        color: &'static str,
        cells: [[i8; 2]; 4],
    },
    RowsFlashing {
        epoch: u32,
        rows: Vec<usize>,
    },
    RowsCleared {
        epoch: u32,
        rows: Vec<usize>,
        points: u32,
        score: u32,
    },
    DropIntervalChanged {
        epoch: u32,
        interval_ms: u32,
    },
    GameOver {
        epoch: u32,
        score: u32,
    },
}

impl EventRecord {
    pub fn new(stamped: &StampedEvent) -> Self {
        let epoch = stamped.epoch;
        match &stamped.event {
            GameEvent::NewGame => EventRecord::NewGame { epoch },
            GameEvent::Spawned { shape, color } => EventRecord::Spawned {
                epoch,
                shape: shape.as_str(),
                color: color.as_str(),
            },
            GameEvent::Locked {
                shape,
                color,
                cells,
            } => EventRecord::Locked {
                epoch,
                shape: shape.as_str(),
                color: color.as_str(),
                cells: (*cells).map(|c| [c.x, c.y]),
            },
            GameEvent::RowsFlashing { rows } => EventRecord::RowsFlashing {
                epoch,
                rows: rows.to_vec(),
            },
            GameEvent::RowsCleared {
                rows,
                points,
                score,
            } => EventRecord::RowsCleared {
                epoch,
                rows: rows.to_vec(),
                points: *points,
                score: *score,
            },
            GameEvent::DropIntervalChanged { interval_ms } => EventRecord::DropIntervalChanged {
                epoch,
                interval_ms: *interval_ms,
            },
            GameEvent::GameOver { score } => EventRecord::GameOver {
                epoch,
                score: *score,
            },
        }
    }

    pub fn to_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Running log writer
pub struct EventLog {
    rt: Runtime,
    tx: Option<mpsc::UnboundedSender<EventRecord>>,
    writer: Option<JoinHandle<()>>,
}

impl EventLog {
    /// Open (append) `path` and start the writer task
    pub fn start(path: &str) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("event log: failed to build runtime")?;

        let file = rt
            .block_on(
                tokio::fs::OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path),
            )
            .with_context(|| format!("event log: cannot open {}", path))?;

        let (tx, rx) = mpsc::unbounded_channel::<EventRecord>();
        let writer = rt.spawn(write_records(file, rx));

        Ok(Self {
            rt,
            tx: Some(tx),
            writer: Some(writer),
        })
    }

    /// Start from an optional configured path; `None` means logging is off.
    pub fn start_optional(path: Option<&str>) -> Result<Option<Self>> {
        path.map(Self::start).transpose()
    }

    /// Queue one event for writing
    pub fn record(&self, event: &StampedEvent) {
        if let Some(tx) = self.tx.as_ref() {
            let _ = tx.send(EventRecord::new(event));
        }
    }

    /// Flush pending records and stop the writer
    pub fn close(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        // Dropping the sender ends the writer loop once the queue is drained.
        self.tx.take();
        if let Some(writer) = self.writer.take() {
            let _ = self.rt.block_on(writer);
        }
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        self.shutdown();
    }
}

async fn write_records(mut file: tokio::fs::File, mut rx: mpsc::UnboundedReceiver<EventRecord>) {
    use tokio::io::AsyncWriteExt;

    let mut buf: Vec<u8> = Vec::with_capacity(4096);

    while let Some(rec) = rx.recv().await {
        buf.clear();
        if serde_json::to_writer(&mut buf, &rec).is_err() {
            continue;
        }
        buf.push(b'\n');
        if file.write_all(&buf).await.is_err() {
            eprintln!("[color-tetris] event log write failed; logging stopped");
            break;
        }
    }

    let _ = file.flush().await;
}
