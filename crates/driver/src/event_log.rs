//! JSON-lines event log
//!
//! Each record is one line: `{"at_ms":1234,"event":{"type":"row_clear",...}}`.
//! Two writers share the format: [`EventLog`] for synchronous hosts and
//! [`spawn_event_writer`] for the tokio game loop.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::protocol::EventMessage;
use crate::types::GameEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    pub at_ms: u64,
    pub event: EventMessage,
}

impl EventRecord {
    pub fn new(at_ms: u64, event: GameEvent) -> Self {
        Self {
            at_ms,
            event: EventMessage::from(event),
        }
    }
}

/// Buffered append-only log file; a no-op when no path is configured.
pub struct EventLog {
    writer: Option<BufWriter<File>>,
}

impl EventLog {
    pub fn open(path: Option<&str>) -> anyhow::Result<Self> {
        let writer = match path {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .with_context(|| format!("opening event log {path}"))?;
                Some(BufWriter::new(file))
            }
            None => None,
        };
        Ok(Self { writer })
    }

    pub fn disabled() -> Self {
        Self { writer: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    pub fn record(&mut self, at_ms: u64, event: GameEvent) -> anyhow::Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            return Ok(());
        };
        serde_json::to_writer(&mut *writer, &EventRecord::new(at_ms, event))?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    pub fn flush(&mut self) -> anyhow::Result<()> {
        if let Some(writer) = self.writer.as_mut() {
            writer.flush()?;
        }
        Ok(())
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        if let Err(err) = self.flush() {
            eprintln!("[driver] event log flush failed: {err}");
        }
    }
}

/// Spawn a task appending every record it receives to `path`.
///
/// The task ends when every sender is dropped. Open or write failures are
/// reported on stderr and end the task; the game carries on without a log.
pub fn spawn_event_writer(path: String) -> (mpsc::UnboundedSender<EventRecord>, JoinHandle<()>) {
    let (tx, mut rx) = mpsc::unbounded_channel::<EventRecord>();
    let task = tokio::spawn(async move {
        use tokio::fs::OpenOptions;
        use tokio::io::AsyncWriteExt;

        let mut file = match OpenOptions::new().create(true).append(true).open(&path).await {
            Ok(f) => f,
            Err(err) => {
                eprintln!("[driver] cannot open event log {path}: {err}");
                return;
            }
        };

        let mut buf: Vec<u8> = Vec::with_capacity(256);

        while let Some(record) = rx.recv().await {
            buf.clear();
            if serde_json::to_writer(&mut buf, &record).is_err() {
                continue;
            }
            buf.push(b'\n');
            if let Err(err) = file.write_all(&buf).await {
                eprintln!("[driver] event log write failed: {err}");
                break;
            }
        }
        let _ = file.flush().await;
    });
    (tx, task)
}
