//! Background tag reads for the track being loaded.
//!
//! Every request gets a ticket. Only the newest ticket is live: a worker
//! whose ticket was superseded skips its read or drops its result, and
//! `drain` filters anything that still slipped through.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use tracing::{debug, warn};

use super::error::MetadataError;
use super::reader::{MetadataReader, TrackTags};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum FetchMode {
    /// One worker thread per request.
    Background,
    /// Read on the caller's thread; the result is queued immediately.
    Inline,
}

/// Result of one tag read, keyed by ticket and track index.
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: u64,
    pub index: usize,
    pub result: Result<TrackTags, MetadataError>,
}

pub struct MetadataFetcher {
    reader: Option<Arc<dyn MetadataReader>>,
    mode: FetchMode,
    latest: Arc<AtomicU64>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl MetadataFetcher {
    /// `reader: None` models a missing tag library: every request fails
    /// with `MetadataError::Unavailable`.
    pub fn new(reader: Option<Arc<dyn MetadataReader>>, mode: FetchMode) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            reader,
            mode,
            latest: Arc::new(AtomicU64::new(0)),
            tx,
            rx,
        }
    }

    /// Start reading tags for track `index`, superseding any earlier request.
    pub fn request(&self, index: usize, path: PathBuf) -> u64 {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let Some(reader) = self.reader.clone() else {
            let _ = self.tx.send(FetchOutcome {
                ticket,
                index,
                result: Err(MetadataError::Unavailable),
            });
            return ticket;
        };

        match self.mode {
            FetchMode::Inline => {
                let result = reader.read(&path);
                let _ = self.tx.send(FetchOutcome {
                    ticket,
                    index,
                    result,
                });
            }
            FetchMode::Background => {
                let latest = self.latest.clone();
                let tx = self.tx.clone();
                let spawned = thread::Builder::new()
                    .name("metadata".to_string())
                    .spawn(move || {
                        if latest.load(Ordering::SeqCst) != ticket {
                            debug!(ticket, index, "metadata request superseded before read");
                            return;
                        }
                        let result = reader.read(&path);
                        if latest.load(Ordering::SeqCst) != ticket {
                            debug!(ticket, index, "dropping superseded metadata result");
                            return;
                        }
                        let _ = tx.send(FetchOutcome {
                            ticket,
                            index,
                            result,
                        });
                    });
                if let Err(e) = spawned {
                    warn!(error = %e, "failed to spawn metadata worker");
                    let _ = self.tx.send(FetchOutcome {
                        ticket,
                        index,
                        result: Err(MetadataError::Unavailable),
                    });
                }
            }
        }

        ticket
    }

    /// Invalidate any in-flight request.
    pub fn cancel(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Completed outcomes whose ticket is still the latest.
    pub fn drain(&self) -> Vec<FetchOutcome> {
        self.rx
            .try_iter()
            .filter(|outcome| {
                let live = self.is_current(outcome.ticket);
                if !live {
                    debug!(ticket = outcome.ticket, index = outcome.index, "discarding stale metadata");
                }
                live
            })
            .collect()
    }
}
