//! Background fetch thread. The UI never blocks on the network: it sends a
//! `FetchJob` and later picks up the matching `FetchOutcome`. A single thread
//! owns the client and works through jobs in arrival order, so catalog
//! requests never overlap.
//!
//! Every job carries a ticket chosen by the UI. The worker only echoes it
//! back; deciding which outcome is still current is the UI's business.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

use tracing::{debug, warn};

use crate::catalog::{CatalogClient, CatalogResult};
use crate::models::{BookDetail, BookSummary};

/// Monotonic request id assigned by the UI.
pub type Ticket = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchJob {
    Trending { ticket: Ticket, limit: u32 },
    Search { ticket: Ticket, category: String },
    Details { ticket: Ticket, key: String },
}

/// Which flow produced a list of books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListOrigin {
    Trending,
    Search { query: String },
}

#[derive(Debug, Clone)]
pub enum FetchOutcome {
    Books {
        ticket: Ticket,
        origin: ListOrigin,
        result: CatalogResult<Vec<BookSummary>>,
    },
    Details {
        ticket: Ticket,
        key: String,
        result: CatalogResult<BookDetail>,
    },
}

impl FetchOutcome {
    pub fn ticket(&self) -> Ticket {
        match self {
            FetchOutcome::Books { ticket, .. } | FetchOutcome::Details { ticket, .. } => *ticket,
        }
    }
}

/// Run one job against the client.
pub fn handle_job(client: &mut CatalogClient, job: FetchJob) -> FetchOutcome {
    match job {
        FetchJob::Trending { ticket, limit } => FetchOutcome::Books {
            ticket,
            origin: ListOrigin::Trending,
            result: client.fetch_trending(limit),
        },
        FetchJob::Search { ticket, category } => {
            let result = client.search_by_category(&category);
            FetchOutcome::Books {
                ticket,
                origin: ListOrigin::Search { query: category },
                result,
            }
        }
        FetchJob::Details { ticket, key } => {
            let result = client.fetch_details(&key);
            FetchOutcome::Details {
                ticket,
                key,
                result,
            }
        }
    }
}

/// Channels and thread handle of a running worker.
pub struct Worker {
    jobs: Sender<FetchJob>,
    outcomes: Receiver<FetchOutcome>,
    thread: JoinHandle<()>,
}

impl Worker {
    pub fn jobs(&self) -> Sender<FetchJob> {
        self.jobs.clone()
    }

    pub fn outcomes(&self) -> &Receiver<FetchOutcome> {
        &self.outcomes
    }

    /// Close the job queue and wait for the thread. A request stuck on the
    /// network keeps the thread alive, so callers may prefer to just drop.
    pub fn shutdown(self) {
        drop(self.jobs);
        if self.thread.join().is_err() {
            warn!("fetch worker panicked");
        }
    }
}

/// Move the client onto a dedicated thread.
pub fn spawn_worker(mut client: CatalogClient) -> io::Result<Worker> {
    let (job_tx, job_rx) = mpsc::channel::<FetchJob>();
    let (outcome_tx, outcome_rx) = mpsc::channel::<FetchOutcome>();

    let thread = thread::Builder::new()
        .name("owly-fetch".to_string())
        .spawn(move || {
            for job in job_rx {
                debug!(?job, "fetch job received");
                let outcome = handle_job(&mut client, job);
                if outcome_tx.send(outcome).is_err() {
                    break;
                }
            }
            debug!("fetch worker stopped");
        })?;

    Ok(Worker {
        jobs: job_tx,
        outcomes: outcome_rx,
        thread,
    })
}
