//! Search orchestration — wires the fetcher to the spotlight rotation.
//!
//! [`ScratchService`] runs as a tokio task and processes search commands
//! from the front ends. Each search is tagged with a generation number;
//! in-flight fetches are never cancelled, but a result whose generation is
//! no longer current is discarded on arrival so a stale response cannot
//! overwrite the rotation started by a newer search.
//!
//! All fetch failures are absorbed here: the rotation is reset and a status
//! message is published, nothing propagates further up.

use std::sync::Arc;

use tokio::sync::{mpsc, watch};
use tracing::{debug, info, warn};

use crate::snippet::{build_snippet, clamp_limit};
use crate::spotlight::{SpotlightController, SpotlightDisplay};
use crate::wiki::{FetchError, PageExtract, WikiClient};

/// Status line messages published by the service.
pub mod status {
    pub const PROMPT: &str = "Type a word to begin.";
    pub const SCRATCHING: &str = "Scratching the wiki...";
    pub const NO_RESULTS: &str = "No results found.";
    pub const FAILED: &str = "Something went wrong while scratching.";
}

/// Errors from interacting with a running service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("service command channel closed")]
    ChannelClosed,
}

/// Commands accepted by the scratch service.
#[derive(Debug)]
pub enum ServiceCommand {
    /// Run a search with the raw contents of the term and limit fields.
    Search { term: String, limit: String },
    /// Shut down the service loop.
    Shutdown,
}

/// Result of one generation-tagged fetch.
///
/// `Ok(None)` means the search itself matched nothing, so no extract
/// lookup was performed.
#[derive(Debug)]
struct FetchReply {
    generation: u64,
    term: String,
    outcome: Result<Option<Vec<PageExtract>>, FetchError>,
}

/// The search service task.
pub struct ScratchService {
    command_rx: mpsc::Receiver<ServiceCommand>,
    reply_tx: mpsc::Sender<FetchReply>,
    reply_rx: mpsc::Receiver<FetchReply>,
    client: Arc<WikiClient>,
    spotlight: SpotlightController,
    status_tx: watch::Sender<String>,
    term_tx: watch::Sender<String>,
    generation: u64,
}

/// Handle for interacting with a running [`ScratchService`].
#[derive(Clone)]
pub struct ScratchServiceHandle {
    command_tx: mpsc::Sender<ServiceCommand>,
    status_rx: watch::Receiver<String>,
    term_rx: watch::Receiver<String>,
    display_rx: watch::Receiver<SpotlightDisplay>,
}

impl ScratchServiceHandle {
    /// Submit a search with the raw term and limit field contents.
    pub async fn search(
        &self,
        term: impl Into<String>,
        limit: impl Into<String>,
    ) -> Result<(), ServiceError> {
        self.command_tx
            .send(ServiceCommand::Search {
                term: term.into(),
                limit: limit.into(),
            })
            .await
            .map_err(|_| ServiceError::ChannelClosed)
    }

    /// Request the service to shut down.
    pub async fn shutdown(&self) -> Result<(), ServiceError> {
        self.command_tx
            .send(ServiceCommand::Shutdown)
            .await
            .map_err(|_| ServiceError::ChannelClosed)
    }

    /// Receiver for the status line.
    pub fn status(&self) -> watch::Receiver<String> {
        self.status_rx.clone()
    }

    /// Receiver for the current search term display.
    pub fn current_term(&self) -> watch::Receiver<String> {
        self.term_rx.clone()
    }

    /// Receiver for the spotlight display.
    pub fn spotlight(&self) -> watch::Receiver<SpotlightDisplay> {
        self.display_rx.clone()
    }
}

impl ScratchService {
    /// Create a new service and a handle for driving it.
    pub fn new(
        client: WikiClient,
        spotlight: SpotlightController,
    ) -> (Self, ScratchServiceHandle) {
        let (command_tx, command_rx) = mpsc::channel(16);
        let (reply_tx, reply_rx) = mpsc::channel(16);
        let (status_tx, status_rx) = watch::channel(status::PROMPT.to_string());
        let (term_tx, term_rx) = watch::channel(String::new());
        let display_rx = spotlight.subscribe();

        let service = Self {
            command_rx,
            reply_tx,
            reply_rx,
            client: Arc::new(client),
            spotlight,
            status_tx,
            term_tx,
            generation: 0,
        };

        let handle = ScratchServiceHandle {
            command_tx,
            status_rx,
            term_rx,
            display_rx,
        };

        (service, handle)
    }

    /// Run the service loop until shutdown.
    pub async fn run(mut self) {
        info!("scratch service started");

        loop {
            tokio::select! {
                cmd = self.command_rx.recv() => match cmd {
                    Some(ServiceCommand::Search { term, limit }) => {
                        self.handle_search(&term, &limit);
                    }
                    Some(ServiceCommand::Shutdown) | None => break,
                },
                Some(reply) = self.reply_rx.recv() => self.apply_reply(reply),
            }
        }

        info!("scratch service stopped");
    }

    /// Start a new search. Supersedes any in-flight fetch.
    fn handle_search(&mut self, raw_term: &str, raw_limit: &str) {
        self.generation += 1;
        let term = raw_term.trim().to_string();
        let limit = clamp_limit(raw_limit);

        if term.is_empty() {
            let _ = self.status_tx.send(status::PROMPT.to_string());
            let _ = self.term_tx.send(String::new());
            self.spotlight.clear();
            return;
        }

        let _ = self.term_tx.send(term.clone());
        let _ = self.status_tx.send(status::SCRATCHING.to_string());
        info!(%term, limit, generation = self.generation, "search started");

        let client = Arc::clone(&self.client);
        let reply_tx = self.reply_tx.clone();
        let generation = self.generation;
        tokio::spawn(async move {
            let outcome = scratch(&client, &term, limit).await;
            let _ = reply_tx
                .send(FetchReply {
                    generation,
                    term,
                    outcome,
                })
                .await;
        });
    }

    /// Apply a completed fetch, unless a newer search has superseded it.
    fn apply_reply(&mut self, reply: FetchReply) {
        if reply.generation != self.generation {
            debug!(
                stale = reply.generation,
                current = self.generation,
                term = %reply.term,
                "discarding stale fetch result"
            );
            return;
        }

        match reply.outcome {
            Ok(None) => {
                // The rotation keeps showing whatever it was showing.
                let _ = self.status_tx.send(status::NO_RESULTS.to_string());
                info!(term = %reply.term, "search matched nothing");
            }
            Ok(Some(pages)) => {
                let snippets: Vec<String> = pages
                    .iter()
                    .filter_map(|page| page.extract.as_deref())
                    .map(|extract| build_snippet(extract, &reply.term))
                    .collect();
                let count = snippets.len();
                self.spotlight.start(snippets, &reply.term);
                let _ = self.status_tx.send(format!("Scratched {count} pages."));
                info!(count, term = %reply.term, "search completed");
            }
            Err(err) => {
                warn!(error = %err, term = %reply.term, "search failed");
                self.spotlight.clear();
                let _ = self.status_tx.send(status::FAILED.to_string());
            }
        }
    }
}

/// Two sequential remote calls: the text search, then the batch extract
/// lookup for the titles it returned.
async fn scratch(
    client: &WikiClient,
    term: &str,
    limit: u32,
) -> Result<Option<Vec<PageExtract>>, FetchError> {
    let hits = client.search(term, limit).await?;
    if hits.is_empty() {
        return Ok(None);
    }

    let titles: Vec<String> = hits.into_iter().map(|hit| hit.title).collect();
    let pages = client.extracts(&titles).await?;
    Ok(Some(pages))
}
