//! Crawler coordinator - main sweep orchestration logic
//!
//! This module contains the main loop that coordinates a sweep:
//! - Loading the batch and the resume checkpoint
//! - Scanning past requests completed by an earlier run
//! - Looking up each remaining request through the page client session
//! - Writing result rows, failure lines and checkpoints
//! - Releasing the session and reporting the run summary

use crate::client::HttpClientFactory;
use crate::config::{validate, Config};
use crate::extract::Extractor;
use crate::output::RunSummary;
use crate::records::{LookupStatus, Request, ResultRecord};
use crate::session::SessionManager;
use crate::state::ResumeState;
use crate::storage::{open_store, RecordStore};
use crate::SweepError;
use std::time::Instant;

/// Main sweep coordinator structure
pub struct Coordinator {
    store: Box<dyn RecordStore>,
    session: SessionManager,
    extractor: Extractor,
    restart_on_failure: bool,
}

impl Coordinator {
    /// Creates a coordinator over the configured files and storefront
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(SweepError::Config)` - The configuration failed validation
    pub fn new(config: &Config) -> Result<Self, SweepError> {
        validate(config)?;

        let store = open_store(&config.files, config.site.max_candidates);
        let factory = HttpClientFactory::new(config.client.clone());

        Ok(Self::with_parts(
            Box::new(store),
            SessionManager::new(Box::new(factory)),
            Extractor::new(&config.site),
            config.session.restart_on_failure,
        ))
    }

    /// Creates a coordinator from already-built components
    pub fn with_parts(
        store: Box<dyn RecordStore>,
        session: SessionManager,
        extractor: Extractor,
        restart_on_failure: bool,
    ) -> Self {
        Self {
            store,
            session,
            extractor,
            restart_on_failure,
        }
    }

    /// Runs one pass over the input
    ///
    /// 1. Prepares the output file and reads the checkpoint
    /// 2. Loads every request (malformed input aborts before any lookup)
    /// 3. Starts the page client session
    /// 4. Skips through the checkpoint, then processes each request in order
    /// 5. Stops the session, whatever the outcome of step 4
    pub async fn run(&mut self) -> Result<RunSummary, SweepError> {
        let start_time = Instant::now();

        if self.store.ensure_output_initialized()? {
            tracing::info!("Created output file with header row");
        }
        let checkpoint = self.store.last_checkpoint()?;
        let requests = self.store.load_requests()?;
        tracing::info!("Loaded {} request(s) from input", requests.len());

        let mut state = ResumeState::from_checkpoint(checkpoint);
        let mut summary = RunSummary {
            total: requests.len(),
            ..RunSummary::default()
        };

        match state.target() {
            Some(target) if requests.iter().any(|r| r.strike_id == target) => {
                tracing::info!("Resuming after checkpoint {}", target);
            }
            Some(target) => {
                tracing::warn!(
                    "Checkpoint {} does not occur in the input; every request will be skipped",
                    target
                );
                summary.missing_checkpoint = Some(target.to_string());
            }
            None => tracing::info!("No checkpoint found, starting from the first request"),
        }

        self.session.start().await?;
        let outcome = self.drive(&requests, &mut state, &mut summary).await;
        self.session.stop().await;
        outcome?;

        summary.elapsed = start_time.elapsed();
        match self.store.line_counts() {
            Ok(counts) => summary.counts = Some(counts),
            Err(e) => tracing::warn!("Could not tally output files: {}", e),
        }
        summary.log();

        Ok(summary)
    }

    /// Walks the batch in input order
    ///
    /// A failing request is written to the error file and the walk moves on;
    /// only a failure to write that line ends the run.
    async fn drive(
        &mut self,
        requests: &[Request],
        state: &mut ResumeState,
        summary: &mut RunSummary,
    ) -> Result<(), SweepError> {
        let total = requests.len();

        for (index, request) in requests.iter().enumerate() {
            if !state.admit(&request.strike_id) {
                tracing::debug!("Skipping {} ({})", request.strike_id, state);
                summary.skipped += 1;
                continue;
            }

            tracing::info!(
                "Processing input {} of {} [strike_id={}, sku={}, mpn={}]",
                index + 1,
                total,
                request.strike_id,
                request.sku,
                request.mpn
            );
            summary.processed += 1;

            match self.process_request(request).await {
                Ok(LookupStatus::Found) => summary.found += 1,
                Ok(LookupStatus::NotFound) => summary.not_found += 1,
                Err(e) => {
                    tracing::error!("Failed to process {}: {}", request.strike_id, e);
                    self.store.append_failure(&request.raw)?;
                    summary.failed += 1;

                    if self.restart_on_failure {
                        self.session.restart().await?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Looks up one request, writes its row and advances the checkpoint
    async fn process_request(&mut self, request: &Request) -> Result<LookupStatus, SweepError> {
        let client = self.session.client()?;
        let quotes = self.extractor.lookup(client, request).await?;

        let record = ResultRecord::from_quotes(request, quotes);
        self.store.append_result(&record)?;
        self.store.record_checkpoint(&request.strike_id)?;

        tracing::info!(
            "{} -> {} ({} quote(s))",
            request.strike_id,
            record.status,
            record.quotes.len()
        );
        Ok(record.status)
    }
}

/// Runs a complete sweep with the given configuration
pub async fn run_crawl(config: &Config) -> Result<RunSummary, SweepError> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
