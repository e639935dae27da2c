//! The analysis request pipeline.
//!
//! [`Analyzer`] turns an [`AnalysisRequest`] into an [`AnalysisResult`]:
//! validate, build the prompt, send it through the [`Transport`], extract the
//! answer and record it in the shared [`HistoryStore`].
//!
//! # Error Handling Strategy
//!
//! - Configuration problems (blank code, missing API key) are rejected before
//!   the transport is touched.
//! - Transport and API failures are terminal for the request and leave the
//!   history untouched.
//! - A 200 response whose answer cannot be extracted still counts as a
//!   completed request: it is returned as an unsuccessful [`AnalysisResult`]
//!   and recorded in history with its extraction flag set, so the raw body
//!   stays available for diagnosis.
//!
//! # Threading
//!
//! [`Analyzer::run_analysis`] blocks for the whole network round trip.
//! Interactive front ends use [`Analyzer::spawn_analysis`], which runs the
//! request on a worker thread and reports back through a [`PendingAnalysis`].
//! The history append happens on the worker before the completion is sent.

mod error;

use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

pub use error::{AnalysisError, ConfigError};
use tracing::{debug, info, warn};

use crate::extractor::extract_content;
use crate::history_store::{HistoryError, HistoryStore};
use crate::models::{AnalysisRequest, AnalysisResult, HistoryEntry};
use crate::prompt::build_prompt;
use crate::render::extraction_error_html;
use crate::transport::Transport;
use crate::utils::Config;

pub type AnalysisOutcome = Result<AnalysisResult, AnalysisError>;

pub struct Analyzer<T: Transport> {
    transport: T,
    history: Arc<HistoryStore>,
    api_key: Option<String>,
}

impl<T: Transport> Analyzer<T> {
    /// A blank `api_key` is treated as missing
    pub fn new(transport: T, history: Arc<HistoryStore>, api_key: Option<String>) -> Self {
        let api_key = api_key.filter(|key| !key.trim().is_empty());
        Self { transport, history, api_key }
    }

    pub fn from_config(transport: T, history: Arc<HistoryStore>, config: &Config) -> Self {
        Self::new(transport, history, config.api_key.clone())
    }

    pub fn history(&self) -> &Arc<HistoryStore> {
        &self.history
    }

    /// Whether requests can run at all; front ends use this to show the
    /// configuration problem up front
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Run one analysis to completion on the calling thread
    pub fn run_analysis(&self, request: &AnalysisRequest) -> AnalysisOutcome {
        if request.is_blank() {
            warn!("rejecting analysis request with empty code");
            return Err(ConfigError::EmptyCode.into());
        }
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("rejecting analysis request: API key not configured");
            return Err(ConfigError::MissingApiKey.into());
        };

        let prompt = build_prompt(&request.code, request.analysis_type);
        info!(
            analysis_type = %request.analysis_type,
            model = %request.model,
            code_len = request.code.len(),
            "contacting model"
        );

        let started = Instant::now();
        let raw_body = self.transport.send(&prompt, &request.model, api_key).map_err(|e| {
            warn!(error = %e, "analysis request failed");
            AnalysisError::from(e)
        })?;
        debug!(elapsed_ms = started.elapsed().as_millis() as u64, "response received");

        match extract_content(&raw_body) {
            Ok(content) => {
                let index = self.history.append(HistoryEntry::new(request, content.clone()));
                info!(history_index = index, content_len = content.len(), "analysis completed");
                Ok(AnalysisResult::completed(raw_body, content))
            }
            Err(e) => {
                warn!(error = %e, body_len = raw_body.len(), "could not extract answer from response");
                let diagnostic = extraction_error_html(e, &raw_body);
                self.history.append(HistoryEntry::failed_extraction(request, diagnostic));
                Ok(AnalysisResult::extraction_failed(raw_body, e))
            }
        }
    }

    /// All history entries, oldest first
    pub fn history_entries(&self) -> Vec<HistoryEntry> {
        self.history.list()
    }

    pub fn history_entry(&self, index: usize) -> Result<HistoryEntry, HistoryError> {
        self.history.get(index)
    }
}

impl<T: Transport + 'static> Analyzer<T> {
    /// Run one analysis on a dedicated worker thread.
    ///
    /// There is no cancellation: the request runs until it completes, fails
    /// or hits the transport timeout.
    pub fn spawn_analysis(
        self: &Arc<Self>,
        request: AnalysisRequest,
    ) -> Result<PendingAnalysis, AnalysisError> {
        let (sender, receiver) = mpsc::channel();
        let analyzer = Arc::clone(self);

        thread::Builder::new()
            .name("devpilot-analysis".to_string())
            .spawn(move || {
                let outcome = analyzer.run_analysis(&request);
                // The receiver may have been dropped; the history already has the entry
                if sender.send(outcome).is_err() {
                    debug!("analysis finished after its receiver was dropped");
                }
            })
            .map_err(|e| AnalysisError::Worker(format!("failed to spawn worker: {}", e)))?;

        Ok(PendingAnalysis { receiver })
    }
}

/// Completion channel of an analysis running on a worker thread
#[derive(Debug)]
pub struct PendingAnalysis {
    receiver: Receiver<AnalysisOutcome>,
}

impl PendingAnalysis {
    /// Block until the worker reports
    pub fn wait(self) -> AnalysisOutcome {
        self.receiver.recv().unwrap_or_else(|_| Err(worker_disconnected()))
    }

    /// Non-blocking poll; `None` while the request is still in flight
    pub fn try_result(&self) -> Option<AnalysisOutcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(worker_disconnected())),
        }
    }

    /// Poll with an upper bound on how long to block
    pub fn wait_timeout(&self, timeout: Duration) -> Option<AnalysisOutcome> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout) => None,
            Err(RecvTimeoutError::Disconnected) => Some(Err(worker_disconnected())),
        }
    }
}

fn worker_disconnected() -> AnalysisError {
    AnalysisError::Worker("worker exited without reporting a result".to_string())
}
