use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::analysis::{AnalysisRequest, AnalysisType};

/// One completed request/response pair kept for the session.
///
/// Entries are built once by the pipeline and never change afterwards, so the
/// fields are only reachable through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    id: Uuid,
    code: String,
    analysis_type: AnalysisType,
    model: String,
    response: String,
    timestamp: DateTime<Utc>,
    #[serde(default)]
    extraction_failed: bool,
}

impl HistoryEntry {
    pub fn new(request: &AnalysisRequest, response: impl Into<String>) -> Self {
        Self::with_timestamp(request, response, Utc::now())
    }

    pub fn with_timestamp(
        request: &AnalysisRequest,
        response: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            code: request.code.clone(),
            analysis_type: request.analysis_type,
            model: request.model.clone(),
            response: response.into(),
            timestamp,
            extraction_failed: false,
        }
    }

    /// Entry for a response whose answer could not be extracted; `response`
    /// carries the diagnostic payload instead.
    pub fn failed_extraction(request: &AnalysisRequest, diagnostic: impl Into<String>) -> Self {
        Self { extraction_failed: true, ..Self::new(request, diagnostic) }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn analysis_type(&self) -> AnalysisType {
        self.analysis_type
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn extraction_failed(&self) -> bool {
        self.extraction_failed
    }
}
