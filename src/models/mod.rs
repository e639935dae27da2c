//! Data models for the analysis pipeline.
//!
//! - [`AnalysisType`] - The task category that selects the instruction sent to the model
//! - [`AnalysisRequest`] - Code, analysis type and model identifier for one request
//! - [`AnalysisResult`] - Raw response body plus the extracted answer (or the extraction failure)
//! - [`HistoryEntry`] - Immutable record of a completed request, owned by the history store
//!
//! Model identifiers are free-form strings; [`MODEL_PRESETS`] lists the ones the
//! front ends offer by default.

pub mod analysis;
pub mod history;

pub use analysis::{
    AnalysisRequest, AnalysisResult, AnalysisType, DEFAULT_MODEL, MODEL_PRESETS,
    ParseAnalysisTypeError,
};
pub use history::HistoryEntry;
