use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::extractor::ExtractionError;

/// Model identifiers offered by default. Any other identifier is accepted as-is.
pub const MODEL_PRESETS: [&str; 5] = [
    "nvidia/nemotron-nano-9b-v2:free",
    "openai/gpt-4o-mini",
    "openchat/openchat-7b:free",
    "google/gemini-2.0-flash-001",
    "x-ai/grok-code-fast-1",
];

pub const DEFAULT_MODEL: &str = MODEL_PRESETS[0];

/// Task category that determines the instruction clause sent to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AnalysisType {
    #[default]
    #[serde(rename = "Explain Code")]
    ExplainCode,
    #[serde(rename = "Find Bugs")]
    FindBugs,
    #[serde(rename = "Refactor Code")]
    RefactorCode,
    #[serde(rename = "Add Comments")]
    AddComments,
    #[serde(rename = "Generate Unit Tests")]
    GenerateUnitTests,
}

impl AnalysisType {
    pub const ALL: [AnalysisType; 5] = [
        AnalysisType::ExplainCode,
        AnalysisType::FindBugs,
        AnalysisType::RefactorCode,
        AnalysisType::AddComments,
        AnalysisType::GenerateUnitTests,
    ];

    /// Exact label shown to users and stored in history
    pub fn label(self) -> &'static str {
        match self {
            AnalysisType::ExplainCode => "Explain Code",
            AnalysisType::FindBugs => "Find Bugs",
            AnalysisType::RefactorCode => "Refactor Code",
            AnalysisType::AddComments => "Add Comments",
            AnalysisType::GenerateUnitTests => "Generate Unit Tests",
        }
    }

    /// Map a selection label to an analysis type by exact match.
    /// Anything unrecognized means "Explain Code".
    pub fn from_label(label: &str) -> Self {
        Self::ALL.into_iter().find(|t| t.label() == label).unwrap_or_default()
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown analysis type '{0}' (expected one of: {expected})", expected = expected_labels())]
pub struct ParseAnalysisTypeError(pub String);

fn expected_labels() -> String {
    AnalysisType::ALL.map(|t| t.label()).join(", ")
}

/// Strict parsing for command-line input: accepts the exact label in any case,
/// or its kebab-case form (`find-bugs`).
impl FromStr for AnalysisType {
    type Err = ParseAnalysisTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['-', '_'], " ");
        AnalysisType::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(&normalized))
            .ok_or_else(|| ParseAnalysisTypeError(s.to_string()))
    }
}

/// One analysis submitted by a front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub code: String,
    pub analysis_type: AnalysisType,
    pub model: String,
}

impl AnalysisRequest {
    pub fn new(
        code: impl Into<String>,
        analysis_type: AnalysisType,
        model: impl Into<String>,
    ) -> Self {
        Self { code: code.into(), analysis_type, model: model.into() }
    }

    /// Whether the code is empty once surrounding whitespace is ignored
    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }
}

/// Outcome of a request that reached the API and got a 200 response.
///
/// `succeeded` is false when the body came back but no answer could be
/// extracted from it; `error_detail` then says why and `raw_response_body`
/// holds the body for diagnosis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub raw_response_body: String,
    pub extracted_content: String,
    pub succeeded: bool,
    pub error_detail: Option<ExtractionError>,
}

impl AnalysisResult {
    pub fn completed(raw_response_body: String, extracted_content: String) -> Self {
        Self { raw_response_body, extracted_content, succeeded: true, error_detail: None }
    }

    pub fn extraction_failed(raw_response_body: String, error: ExtractionError) -> Self {
        Self {
            raw_response_body,
            extracted_content: String::new(),
            succeeded: false,
            error_detail: Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_are_exact() {
        let labels: Vec<_> = AnalysisType::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(
            labels,
            vec!["Explain Code", "Find Bugs", "Refactor Code", "Add Comments", "Generate Unit Tests"]
        );
    }

    #[test]
    fn test_from_label_exact_match() {
        assert_eq!(AnalysisType::from_label("Find Bugs"), AnalysisType::FindBugs);
        assert_eq!(AnalysisType::from_label("Generate Unit Tests"), AnalysisType::GenerateUnitTests);
    }

    #[test]
    fn test_from_label_falls_back_to_explain() {
        assert_eq!(AnalysisType::from_label("Summarize"), AnalysisType::ExplainCode);
        assert_eq!(AnalysisType::from_label(""), AnalysisType::ExplainCode);
        // Exact match only
        assert_eq!(AnalysisType::from_label("find bugs"), AnalysisType::ExplainCode);
    }

    #[test]
    fn test_from_str_is_lenient_about_case_and_dashes() {
        assert_eq!("find bugs".parse::<AnalysisType>().unwrap(), AnalysisType::FindBugs);
        assert_eq!("refactor-code".parse::<AnalysisType>().unwrap(), AnalysisType::RefactorCode);
        assert_eq!(
            "GENERATE_UNIT_TESTS".parse::<AnalysisType>().unwrap(),
            AnalysisType::GenerateUnitTests
        );
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "summarize".parse::<AnalysisType>().unwrap_err();
        assert!(err.to_string().contains("summarize"));
        assert!(err.to_string().contains("Find Bugs"));
    }

    #[test]
    fn test_parse_error_message() {
        let err: Box<dyn std::error::Error + Send + Sync> =
            Box::new("nope".parse::<AnalysisType>().unwrap_err());
        assert_eq!(
            err.to_string(),
            "unknown analysis type 'nope' (expected one of: Explain Code, Find Bugs, \
             Refactor Code, Add Comments, Generate Unit Tests)"
        );
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&AnalysisType::AddComments).unwrap();
        assert_eq!(json, r#""Add Comments""#);
        let parsed: AnalysisType = serde_json::from_str(r#""Refactor Code""#).unwrap();
        assert_eq!(parsed, AnalysisType::RefactorCode);
    }

    #[test]
    fn test_request_blank_detection() {
        assert!(AnalysisRequest::new("  \n\t", AnalysisType::ExplainCode, "m").is_blank());
        assert!(!AnalysisRequest::new("x", AnalysisType::ExplainCode, "m").is_blank());
    }

    #[test]
    fn test_default_model_is_first_preset() {
        assert_eq!(DEFAULT_MODEL, "nvidia/nemotron-nano-9b-v2:free");
    }
}
