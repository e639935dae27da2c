use crate::extractor::ExtractionError;
use crate::models::AnalysisResult;
use crate::pipeline::AnalysisError;

const TEXT_BG: &str = "#ffffff";
const FOREGROUND: &str = "#000000";
const BORDER: &str = "#505050";

fn stylesheet() -> String {
    format!(
        "body {{ font-family: Segoe UI, sans-serif; background-color: {bg}; color: {fg}; margin: 10px; }}\
pre {{ background-color: {bg}; border: 1px solid {border}; padding: 10px; border-radius: 5px; white-space: pre-wrap; word-wrap: break-word; }}\
code {{ font-family: Consolas, monospace; }}\
ul {{ margin-left: 20px; }}",
        bg = TEXT_BG,
        fg = FOREGROUND,
        border = BORDER
    )
}

/// Wrap a body fragment in a standalone HTML document with the output pane styling
pub fn html_document(body: &str) -> String {
    format!("<html><head><style>{}</style></head><body>{}</body></html>", stylesheet(), body)
}

/// Escape the characters that would otherwise be read as markup
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Diagnostic fragment shown when no answer could be extracted
pub fn extraction_error_html(error: ExtractionError, raw_body: &str) -> String {
    let reason = match error {
        ExtractionError::ContentKeyNotFound => "Could not find 'content' key in AI response.",
        ExtractionError::NoClosingQuote => "Could not find a closing quote for the content.",
    };
    format!("<b>Error:</b> {}<br><pre>{}</pre>", reason, escape_html(raw_body))
}

/// Body fragment for a result: the model's answer, or the diagnostic payload
pub fn result_html(result: &AnalysisResult) -> String {
    match result.error_detail {
        Some(error) => extraction_error_html(error, &result.raw_response_body),
        None => result.extracted_content.clone(),
    }
}

/// Body fragment for a request that failed before producing a result
pub fn error_html(error: &AnalysisError) -> String {
    format!("<b>API Error:</b> {}", escape_html(&error.to_string()))
}
