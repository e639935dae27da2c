//! Prompt construction for analysis requests.

use crate::models::AnalysisType;

/// Instruction prepended to every prompt. Restricts the answer to the small
/// HTML subset the output pane renders.
pub const BASE_INSTRUCTION: &str = "You are an expert programmer and code reviewer. \
Format your entire response using simple HTML. Use <pre><code> for code blocks, \
<ul> and <li> for lists, and <b> for bold text. \
Do not include any text outside of the main HTML body content.";

/// Task clause for an analysis type
pub fn task_instruction(analysis_type: AnalysisType) -> &'static str {
    match analysis_type {
        AnalysisType::ExplainCode => "Explain the code in simple terms.",
        AnalysisType::FindBugs => "Analyze the code for bugs. Provide a list of issues.",
        AnalysisType::RefactorCode => {
            "Refactor the code for clarity and efficiency. Provide the refactored code and explain changes."
        }
        AnalysisType::AddComments => {
            "Add comments to the code. Provide the complete commented code."
        }
        AnalysisType::GenerateUnitTests => {
            "Write unit tests for the code. Provide the complete test code."
        }
    }
}

/// Build the full prompt: base instruction, task clause, then the code verbatim.
///
/// The code is not escaped here; the transport encodes the whole prompt as a
/// JSON string.
pub fn build_prompt(code: &str, analysis_type: AnalysisType) -> String {
    format!(
        "{}\n\n{}\n\nCode to analyze:\n{}",
        BASE_INSTRUCTION,
        task_instruction(analysis_type),
        code
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_layout() {
        let prompt = build_prompt("fn main() {}", AnalysisType::FindBugs);
        let expected = format!(
            "{}\n\nAnalyze the code for bugs. Provide a list of issues.\n\nCode to analyze:\nfn main() {{}}",
            BASE_INSTRUCTION
        );
        assert_eq!(prompt, expected);
    }

    #[test]
    fn test_every_type_has_distinct_clause() {
        let clauses: Vec<_> = AnalysisType::ALL.iter().map(|t| task_instruction(*t)).collect();
        for (i, a) in clauses.iter().enumerate() {
            for b in &clauses[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_unknown_label_uses_explain_clause() {
        let unknown = build_prompt("x = 1", AnalysisType::from_label("Translate To Go"));
        let explain = build_prompt("x = 1", AnalysisType::ExplainCode);
        assert_eq!(unknown, explain);
        assert!(unknown.contains("Explain the code in simple terms."));
    }

    #[test]
    fn test_code_is_appended_verbatim() {
        let code = "say \"hi\"\\n\n\ttab";
        let prompt = build_prompt(code, AnalysisType::AddComments);
        assert!(prompt.ends_with(code));
    }

    #[test]
    fn test_html_directive_present() {
        let prompt = build_prompt("", AnalysisType::RefactorCode);
        assert!(prompt.starts_with(BASE_INSTRUCTION));
        assert!(prompt.contains("<pre><code>"));
        assert!(prompt.contains("<ul> and <li>"));
        assert!(prompt.contains("<b>"));
    }
}
