use crate::briefing::{BriefingMode, BriefingResult};

fn heading(mode: BriefingMode, answered: bool) -> &'static str {
    match (answered, mode) {
        (false, _) => "Briefing request failed:",
        (true, BriefingMode::Conservative) => "Estimates with 85% safety margin:",
        (true, BriefingMode::Raw) => "Estimates (no safety margin):",
    }
}

/// Heading line followed by the response text
pub(crate) fn render_result(result: &BriefingResult, mode: BriefingMode) -> String {
    let text = result.response_text();
    let mut out = String::with_capacity(text.len() + 48);
    out.push_str(heading(mode, result.outcome.is_answered()));
    out.push('\n');
    out.push_str(&text);
    if !text.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::{CompletionFailure, CompletionOutcome};

    fn result(outcome: CompletionOutcome) -> BriefingResult {
        BriefingResult {
            airport: "SKBO".to_string(),
            prompt: String::new(),
            outcome,
        }
    }

    #[test]
    fn answered_conservative() {
        let out = render_result(
            &result(CompletionOutcome::Answered("Q1\nW/C M010".to_string())),
            BriefingMode::Conservative,
        );
        assert_eq!(out, "Estimates with 85% safety margin:\nQ1\nW/C M010\n");
    }

    #[test]
    fn answered_raw() {
        let out = render_result(
            &result(CompletionOutcome::Answered("Q2\n".to_string())),
            BriefingMode::Raw,
        );
        assert_eq!(out, "Estimates (no safety margin):\nQ2\n");
    }

    #[test]
    fn failure_heading() {
        let out = render_result(
            &result(CompletionOutcome::Failed(CompletionFailure::Empty)),
            BriefingMode::Conservative,
        );
        assert!(out.starts_with("Briefing request failed:\nAPI request failed:"));
    }
}
