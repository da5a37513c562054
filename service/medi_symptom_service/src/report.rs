//! Plain-text rendering of a prediction for the command line

use crate::request::CheckResponse;

const DESCRIPTION_PREVIEW: usize = 140;

pub fn render_text(response: &CheckResponse) -> String {
    let mut out = format!("Input symptoms: {}\n", response.input_symptoms.join(", "));
    if !response.unknown_symptoms.is_empty() {
        out.push_str(&format!(
            "Unrecognized symptoms: {}\n",
            response.unknown_symptoms.join(", ")
        ));
    }

    out.push_str("\nTop predictions:\n");
    for result in &response.results {
        out.push_str(&format!(
            "- {}  (prob={:.1}%)\n",
            result.disease, result.probability
        ));
        if !result.description.is_empty() {
            out.push_str(&format!("  Description: {}\n", preview(&result.description)));
        }
        if !result.precautions.is_empty() {
            out.push_str(&format!(
                "  Precautions: {}\n",
                result.precautions.join(", ")
            ));
        }
    }

    let triage = &response.triage;
    out.push_str(&format!(
        "\nTriage: {} (score {})\n",
        triage.level, triage.score
    ));
    if !triage.reasons.is_empty() {
        out.push_str(&format!("  Reasons: {}\n", triage.reasons.join(", ")));
    }
    out.push_str(&format!("  Next steps: {}\n", triage.level.advice()));
    out
}

fn preview(text: &str) -> String {
    match text.char_indices().nth(DESCRIPTION_PREVIEW) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
