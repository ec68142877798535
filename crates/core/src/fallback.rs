//! Deterministic fallback texts.
//!
//! Everything in this module is pure: identical input always yields identical output, and
//! nothing here touches the network, the clock, or the environment. These texts are what the
//! user sees whenever the provider path is unavailable or fails, so they must always be safe
//! to show in a sensitive context.

use api_shared::ReportRequest;

/// Returned verbatim for an empty or whitespace-only question.
pub const EMPTY_QUESTION_PROMPT: &str = "Please enter a question.";

/// Fixed supportive answer substituted when no provider output is available.
pub const ANSWER_FALLBACK: &str = "I'm here with you. If you are in immediate danger, call 999 now. \
Otherwise: move somewhere safe, tell someone you trust what happened, and write down what you \
remember while it is fresh. 24/7 help lines in Malaysia: Talian Kasih 15999 (WhatsApp \
019-2615999), Befrienders 03-7627 2929, WAO +603-7956 3488.";

/// Note appended to [`ANSWER_FALLBACK`] when the provider was tried and failed.
pub const AI_ISSUE_NOTE: &str =
    "(The AI assistant had an issue answering just now, so this is general guidance.)";

/// Rendered in place of any absent report field.
pub const PLACEHOLDER: &str = "-";

/// [`ANSWER_FALLBACK`] with the AI-issue note appended.
pub fn answer_fallback_with_note() -> String {
    format!("{ANSWER_FALLBACK}\n\n{AI_ISSUE_NOTE}")
}

fn field_or_placeholder(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => PLACEHOLDER,
    }
}

/// Fixed-structure incident report draft.
///
/// Every field present in the payload appears verbatim; every absent field renders as the
/// placeholder dash. The advisory notes are constant.
pub fn report_template(payload: &ReportRequest) -> String {
    format!(
        "## Incident Report (Draft)\n\
         \n\
         Category: {category}\n\
         Date: {date}\n\
         Time: {time}\n\
         Location: {location}\n\
         \n\
         ### Description of the Incident\n\
         {description}\n\
         \n\
         ### Notes\n\
         - Keep language factual and neutral.\n\
         - Flag approximate times.\n\
         - Attach evidence where safe.",
        category = field_or_placeholder(payload.category.as_deref()),
        date = field_or_placeholder(payload.date_iso.as_deref()),
        time = field_or_placeholder(payload.time_iso.as_deref()),
        location = field_or_placeholder(payload.location_text.as_deref()),
        description = field_or_placeholder(payload.description.as_deref()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_payload() -> ReportRequest {
        ReportRequest {
            category: Some("Bullying".into()),
            date_iso: Some("2024-01-01T10:00:00Z".into()),
            time_iso: Some("2024-01-01T10:00:00Z".into()),
            location_text: Some("Cafeteria".into()),
            description: Some("Shoved by classmate".into()),
        }
    }

    #[test]
    fn test_report_template_is_deterministic() {
        let payload = full_payload();
        assert_eq!(report_template(&payload), report_template(&payload));
    }

    #[test]
    fn test_report_template_embeds_all_present_fields() {
        let text = report_template(&full_payload());
        assert!(text.contains("Bullying"));
        assert!(text.contains("2024-01-01T10:00:00Z"));
        assert!(text.contains("Cafeteria"));
        assert!(text.contains("Shoved by classmate"));
    }

    #[test]
    fn test_report_template_renders_placeholders_for_absent_fields() {
        let text = report_template(&ReportRequest::default());
        assert!(text.contains("Category: -"));
        assert!(text.contains("Date: -"));
        assert!(text.contains("Time: -"));
        assert!(text.contains("Location: -"));
    }

    #[test]
    fn test_blank_field_treated_as_absent() {
        let payload = ReportRequest {
            category: Some("  ".into()),
            ..ReportRequest::default()
        };
        assert!(report_template(&payload).contains("Category: -"));
    }

    #[test]
    fn test_answer_fallback_with_note_contains_both_parts() {
        let text = answer_fallback_with_note();
        assert!(text.starts_with(ANSWER_FALLBACK));
        assert!(text.ends_with(AI_ISSUE_NOTE));
    }
}
