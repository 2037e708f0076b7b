// Section generators: one model call contract per resume section, plus the review pass.
// All model calls go through llm_client::StructuredClient; nothing here talks to a backend.

pub mod education;
pub mod experience;
pub mod handlers;
pub mod jd_analyzer;
pub mod projects;
pub mod prompts;
pub mod reviewer;
pub mod skills;
pub mod summary;

use crate::models::resume::JDAnalysis;

/// Substitutes `{name}` placeholders in one left-to-right pass.
///
/// Substituted text is never scanned again, so user text that happens to contain `{keywords}`
/// stays literal. Unknown placeholders are left as they are.
pub(crate) fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let filled = after.find('}').and_then(|close| {
            let key = &after[..close];
            values
                .iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| (*value, close))
        });
        match filled {
            Some((value, close)) => {
                out.push_str(value);
                rest = &after[close + 1..];
            }
            None => {
                out.push('{');
                rest = after;
            }
        }
    }

    out.push_str(rest);
    out
}

/// Comma-joined list, or `fallback` when the list is empty.
pub(crate) fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

/// " at {company}" when the analysis names a company.
pub(crate) fn company_clause(analysis: &JDAnalysis) -> String {
    analysis
        .company_name()
        .map(|company| format!(" at {company}"))
        .unwrap_or_default()
}
