//! Professional summary generation.

use crate::generation::prompts::{SUMMARY_SYSTEM, SUMMARY_TEMPLATE};
use crate::generation::{company_clause, fill_template, join_or};
use crate::llm_client::{LlmError, StructuredClient};
use crate::models::profile::Profile;
use crate::models::resume::{GeneratedSummary, JDAnalysis};

/// Skills beyond this many are left out of the summary prompt.
const SUMMARY_SKILL_LIMIT: usize = 10;

pub async fn generate_summary(
    profile: &Profile,
    analysis: &JDAnalysis,
    llm: &StructuredClient,
) -> Result<GeneratedSummary, LlmError> {
    let prompt = build_summary_prompt(profile, analysis);
    llm.generate_structured(SUMMARY_SYSTEM, &prompt).await
}

fn build_summary_prompt(profile: &Profile, analysis: &JDAnalysis) -> String {
    let top_skills: Vec<String> = profile
        .skills
        .iter()
        .take(SUMMARY_SKILL_LIMIT)
        .cloned()
        .collect();

    let recent_role = profile
        .experiences
        .first()
        .map(|exp| format!("{} at {}", exp.title, exp.company))
        .unwrap_or_else(|| "N/A".to_string());

    let education = profile
        .education
        .first()
        .map(|edu| format!("{} in {} from {}", edu.degree, edu.field, edu.school))
        .unwrap_or_else(|| "N/A".to_string());

    fill_template(
        SUMMARY_TEMPLATE,
        &[
            ("experience_level", analysis.experience_level.as_str()),
            ("job_title", analysis.job_title.as_str()),
            ("company_clause", company_clause(analysis).as_str()),
            ("full_name", profile.basic_info.full_name.as_str()),
            ("experience_count", profile.experiences.len().to_string().as_str()),
            ("top_skills", join_or(&top_skills, "N/A").as_str()),
            ("recent_role", recent_role.as_str()),
            ("education", education.as_str()),
            ("required_skills", join_or(&analysis.required_skills, "N/A").as_str()),
            ("keywords", join_or(&analysis.keywords, "N/A").as_str()),
            ("responsibilities", join_or(&analysis.key_responsibilities, "N/A").as_str()),
        ],
    )
}
