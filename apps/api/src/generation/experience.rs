//! Experience bullets: one model call per role, all roles in flight at once.

use futures::future::try_join_all;

use crate::generation::{fill_template, join_or};
use crate::generation::prompts::{EXPERIENCE_SYSTEM, EXPERIENCE_TEMPLATE};
use crate::llm_client::{LlmError, StructuredClient};
use crate::models::profile::Experience;
use crate::models::resume::{GeneratedExperience, JDAnalysis};

pub async fn generate_experience(
    experience: &Experience,
    analysis: &JDAnalysis,
    llm: &StructuredClient,
) -> Result<GeneratedExperience, LlmError> {
    let prompt = build_experience_prompt(experience, analysis);
    llm.generate_structured(EXPERIENCE_SYSTEM, &prompt).await
}

/// Generates every role concurrently. Output order matches `experiences`; any failure fails all.
pub async fn generate_all_experiences(
    experiences: &[Experience],
    analysis: &JDAnalysis,
    llm: &StructuredClient,
) -> Result<Vec<GeneratedExperience>, LlmError> {
    try_join_all(
        experiences
            .iter()
            .map(|experience| generate_experience(experience, analysis, llm)),
    )
    .await
}

fn build_experience_prompt(experience: &Experience, analysis: &JDAnalysis) -> String {
    let end_date = if experience.current {
        "Present"
    } else {
        experience.end_date.as_str()
    };

    let documentation = if experience.documentation.trim().is_empty() {
        "No additional documentation provided."
    } else {
        experience.documentation.as_str()
    };

    let existing_bullets = if experience.bullets.is_empty() {
        "No existing bullets.".to_string()
    } else {
        experience.bullets.join("\n")
    };

    fill_template(
        EXPERIENCE_TEMPLATE,
        &[
            ("id", experience.id.as_str()),
            ("company", experience.company.as_str()),
            ("title", experience.title.as_str()),
            ("location", experience.location.as_str()),
            ("start_date", experience.start_date.as_str()),
            ("end_date", end_date),
            ("documentation", documentation),
            ("existing_bullets", existing_bullets.as_str()),
            ("job_title", analysis.job_title.as_str()),
            ("experience_level", analysis.experience_level.as_str()),
            ("required_skills", join_or(&analysis.required_skills, "N/A").as_str()),
            ("preferred_skills", join_or(&analysis.preferred_skills, "N/A").as_str()),
            ("keywords", join_or(&analysis.keywords, "N/A").as_str()),
            ("responsibilities", join_or(&analysis.key_responsibilities, "N/A").as_str()),
        ],
    )
}
