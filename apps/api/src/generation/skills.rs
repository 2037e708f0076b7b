//! Skills section: categorizes and prioritizes the profile's skill list.

use crate::generation::{fill_template, join_or};
use crate::generation::prompts::{SKILLS_SYSTEM, SKILLS_TEMPLATE};
use crate::llm_client::{LlmError, StructuredClient};
use crate::models::profile::Profile;
use crate::models::resume::{GeneratedSkills, JDAnalysis};

/// Experience notes are cut to this many characters.
const EXPERIENCE_NOTES_LIMIT: usize = 500;

pub async fn organize_skills(
    profile: &Profile,
    analysis: &JDAnalysis,
    llm: &StructuredClient,
) -> Result<GeneratedSkills, LlmError> {
    let prompt = build_skills_prompt(profile, analysis);
    llm.generate_structured(SKILLS_SYSTEM, &prompt).await
}

fn experience_notes(profile: &Profile) -> String {
    let notes = profile
        .experiences
        .iter()
        .map(|exp| exp.documentation.trim())
        .filter(|doc| !doc.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    if notes.is_empty() {
        return "None".to_string();
    }
    notes.chars().take(EXPERIENCE_NOTES_LIMIT).collect()
}

fn build_skills_prompt(profile: &Profile, analysis: &JDAnalysis) -> String {
    fill_template(
        SKILLS_TEMPLATE,
        &[
            ("job_title", analysis.job_title.as_str()),
            ("skills", join_or(&profile.skills, "None listed").as_str()),
            ("experience_notes", experience_notes(profile).as_str()),
            ("required_skills", join_or(&analysis.required_skills, "N/A").as_str()),
            ("preferred_skills", join_or(&analysis.preferred_skills, "N/A").as_str()),
            ("keywords", join_or(&analysis.keywords, "N/A").as_str()),
        ],
    )
}
