//! Education section: every entry formatted in a single model call.

use serde::Deserialize;

use crate::generation::{fill_template, join_or};
use crate::generation::prompts::{EDUCATION_SYSTEM, EDUCATION_TEMPLATE};
use crate::llm_client::{LlmError, StructuredClient};
use crate::models::profile::Education;
use crate::models::resume::{GeneratedEducation, JDAnalysis};

const MISSING_COURSEWORK: &str =
    "None provided - generate relevant coursework based on degree and JD keywords";

#[derive(Debug, Deserialize)]
struct EducationReply {
    #[serde(default)]
    education: Vec<GeneratedEducation>,
}

pub async fn generate_education(
    education: &[Education],
    analysis: &JDAnalysis,
    llm: &StructuredClient,
) -> Result<Vec<GeneratedEducation>, LlmError> {
    let prompt = build_education_prompt(education, analysis);
    let reply: EducationReply = llm.generate_structured(EDUCATION_SYSTEM, &prompt).await?;
    Ok(reply.education)
}

fn format_entry(edu: &Education) -> String {
    let coursework = edu
        .coursework
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(MISSING_COURSEWORK);

    format!(
        "- ID: {}\n  School: {}\n  Degree: {} in {}\n  Duration: {} - {}\n  GPA: {}\n  Coursework: {}\n  Existing Highlights: {}",
        edu.id,
        edu.school,
        edu.degree,
        edu.field,
        edu.start_date,
        edu.end_date,
        edu.gpa.as_deref().unwrap_or("Not provided"),
        coursework,
        join_or(&edu.highlights, "None"),
    )
}

fn build_education_prompt(education: &[Education], analysis: &JDAnalysis) -> String {
    let entries = education
        .iter()
        .map(format_entry)
        .collect::<Vec<_>>()
        .join("\n\n");

    fill_template(
        EDUCATION_TEMPLATE,
        &[
            ("experience_level", analysis.experience_level.as_str()),
            ("job_title", analysis.job_title.as_str()),
            ("entries", entries.as_str()),
            ("required_skills", join_or(&analysis.required_skills, "N/A").as_str()),
            ("education_requirements", join_or(&analysis.education_requirements, "N/A").as_str()),
            ("keywords", join_or(&analysis.keywords, "N/A").as_str()),
        ],
    )
}
