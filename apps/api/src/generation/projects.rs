//! Project entries: one model call per project, run concurrently.

use futures::future::try_join_all;

use crate::generation::{fill_template, join_or};
use crate::generation::prompts::{PROJECT_SYSTEM, PROJECT_TEMPLATE};
use crate::llm_client::{LlmError, StructuredClient};
use crate::models::profile::Project;
use crate::models::resume::{GeneratedProject, JDAnalysis};

pub async fn generate_project(
    project: &Project,
    analysis: &JDAnalysis,
    llm: &StructuredClient,
) -> Result<GeneratedProject, LlmError> {
    let prompt = build_project_prompt(project, analysis);
    llm.generate_structured(PROJECT_SYSTEM, &prompt).await
}

/// Output order matches `projects`.
pub async fn generate_all_projects(
    projects: &[Project],
    analysis: &JDAnalysis,
    llm: &StructuredClient,
) -> Result<Vec<GeneratedProject>, LlmError> {
    try_join_all(
        projects
            .iter()
            .map(|project| generate_project(project, analysis, llm)),
    )
    .await
}

fn build_project_prompt(project: &Project, analysis: &JDAnalysis) -> String {
    let documentation = if project.documentation.trim().is_empty() {
        "No additional documentation provided."
    } else {
        project.documentation.as_str()
    };

    let highlights = if project.highlights.is_empty() {
        "No existing highlights.".to_string()
    } else {
        project.highlights.join("\n")
    };

    fill_template(
        PROJECT_TEMPLATE,
        &[
            ("id", project.id.as_str()),
            ("name", project.name.as_str()),
            ("description", project.description.as_str()),
            ("technologies", join_or(&project.technologies, "N/A").as_str()),
            ("link", project.link.as_deref().unwrap_or("N/A")),
            ("documentation", documentation),
            ("highlights", highlights.as_str()),
            ("job_title", analysis.job_title.as_str()),
            ("required_skills", join_or(&analysis.required_skills, "N/A").as_str()),
            ("preferred_skills", join_or(&analysis.preferred_skills, "N/A").as_str()),
            ("keywords", join_or(&analysis.keywords, "N/A").as_str()),
            ("responsibilities", join_or(&analysis.key_responsibilities, "N/A").as_str()),
        ],
    )
}
