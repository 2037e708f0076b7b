//! JD Analyzer: extracts title, skills, keywords and seniority from a raw job description.

use crate::generation::fill_template;
use crate::generation::prompts::{JD_ANALYSIS_SYSTEM, JD_ANALYSIS_TEMPLATE};
use crate::llm_client::{LlmError, StructuredClient};
use crate::models::resume::JDAnalysis;

pub async fn analyze_job_description(
    jd_text: &str,
    llm: &StructuredClient,
) -> Result<JDAnalysis, LlmError> {
    let prompt = fill_template(
        JD_ANALYSIS_TEMPLATE,
        &[
            ("jd_text", jd_text),
        ],
    );
    llm.generate_structured(JD_ANALYSIS_SYSTEM, &prompt).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::{test_client, ScriptedBackend};
    use crate::models::resume::ExperienceLevel;

    const ANALYSIS_REPLY: &str = r#"```json
{
  "jobTitle": "Platform Engineer",
  "company": "Globex",
  "requiredSkills": ["Go", "Terraform"],
  "preferredSkills": ["AWS"],
  "keywords": ["infrastructure as code"],
  "experienceLevel": "mid",
  "keyResponsibilities": ["Maintain CI/CD"],
  "educationRequirements": ["BS or equivalent"]
}
```"#;

    #[tokio::test(start_paused = true)]
    async fn test_analysis_parses_fenced_reply() {
        let backend = ScriptedBackend::new(vec![Ok(ANALYSIS_REPLY.to_string())]);
        let llm = test_client(backend.clone());

        let analysis = analyze_job_description("We need a platform engineer...", &llm)
            .await
            .unwrap();

        assert_eq!(analysis.job_title, "Platform Engineer");
        assert_eq!(analysis.company_name(), Some("Globex"));
        assert_eq!(analysis.experience_level, ExperienceLevel::Mid);
        assert!(backend.prompts()[0].contains("We need a platform engineer..."));
    }

    #[tokio::test(start_paused = true)]
    async fn test_analysis_without_job_title_is_a_parse_error() {
        let backend = ScriptedBackend::new(vec![Ok(r#"{"company": "Globex"}"#.to_string())]);
        let llm = test_client(backend);

        let err = analyze_job_description("jd", &llm).await.unwrap_err();
        assert!(matches!(err, LlmError::Parse { .. }));
    }
}
