use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

// ────────────────────────────────────────────────────────────────────────────
// Job description analysis
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExperienceLevel {
    Entry,
    #[default]
    Mid,
    Senior,
    Lead,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Entry => "entry",
            ExperienceLevel::Mid => "mid",
            ExperienceLevel::Senior => "senior",
            ExperienceLevel::Lead => "lead",
        }
    }
}

/// Structured extraction from a job description. Created once per job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JDAnalysis {
    pub job_title: String,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub preferred_skills: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
    #[serde(default)]
    pub experience_level: ExperienceLevel,
    #[serde(default)]
    pub key_responsibilities: Vec<String>,
    #[serde(default)]
    pub education_requirements: Vec<String>,
}

impl JDAnalysis {
    /// The company name, treating the model's empty-string placeholder as absent.
    pub fn company_name(&self) -> Option<&str> {
        self.company
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Generated resume sections
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSummary {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedExperience {
    pub id: String,
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProject {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedEducation {
    pub id: String,
    pub school: String,
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub gpa: Option<String>,
    #[serde(default)]
    pub coursework: String,
    #[serde(default)]
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedSkills {
    #[serde(default)]
    pub categories: Vec<SkillCategory>,
}

/// The full generated resume. Each generation stage contributes one field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeSections {
    pub summary: GeneratedSummary,
    pub experiences: Vec<GeneratedExperience>,
    pub projects: Vec<GeneratedProject>,
    pub education: Vec<GeneratedEducation>,
    pub skills: GeneratedSkills,
}

// ────────────────────────────────────────────────────────────────────────────
// Review
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HrPerspective {
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ManagerPerspective {
    pub technical_accuracy: Vec<String>,
    pub missing_skills: Vec<String>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordCoverage {
    pub found: Vec<String>,
    pub missing: Vec<String>,
    pub percentage: f64,
}

/// Dual-perspective (HR + hiring manager) review of an assembled resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFeedback {
    pub ats_score: u32,
    pub overall_score: u32,
    #[serde(default)]
    pub hr_perspective: HrPerspective,
    #[serde(default)]
    pub manager_perspective: ManagerPerspective,
    #[serde(default)]
    pub critical_issues: Vec<String>,
    #[serde(default)]
    pub keyword_coverage: KeywordCoverage,
    #[serde(default)]
    pub ready_for_submission: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Job record
// ────────────────────────────────────────────────────────────────────────────

/// Lifecycle of a generation run.
///
/// `Revising` is accepted when reading rows but no transition produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    Pending,
    AnalyzingJd,
    Generating,
    Reviewing,
    Revising,
    Complete,
    Failed,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::AnalyzingJd => "analyzing_jd",
            JobStatus::Generating => "generating",
            JobStatus::Reviewing => "reviewing",
            JobStatus::Revising => "revising",
            JobStatus::Complete => "complete",
            JobStatus::Failed => "failed",
        }
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JobStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(JobStatus::Pending),
            "analyzing_jd" => Ok(JobStatus::AnalyzingJd),
            "generating" => Ok(JobStatus::Generating),
            "reviewing" => Ok(JobStatus::Reviewing),
            "revising" => Ok(JobStatus::Revising),
            "complete" => Ok(JobStatus::Complete),
            "failed" => Ok(JobStatus::Failed),
            other => Err(anyhow::anyhow!("unknown job status '{other}'")),
        }
    }
}

/// One generation run. The job id is the only handle clients poll with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeJob {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_description: String,
    pub jd_analysis: Option<JDAnalysis>,
    pub status: JobStatus,
    pub current_step: String,
    pub progress: i32,
    pub sections: Option<ResumeSections>,
    pub review_feedback: Option<ReviewFeedback>,
    pub final_resume: Option<ResumeSections>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeJob {
    pub const INITIAL_STEP: &'static str = "Initializing...";

    /// A freshly submitted job, before the orchestrator touches it.
    pub fn new(user_id: Uuid, job_description: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            job_description,
            jd_analysis: None,
            status: JobStatus::Pending,
            current_step: Self::INITIAL_STEP.to_string(),
            progress: 0,
            sections: None,
            review_feedback: None,
            final_resume: None,
            error_message: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeJobRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub job_description: String,
    pub jd_analysis: Option<Value>,
    pub status: String,
    pub current_step: String,
    pub progress: i32,
    pub sections: Option<Value>,
    pub review_feedback: Option<Value>,
    pub final_resume: Option<Value>,
    pub error_message: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<ResumeJobRow> for ResumeJob {
    type Error = anyhow::Error;

    fn try_from(row: ResumeJobRow) -> Result<Self, Self::Error> {
        Ok(ResumeJob {
            id: row.id,
            user_id: row.user_id,
            job_description: row.job_description,
            jd_analysis: row.jd_analysis.map(serde_json::from_value).transpose()?,
            status: row.status.parse()?,
            current_step: row.current_step,
            progress: row.progress,
            sections: row.sections.map(serde_json::from_value).transpose()?,
            review_feedback: row.review_feedback.map(serde_json::from_value).transpose()?,
            final_resume: row.final_resume.map(serde_json::from_value).transpose()?,
            error_message: row.error_message,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
