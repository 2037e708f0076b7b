//! Runs one resume job end to end.
//!
//! Stages run strictly in order and every stage's output is persisted before the next starts,
//! so a polling client always sees the furthest point reached. The first error ends the run:
//! the job moves to `failed` and nothing downstream executes. Earlier results stay on the row.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::education::generate_education;
use crate::generation::experience::generate_all_experiences;
use crate::generation::jd_analyzer::analyze_job_description;
use crate::generation::projects::generate_all_projects;
use crate::generation::reviewer::review_resume;
use crate::generation::skills::organize_skills;
use crate::generation::summary::generate_summary;
use crate::jobs::patch::{Checkpoint, JobPatch};
use crate::jobs::store::JobStore;
use crate::llm_client::StructuredClient;
use crate::models::resume::{ResumeJob, ResumeSections};
use crate::profile::store::ProfileStore;

/// Shortest job description accepted, counted in characters after trimming.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;

const DEFAULT_STAGE_DELAY: Duration = Duration::from_secs(3);

/// Pause between consecutive generation stages.
#[derive(Debug, Clone, Copy)]
pub struct StagePacing {
    delay: Duration,
}

impl StagePacing {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

impl Default for StagePacing {
    fn default() -> Self {
        Self::new(DEFAULT_STAGE_DELAY)
    }
}

#[derive(Clone)]
pub struct Orchestrator {
    jobs: Arc<dyn JobStore>,
    profiles: Arc<dyn ProfileStore>,
    llm: StructuredClient,
    pacing: StagePacing,
}

impl Orchestrator {
    pub fn new(
        jobs: Arc<dyn JobStore>,
        profiles: Arc<dyn ProfileStore>,
        llm: StructuredClient,
        pacing: StagePacing,
    ) -> Self {
        Self {
            jobs,
            profiles,
            llm,
            pacing,
        }
    }

    /// Validates and records a new job, then runs it to a terminal state before returning its id.
    ///
    /// The run is spawned onto its own task, so it still reaches a terminal state when the caller
    /// stops waiting. Only validation and job creation can fail here; pipeline errors end up on
    /// the job row.
    pub async fn submit_job(&self, user_id: Uuid, job_description: &str) -> Result<Uuid, AppError> {
        if job_description.trim().chars().count() < MIN_JOB_DESCRIPTION_CHARS {
            return Err(AppError::Validation(format!(
                "Job description must be at least {MIN_JOB_DESCRIPTION_CHARS} characters"
            )));
        }

        let job = ResumeJob::new(user_id, job_description.to_string());
        self.jobs.create_job(&job).await?;
        info!("Resume job {} created for user {}", job.id, user_id);

        let orchestrator = self.clone();
        let job_id = job.id;
        tokio::spawn(async move { orchestrator.run(&job).await })
            .await
            .map_err(|e| anyhow::anyhow!("Resume job {job_id} task failed: {e}"))?;
        Ok(job_id)
    }

    /// Drives `job` to `complete` or `failed`. Never returns an error.
    pub async fn run(&self, job: &ResumeJob) {
        match self.generate(job).await {
            Ok(()) => info!("Resume job {} complete", job.id),
            Err(e) => {
                error!("Resume job {} failed: {e}", job.id);
                if let Err(persist) = self.advance(job.id, JobPatch::Failed(e.to_string())).await {
                    error!("Could not record failure for resume job {}: {persist}", job.id);
                }
            }
        }
    }

    pub async fn get_job(&self, job_id: Uuid) -> Result<ResumeJob, AppError> {
        self.jobs
            .fetch_job(job_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
    }

    /// Replaces the job's sections and final resume with a user-edited version.
    pub async fn update_final_resume(
        &self,
        job_id: Uuid,
        sections: Option<ResumeSections>,
    ) -> Result<ResumeJob, AppError> {
        let sections =
            sections.ok_or_else(|| AppError::Validation("Sections are required".to_string()))?;
        let job = self.advance(job_id, JobPatch::FinalEdited(sections)).await?;
        info!("Final resume for job {job_id} updated");
        Ok(job)
    }

    async fn generate(&self, job: &ResumeJob) -> Result<(), AppError> {
        let llm = &self.llm;

        self.advance(job.id, JobPatch::Started).await?;
        let analysis = analyze_job_description(&job.job_description, llm).await?;
        self.advance(job.id, JobPatch::AnalysisReady(analysis.clone()))
            .await?;

        let profile = self
            .profiles
            .fetch_profile(job.user_id)
            .await?
            .ok_or_else(|| AppError::UpstreamMissing("Failed to fetch user profile".to_string()))?;

        self.checkpoint(job.id, Checkpoint::SummaryStarted).await?;
        let summary = generate_summary(&profile, &analysis, llm).await?;
        self.checkpoint(job.id, Checkpoint::SummaryDone).await?;
        self.pacing.pause().await;

        let experiences = generate_all_experiences(&profile.experiences, &analysis, llm).await?;
        self.checkpoint(job.id, Checkpoint::ExperiencesDone).await?;
        self.pacing.pause().await;

        let projects = generate_all_projects(&profile.projects, &analysis, llm).await?;
        self.checkpoint(job.id, Checkpoint::ProjectsDone).await?;
        self.pacing.pause().await;

        let education = generate_education(&profile.education, &analysis, llm).await?;
        self.checkpoint(job.id, Checkpoint::EducationDone).await?;
        self.pacing.pause().await;

        let skills = organize_skills(&profile, &analysis, llm).await?;
        let sections = ResumeSections {
            summary,
            experiences,
            projects,
            education,
            skills,
        };
        self.advance(job.id, JobPatch::SectionsReady(sections.clone()))
            .await?;
        self.pacing.pause().await;

        self.advance(job.id, JobPatch::ReviewStarted).await?;
        let review = review_resume(&sections, &analysis, llm).await?;
        self.advance(job.id, JobPatch::ReviewReady(review)).await?;

        self.advance(job.id, JobPatch::Complete(sections)).await?;
        Ok(())
    }

    async fn checkpoint(&self, job_id: Uuid, checkpoint: Checkpoint) -> Result<(), AppError> {
        self.advance(job_id, JobPatch::Checkpoint(checkpoint))
            .await
            .map(|_| ())
    }

    async fn advance(&self, job_id: Uuid, patch: JobPatch) -> Result<ResumeJob, AppError> {
        let job = self
            .jobs
            .apply_patch(job_id, patch)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))?;
        info!(
            job_id = %job.id,
            status = %job.status,
            progress = job.progress,
            "{}",
            job.current_step
        );
        Ok(job)
    }
}
