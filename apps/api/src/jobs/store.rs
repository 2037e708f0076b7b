use anyhow::Context;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::db::PgStore;
use crate::errors::AppError;
use crate::jobs::patch::JobPatch;
use crate::models::resume::{ResumeJob, ResumeJobRow};

/// Persistence for resume jobs. The orchestrator is the only writer during a run.
#[async_trait]
pub trait JobStore: Send + Sync {
    async fn create_job(&self, job: &ResumeJob) -> Result<(), AppError>;

    async fn fetch_job(&self, job_id: Uuid) -> Result<Option<ResumeJob>, AppError>;

    /// Applies `patch` and returns the updated job, or `None` when no such job exists.
    async fn apply_patch(
        &self,
        job_id: Uuid,
        patch: JobPatch,
    ) -> Result<Option<ResumeJob>, AppError>;
}

fn to_json<T: Serialize>(value: Option<&T>) -> anyhow::Result<Option<Value>> {
    value
        .map(serde_json::to_value)
        .transpose()
        .context("Failed to serialize job column")
}

#[async_trait]
impl JobStore for PgStore {
    async fn create_job(&self, job: &ResumeJob) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO resume_jobs
                (id, user_id, job_description, status, current_step, progress, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(job.id)
        .bind(job.user_id)
        .bind(&job.job_description)
        .bind(job.status.as_str())
        .bind(&job.current_step)
        .bind(job.progress)
        .bind(job.created_at)
        .bind(job.updated_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn fetch_job(&self, job_id: Uuid) -> Result<Option<ResumeJob>, AppError> {
        let row: Option<ResumeJobRow> = sqlx::query_as("SELECT * FROM resume_jobs WHERE id = $1")
            .bind(job_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(ResumeJob::try_from).transpose()?)
    }

    async fn apply_patch(
        &self,
        job_id: Uuid,
        patch: JobPatch,
    ) -> Result<Option<ResumeJob>, AppError> {
        let columns = patch.into_columns();

        let row: Option<ResumeJobRow> = sqlx::query_as(
            r#"
            UPDATE resume_jobs SET
                status          = COALESCE($2, status),
                current_step    = COALESCE($3, current_step),
                progress        = COALESCE($4, progress),
                jd_analysis     = COALESCE($5, jd_analysis),
                sections        = COALESCE($6, sections),
                review_feedback = COALESCE($7, review_feedback),
                final_resume    = COALESCE($8, final_resume),
                error_message   = COALESCE($9, error_message),
                updated_at      = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(job_id)
        .bind(columns.status.map(|s| s.as_str()))
        .bind(columns.current_step)
        .bind(columns.progress)
        .bind(to_json(columns.jd_analysis.as_ref())?)
        .bind(to_json(columns.sections.as_ref())?)
        .bind(to_json(columns.review_feedback.as_ref())?)
        .bind(to_json(columns.final_resume.as_ref())?)
        .bind(columns.error_message)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(ResumeJob::try_from).transpose()?)
    }
}
