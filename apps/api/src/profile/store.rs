use anyhow::Context;
use async_trait::async_trait;
use uuid::Uuid;

use crate::db::PgStore;
use crate::errors::AppError;
use crate::models::profile::{Profile, ProfileRow};

/// One profile per user.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;

    async fn upsert_profile(&self, profile: &Profile) -> Result<Profile, AppError>;
}

fn decode(row: ProfileRow) -> Result<Profile, AppError> {
    let user_id = row.user_id;
    Ok(Profile::try_from(row)
        .with_context(|| format!("Stored profile for user {user_id} is malformed"))?)
}

#[async_trait]
impl ProfileStore for PgStore {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        let row: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE user_id = $1")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(decode).transpose()
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        let basic_info = serde_json::to_value(&profile.basic_info).context("basic_info")?;
        let education = serde_json::to_value(&profile.education).context("education")?;
        let experiences = serde_json::to_value(&profile.experiences).context("experiences")?;
        let projects = serde_json::to_value(&profile.projects).context("projects")?;

        let row: ProfileRow = sqlx::query_as(
            r#"
            INSERT INTO profiles
                (id, user_id, basic_info, education, experiences, projects, skills)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (user_id) DO UPDATE SET
                basic_info  = EXCLUDED.basic_info,
                education   = EXCLUDED.education,
                experiences = EXCLUDED.experiences,
                projects    = EXCLUDED.projects,
                skills      = EXCLUDED.skills,
                updated_at  = NOW()
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(profile.user_id)
        .bind(basic_info)
        .bind(education)
        .bind(experiences)
        .bind(projects)
        .bind(&profile.skills)
        .fetch_one(&self.pool)
        .await?;

        decode(row)
    }
}
