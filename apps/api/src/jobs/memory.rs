//! In-memory stores for orchestrator and router tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::patch::JobPatch;
use crate::jobs::store::JobStore;
use crate::models::profile::Profile;
use crate::models::resume::{JobStatus, ResumeJob};
use crate::profile::store::ProfileStore;

#[derive(Default)]
pub struct MemoryJobStore {
    jobs: Mutex<HashMap<Uuid, ResumeJob>>,
    /// (status, progress, step) after every successful patch, in order.
    history: Mutex<Vec<(JobStatus, i32, String)>>,
}

impl MemoryJobStore {
    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    pub fn history(&self) -> Vec<(JobStatus, i32, String)> {
        self.history.lock().unwrap().clone()
    }

    pub fn insert(&self, job: ResumeJob) {
        self.jobs.lock().unwrap().insert(job.id, job);
    }
}

#[async_trait]
impl JobStore for MemoryJobStore {
    async fn create_job(&self, job: &ResumeJob) -> Result<(), AppError> {
        self.insert(job.clone());
        Ok(())
    }

    async fn fetch_job(&self, job_id: Uuid) -> Result<Option<ResumeJob>, AppError> {
        Ok(self.jobs.lock().unwrap().get(&job_id).cloned())
    }

    async fn apply_patch(
        &self,
        job_id: Uuid,
        patch: JobPatch,
    ) -> Result<Option<ResumeJob>, AppError> {
        let mut jobs = self.jobs.lock().unwrap();
        let Some(job) = jobs.get_mut(&job_id) else {
            return Ok(None);
        };
        patch.into_columns().apply(job);
        self.history.lock().unwrap().push((
            job.status,
            job.progress,
            job.current_step.clone(),
        ));
        Ok(Some(job.clone()))
    }
}

#[derive(Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<Uuid, Profile>>,
}

impl MemoryProfileStore {
    pub fn with(profile: Profile) -> Self {
        let store = Self::default();
        store
            .profiles
            .lock()
            .unwrap()
            .insert(profile.user_id, profile);
        store
    }
}

#[async_trait]
impl ProfileStore for MemoryProfileStore {
    async fn fetch_profile(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
    }

    async fn upsert_profile(&self, profile: &Profile) -> Result<Profile, AppError> {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id, profile.clone());
        Ok(profile.clone())
    }
}
