//! Typed job updates.
//!
//! Every write the pipeline makes to a job row is one `JobPatch`. `JobPatch::into_columns` is the
//! single place that decides which columns a patch touches; stores only ever see `PatchColumns`.

use chrono::Utc;

use crate::models::resume::{JDAnalysis, JobStatus, ResumeJob, ResumeSections, ReviewFeedback};

/// Progress points inside the `generating` status that carry no payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Checkpoint {
    SummaryStarted,
    SummaryDone,
    ExperiencesDone,
    ProjectsDone,
    EducationDone,
}

impl Checkpoint {
    pub fn progress(self) -> i32 {
        match self {
            Checkpoint::SummaryStarted => 20,
            Checkpoint::SummaryDone => 30,
            Checkpoint::ExperiencesDone => 45,
            Checkpoint::ProjectsDone => 55,
            Checkpoint::EducationDone => 65,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Checkpoint::SummaryStarted => "Generating professional summary...",
            Checkpoint::SummaryDone => "Summary generated, working on experience...",
            Checkpoint::ExperiencesDone => "Experience generated, working on projects...",
            Checkpoint::ProjectsDone => "Projects generated, working on education...",
            Checkpoint::EducationDone => "Education generated, organizing skills...",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobPatch {
    Started,
    AnalysisReady(JDAnalysis),
    Checkpoint(Checkpoint),
    SectionsReady(ResumeSections),
    ReviewStarted,
    ReviewReady(ReviewFeedback),
    /// Final sections are the generated sections as they stood at review time.
    Complete(ResumeSections),
    Failed(String),
    /// A user edit after generation. Replaces both the working and the final sections.
    FinalEdited(ResumeSections),
}

/// Column-level view of a patch. `None` leaves the column as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatchColumns {
    pub status: Option<JobStatus>,
    pub current_step: Option<String>,
    pub progress: Option<i32>,
    pub jd_analysis: Option<JDAnalysis>,
    pub sections: Option<ResumeSections>,
    pub review_feedback: Option<ReviewFeedback>,
    pub final_resume: Option<ResumeSections>,
    pub error_message: Option<String>,
}

impl PatchColumns {
    fn step(status: JobStatus, progress: i32, label: &str) -> Self {
        Self {
            status: Some(status),
            current_step: Some(label.to_string()),
            progress: Some(progress),
            ..Default::default()
        }
    }

    /// Applies the columns to an in-memory job, bumping `updated_at`.
    pub fn apply(self, job: &mut ResumeJob) {
        if let Some(status) = self.status {
            job.status = status;
        }
        if let Some(step) = self.current_step {
            job.current_step = step;
        }
        if let Some(progress) = self.progress {
            job.progress = progress;
        }
        if let Some(analysis) = self.jd_analysis {
            job.jd_analysis = Some(analysis);
        }
        if let Some(sections) = self.sections {
            job.sections = Some(sections);
        }
        if let Some(review) = self.review_feedback {
            job.review_feedback = Some(review);
        }
        if let Some(final_resume) = self.final_resume {
            job.final_resume = Some(final_resume);
        }
        if let Some(message) = self.error_message {
            job.error_message = Some(message);
        }
        job.updated_at = Utc::now();
    }
}

impl JobPatch {
    pub fn into_columns(self) -> PatchColumns {
        match self {
            JobPatch::Started => PatchColumns::step(
                JobStatus::AnalyzingJd,
                5,
                "Analyzing job description...",
            ),
            JobPatch::AnalysisReady(analysis) => PatchColumns {
                jd_analysis: Some(analysis),
                ..PatchColumns::step(JobStatus::AnalyzingJd, 10, "Job analysis complete")
            },
            JobPatch::Checkpoint(checkpoint) => PatchColumns::step(
                JobStatus::Generating,
                checkpoint.progress(),
                checkpoint.label(),
            ),
            JobPatch::SectionsReady(sections) => PatchColumns {
                sections: Some(sections),
                ..PatchColumns::step(JobStatus::Generating, 70, "All sections generated")
            },
            JobPatch::ReviewStarted => {
                PatchColumns::step(JobStatus::Reviewing, 75, "Reviewing resume...")
            }
            JobPatch::ReviewReady(review) => PatchColumns {
                review_feedback: Some(review),
                ..PatchColumns::step(JobStatus::Reviewing, 90, "Review complete")
            },
            JobPatch::Complete(sections) => PatchColumns {
                final_resume: Some(sections),
                ..PatchColumns::step(JobStatus::Complete, 100, "Resume generation complete!")
            },
            JobPatch::Failed(message) => PatchColumns {
                error_message: Some(message),
                ..PatchColumns::step(JobStatus::Failed, 0, "Generation failed")
            },
            JobPatch::FinalEdited(sections) => PatchColumns {
                sections: Some(sections.clone()),
                final_resume: Some(sections),
                ..Default::default()
            },
        }
    }
}
