//! Dual-perspective review of the assembled resume.

use crate::generation::prompts::{REVIEW_SYSTEM, REVIEW_TEMPLATE};
use crate::generation::{company_clause, fill_template, join_or};
use crate::llm_client::{LlmError, StructuredClient};
use crate::models::resume::{JDAnalysis, ResumeSections, ReviewFeedback};

pub async fn review_resume(
    sections: &ResumeSections,
    analysis: &JDAnalysis,
    llm: &StructuredClient,
) -> Result<ReviewFeedback, LlmError> {
    let prompt = fill_template(
        REVIEW_TEMPLATE,
        &[
            ("job_title", analysis.job_title.as_str()),
            ("company_clause", company_clause(analysis).as_str()),
            ("resume_text", format_resume_for_review(sections).as_str()),
            ("required_skills", join_or(&analysis.required_skills, "N/A").as_str()),
            ("preferred_skills", join_or(&analysis.preferred_skills, "N/A").as_str()),
            ("keywords", join_or(&analysis.keywords, "N/A").as_str()),
            ("responsibilities", join_or(&analysis.key_responsibilities, "N/A").as_str()),
        ],
    );

    llm.generate_structured(REVIEW_SYSTEM, &prompt).await
}

/// Plain-text rendering: summary, experience, projects, education, skills.
pub fn format_resume_for_review(sections: &ResumeSections) -> String {
    let mut out = String::new();

    out.push_str(&format!("SUMMARY:\n{}\n\n", sections.summary.content));

    out.push_str("EXPERIENCE:\n");
    for exp in &sections.experiences {
        out.push_str(&format!(
            "{} at {} ({} - {})\n",
            exp.title,
            exp.company,
            exp.start_date,
            exp.end_date,
        ));
        for bullet in &exp.bullets {
            out.push_str(&format!("• {bullet}\n"));
        }
        out.push('\n');
    }

    out.push_str("PROJECTS:\n");
    for project in &sections.projects {
        out.push_str(&format!("{}: {}\n", project.name, project.description));
        if !project.technologies.is_empty() {
            out.push_str(&format!("Technologies: {}\n", project.technologies.join(", ")));
        }
        for bullet in &project.bullets {
            out.push_str(&format!("• {bullet}\n"));
        }
        out.push('\n');
    }

    out.push_str("EDUCATION:\n");
    for edu in &sections.education {
        out.push_str(&format!(
            "{} in {} - {} ({} - {})\n",
            edu.degree,
            edu.field,
            edu.school,
            edu.start_date,
            edu.end_date,
        ));
        if let Some(gpa) = &edu.gpa {
            out.push_str(&format!("GPA: {gpa}\n"));
        }
        if !edu.coursework.is_empty() {
            out.push_str(&format!("Coursework: {}\n", edu.coursework));
        }
        for highlight in &edu.highlights {
            out.push_str(&format!("• {highlight}\n"));
        }
        out.push('\n');
    }

    out.push_str("SKILLS:\n");
    for category in &sections.skills.categories {
        out.push_str(&format!("{}: {}\n", category.name, category.skills.join(", ")));
    }

    out
}
