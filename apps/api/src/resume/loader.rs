//! Resume Aggregate Loader — read-only composition of a resume and all of
//! its section rows for display and editing.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{
    ContactRow, EducationRow, ExperienceRow, ResumeRow, SkillRow, SummaryRow,
};

/// A resume with all of its dependent sections. Absent singletons render
/// as `null`, absent collections as empty arrays.
#[derive(Debug, Clone, Serialize)]
pub struct ResumeAggregate {
    #[serde(flatten)]
    pub resume: ResumeRow,
    pub contact: Option<ContactRow>,
    pub summary: Option<SummaryRow>,
    pub experiences: Vec<ExperienceRow>,
    pub educations: Vec<EducationRow>,
    pub skills: Vec<SkillRow>,
}

/// Loads a resume together with its sections, or `None` if no resume with
/// that id exists. Read-only; no side effects.
pub async fn load_aggregate(
    pool: &PgPool,
    resume_id: Uuid,
) -> Result<Option<ResumeAggregate>, AppError> {
    let resume: Option<ResumeRow> = sqlx::query_as("SELECT * FROM resumes WHERE id = $1")
        .bind(resume_id)
        .fetch_optional(pool)
        .await?;

    let Some(resume) = resume else {
        return Ok(None);
    };

    let contact: Option<ContactRow> =
        sqlx::query_as("SELECT * FROM contacts WHERE resume_id = $1")
            .bind(resume_id)
            .fetch_optional(pool)
            .await?;

    let summary: Option<SummaryRow> =
        sqlx::query_as("SELECT * FROM summaries WHERE resume_id = $1")
            .bind(resume_id)
            .fetch_optional(pool)
            .await?;

    let experiences: Vec<ExperienceRow> = sqlx::query_as(
        "SELECT * FROM experiences WHERE resume_id = $1 ORDER BY start_date DESC NULLS LAST, id",
    )
    .bind(resume_id)
    .fetch_all(pool)
    .await?;

    let educations: Vec<EducationRow> = sqlx::query_as(
        "SELECT * FROM educations WHERE resume_id = $1 ORDER BY start_date DESC NULLS LAST, id",
    )
    .bind(resume_id)
    .fetch_all(pool)
    .await?;

    let skills: Vec<SkillRow> =
        sqlx::query_as("SELECT * FROM skills WHERE resume_id = $1 ORDER BY name")
            .bind(resume_id)
            .fetch_all(pool)
            .await?;

    Ok(Some(ResumeAggregate {
        resume,
        contact,
        summary,
        experiences,
        educations,
        skills,
    }))
}
