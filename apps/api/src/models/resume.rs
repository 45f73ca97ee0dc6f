use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Root entity. Owns all section rows below by foreign key; child rows are
/// removed only by cascade from their resume.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ExperienceRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub company_name: String,
    pub location: String,
    pub position: String,
    pub current: bool,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct EducationRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub location: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub name: String,
    pub level: Option<String>,
}

/// At most one per resume (UNIQUE constraint on resume_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ContactRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub location: String,
}

/// At most one per resume (UNIQUE constraint on resume_id).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SummaryRow {
    pub id: Uuid,
    pub resume_id: Uuid,
    pub text: String,
}
