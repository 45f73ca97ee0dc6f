//! Section drafts — the payloads a save operation carries.
//!
//! A draft with an `id` targets an existing row (update path); a draft
//! without one is a fresh insert and the gateway assigns the id. Every
//! draft is validated before any write is attempted, in both remote and
//! local mode.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

/// The dependent child types of a resume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Contact,
    Summary,
    Experience,
    Education,
    Skill,
}

impl SectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SectionKind::Contact => "contact",
            SectionKind::Summary => "summary",
            SectionKind::Experience => "experience",
            SectionKind::Education => "education",
            SectionKind::Skill => "skill",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceDraft {
    pub id: Option<Uuid>,
    pub resume_id: Uuid,
    pub company_name: String,
    pub location: String,
    pub position: String,
    #[serde(default)]
    pub current: bool,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ExperienceDraft {
    pub fn validate(&self) -> Result<(), AppError> {
        require("company_name", &self.company_name)?;
        require("position", &self.position)?;
        require("location", &self.location)?;
        require("description", &self.description)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EducationDraft {
    pub id: Option<Uuid>,
    pub resume_id: Uuid,
    pub school: String,
    pub degree: String,
    pub field_of_study: String,
    pub location: String,
    pub description: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl EducationDraft {
    pub fn validate(&self) -> Result<(), AppError> {
        require("school", &self.school)?;
        require("degree", &self.degree)?;
        require("field_of_study", &self.field_of_study)?;
        require("location", &self.location)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillDraft {
    pub id: Option<Uuid>,
    pub resume_id: Uuid,
    pub name: String,
    pub level: Option<String>,
}

impl SkillDraft {
    pub fn validate(&self) -> Result<(), AppError> {
        require("name", &self.name)
    }
}

/// Contact carries an optional `resume_id` because its save contract is
/// asymmetric: a draft with an `id` must also name the resume it edits
/// (targeted update), while an id-less draft is an insert-or-update for
/// the resume being edited. See `gateway::contact_write_plan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactDraft {
    pub id: Option<Uuid>,
    pub resume_id: Option<Uuid>,
    pub full_name: String,
    pub phone: String,
    pub email: String,
    pub location: String,
}

impl ContactDraft {
    pub fn validate(&self) -> Result<(), AppError> {
        require("full_name", &self.full_name)?;
        require("email", &self.email)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryDraft {
    pub id: Option<Uuid>,
    pub resume_id: Uuid,
    pub text: String,
}

impl SummaryDraft {
    pub fn validate(&self) -> Result<(), AppError> {
        require("text", &self.text)
    }
}

/// One section's worth of records for a single save operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "section", content = "records", rename_all = "snake_case")]
pub enum SectionRecords {
    Experiences(Vec<ExperienceDraft>),
    Educations(Vec<EducationDraft>),
    Skills(Vec<SkillDraft>),
    Contact(ContactDraft),
    Summary(SummaryDraft),
}

impl SectionRecords {
    pub fn kind(&self) -> SectionKind {
        match self {
            SectionRecords::Experiences(_) => SectionKind::Experience,
            SectionRecords::Educations(_) => SectionKind::Education,
            SectionRecords::Skills(_) => SectionKind::Skill,
            SectionRecords::Contact(_) => SectionKind::Contact,
            SectionRecords::Summary(_) => SectionKind::Summary,
        }
    }

    /// Validates every draft in the batch before any write is attempted.
    pub fn validate(&self) -> Result<(), AppError> {
        match self {
            SectionRecords::Experiences(drafts) => drafts.iter().try_for_each(|d| d.validate()),
            SectionRecords::Educations(drafts) => drafts.iter().try_for_each(|d| d.validate()),
            SectionRecords::Skills(drafts) => drafts.iter().try_for_each(|d| d.validate()),
            SectionRecords::Contact(draft) => draft.validate(),
            SectionRecords::Summary(draft) => draft.validate(),
        }
    }
}

fn require(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn experience(company: &str) -> ExperienceDraft {
        ExperienceDraft {
            id: None,
            resume_id: Uuid::new_v4(),
            company_name: company.to_string(),
            location: "Berlin".to_string(),
            position: "Engineer".to_string(),
            current: true,
            description: "Built things".to_string(),
            start_date: None,
            end_date: None,
        }
    }

    #[test]
    fn test_complete_experience_passes_validation() {
        assert!(experience("Acme").validate().is_ok());
    }

    #[test]
    fn test_blank_company_name_fails_validation() {
        let err = experience("   ").validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("company_name")));
    }

    #[test]
    fn test_batch_validation_stops_before_any_write() {
        let records =
            SectionRecords::Experiences(vec![experience("Acme"), experience("")]);
        assert!(records.validate().is_err());
    }

    #[test]
    fn test_contact_requires_full_name_and_email() {
        let draft = ContactDraft {
            id: None,
            resume_id: Some(Uuid::new_v4()),
            full_name: "Ada Lovelace".to_string(),
            phone: String::new(),
            email: "".to_string(),
            location: String::new(),
        };
        let err = draft.validate().unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("email")));
    }

    #[test]
    fn test_section_records_report_their_kind() {
        let records = SectionRecords::Skills(vec![]);
        assert_eq!(records.kind(), SectionKind::Skill);
        assert_eq!(records.kind().as_str(), "skill");
    }
}
