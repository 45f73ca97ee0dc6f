//! Persistence Gateway — batched insert-or-update writes for resume
//! sections.
//!
//! Experience, Education and Skill batches are written as a single
//! `INSERT .. ON CONFLICT (id) DO UPDATE` statement: rows whose id already
//! exists are overwritten column-by-column, rows with fresh ids are
//! inserted, and the statement either applies as a whole or not at all.
//! The id column is never part of the update set.
//!
//! Contact and Summary are singletons per resume, so their conflict key is
//! the resume id rather than the record id.

use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::sections::{
    ContactDraft, EducationDraft, ExperienceDraft, SkillDraft, SummaryDraft,
};

const FK_VIOLATION: &str = "23503";

/// Maps a foreign-key violation (a child row naming a resume that does not
/// exist) to a referential error; everything else propagates unmodified.
fn map_write_error(e: sqlx::Error) -> AppError {
    let is_fk = e
        .as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == FK_VIOLATION)
        .unwrap_or(false);
    if is_fk {
        AppError::ReferentialIntegrity("record references a resume that does not exist".to_string())
    } else {
        AppError::Database(e)
    }
}

pub async fn save_experiences(
    pool: &PgPool,
    drafts: Vec<ExperienceDraft>,
) -> Result<(), AppError> {
    if drafts.is_empty() {
        return Ok(());
    }
    for draft in &drafts {
        draft.validate()?;
    }

    debug!("Upserting {} experience record(s)", drafts.len());

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO experiences \
         (id, resume_id, company_name, location, position, current, description, start_date, end_date) ",
    );
    qb.push_values(drafts, |mut b, d| {
        b.push_bind(d.id.unwrap_or_else(Uuid::new_v4))
            .push_bind(d.resume_id)
            .push_bind(d.company_name)
            .push_bind(d.location)
            .push_bind(d.position)
            .push_bind(d.current)
            .push_bind(d.description)
            .push_bind(d.start_date)
            .push_bind(d.end_date);
    });
    qb.push(
        " ON CONFLICT (id) DO UPDATE SET \
         resume_id = EXCLUDED.resume_id, \
         location = EXCLUDED.location, \
         company_name = EXCLUDED.company_name, \
         current = EXCLUDED.current, \
         description = EXCLUDED.description, \
         start_date = EXCLUDED.start_date, \
         end_date = EXCLUDED.end_date, \
         position = EXCLUDED.position",
    );
    qb.build().execute(pool).await.map_err(map_write_error)?;
    Ok(())
}

pub async fn save_educations(pool: &PgPool, drafts: Vec<EducationDraft>) -> Result<(), AppError> {
    if drafts.is_empty() {
        return Ok(());
    }
    for draft in &drafts {
        draft.validate()?;
    }

    debug!("Upserting {} education record(s)", drafts.len());

    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO educations \
         (id, resume_id, school, degree, field_of_study, location, description, start_date, end_date) ",
    );
    qb.push_values(drafts, |mut b, d| {
        b.push_bind(d.id.unwrap_or_else(Uuid::new_v4))
            .push_bind(d.resume_id)
            .push_bind(d.school)
            .push_bind(d.degree)
            .push_bind(d.field_of_study)
            .push_bind(d.location)
            .push_bind(d.description)
            .push_bind(d.start_date)
            .push_bind(d.end_date);
    });
    qb.push(
        " ON CONFLICT (id) DO UPDATE SET \
         resume_id = EXCLUDED.resume_id, \
         location = EXCLUDED.location, \
         description = EXCLUDED.description, \
         degree = EXCLUDED.degree, \
         start_date = EXCLUDED.start_date, \
         end_date = EXCLUDED.end_date, \
         field_of_study = EXCLUDED.field_of_study, \
         school = EXCLUDED.school",
    );
    qb.build().execute(pool).await.map_err(map_write_error)?;
    Ok(())
}

pub async fn save_skills(pool: &PgPool, drafts: Vec<SkillDraft>) -> Result<(), AppError> {
    if drafts.is_empty() {
        return Ok(());
    }
    for draft in &drafts {
        draft.validate()?;
    }

    debug!("Upserting {} skill record(s)", drafts.len());

    let mut qb: QueryBuilder<Postgres> =
        QueryBuilder::new("INSERT INTO skills (id, resume_id, name, level) ");
    qb.push_values(drafts, |mut b, d| {
        b.push_bind(d.id.unwrap_or_else(Uuid::new_v4))
            .push_bind(d.resume_id)
            .push_bind(d.name)
            .push_bind(d.level);
    });
    qb.push(
        " ON CONFLICT (id) DO UPDATE SET \
         resume_id = EXCLUDED.resume_id, \
         name = EXCLUDED.name, \
         level = EXCLUDED.level",
    );
    qb.build().execute(pool).await.map_err(map_write_error)?;
    Ok(())
}

/// Summary is a singleton per resume: a second save for the same resume
/// updates the existing row in place.
pub async fn save_summary(pool: &PgPool, draft: SummaryDraft) -> Result<(), AppError> {
    draft.validate()?;

    sqlx::query(
        "INSERT INTO summaries (id, resume_id, text) VALUES ($1, $2, $3) \
         ON CONFLICT (resume_id) DO UPDATE SET text = EXCLUDED.text",
    )
    .bind(draft.id.unwrap_or_else(Uuid::new_v4))
    .bind(draft.resume_id)
    .bind(&draft.text)
    .execute(pool)
    .await
    .map_err(map_write_error)?;
    Ok(())
}

/// How a contact save will be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactWritePlan {
    /// Insert-or-update keyed on the resume's singleton constraint.
    Upsert,
    /// Targeted update of the row matching this resume id, bypassing the
    /// insert path entirely.
    TargetedUpdate(Uuid),
}

/// Decides the write path for a contact save.
///
/// No id supplied: insert-or-update ("new contact for a resume"). An id
/// together with a resume id: targeted update ("edit existing contact by
/// resume"). An id without a resume id is an invalid update and fails
/// before any write. The asymmetry is intentional.
pub fn contact_write_plan(
    id: Option<Uuid>,
    resume_id: Option<Uuid>,
) -> Result<ContactWritePlan, AppError> {
    match (id, resume_id) {
        (None, _) => Ok(ContactWritePlan::Upsert),
        (Some(_), Some(resume_id)) => Ok(ContactWritePlan::TargetedUpdate(resume_id)),
        (Some(_), None) => Err(AppError::InvalidUpdate(
            "contact update supplied an id but no resume id".to_string(),
        )),
    }
}

pub async fn save_contact(pool: &PgPool, draft: ContactDraft) -> Result<(), AppError> {
    draft.validate()?;

    match contact_write_plan(draft.id, draft.resume_id)? {
        ContactWritePlan::Upsert => {
            let resume_id = draft.resume_id.ok_or_else(|| {
                AppError::Validation("contact record is missing a resume id".to_string())
            })?;
            sqlx::query(
                "INSERT INTO contacts (id, resume_id, full_name, phone, email, location) \
                 VALUES ($1, $2, $3, $4, $5, $6) \
                 ON CONFLICT (resume_id) DO UPDATE SET \
                 full_name = EXCLUDED.full_name, \
                 phone = EXCLUDED.phone, \
                 email = EXCLUDED.email, \
                 location = EXCLUDED.location",
            )
            .bind(Uuid::new_v4())
            .bind(resume_id)
            .bind(&draft.full_name)
            .bind(&draft.phone)
            .bind(&draft.email)
            .bind(&draft.location)
            .execute(pool)
            .await
            .map_err(map_write_error)?;
        }
        ContactWritePlan::TargetedUpdate(resume_id) => {
            sqlx::query(
                "UPDATE contacts SET full_name = $1, phone = $2, email = $3, location = $4 \
                 WHERE resume_id = $5",
            )
            .bind(&draft.full_name)
            .bind(&draft.phone)
            .bind(&draft.email)
            .bind(&draft.location)
            .bind(resume_id)
            .execute(pool)
            .await
            .map_err(map_write_error)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_id_takes_upsert_path() {
        let plan = contact_write_plan(None, Some(Uuid::new_v4())).unwrap();
        assert_eq!(plan, ContactWritePlan::Upsert);
        // the insert path does not need a resume id decided here
        assert_eq!(contact_write_plan(None, None).unwrap(), ContactWritePlan::Upsert);
    }

    #[test]
    fn test_id_with_resume_id_takes_targeted_update_path() {
        let resume_id = Uuid::new_v4();
        let plan = contact_write_plan(Some(Uuid::new_v4()), Some(resume_id)).unwrap();
        assert_eq!(plan, ContactWritePlan::TargetedUpdate(resume_id));
    }

    #[test]
    fn test_id_without_resume_id_is_an_invalid_update() {
        let err = contact_write_plan(Some(Uuid::new_v4()), None).unwrap_err();
        assert!(matches!(err, AppError::InvalidUpdate(_)));
    }
}
