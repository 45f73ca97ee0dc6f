use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::CurrentUser;
use crate::errors::AppError;
use crate::models::resume::ResumeRow;
use crate::resume::loader::{load_aggregate, ResumeAggregate};
use crate::resume::local::LocalSnapshot;
use crate::resume::sections::{
    ContactDraft, EducationDraft, ExperienceDraft, SectionRecords, SkillDraft, SummaryDraft,
};
use crate::resume::writer::SectionSave;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateResumeRequest {
    pub title: Option<String>,
}

/// POST /api/v1/resumes
/// Creates a resume owned by the current user.
pub async fn handle_create_resume(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateResumeRequest>,
) -> Result<(StatusCode, Json<ResumeRow>), AppError> {
    let row: ResumeRow = sqlx::query_as(
        "INSERT INTO resumes (id, user_id, title) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(user.user_id)
    .bind(&req.title)
    .fetch_one(&state.db)
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// GET /api/v1/resumes
pub async fn handle_list_resumes(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let rows: Vec<ResumeRow> =
        sqlx::query_as("SELECT * FROM resumes WHERE user_id = $1 ORDER BY created_at DESC")
            .bind(user.user_id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(rows))
}

/// GET /api/v1/resumes/:id
pub async fn handle_get_resume(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
) -> Result<Json<ResumeAggregate>, AppError> {
    let aggregate = load_aggregate(&state.db, resume_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Resume {resume_id} not found")))?;
    Ok(Json(aggregate))
}

/// Records arrive with their own resume id (the update path re-submits
/// stored rows); each must name the resume being edited.
fn ensure_same_resume<'a, I>(resume_id: Uuid, record_resume_ids: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = &'a Uuid>,
{
    for record_resume_id in record_resume_ids {
        if *record_resume_id != resume_id {
            return Err(AppError::Validation(
                "record resume id does not match the resume being edited".to_string(),
            ));
        }
    }
    Ok(())
}

/// PUT /api/v1/resumes/:id/experiences
pub async fn handle_save_experiences(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(drafts): Json<Vec<ExperienceDraft>>,
) -> Result<StatusCode, AppError> {
    ensure_same_resume(resume_id, drafts.iter().map(|d| &d.resume_id))?;
    state
        .writer
        .save(SectionSave {
            resume_id,
            records: SectionRecords::Experiences(drafts),
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/resumes/:id/educations
pub async fn handle_save_educations(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(drafts): Json<Vec<EducationDraft>>,
) -> Result<StatusCode, AppError> {
    ensure_same_resume(resume_id, drafts.iter().map(|d| &d.resume_id))?;
    state
        .writer
        .save(SectionSave {
            resume_id,
            records: SectionRecords::Educations(drafts),
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/resumes/:id/skills
pub async fn handle_save_skills(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(drafts): Json<Vec<SkillDraft>>,
) -> Result<StatusCode, AppError> {
    ensure_same_resume(resume_id, drafts.iter().map(|d| &d.resume_id))?;
    state
        .writer
        .save(SectionSave {
            resume_id,
            records: SectionRecords::Skills(drafts),
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/resumes/:id/contact
///
/// A missing resume id in the body is only defaulted on the insert path;
/// the targeted-update path (id supplied) must name the resume explicitly
/// or the gateway rejects the save as an invalid update.
pub async fn handle_save_contact(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(mut draft): Json<ContactDraft>,
) -> Result<StatusCode, AppError> {
    if let Some(body_resume_id) = draft.resume_id {
        ensure_same_resume(resume_id, [&body_resume_id])?;
    } else if draft.id.is_none() {
        draft.resume_id = Some(resume_id);
    }
    state
        .writer
        .save(SectionSave {
            resume_id,
            records: SectionRecords::Contact(draft),
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct SummarySaveRequest {
    pub id: Option<Uuid>,
    pub text: String,
}

/// PUT /api/v1/resumes/:id/summary
pub async fn handle_save_summary(
    State(state): State<AppState>,
    Path(resume_id): Path<Uuid>,
    Json(req): Json<SummarySaveRequest>,
) -> Result<StatusCode, AppError> {
    state
        .writer
        .save(SectionSave {
            resume_id,
            records: SectionRecords::Summary(SummaryDraft {
                id: req.id,
                resume_id,
                text: req.text,
            }),
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/local/snapshot
/// Serialized view of the local-mode store, for the client to persist.
/// Only served in local-storage mode; remote mode has nothing to hand back.
pub async fn handle_local_snapshot(
    State(state): State<AppState>,
) -> Result<Json<LocalSnapshot>, AppError> {
    if !state.config.local_storage_mode {
        return Err(AppError::NotFound(
            "local-storage mode is not active".to_string(),
        ));
    }
    Ok(Json(state.local.snapshot()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_same_resume_accepts_matching_records() {
        let resume_id = Uuid::new_v4();
        assert!(ensure_same_resume(resume_id, [&resume_id, &resume_id]).is_ok());
        assert!(ensure_same_resume(resume_id, std::iter::empty::<&Uuid>()).is_ok());
    }

    #[test]
    fn test_ensure_same_resume_rejects_foreign_records() {
        let resume_id = Uuid::new_v4();
        let other = Uuid::new_v4();
        let err = ensure_same_resume(resume_id, [&resume_id, &other]).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
