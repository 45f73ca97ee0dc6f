//! Dual-Mode Writer — strategy selection between remote and local
//! persistence.
//!
//! One interface, two interchangeable backends, selected once at startup
//! from the `LOCAL_STORAGE_MODE` flag and carried in `AppState` as
//! `Arc<dyn SectionWriter>`. Remote mode performs per-record upserts via
//! the gateway; local mode replaces the saved resume's records wholesale.
//! The asymmetry is deliberate: local mode has no durable per-record
//! identity across sessions, only per-resume grouping.

use std::sync::Arc;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::resume::gateway;
use crate::resume::local::LocalSectionStore;
use crate::resume::sections::SectionRecords;

/// One section save, scoped to the resume being edited.
#[derive(Debug, Clone)]
pub struct SectionSave {
    pub resume_id: Uuid,
    pub records: SectionRecords,
}

#[async_trait]
pub trait SectionWriter: Send + Sync {
    async fn save(&self, save: SectionSave) -> Result<(), AppError>;
}

/// Writes through the Persistence Gateway (per-record upsert).
pub struct RemoteWriter {
    pool: PgPool,
}

impl RemoteWriter {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SectionWriter for RemoteWriter {
    async fn save(&self, save: SectionSave) -> Result<(), AppError> {
        debug!(
            "Remote save: {} section for resume {}",
            save.records.kind().as_str(),
            save.resume_id
        );
        match save.records {
            SectionRecords::Experiences(drafts) => {
                gateway::save_experiences(&self.pool, drafts).await
            }
            SectionRecords::Educations(drafts) => {
                gateway::save_educations(&self.pool, drafts).await
            }
            SectionRecords::Skills(drafts) => gateway::save_skills(&self.pool, drafts).await,
            SectionRecords::Contact(draft) => gateway::save_contact(&self.pool, draft).await,
            SectionRecords::Summary(draft) => gateway::save_summary(&self.pool, draft).await,
        }
    }
}

/// Writes into the client-local store (replace-by-resume). Never reaches
/// remote storage.
pub struct LocalWriter {
    store: LocalSectionStore,
}

impl LocalWriter {
    pub fn new(store: LocalSectionStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl SectionWriter for LocalWriter {
    async fn save(&self, save: SectionSave) -> Result<(), AppError> {
        // same validation gate as the remote path, before any merge
        save.records.validate()?;
        // the contact save contract holds in both modes: an id without a
        // resume id is an invalid update here too, and must never land in
        // the store where replace-by-resume could not group it
        if let SectionRecords::Contact(draft) = &save.records {
            gateway::contact_write_plan(draft.id, draft.resume_id)?;
        }
        debug!(
            "Local save: {} section for resume {}",
            save.records.kind().as_str(),
            save.resume_id
        );
        self.store.replace_for_resume(save.resume_id, save.records);
        Ok(())
    }
}

/// Picks the write backend once, from the process-wide mode flag.
pub fn select_writer(
    local_storage_mode: bool,
    pool: PgPool,
    store: LocalSectionStore,
) -> Arc<dyn SectionWriter> {
    if local_storage_mode {
        Arc::new(LocalWriter::new(store))
    } else {
        Arc::new(RemoteWriter::new(pool))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::sections::{ContactDraft, SkillDraft};

    fn skill(resume_id: Uuid, name: &str) -> SkillDraft {
        SkillDraft {
            id: None,
            resume_id,
            name: name.to_string(),
            level: None,
        }
    }

    fn contact(id: Option<Uuid>, resume_id: Option<Uuid>) -> ContactDraft {
        ContactDraft {
            id,
            resume_id,
            full_name: "Ada Lovelace".to_string(),
            phone: String::new(),
            email: "ada@example.com".to_string(),
            location: String::new(),
        }
    }

    #[tokio::test]
    async fn test_local_writer_merges_into_store() {
        let store = LocalSectionStore::new();
        let writer = LocalWriter::new(store.clone());
        let resume_id = Uuid::new_v4();

        writer
            .save(SectionSave {
                resume_id,
                records: SectionRecords::Skills(vec![skill(resume_id, "Rust")]),
            })
            .await
            .unwrap();

        let names: Vec<_> = store
            .skills_for(resume_id)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_local_writer_rejects_invalid_drafts_without_merging() {
        let store = LocalSectionStore::new();
        let writer = LocalWriter::new(store.clone());
        let resume_id = Uuid::new_v4();

        let err = writer
            .save(SectionSave {
                resume_id,
                records: SectionRecords::Skills(vec![skill(resume_id, "")]),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert!(store.skills_for(resume_id).is_empty());
    }

    #[tokio::test]
    async fn test_local_writer_rejects_contact_id_without_resume_id() {
        let store = LocalSectionStore::new();
        let writer = LocalWriter::new(store.clone());
        let resume_id = Uuid::new_v4();

        let err = writer
            .save(SectionSave {
                resume_id,
                records: SectionRecords::Contact(contact(Some(Uuid::new_v4()), None)),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::InvalidUpdate(_)));
        assert!(store.snapshot().contacts.is_empty());
    }

    #[tokio::test]
    async fn test_local_writer_replaces_contact_instead_of_accumulating() {
        let store = LocalSectionStore::new();
        let writer = LocalWriter::new(store.clone());
        let resume_id = Uuid::new_v4();

        for _ in 0..2 {
            writer
                .save(SectionSave {
                    resume_id,
                    records: SectionRecords::Contact(contact(None, Some(resume_id))),
                })
                .await
                .unwrap();
        }

        assert_eq!(store.snapshot().contacts.len(), 1);
    }
}
