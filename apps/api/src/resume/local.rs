//! Client-local section store — the write target in local-storage mode.
//!
//! Holds section records for users without a durable server-side account.
//! Unlike the remote gateway there is no per-record identity across
//! sessions, only per-resume grouping: a save replaces the saved resume's
//! records for that section wholesale, while records belonging to other
//! resumes are preserved untouched.
//!
//! Session-scoped and never shared with remote storage; `snapshot()`
//! serializes each section as a plain array so the client can stash the
//! whole store in its own durable storage.

use std::sync::{Arc, Mutex};

use serde::Serialize;
use uuid::Uuid;

use crate::resume::sections::{
    ContactDraft, EducationDraft, ExperienceDraft, SectionRecords, SkillDraft, SummaryDraft,
};

#[derive(Debug, Default)]
struct Sections {
    experiences: Vec<ExperienceDraft>,
    educations: Vec<EducationDraft>,
    skills: Vec<SkillDraft>,
    contacts: Vec<ContactDraft>,
    summaries: Vec<SummaryDraft>,
}

/// Serialized view of the store, one array per section kind.
#[derive(Debug, Clone, Serialize)]
pub struct LocalSnapshot {
    pub experiences: Vec<ExperienceDraft>,
    pub educations: Vec<EducationDraft>,
    pub skills: Vec<SkillDraft>,
    pub contacts: Vec<ContactDraft>,
    pub summaries: Vec<SummaryDraft>,
}

#[derive(Clone, Default)]
pub struct LocalSectionStore {
    inner: Arc<Mutex<Sections>>,
}

impl LocalSectionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the saved resume's records for one section with the
    /// supplied set. Records grouped under other resume ids are kept
    /// as they are.
    pub fn replace_for_resume(&self, resume_id: Uuid, records: SectionRecords) {
        let mut sections = self.inner.lock().expect("local store lock poisoned");
        match records {
            SectionRecords::Experiences(drafts) => {
                sections.experiences.retain(|e| e.resume_id != resume_id);
                sections.experiences.extend(drafts);
            }
            SectionRecords::Educations(drafts) => {
                sections.educations.retain(|e| e.resume_id != resume_id);
                sections.educations.extend(drafts);
            }
            SectionRecords::Skills(drafts) => {
                sections.skills.retain(|s| s.resume_id != resume_id);
                sections.skills.extend(drafts);
            }
            SectionRecords::Contact(draft) => {
                sections.contacts.retain(|c| c.resume_id != Some(resume_id));
                sections.contacts.push(draft);
            }
            SectionRecords::Summary(draft) => {
                sections.summaries.retain(|s| s.resume_id != resume_id);
                sections.summaries.push(draft);
            }
        }
    }

    pub fn snapshot(&self) -> LocalSnapshot {
        let sections = self.inner.lock().expect("local store lock poisoned");
        LocalSnapshot {
            experiences: sections.experiences.clone(),
            educations: sections.educations.clone(),
            skills: sections.skills.clone(),
            contacts: sections.contacts.clone(),
            summaries: sections.summaries.clone(),
        }
    }

    pub fn skills_for(&self, resume_id: Uuid) -> Vec<SkillDraft> {
        let sections = self.inner.lock().expect("local store lock poisoned");
        sections
            .skills
            .iter()
            .filter(|s| s.resume_id == resume_id)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill(resume_id: Uuid, name: &str) -> SkillDraft {
        SkillDraft {
            id: None,
            resume_id,
            name: name.to_string(),
            level: None,
        }
    }

    #[test]
    fn test_replace_keeps_other_resumes_untouched() {
        let store = LocalSectionStore::new();
        let resume_a = Uuid::new_v4();
        let resume_b = Uuid::new_v4();

        store.replace_for_resume(
            resume_b,
            SectionRecords::Skills(vec![skill(resume_b, "Python")]),
        );
        store.replace_for_resume(
            resume_a,
            SectionRecords::Skills(vec![skill(resume_a, "Go"), skill(resume_a, "Rust")]),
        );

        let b_names: Vec<_> = store
            .skills_for(resume_b)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(b_names, vec!["Python"]);

        let a_names: Vec<_> = store
            .skills_for(resume_a)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(a_names, vec!["Go", "Rust"]);
    }

    #[test]
    fn test_second_save_replaces_wholesale_not_per_record() {
        let store = LocalSectionStore::new();
        let resume_a = Uuid::new_v4();

        store.replace_for_resume(
            resume_a,
            SectionRecords::Skills(vec![skill(resume_a, "Python"), skill(resume_a, "SQL")]),
        );
        store.replace_for_resume(
            resume_a,
            SectionRecords::Skills(vec![skill(resume_a, "Go"), skill(resume_a, "Rust")]),
        );

        let names: Vec<_> = store
            .skills_for(resume_a)
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Go", "Rust"]);
    }

    #[test]
    fn test_singleton_sections_replace_by_resume() {
        let store = LocalSectionStore::new();
        let resume_a = Uuid::new_v4();

        let summary = |text: &str| SummaryDraft {
            id: None,
            resume_id: resume_a,
            text: text.to_string(),
        };
        store.replace_for_resume(resume_a, SectionRecords::Summary(summary("first")));
        store.replace_for_resume(resume_a, SectionRecords::Summary(summary("second")));

        let snapshot = store.snapshot();
        assert_eq!(snapshot.summaries.len(), 1);
        assert_eq!(snapshot.summaries[0].text, "second");
    }

    #[test]
    fn test_snapshot_serializes_as_arrays() {
        let store = LocalSectionStore::new();
        let resume_a = Uuid::new_v4();
        store.replace_for_resume(
            resume_a,
            SectionRecords::Skills(vec![skill(resume_a, "Go")]),
        );

        let json = serde_json::to_value(store.snapshot()).unwrap();
        assert!(json["skills"].is_array());
        assert_eq!(json["skills"][0]["name"], "Go");
        assert!(json["experiences"].is_array());
    }
}
