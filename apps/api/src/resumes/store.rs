//! Resume Store: keyed storage of resume records.
//!
//! Default: `InMemoryResumeStore`, which lives for the process lifetime only.
//! `AppState` holds an `Arc<dyn ResumeStore>` so a durable backend can be
//! swapped in without touching handlers.

use async_trait::async_trait;
use indexmap::IndexMap;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::resume::{Resume, ResumeDraft, ResumePatch};

#[async_trait]
pub trait ResumeStore: Send + Sync {
    /// Assigns a fresh id to the draft and persists it.
    async fn create(&self, draft: ResumeDraft) -> Result<Resume, AppError>;

    async fn get(&self, id: &str) -> Result<Resume, AppError>;

    async fn list(&self) -> Result<Vec<Resume>, AppError>;

    /// Overwrites the fields present in `patch`. Fails with `NotFound` for an unknown id.
    async fn update(&self, id: &str, patch: ResumePatch) -> Result<Resume, AppError>;

    /// Removes the record. Deleting an unknown id is not an error.
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

/// Process-local store. Records are kept in insertion order so `list` is
/// deterministic; one lock guards every mutation so concurrent updates to
/// the same record cannot be lost.
#[derive(Default)]
pub struct InMemoryResumeStore {
    resumes: RwLock<IndexMap<String, Resume>>,
}

impl InMemoryResumeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Resume {id} not found"))
}

#[async_trait]
impl ResumeStore for InMemoryResumeStore {
    async fn create(&self, draft: ResumeDraft) -> Result<Resume, AppError> {
        let mut resumes = self.resumes.write().await;

        let mut id = Uuid::new_v4().to_string();
        while resumes.contains_key(&id) {
            id = Uuid::new_v4().to_string();
        }

        let resume = Resume::from_draft(id.clone(), draft);
        resumes.insert(id.clone(), resume.clone());
        info!("Created resume {id}");

        Ok(resume)
    }

    async fn get(&self, id: &str) -> Result<Resume, AppError> {
        self.resumes
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn list(&self) -> Result<Vec<Resume>, AppError> {
        Ok(self.resumes.read().await.values().cloned().collect())
    }

    async fn update(&self, id: &str, patch: ResumePatch) -> Result<Resume, AppError> {
        let mut resumes = self.resumes.write().await;
        let resume = resumes.get_mut(id).ok_or_else(|| not_found(id))?;
        patch.apply_to(resume);
        Ok(resume.clone())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        if self.resumes.write().await.shift_remove(id).is_some() {
            info!("Deleted resume {id}");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::resume::{PersonalInfo, SkillCategory};

    fn draft(title: &str) -> ResumeDraft {
        ResumeDraft {
            title: title.to_string(),
            template_id: "modern-minimal".to_string(),
            personal_info: PersonalInfo {
                full_name: "Jane Doe".to_string(),
                email: "j@x.com".to_string(),
                phone: "555-0100".to_string(),
                location: "Austin, TX".to_string(),
                website: None,
                linkedin: None,
                github: Some("janedoe".to_string()),
                summary: None,
            },
            experience: vec![],
            education: vec![],
            skills: vec![SkillCategory {
                id: "s1".to_string(),
                category: "Languages".to_string(),
                items: vec!["Rust".to_string(), "Go".to_string()],
            }],
            projects: vec![],
            certifications: vec![],
            languages: vec![],
        }
    }

    #[tokio::test]
    async fn test_create_then_get_returns_input_plus_id() {
        let store = InMemoryResumeStore::new();
        let input = draft("My Resume");

        let created = store.create(input.clone()).await.unwrap();
        assert!(!created.id.is_empty());

        let fetched = store.get(&created.id).await.unwrap();
        assert_eq!(fetched, Resume::from_draft(created.id.clone(), input));
    }

    #[tokio::test]
    async fn test_create_assigns_distinct_ids() {
        let store = InMemoryResumeStore::new();
        let a = store.create(draft("A")).await.unwrap();
        let b = store.create(draft("B")).await.unwrap();
        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let store = InMemoryResumeStore::new();
        let result = store.get("missing").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_preserves_fields_not_in_patch() {
        let store = InMemoryResumeStore::new();
        let created = store.create(draft("My Resume")).await.unwrap();

        let patch = ResumePatch {
            title: Some("Updated".to_string()),
            ..Default::default()
        };
        let updated = store.update(&created.id, patch).await.unwrap();

        assert_eq!(updated.title, "Updated");
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.personal_info, created.personal_info);
        assert_eq!(updated.skills, created.skills);
        assert_eq!(store.get(&created.id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = InMemoryResumeStore::new();
        let result = store.update("missing", ResumePatch::default()).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = InMemoryResumeStore::new();
        let created = store.create(draft("My Resume")).await.unwrap();

        store.delete(&created.id).await.unwrap();
        store.delete(&created.id).await.unwrap();
        store.delete("never-existed").await.unwrap();

        assert!(matches!(
            store.get(&created.id).await,
            Err(AppError::NotFound(_))
        ));
        assert!(matches!(
            store.get("never-existed").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_list_counts_creates_minus_deletes_in_insertion_order() {
        let store = InMemoryResumeStore::new();
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(store.create(draft(&format!("R{i}"))).await.unwrap().id);
        }
        store.delete(&ids[1]).await.unwrap();
        store.delete(&ids[3]).await.unwrap();

        let titles: Vec<String> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.title)
            .collect();
        assert_eq!(titles, vec!["R0", "R2", "R4"]);
    }

    #[tokio::test]
    async fn test_concurrent_patches_to_distinct_fields_are_not_lost() {
        let store = Arc::new(InMemoryResumeStore::new());
        let id = store.create(draft("Original")).await.unwrap().id;

        let title_task = {
            let store = Arc::clone(&store);
            let id = id.clone();
            tokio::spawn(async move {
                let patch = ResumePatch {
                    title: Some("New title".to_string()),
                    ..Default::default()
                };
                store.update(&id, patch).await
            })
        };
        let template_task = {
            let store = Arc::clone(&store);
            let id = id.clone();
            tokio::spawn(async move {
                let patch = ResumePatch {
                    template_id: Some("tech-focused".to_string()),
                    ..Default::default()
                };
                store.update(&id, patch).await
            })
        };
        title_task.await.unwrap().unwrap();
        template_task.await.unwrap().unwrap();

        let stored = store.get(&id).await.unwrap();
        assert_eq!(stored.title, "New title");
        assert_eq!(stored.template_id, "tech-focused");
    }
}
