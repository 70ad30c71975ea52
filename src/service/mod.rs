pub mod ids;

use tracing::instrument;

use std::sync::Arc;

use crate::{
    models::Note,
    repository::{NoteStorage, StorageError},
    spellcheck::{SpellCheckError, SpellChecker},
};

use ids::IdGenerator;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("content has spelling errors")]
    Misspelled,

    #[error("notes_service.add_note: {0}")]
    SpellCheck(#[from] SpellCheckError),

    #[error("notes_service: {0}")]
    Storage(#[from] StorageError),
}

/// Runs the spell-check gate in front of the note store.
pub struct NoteService {
    storage: Arc<dyn NoteStorage>,
    checker: Arc<dyn SpellChecker>,
    ids: Arc<dyn IdGenerator>,
}

impl NoteService {
    pub fn new(
        storage: Arc<dyn NoteStorage>,
        checker: Arc<dyn SpellChecker>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            storage,
            checker,
            ids,
        }
    }

    /// Stores `content` for `owner` and returns the new note id.
    ///
    /// Nothing is written unless the checker reports zero diagnostics.
    #[instrument(skip(self, content), fields(op = "notes_service.add_note"))]
    pub async fn add_note(&self, content: &str, owner: &str) -> Result<String, ServiceError> {
        tracing::info!("checking if content has spelling errors");

        let diagnostics = self.checker.check_spelling(content).await.map_err(|e| {
            tracing::error!("spell check failed: {e}");
            e
        })?;

        if !diagnostics.is_empty() {
            tracing::info!("rejecting note with {} spelling error(s)", diagnostics.len());
            return Err(ServiceError::Misspelled);
        }

        let id = self.ids.generate();

        tracing::info!(note_id = %id, "adding note");

        let id = self
            .storage
            .add_note(&id, content, owner)
            .await
            .map_err(|e| {
                tracing::error!("failed to add note to the database: {e}");
                e
            })?;

        tracing::info!(note_id = %id, "note added");

        Ok(id)
    }

    #[instrument(skip(self), fields(op = "notes_service.get_notes"))]
    pub async fn get_notes(&self, owner: &str) -> Result<Vec<Note>, ServiceError> {
        tracing::info!("getting notes");

        let notes = self.storage.get_notes(owner).await.map_err(|e| {
            tracing::error!("failed to get notes from the database: {e}");
            e
        })?;

        tracing::info!("got {} note(s)", notes.len());

        Ok(notes)
    }

    pub fn close(&self) {
        self.storage.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uuid::Uuid;

    use crate::testing::{Verdict, fixture};

    #[tokio::test]
    async fn added_note_is_listed_for_its_owner() {
        let fx = fixture(Verdict::Clean);

        let id = fx.service.add_note("Hello world", "user1").await.unwrap();

        Uuid::parse_str(&id).expect("id should be UUID-shaped");
        assert_eq!(
            fx.storage.rows(),
            vec![Note {
                id: id.clone(),
                content: "Hello world".to_owned(),
                owner: "user1".to_owned(),
            }]
        );

        let notes = fx.service.get_notes("user1").await.unwrap();
        assert!(notes.iter().any(|note| note.id == id));
    }

    #[tokio::test]
    async fn misspelled_content_is_not_persisted() {
        let fx = fixture(Verdict::Misspelled(2));

        let err = fx.service.add_note("Helo wrld", "user1").await.unwrap_err();

        assert!(matches!(err, ServiceError::Misspelled));
        assert_eq!(err.to_string(), "content has spelling errors");
        assert_eq!(fx.checker.calls(), 1);
        assert_eq!(fx.storage.calls(), 0);
        assert!(fx.storage.rows().is_empty());
    }

    #[tokio::test]
    async fn checker_failure_blocks_the_write() {
        let fx = fixture(Verdict::Unavailable);

        let err = fx.service.add_note("Hello world", "user1").await.unwrap_err();

        assert!(matches!(err, ServiceError::SpellCheck(_)));
        assert_eq!(fx.storage.calls(), 0);
    }

    #[tokio::test]
    async fn storage_failure_is_wrapped() {
        let fx = fixture(Verdict::Clean);
        fx.service.close();

        let err = fx.service.add_note("Hello world", "user1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(StorageError::Closed)));

        let err = fx.service.get_notes("user1").await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(StorageError::Closed)));
    }

    #[tokio::test]
    async fn owner_without_notes_gets_empty_list() {
        let fx = fixture(Verdict::Clean);

        assert!(fx.service.get_notes("nobody").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn owners_do_not_see_each_other() {
        let fx = fixture(Verdict::Clean);

        let a = fx.service.add_note("note from a", "A").await.unwrap();
        let b = fx.service.add_note("note from b", "B").await.unwrap();

        let notes_a = fx.service.get_notes("A").await.unwrap();
        let notes_b = fx.service.get_notes("B").await.unwrap();

        assert_eq!(notes_a.len(), 1);
        assert_eq!(notes_a[0].id, a);
        assert_eq!(notes_b.len(), 1);
        assert_eq!(notes_b[0].id, b);
    }

    #[tokio::test]
    async fn each_note_gets_a_fresh_id() {
        let fx = fixture(Verdict::Clean);

        let first = fx.service.add_note("same text", "user1").await.unwrap();
        let second = fx.service.add_note("same text", "user1").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(fx.service.get_notes("user1").await.unwrap().len(), 2);
    }
}
