//! In-memory collaborators shared by the unit tests.

use async_trait::async_trait;

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
    time::Duration,
};

use crate::{
    auth::{
        StaticIdentityValidator,
        oauth::{DemoCredentials, TokenIssuer},
    },
    models::Note,
    repository::{NoteStorage, StorageError},
    service::{NoteService, ids::UuidGenerator},
    spellcheck::{Diagnostic, SpellCheckError, SpellChecker},
    state::AppState,
};

#[derive(Default)]
pub struct MemoryStorage {
    notes: Mutex<Vec<Note>>,
    closed: AtomicBool,
    pub add_calls: AtomicUsize,
    pub get_calls: AtomicUsize,
}

impl MemoryStorage {
    pub fn rows(&self) -> Vec<Note> {
        self.notes.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.add_calls.load(Ordering::SeqCst) + self.get_calls.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NoteStorage for MemoryStorage {
    async fn add_note(&self, id: &str, content: &str, owner: &str) -> Result<String, StorageError> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        if self.closed.load(Ordering::SeqCst) {
            return Err(StorageError::Closed);
        }

        self.notes.lock().unwrap().push(Note {
            id: id.to_owned(),
            content: content.to_owned(),
            owner: owner.to_owned(),
        });
        Ok(id.to_owned())
    }

    async fn get_notes(&self, owner: &str) -> Result<Vec<Note>, StorageError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if self.closed.load(Ordering::SeqCst) {
            return Err(StorageError::Closed);
        }

        Ok(self
            .notes
            .lock()
            .unwrap()
            .iter()
            .filter(|note| note.owner == owner)
            .cloned()
            .collect())
    }

    fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Verdict {
    Clean,
    Misspelled(usize),
    Unavailable,
}

pub struct ScriptedSpellChecker {
    verdict: Verdict,
    pub calls: AtomicUsize,
}

impl ScriptedSpellChecker {
    pub const fn new(verdict: Verdict) -> Self {
        Self {
            verdict,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SpellChecker for ScriptedSpellChecker {
    async fn check_spelling(&self, text: &str) -> Result<Vec<Diagnostic>, SpellCheckError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        match self.verdict {
            Verdict::Clean => Ok(Vec::new()),
            Verdict::Misspelled(count) => Ok((0..count)
                .map(|pos| {
                    let mut diagnostic = Diagnostic::new();
                    diagnostic.insert("pos".to_owned(), pos.into());
                    diagnostic.insert("word".to_owned(), text.into());
                    diagnostic
                })
                .collect()),
            Verdict::Unavailable => Err(SpellCheckError::Decode(
                serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
            )),
        }
    }
}

pub struct Fixture {
    pub storage: Arc<MemoryStorage>,
    pub checker: Arc<ScriptedSpellChecker>,
    pub service: Arc<NoteService>,
}

impl Fixture {
    pub fn state(&self) -> AppState {
        AppState::new(
            self.service.clone(),
            Arc::new(StaticIdentityValidator::default()),
            TokenIssuer::new(Arc::new(DemoCredentials), Duration::from_secs(60 * 60)),
        )
    }
}

pub fn fixture(verdict: Verdict) -> Fixture {
    let storage = Arc::new(MemoryStorage::default());
    let checker = Arc::new(ScriptedSpellChecker::new(verdict));
    let service = Arc::new(NoteService::new(
        storage.clone(),
        checker.clone(),
        Arc::new(UuidGenerator),
    ));

    Fixture {
        storage,
        checker,
        service,
    }
}
