mod embedded;

use embedded::migrations;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio_postgres::{Client, NoTls, Row};

use std::sync::atomic::{AtomicBool, Ordering};

use crate::models::Note;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] tokio_postgres::Error),

    #[error("storage is closed")]
    Closed,
}

/// Persistence seam used by the note service.
#[async_trait]
pub trait NoteStorage: Send + Sync {
    /// Inserts one note row and hands back its id.
    async fn add_note(&self, id: &str, content: &str, owner: &str) -> Result<String, StorageError>;

    /// Every note stored for `owner`, in no particular order.
    async fn get_notes(&self, owner: &str) -> Result<Vec<Note>, StorageError>;

    /// Releases the underlying connection. Calling it more than once is a no-op.
    fn close(&self);
}

pub struct Repository {
    client: Client,
    connection: JoinHandle<()>,
    closed: AtomicBool,
}

impl Repository {
    pub async fn new(database_dsn: &str) -> Result<Self, tokio_postgres::Error> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        let connection = tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self {
            client,
            connection,
            closed: AtomicBool::new(false),
        })
    }

    pub async fn migrate(&mut self) -> Result<(), refinery::Error> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    fn ensure_open(&self) -> Result<(), StorageError> {
        if self.closed.load(Ordering::Acquire) {
            return Err(StorageError::Closed);
        }
        Ok(())
    }

    fn note_from_row(row: &Row) -> Note {
        Note {
            id: row.get("id"),
            content: row.get("content"),
            owner: row.get("owner"),
        }
    }
}

#[async_trait]
impl NoteStorage for Repository {
    async fn add_note(&self, id: &str, content: &str, owner: &str) -> Result<String, StorageError> {
        self.ensure_open()?;

        self.client
            .execute(
                "INSERT INTO notes (id, content, owner) VALUES ($1, $2, $3)",
                &[&id, &content, &owner],
            )
            .await?;

        Ok(id.to_owned())
    }

    async fn get_notes(&self, owner: &str) -> Result<Vec<Note>, StorageError> {
        self.ensure_open()?;

        let rows = self
            .client
            .query(
                "SELECT id, content, owner FROM notes WHERE owner = $1",
                &[&owner],
            )
            .await?;

        Ok(rows.iter().map(Self::note_from_row).collect())
    }

    fn close(&self) {
        if self.closed.swap(true, Ordering::AcqRel) {
            return;
        }

        // Dropping the connection future closes the socket.
        self.connection.abort();
        tracing::info!("Database connection closed");
    }
}
