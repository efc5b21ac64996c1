use crate::domain::document::Document;
use crate::domain::ids::{generate_id, increment_code};
use crate::domain::ports::KeyValueStoreBox;
use crate::error::{DocumentError, Result};
use chrono::{SecondsFormat, Utc};
use std::io::ErrorKind;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Most records kept per collection; the oldest are dropped past this.
pub const DEFAULT_RECORD_LIMIT: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Updated,
    /// The document failed validation (or has no id) and was not stored.
    Rejected,
}

/// Keyed CRUD over one collection of documents.
///
/// The whole collection lives as a JSON array under `D::STORAGE_KEY`, newest
/// first. Each operation reads the array, changes it and writes it back, so
/// the repository itself holds no state besides the store handle.
pub struct DocumentRepository<D: Document> {
    store: KeyValueStoreBox,
    limit: usize,
    _document: PhantomData<fn() -> D>,
}

pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

impl<D: Document> DocumentRepository<D> {
    pub fn new(store: KeyValueStoreBox) -> Self {
        Self {
            store,
            limit: DEFAULT_RECORD_LIMIT,
            _document: PhantomData,
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// All stored documents, newest first.
    ///
    /// A payload that no longer parses, or is not text at all, is treated as
    /// an empty collection.
    pub async fn load_all(&self) -> Result<Vec<D>> {
        let raw = match self.store.get(D::STORAGE_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(Vec::new()),
            Err(DocumentError::IoError(e)) if e.kind() == ErrorKind::InvalidData => {
                warn!(key = D::STORAGE_KEY, error = %e, "discarding undecodable collection");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        match serde_json::from_str(&raw) {
            Ok(documents) => Ok(documents),
            Err(e) => {
                warn!(key = D::STORAGE_KEY, error = %e, "discarding unreadable collection");
                Ok(Vec::new())
            }
        }
    }

    async fn save_all(&self, documents: &[D]) -> Result<()> {
        let raw = serde_json::to_string(documents)?;
        self.store.set(D::STORAGE_KEY, raw).await
    }

    pub async fn find(&self, id: &str) -> Result<Option<D>> {
        Ok(self.load_all().await?.into_iter().find(|d| d.id() == id))
    }

    /// Inserts or replaces `document`, stamping `createdAt` (first save only)
    /// and `updatedAt`.
    pub async fn save(&self, document: &D) -> Result<SaveOutcome> {
        if document.id().is_empty() || !document.is_valid() {
            debug!(key = D::STORAGE_KEY, id = document.id(), "skipping save of invalid document");
            return Ok(SaveOutcome::Rejected);
        }

        let mut documents = self.load_all().await?;
        let now = now_timestamp();

        let mut stamped = document.clone();
        if stamped.created_at().is_empty() {
            stamped.set_created_at(now.clone());
        }
        stamped.set_updated_at(now);

        let outcome = match documents.iter().position(|d| d.id() == document.id()) {
            Some(index) => {
                documents[index] = stamped;
                SaveOutcome::Updated
            }
            None => {
                documents.insert(0, stamped);
                SaveOutcome::Created
            }
        };

        if documents.len() > self.limit {
            let evicted = documents.len() - self.limit;
            documents.truncate(self.limit);
            info!(key = D::STORAGE_KEY, evicted, "collection over limit, dropped oldest");
        }

        self.save_all(&documents).await?;
        debug!(key = D::STORAGE_KEY, id = document.id(), ?outcome, "saved document");
        Ok(outcome)
    }

    /// Removes the document with `id`. Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let mut documents = self.load_all().await?;
        let before = documents.len();
        documents.retain(|d| d.id() != id);

        if documents.len() == before {
            return Ok(false);
        }
        self.save_all(&documents).await?;
        debug!(key = D::STORAGE_KEY, id, "deleted document");
        Ok(true)
    }

    /// Stores a copy of document `id` under a new id with the next document
    /// number, and returns it.
    pub async fn duplicate(&self, id: &str) -> Result<Option<D>> {
        let Some(original) = self.find(id).await? else {
            return Ok(None);
        };

        let mut copy = original.clone();
        copy.set_id(generate_id());
        copy.set_code(increment_code(original.code())?);
        let now = now_timestamp();
        copy.set_created_at(now.clone());
        copy.set_updated_at(now);

        match self.save(&copy).await? {
            SaveOutcome::Rejected => Err(DocumentError::ValidationError(format!(
                "duplicate of {id} is not a valid document"
            ))),
            _ => {
                info!(key = D::STORAGE_KEY, from = id, to = copy.id(), "duplicated document");
                Ok(Some(copy))
            }
        }
    }
}
