use super::repository::{DocumentRepository, SaveOutcome};
use crate::domain::calculator::PaymentBreakdown;
use crate::domain::document::Document;
use crate::domain::ids::generate_id;
use crate::error::Result;

/// The document currently being edited.
///
/// Callers own the state and pass it where it is needed; amounts are always
/// derived from it through [`PaymentBreakdown`].
#[derive(Debug, Clone, Default)]
pub struct FormState<D: Document> {
    document: D,
}

impl<D: Document> FormState<D> {
    /// Starts a blank document with a fresh id.
    pub fn initialize() -> Self {
        let mut document = D::default();
        document.set_id(generate_id());
        Self { document }
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    /// Clears everything, including the id.
    pub fn reset(&mut self) {
        self.document = D::default();
    }

    /// Merges an imported partial document into the current one.
    pub fn import(&mut self, patch: D::Patch) {
        self.document.apply_patch(patch);
    }

    pub fn breakdown(&self) -> PaymentBreakdown {
        self.document.breakdown()
    }

    /// Makes stored document `id` the active one. Returns `false` and leaves
    /// the state alone if it does not exist.
    pub async fn load(&mut self, repo: &DocumentRepository<D>, id: &str) -> Result<bool> {
        match repo.find(id).await? {
            Some(document) => {
                self.document = document;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn save(&self, repo: &DocumentRepository<D>) -> Result<SaveOutcome> {
        repo.save(&self.document).await
    }

    /// Duplicates stored document `id` and makes the copy active.
    pub async fn duplicate(
        &mut self,
        repo: &DocumentRepository<D>,
        id: &str,
    ) -> Result<Option<String>> {
        match repo.duplicate(id).await? {
            Some(copy) => {
                let new_id = copy.id().to_string();
                self.document = copy;
                Ok(Some(new_id))
            }
            None => Ok(None),
        }
    }
}
