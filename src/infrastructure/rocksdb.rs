use crate::domain::ports::KeyValueStore;
use crate::error::{DocumentError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding the document collections.
pub const CF_DOCUMENTS: &str = "documents";

/// A persistent key-value store backed by RocksDB.
///
/// Every collection is a single value in the `documents` column family.
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the `documents` column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_documents = ColumnFamilyDescriptor::new(CF_DOCUMENTS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_documents])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn missing_cf() -> DocumentError {
        DocumentError::StorageError(Box::new(std::io::Error::other(
            "Documents column family not found",
        )))
    }
}

#[async_trait]
impl KeyValueStore for RocksDBStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let cf = self.db.cf_handle(CF_DOCUMENTS).ok_or_else(Self::missing_cf)?;

        match self.db.get_cf(&cf, key.as_bytes())? {
            Some(bytes) => {
                let value = String::from_utf8(bytes).map_err(|e| {
                    DocumentError::IoError(std::io::Error::new(
                        std::io::ErrorKind::InvalidData,
                        format!("Stored value is not UTF-8: {}", e),
                    ))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let cf = self.db.cf_handle(CF_DOCUMENTS).ok_or_else(Self::missing_cf)?;
        self.db.put_cf(&cf, key.as_bytes(), value.as_bytes())?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let cf = self.db.cf_handle(CF_DOCUMENTS).ok_or_else(Self::missing_cf)?;
        self.db.delete_cf(&cf, key.as_bytes())?;
        Ok(())
    }
}
