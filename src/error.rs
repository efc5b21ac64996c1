use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("Storage error: {0}")]
    StorageError(Box<dyn std::error::Error + Send + Sync>),
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("Code must end with digits: {0:?}")]
    InvalidCode(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for DocumentError {
    fn from(err: rocksdb::Error) -> Self {
        DocumentError::StorageError(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, DocumentError>;
