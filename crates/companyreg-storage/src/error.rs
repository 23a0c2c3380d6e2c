use thiserror::Error;

/// Storage-specific error types for the company registry.
///
/// These cover database failures, migration failures, and the structural
/// errors the repository layer can report. Business-rule rejections (bad
/// ISIN prefix, duplicate ISIN) are *not* errors — the service returns them
/// as values so callers can tell "bad request" from "system broken".
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database connection or query execution failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Migration execution failed
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// Entity not found in database
    #[error("Entity not found: {entity_type} with {field}={value}")]
    NotFound {
        entity_type: String,
        field: String,
        value: String,
    },

    /// Unique constraint violated at the storage layer.
    ///
    /// The service pre-checks uniqueness, so this only surfaces when two
    /// requests race; the constraint is the authoritative verdict.
    #[error("Duplicate key: {entity_type} with {field}={value} already exists")]
    DuplicateKey {
        entity_type: String,
        field: String,
        value: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Specialized result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
