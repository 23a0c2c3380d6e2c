//! Storage layer for the company registry.
//!
//! This crate provides SQLite-backed persistence for company records plus
//! the service layer enforcing the registry's business rules: the ISIN
//! country-code prefix check and ISIN uniqueness.
//!
//! # Architecture
//!
//! The crate uses a repository pattern with the following components:
//!
//! - [`Database`] - Connection pool manager with automatic migrations
//! - [`CompanyRepository`] - Data access trait, with a SQLite implementation
//! - [`CompanyService`] - Validation + uniqueness check + persistence,
//!   returning business failures as [`SaveOutcome`] values
//!
//! All data access goes through the repository trait, so the service can be
//! unit-tested against an in-memory mock and the storage engine swapped
//! without touching business logic.
//!
//! # Error Model
//!
//! Business-rule failures (malformed ISIN prefix, duplicate ISIN, missing
//! fields, unknown update target) are returned as rejected [`SaveOutcome`]s,
//! never as errors. [`StorageError`] is reserved for infrastructure faults:
//! unreachable database, failed migration, and the storage-level constraint
//! violations the repository reports.
//!
//! # Example
//!
//! ```no_run
//! use companyreg_storage::{CompanyInput, CompanyService, Database, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::new(DatabaseConfig::new("companyreg.db")).await?;
//! let service = CompanyService::from_pool(db.pool().clone());
//!
//! let outcome = service
//!     .create(&CompanyInput {
//!         name: "Acme".to_string(),
//!         exchange: "NYSE".to_string(),
//!         ticker: "ACM".to_string(),
//!         isin: "US1234567890".to_string(),
//!         website_url: None,
//!     })
//!     .await?;
//!
//! if let Some(view) = outcome.company() {
//!     println!("created company {} ({})", view.name, view.id);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Concurrency
//!
//! Each operation is a single-shot call against the pool; there is no
//! in-process queuing or batching. The UNIQUE constraint on `isin` is the
//! race-safe backstop for concurrent creates; the service's `exists_by_isin`
//! pre-check only exists for precise error messages.

pub mod connection;
pub mod error;
pub mod messages;
pub mod models;
pub mod repositories;
pub mod service;

pub use connection::{Database, DatabaseConfig};
pub use error::{StorageError, StorageResult};
pub use messages::RegistryMessages;
pub use models::Company;
pub use repositories::{CompanyRepository, SqliteCompanyRepository};
pub use service::{CompanyInput, CompanyService, CompanyView, SaveOutcome};
