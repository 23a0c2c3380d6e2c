use crate::error::{StorageError, StorageResult};
use crate::messages::RegistryMessages;
use crate::models::Company;
use crate::repositories::{CompanyRepository, SqliteCompanyRepository};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// Inbound create/update payload.
///
/// All fields except `website_url` are required to be non-empty; the
/// service rejects incomplete payloads before any storage access.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyInput {
    pub name: String,
    pub exchange: String,
    pub ticker: String,
    pub isin: String,
    pub website_url: Option<String>,
}

impl CompanyInput {
    /// True when all required fields are non-empty.
    fn is_complete(&self) -> bool {
        !self.name.is_empty()
            && !self.exchange.is_empty()
            && !self.ticker.is_empty()
            && !self.isin.is_empty()
    }

    /// Map the payload to a fresh entity. The id is store-assigned on
    /// insert and the timestamps are placeholders the schema overrides.
    fn to_entity(&self) -> Company {
        Company {
            id: 0,
            name: self.name.clone(),
            exchange: self.exchange.clone(),
            ticker: self.ticker.clone(),
            isin: self.isin.clone(),
            website_url: self.website_url.clone(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    /// Overwrite every field of an existing entity except `id`.
    fn apply_to(&self, company: &mut Company) {
        company.name = self.name.clone();
        company.exchange = self.exchange.clone();
        company.ticker = self.ticker.clone();
        company.isin = self.isin.clone();
        company.website_url = self.website_url.clone();
        company.updated_at = Utc::now();
    }
}

/// Outbound projection of a [`Company`] returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyView {
    pub id: i64,
    pub name: String,
    pub exchange: String,
    pub ticker: String,
    pub isin: String,
    pub website_url: Option<String>,
}

impl From<Company> for CompanyView {
    fn from(company: Company) -> Self {
        Self {
            id: company.id,
            name: company.name,
            exchange: company.exchange,
            ticker: company.ticker,
            isin: company.isin,
            website_url: company.website_url,
        }
    }
}

/// Outcome of a create or update request.
///
/// Business-rule rejections (bad ISIN prefix, duplicate ISIN, missing
/// fields, unknown update target) are carried here as values, never as
/// [`StorageError`]s, so the boundary layer can map them to 4xx responses
/// while real infrastructure faults still propagate as errors.
///
/// Both create and update share this shape; the presentation layer maps an
/// accepted outcome to 200/201 with the view body and a rejection to
/// 400/404 with the message.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaveOutcome {
    accepted: bool,
    error_message: Option<String>,
    company: Option<CompanyView>,
}

impl SaveOutcome {
    /// Build an accepted outcome carrying the persisted view
    pub fn accepted(company: CompanyView) -> Self {
        Self {
            accepted: true,
            error_message: None,
            company: Some(company),
        }
    }

    /// Build a rejection carrying a user-facing message
    pub fn rejected(message: &str) -> Self {
        Self {
            accepted: false,
            error_message: Some(message.to_string()),
            company: None,
        }
    }

    /// Whether the operation was applied
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// Rejection message, if any
    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    /// Persisted view, present on accepted outcomes
    pub fn company(&self) -> Option<&CompanyView> {
        self.company.as_ref()
    }

    /// Consume the outcome, yielding the persisted view if accepted
    pub fn into_company(self) -> Option<CompanyView> {
        self.company
    }
}

/// Orchestration layer for company registry operations.
///
/// The only component that combines validation, the uniqueness pre-check,
/// and repository mutation into one business transaction; external callers
/// interact with the registry exclusively through it.
///
/// # Create Flow
///
/// Checks run in a fixed order so the most specific message wins:
///
/// 1. Required fields present → otherwise reject with `MISSING_FIELDS`
/// 2. ISIN starts with two letters → otherwise reject with `ISIN_PREFIX`
/// 3. No company holds the ISIN → otherwise reject with `DUPLICATE_ISIN`
/// 4. Persist, map the entity to a view, accept
///
/// The `exists_by_isin` pre-check is an optimization, not the correctness
/// guarantee: a [`StorageError::DuplicateKey`] raised by the UNIQUE
/// constraint despite the pre-check is treated as the authoritative
/// uniqueness verdict and mapped to the same rejection.
///
/// # Update Flow
///
/// 1. Look up the target by id → otherwise reject with `COMPANY_NOT_FOUND`
/// 2. Re-run the create-time validation rules on the new field values
/// 3. Re-check ISIN uniqueness, excluding the record being updated
/// 4. Overwrite every field except `id`, persist, accept
///
/// # Example
///
/// ```no_run
/// use companyreg_storage::{CompanyInput, CompanyService, Database, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let db = Database::new(DatabaseConfig::new("companyreg.db")).await?;
/// let service = CompanyService::from_pool(db.pool().clone());
///
/// let outcome = service
///     .create(&CompanyInput {
///         name: "Acme".to_string(),
///         exchange: "NYSE".to_string(),
///         ticker: "ACM".to_string(),
///         isin: "US1234567890".to_string(),
///         website_url: None,
///     })
///     .await?;
///
/// match outcome.company() {
///     Some(view) => println!("created company {}", view.id),
///     None => println!("rejected: {}", outcome.error_message().unwrap_or_default()),
/// }
/// # Ok(())
/// # }
/// ```
pub struct CompanyService<R: CompanyRepository> {
    repository: R,
}

impl CompanyService<SqliteCompanyRepository> {
    /// Create a service backed by the SQLite repository
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self::new(SqliteCompanyRepository::new(pool))
    }
}

impl<R: CompanyRepository> CompanyService<R> {
    /// Create a service over any repository implementation
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// Look up a company by id; `None` on a miss.
    pub async fn find_by_id(&self, id: i64) -> StorageResult<Option<CompanyView>> {
        Ok(self.repository.find_by_id(id).await?.map(CompanyView::from))
    }

    /// Look up a company by ISIN; `None` on a miss.
    pub async fn find_by_isin(&self, isin: &str) -> StorageResult<Option<CompanyView>> {
        Ok(self
            .repository
            .find_by_isin(isin)
            .await?
            .map(CompanyView::from))
    }

    /// List all companies.
    pub async fn find_all(&self) -> StorageResult<Vec<CompanyView>> {
        Ok(self
            .repository
            .find_all()
            .await?
            .into_iter()
            .map(CompanyView::from)
            .collect())
    }

    /// Create a new company.
    ///
    /// Business-rule failures come back as rejected [`SaveOutcome`]s;
    /// `Err` is reserved for infrastructure faults.
    pub async fn create(&self, input: &CompanyInput) -> StorageResult<SaveOutcome> {
        if let Some(message) = Self::validate(input) {
            tracing::debug!(isin = %input.isin, %message, "create rejected");
            return Ok(SaveOutcome::rejected(message));
        }

        if self.repository.exists_by_isin(&input.isin).await? {
            tracing::debug!(isin = %input.isin, "create rejected: duplicate ISIN");
            return Ok(SaveOutcome::rejected(RegistryMessages::DUPLICATE_ISIN));
        }

        let mut company = input.to_entity();
        match self.repository.create(&company).await {
            Ok(id) => {
                company.id = id;
                Ok(SaveOutcome::accepted(company.into()))
            }
            // The constraint caught a race the pre-check missed.
            Err(StorageError::DuplicateKey { .. }) => {
                tracing::debug!(isin = %input.isin, "create lost uniqueness race");
                Ok(SaveOutcome::rejected(RegistryMessages::DUPLICATE_ISIN))
            }
            Err(e) => Err(e),
        }
    }

    /// Update an existing company, overwriting every field except `id`.
    pub async fn update(&self, id: i64, input: &CompanyInput) -> StorageResult<SaveOutcome> {
        let Some(mut company) = self.repository.find_by_id(id).await? else {
            tracing::debug!(id, "update rejected: unknown id");
            return Ok(SaveOutcome::rejected(RegistryMessages::COMPANY_NOT_FOUND));
        };

        if let Some(message) = Self::validate(input) {
            tracing::debug!(id, %message, "update rejected");
            return Ok(SaveOutcome::rejected(message));
        }

        if let Some(holder) = self.repository.find_by_isin(&input.isin).await?
            && holder.id != id
        {
            tracing::debug!(id, isin = %input.isin, "update rejected: duplicate ISIN");
            return Ok(SaveOutcome::rejected(RegistryMessages::DUPLICATE_ISIN));
        }

        input.apply_to(&mut company);
        match self.repository.update(&company).await {
            Ok(()) => Ok(SaveOutcome::accepted(company.into())),
            Err(StorageError::DuplicateKey { .. }) => {
                Ok(SaveOutcome::rejected(RegistryMessages::DUPLICATE_ISIN))
            }
            // The row vanished between lookup and write; same verdict as a miss.
            Err(StorageError::NotFound { .. }) => {
                Ok(SaveOutcome::rejected(RegistryMessages::COMPANY_NOT_FOUND))
            }
            Err(e) => Err(e),
        }
    }

    /// First violated business rule, or `None` when the payload is valid.
    /// Field presence is checked before the ISIN prefix so the most
    /// specific message wins.
    fn validate(input: &CompanyInput) -> Option<&'static str> {
        if !input.is_complete() {
            return Some(RegistryMessages::MISSING_FIELDS);
        }
        if !Company::isin_has_letter_prefix(&input.isin) {
            return Some(RegistryMessages::ISIN_PREFIX);
        }
        None
    }
}
