#![allow(async_fn_in_trait)]

use crate::error::{StorageError, StorageResult};
use crate::models::Company;
use sqlx::SqlitePool;

/// Repository trait for Company entity operations.
///
/// Defines the persistence contract with no business logic: lookups return
/// `None` on a miss rather than an error, and all mutations commit on
/// success. The service layer owns validation and uniqueness pre-checks;
/// implementations only translate storage-level constraint violations into
/// [`StorageError::DuplicateKey`] / [`StorageError::NotFound`].
///
/// # Implementation Note
///
/// This trait uses native async trait methods (Edition 2024 feature), so
/// mock implementations for unit tests need no extra crates.
pub trait CompanyRepository: Send + Sync {
    /// Find a company by its id
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Company>>;

    /// Find a company by its ISIN (exact match)
    async fn find_by_isin(&self, isin: &str) -> StorageResult<Option<Company>>;

    /// Get all companies; no ordering is guaranteed
    async fn find_all(&self) -> StorageResult<Vec<Company>>;

    /// Insert a new company, returning the store-assigned id
    async fn create(&self, company: &Company) -> StorageResult<i64>;

    /// Replace all mutable fields of an existing company, matched by id
    async fn update(&self, company: &Company) -> StorageResult<()>;

    /// Check if a company with the given ISIN already exists
    async fn exists_by_isin(&self, isin: &str) -> StorageResult<bool>;
}

/// SQLite implementation of CompanyRepository
pub struct SqliteCompanyRepository {
    pool: SqlitePool,
}

impl SqliteCompanyRepository {
    /// Create a new SQLite company repository
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Translate a UNIQUE-constraint violation on `isin` into a
    /// [`StorageError::DuplicateKey`]; everything else passes through.
    fn map_constraint(err: sqlx::Error, isin: &str) -> StorageError {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return StorageError::DuplicateKey {
                entity_type: "Company".to_string(),
                field: "isin".to_string(),
                value: isin.to_string(),
            };
        }
        StorageError::Database(err)
    }
}

impl CompanyRepository for SqliteCompanyRepository {
    async fn find_by_id(&self, id: i64) -> StorageResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, exchange, ticker, isin, website_url,
                   created_at, updated_at
            FROM companies
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    async fn find_by_isin(&self, isin: &str) -> StorageResult<Option<Company>> {
        let company = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, exchange, ticker, isin, website_url,
                   created_at, updated_at
            FROM companies
            WHERE isin = ?
            "#,
        )
        .bind(isin)
        .fetch_optional(&self.pool)
        .await?;

        Ok(company)
    }

    async fn find_all(&self) -> StorageResult<Vec<Company>> {
        let companies = sqlx::query_as::<_, Company>(
            r#"
            SELECT id, name, exchange, ticker, isin, website_url,
                   created_at, updated_at
            FROM companies
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(companies)
    }

    async fn create(&self, company: &Company) -> StorageResult<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO companies (name, exchange, ticker, isin, website_url)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&company.name)
        .bind(&company.exchange)
        .bind(&company.ticker)
        .bind(&company.isin)
        .bind(&company.website_url)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_constraint(e, &company.isin))?;

        Ok(result.last_insert_rowid())
    }

    async fn update(&self, company: &Company) -> StorageResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE companies
            SET name = ?, exchange = ?, ticker = ?, isin = ?,
                website_url = ?, updated_at = datetime('now')
            WHERE id = ?
            "#,
        )
        .bind(&company.name)
        .bind(&company.exchange)
        .bind(&company.ticker)
        .bind(&company.isin)
        .bind(&company.website_url)
        .bind(company.id)
        .execute(&self.pool)
        .await
        .map_err(|e| Self::map_constraint(e, &company.isin))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound {
                entity_type: "Company".to_string(),
                field: "id".to_string(),
                value: company.id.to_string(),
            });
        }

        Ok(())
    }

    async fn exists_by_isin(&self, isin: &str) -> StorageResult<bool> {
        let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM companies WHERE isin = ?")
            .bind(isin)
            .fetch_one(&self.pool)
            .await?;

        Ok(result.0 > 0)
    }
}
