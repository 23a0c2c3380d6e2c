use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Company entity representing one listed company in the registry.
///
/// # Fields
///
/// * `id` - Auto-increment primary key, immutable after creation
/// * `name` - Legal name, required
/// * `exchange` - Exchange the listing trades on, free-form text, required
/// * `ticker` - Exchange ticker symbol, required
/// * `isin` - International Securities Identification Number, unique across
///   the registry; only the two-letter country-code prefix is validated
/// * `website_url` - Optional website, no format validation
/// * `created_at` - Record creation timestamp
/// * `updated_at` - Record last modification timestamp
///
/// # Database Schema
///
/// Maps to the `companies` table. `isin` carries a UNIQUE constraint; that
/// constraint, not the service pre-check, is the race-safe guarantee of
/// ISIN uniqueness.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    /// Auto-increment primary key
    pub id: i64,

    /// Legal company name
    pub name: String,

    /// Exchange the company is listed on (free-form, no enumerated set)
    pub exchange: String,

    /// Ticker symbol
    pub ticker: String,

    /// ISIN (natural key, unique)
    pub isin: String,

    /// Company website, optional
    pub website_url: Option<String>,

    /// Record creation timestamp
    pub created_at: DateTime<Utc>,

    /// Record last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Company {
    /// Check whether an ISIN string satisfies the country-code prefix rule:
    /// the first two characters must both be ASCII letters.
    ///
    /// This is a lightweight approximation of the ISO 6166 country prefix,
    /// not a full checksum validation. Strings shorter than two characters
    /// fail the rule.
    ///
    /// # Examples
    ///
    /// ```
    /// use companyreg_storage::models::Company;
    ///
    /// assert!(Company::isin_has_letter_prefix("US0378331005"));
    /// assert!(!Company::isin_has_letter_prefix("1AABCDEFG"));
    /// assert!(!Company::isin_has_letter_prefix("U"));
    /// ```
    pub fn isin_has_letter_prefix(isin: &str) -> bool {
        let mut chars = isin.chars();
        matches!(
            (chars.next(), chars.next()),
            (Some(a), Some(b)) if a.is_ascii_alphabetic() && b.is_ascii_alphabetic()
        )
    }
}
