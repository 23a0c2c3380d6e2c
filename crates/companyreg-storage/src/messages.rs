//! User-facing messages for registry operations.
//!
//! The create/update rejection strings are part of the external contract:
//! the presentation layer returns them verbatim in 400 responses, and the
//! client displays them as-is. Change them and you change the API.

/// Message constants returned inside [`SaveOutcome`](crate::service::SaveOutcome)
/// rejections.
pub struct RegistryMessages;

impl RegistryMessages {
    /// The first two characters of the submitted ISIN are not both letters.
    pub const ISIN_PREFIX: &'static str = "ISIN must start with two letters.";

    /// Another company already holds the submitted ISIN.
    pub const DUPLICATE_ISIN: &'static str = "Company with this ISIN already exists.";

    /// One of the required fields (name, exchange, ticker, ISIN) is empty.
    pub const MISSING_FIELDS: &'static str = "Name, exchange, ticker and ISIN are required.";

    /// Update target id does not exist.
    pub const COMPANY_NOT_FOUND: &'static str = "Company not found.";
}
