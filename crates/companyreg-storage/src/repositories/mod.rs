pub mod company;

pub use company::{CompanyRepository, SqliteCompanyRepository};
