//! Integration tests for the company registry storage layer.
//!
//! These run against an in-memory (or temp-file) SQLite database and
//! exercise the full stack: pool, migrations, repository, and service.
//!
//! Run with: cargo test --package companyreg-storage --test integration_registry

use std::sync::Arc;
use tokio::sync::Barrier;

use companyreg_storage::{
    CompanyInput, CompanyService, Database, DatabaseConfig, RegistryMessages,
};

fn sample_input(isin: &str) -> CompanyInput {
    CompanyInput {
        name: "Acme".to_string(),
        exchange: "NYSE".to_string(),
        ticker: "ACM".to_string(),
        isin: isin.to_string(),
        website_url: Some("https://acme.example".to_string()),
    }
}

#[tokio::test]
async fn test_in_memory_database() {
    let db = Database::in_memory().await.unwrap();
    db.health_check().await.unwrap();
    db.close().await;
}

#[tokio::test]
async fn test_migration_idempotency() {
    let db = Database::in_memory().await.unwrap();

    db.migrate().await.unwrap();
    db.migrate().await.unwrap();

    let result: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='companies'",
    )
    .fetch_one(db.pool())
    .await
    .unwrap();

    assert_eq!(result.0, 1);

    db.close().await;
}

#[tokio::test]
async fn test_seed_data_is_present() {
    let db = Database::in_memory().await.unwrap();
    let service = CompanyService::from_pool(db.pool().clone());

    let apple = service.find_by_isin("US0378331005").await.unwrap().unwrap();
    assert_eq!(apple.name, "Apple Inc.");
    assert_eq!(apple.ticker, "AAPL");

    let all = service.find_all().await.unwrap();
    assert!(all.len() >= 5);

    db.close().await;
}

#[tokio::test]
async fn test_file_backed_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("registry.db");

    let config = DatabaseConfig::new(path.to_str().unwrap()).max_connections(2);
    let db = Database::new(config).await.unwrap();

    let service = CompanyService::from_pool(db.pool().clone());
    let outcome = service.create(&sample_input("CH0000000001")).await.unwrap();
    assert!(outcome.is_accepted());

    db.close().await;
}

#[tokio::test]
async fn test_create_then_read_round_trip() {
    let db = Database::in_memory().await.unwrap();
    let service = CompanyService::from_pool(db.pool().clone());

    let input = sample_input("US1234567890");
    let outcome = service.create(&input).await.unwrap();
    assert!(outcome.is_accepted());
    let created = outcome.into_company().unwrap();

    let fetched = service.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
    assert_eq!(fetched.name, input.name);
    assert_eq!(fetched.exchange, input.exchange);
    assert_eq!(fetched.ticker, input.ticker);
    assert_eq!(fetched.isin, input.isin);
    assert_eq!(fetched.website_url, input.website_url);

    db.close().await;
}

#[tokio::test]
async fn test_duplicate_create_against_real_constraint() {
    let db = Database::in_memory().await.unwrap();
    let service = CompanyService::from_pool(db.pool().clone());

    let first = service.create(&sample_input("US1234567890")).await.unwrap();
    assert!(first.is_accepted());

    let mut other = sample_input("US1234567890");
    other.name = "Other Corp".to_string();
    let second = service.create(&other).await.unwrap();

    assert!(!second.is_accepted());
    assert_eq!(
        second.error_message(),
        Some(RegistryMessages::DUPLICATE_ISIN)
    );

    db.close().await;
}

#[tokio::test]
async fn test_update_round_trip() {
    let db = Database::in_memory().await.unwrap();
    let service = CompanyService::from_pool(db.pool().clone());

    let created = service
        .create(&sample_input("US1234567890"))
        .await
        .unwrap()
        .into_company()
        .unwrap();

    let mut replacement = sample_input("US1234567890");
    replacement.name = "Acme Corp".to_string();
    replacement.website_url = None;
    let outcome = service.update(created.id, &replacement).await.unwrap();
    assert!(outcome.is_accepted());

    let fetched = service.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(fetched.name, "Acme Corp");
    assert_eq!(fetched.website_url, None);

    db.close().await;
}

#[tokio::test]
async fn test_update_unknown_id_is_rejected() {
    let db = Database::in_memory().await.unwrap();
    let service = CompanyService::from_pool(db.pool().clone());

    let outcome = service
        .update(999_999, &sample_input("US1234567890"))
        .await
        .unwrap();

    assert!(!outcome.is_accepted());
    assert_eq!(
        outcome.error_message(),
        Some(RegistryMessages::COMPANY_NOT_FOUND)
    );

    db.close().await;
}

#[tokio::test]
async fn test_concurrent_creates_single_winner() {
    let db = Database::in_memory().await.unwrap();

    const NUM_CONCURRENT_TASKS: usize = 5;
    let barrier = Arc::new(Barrier::new(NUM_CONCURRENT_TASKS));

    let mut handles = vec![];

    for i in 0..NUM_CONCURRENT_TASKS {
        let db_clone = db.clone();
        let barrier_clone = barrier.clone();

        let handle = tokio::spawn(async move {
            barrier_clone.wait().await;

            let service = CompanyService::from_pool(db_clone.pool().clone());
            let mut input = sample_input("FI0000000001");
            input.name = format!("Contender {}", i);
            service.create(&input).await.unwrap()
        });

        handles.push(handle);
    }

    let outcomes: Vec<_> = futures::future::join_all(handles).await;

    let accepted = outcomes
        .into_iter()
        .map(|r| r.unwrap())
        .filter(|o| o.is_accepted())
        .count();

    // Whether the pre-check or the UNIQUE constraint decides, exactly one
    // create may win.
    assert_eq!(accepted, 1);

    db.close().await;
}
