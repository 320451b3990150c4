//! Integration tests for the Categories domain
//!
//! These tests use real MongoDB via testcontainers to ensure:
//! - Documents round-trip through the driver
//! - Name search matches case-insensitively
//! - Updates and deletes behave against real data
//!
//! Run with `cargo test -- --ignored` when Docker is available.

use domain_categories::*;
use test_utils::{TestDataBuilder, TestMongo, assertions::*};
use uuid::Uuid;

#[tokio::test]
#[ignore] // Requires Docker
async fn test_create_and_get_category() {
    let mongo = TestMongo::new().await;
    let repo = MongoCategoryRepository::new(mongo.database());
    let builder = TestDataBuilder::from_test_name("create_and_get");

    let created = repo
        .create(Category::new(CreateCategory {
            name: builder.name("category", "work"),
            color: "#FF0000".to_string(),
        }))
        .await
        .unwrap();

    let retrieved = repo.get_by_id(created.id).await.unwrap();
    let retrieved = assert_some(retrieved, "category should exist");

    assert_uuid_eq(retrieved.id, created.id, "category id");
    assert_eq!(retrieved.name, created.name);
    assert_eq!(retrieved.color, "#FF0000");
    assert_eq!(retrieved.created_at, created.created_at);
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_name_filter_matches_case_insensitively() {
    let mongo = TestMongo::new().await;
    let repo = MongoCategoryRepository::new(mongo.database());

    for name in ["Work", "Workouts", "Personal"] {
        repo.create(Category::new(CreateCategory {
            name: name.to_string(),
            color: "#123456".to_string(),
        }))
        .await
        .unwrap();
    }

    let all = repo.list(CategoryFilter::default()).await.unwrap();
    assert_eq!(all.len(), 3);

    let filtered = repo
        .list(CategoryFilter {
            name: Some("work".to_string()),
        })
        .await
        .unwrap();
    assert_eq!(filtered.len(), 2, "should match Work and Workouts");
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_and_delete_round_trip() {
    let mongo = TestMongo::new().await;
    let service = CategoryService::new(MongoCategoryRepository::new(mongo.database()));
    let builder = TestDataBuilder::from_test_name("update_delete");

    let created = service
        .create_category(CreateCategory {
            name: builder.name("category", "original"),
            color: "#FF0000".to_string(),
        })
        .await
        .unwrap();

    let updated = service
        .update_category(
            created.id,
            UpdateCategory {
                name: Some(builder.name("category", "renamed")),
                color: Some("#00FF00".to_string()),
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.name, builder.name("category", "renamed"));
    assert_eq!(updated.color, "#00FF00");
    assert!(updated.updated_at >= created.updated_at);

    service.delete_category(created.id).await.unwrap();

    let gone = service.get_category(created.id).await;
    assert!(matches!(gone, Err(CategoryError::NotFound(_))));

    let again = service.delete_category(created.id).await;
    assert!(matches!(again, Err(CategoryError::NotFound(_))));
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_get_unknown_category_not_found() {
    let mongo = TestMongo::new().await;
    let service = CategoryService::new(MongoCategoryRepository::new(mongo.database()));

    let result = service.get_category(Uuid::now_v7()).await;
    assert!(matches!(result, Err(CategoryError::NotFound(_))));
}
