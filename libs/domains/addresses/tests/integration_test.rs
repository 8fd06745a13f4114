//! Integration tests for the addresses domain
//!
//! These run against a real PostgreSQL via testcontainers to check:
//! - listing is per user and newest first
//! - switching the default leaves exactly one default address
//! - partial updates only touch the given columns

use axum_helpers::{AuthUser, Role};
use domain_addresses::*;
use test_utils::{TestDatabase, assertions::*};
use uuid::Uuid;

fn customer(user_id: Uuid) -> AuthUser {
    AuthUser {
        user_id,
        email: "owner@example.com".into(),
        role: Role::Customer,
    }
}

fn new_address(line: &str) -> CreateAddress {
    CreateAddress {
        address_line: line.to_string(),
        city: "Springfield".to_string(),
        state: "IL".to_string(),
        postal_code: "62701".to_string(),
        phone: "5551234567".to_string(),
    }
}

fn service(db: &TestDatabase) -> AddressService<PgAddressRepository> {
    AddressService::new(PgAddressRepository::new(db.connection()), db.connection())
}

#[tokio::test]
async fn test_list_is_scoped_and_newest_first() {
    let db = TestDatabase::new().await;
    let owner = db.create_test_user().await;
    let other = db.create_test_user().await;
    let service = service(&db);

    let first = service
        .create_address(&customer(owner), new_address("1 First St"))
        .await
        .unwrap();
    let second = service
        .create_address(&customer(owner), new_address("2 Second St"))
        .await
        .unwrap();
    service
        .create_address(&customer(other), new_address("3 Elsewhere"))
        .await
        .unwrap();

    let listed = service.list_addresses(&customer(owner), owner).await.unwrap();
    assert_eq!(listed.len(), 2);
    assert_uuid_eq(listed[0].id, second.id, "newest address first");
    assert_uuid_eq(listed[1].id, first.id, "oldest address last");
    assert!(listed.iter().all(|a| !a.is_default));
}

#[tokio::test]
async fn test_switching_default_keeps_one() {
    let db = TestDatabase::new().await;
    let owner = db.create_test_user().await;
    let service = service(&db);
    let me = customer(owner);

    let home = service.create_address(&me, new_address("1 Home Rd")).await.unwrap();
    let work = service.create_address(&me, new_address("2 Work Ave")).await.unwrap();

    assert!(service.set_default(&me, home.id).await.unwrap().is_default);
    let promoted = service.set_default(&me, work.id).await.unwrap();
    assert!(promoted.is_default);

    // The returned row is the updated one, not the pre-update read
    let stored = service.get_address(&me, work.id).await.unwrap();
    assert_eq!(promoted, stored);
    assert!(promoted.updated_at >= work.updated_at);

    let listed = service.list_addresses(&me, owner).await.unwrap();
    let defaults: Vec<_> = listed.iter().filter(|a| a.is_default).collect();
    assert_eq!(defaults.len(), 1);
    assert_uuid_eq(defaults[0].id, work.id, "default address");
}

#[tokio::test]
async fn test_partial_update_keeps_other_fields() {
    let db = TestDatabase::new().await;
    let owner = db.create_test_user().await;
    let service = service(&db);
    let me = customer(owner);

    let created = service.create_address(&me, new_address("1 Old St")).await.unwrap();
    let updated = service
        .update_address(
            &me,
            created.id,
            UpdateAddress {
                city: Some("Shelbyville".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.city, "Shelbyville");
    assert_eq!(updated.address_line, "1 Old St");
    assert_eq!(updated.postal_code, "62701");

    let fetched = service.get_address(&me, created.id).await.unwrap();
    assert_eq!(fetched.city, "Shelbyville");
}

#[tokio::test]
async fn test_delete_then_get_is_not_found() {
    let db = TestDatabase::new().await;
    let owner = db.create_test_user().await;
    let service = service(&db);
    let me = customer(owner);

    let created = service.create_address(&me, new_address("1 Gone St")).await.unwrap();
    service.delete_address(&me, created.id).await.unwrap();

    let result = service.get_address(&me, created.id).await;
    assert!(matches!(result, Err(AddressError::NotFound)));
    assert_eq!(db.count("addresses").await, 0);
}

#[tokio::test]
async fn test_repository_rejects_foreign_default() {
    let db = TestDatabase::new().await;
    let owner = db.create_test_user().await;
    let stranger = db.create_test_user().await;
    let address_id = db.create_test_address(owner).await;
    let repo = PgAddressRepository::new(db.connection());

    let fetched = assert_some(repo.get_by_id(address_id).await.unwrap(), "fixture address");
    assert_uuid_eq(fetched.user_id, owner, "address owner");

    let result = service(&db).set_default(&customer(stranger), address_id).await;
    assert!(matches!(result, Err(AddressError::Forbidden)));
}
