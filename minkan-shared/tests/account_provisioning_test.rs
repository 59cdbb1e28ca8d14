/// Account provisioning spans three tables (users, organizations,
/// memberships) and must commit or roll back as a unit: a user row with
/// no organization can never log in, so it must not survive a failed
/// registration.
///
/// These tests need a real database and are ignored by default:
///
/// ```bash
/// DATABASE_URL=postgresql://localhost/minkan_test cargo test -- --ignored
/// ```

use minkan_shared::db;
use minkan_shared::models::{
    membership::{CreateMembership, Membership, MembershipRole},
    organization::{CreateOrganization, Organization},
    user::{CreateUser, User},
};
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

async fn test_pool() -> sqlx::PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must point at a test database");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("connect to test database");

    db::run_migrations(&pool).await.expect("run migrations");
    pool
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database via DATABASE_URL"]
async fn test_account_rows_roll_back_together() {
    let pool = test_pool().await;
    let email = format!("rollback-{}@example.com", Uuid::new_v4());

    let mut tx = pool.begin().await.unwrap();

    let user = User::create(
        &mut *tx,
        CreateUser {
            email: email.clone(),
            password_hash: "$argon2id$placeholder".to_string(),
            name: None,
        },
    )
    .await
    .unwrap();

    let org = Organization::create(
        &mut *tx,
        CreateOrganization {
            name: "Rollback Workspace".to_string(),
            image_url: None,
        },
    )
    .await
    .unwrap();

    Membership::create(
        &mut *tx,
        CreateMembership {
            org_id: org.id,
            user_id: user.id,
            role: MembershipRole::Owner,
        },
    )
    .await
    .unwrap();

    tx.rollback().await.unwrap();

    // None of the three writes survived; the email is free to register.
    assert!(User::find_by_email(&pool, &email).await.unwrap().is_none());
    assert!(Membership::find(&pool, org.id, user.id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
#[ignore = "requires a PostgreSQL test database via DATABASE_URL"]
async fn test_account_rows_commit_together() {
    let pool = test_pool().await;
    let email = format!("commit-{}@example.com", Uuid::new_v4());

    let mut tx = pool.begin().await.unwrap();

    let user = User::create(
        &mut *tx,
        CreateUser {
            email: email.clone(),
            password_hash: "$argon2id$placeholder".to_string(),
            name: Some("Ada".to_string()),
        },
    )
    .await
    .unwrap();

    let org = Organization::create(
        &mut *tx,
        CreateOrganization {
            name: "Ada's Workspace".to_string(),
            image_url: None,
        },
    )
    .await
    .unwrap();

    Membership::create(
        &mut *tx,
        CreateMembership {
            org_id: org.id,
            user_id: user.id,
            role: MembershipRole::Owner,
        },
    )
    .await
    .unwrap();

    tx.commit().await.unwrap();

    let found = User::find_by_email(&pool, &email)
        .await
        .unwrap()
        .expect("user committed");
    let membership = Membership::find(&pool, org.id, found.id)
        .await
        .unwrap()
        .expect("membership committed");
    assert_eq!(membership.role, "owner");
}
