use crate::common;
use crate::setup_test_db_or_skip;
use roomie::application::rooms::delete_user::{DeleteUserCommand, DeleteUserUseCase};
use roomie::domain::rooms::{Room, RoomMember, RoomRepository};
use roomie::infrastructure::repositories::rooms::PostgresRoomRepository;
use roomie::shared::error::ValidationErrorKind;
use serial_test::serial;
use std::sync::Arc;

#[tokio::test]
#[serial]
async fn test_delete_user_success() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let admin_code = common::unique_code("admin");
    let first = common::unique_code("first");
    let target = common::unique_code("target");
    let last = common::unique_code("last");
    let room = common::sample_room(&admin_code, &[first.as_str(), target.as_str(), last.as_str()]);
    common::seed_room(&pool, &room).await;

    let repo = Arc::new(PostgresRoomRepository::new(pool.clone()));
    let use_case = DeleteUserUseCase::new(repo.clone());

    use_case
        .execute(DeleteUserCommand::new(target.clone(), admin_code.clone()))
        .await
        .expect("Failed to delete user");

    let stored = repo
        .find_by_member_auth_code(&admin_code)
        .await
        .unwrap()
        .expect("Room should still exist");
    let codes: Vec<&str> = stored.members().iter().map(|m| m.auth_code.as_str()).collect();
    assert_eq!(codes, vec![admin_code.as_str(), first.as_str(), last.as_str()]);

    // The removed member no longer addresses any room
    assert!(repo.find_by_member_auth_code(&target).await.unwrap().is_none());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_delete_user_twice() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let admin_code = common::unique_code("admin");
    let target = common::unique_code("target");
    common::seed_room(&pool, &common::sample_room(&admin_code, &[target.as_str()])).await;

    let use_case = DeleteUserUseCase::new(Arc::new(PostgresRoomRepository::new(pool.clone())));
    let command = DeleteUserCommand::new(target, admin_code);

    use_case.execute(command.clone()).await.unwrap();
    let err = use_case.execute(command).await.unwrap_err();

    assert_eq!(err.kind, ValidationErrorKind::UserNotFound);
    assert_eq!(err.field, "targetUserCode");

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_delete_user_by_non_admin() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let requester = common::unique_code("requester");
    let target = common::unique_code("target");
    let room = Room::builder("No admins", common::unique_code("room"))
        .member(RoomMember::new("Requester").with_auth_code(&requester))
        .member(RoomMember::new("Target").with_auth_code(&target))
        .build()
        .unwrap();
    common::seed_room(&pool, &room).await;

    let repo = Arc::new(PostgresRoomRepository::new(pool.clone()));
    let use_case = DeleteUserUseCase::new(repo.clone());

    let err = use_case
        .execute(DeleteUserCommand::new(target.clone(), requester))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ValidationErrorKind::NotAuthorized);
    assert!(repo.find_by_member_auth_code(&target).await.unwrap().is_some());

    common::cleanup_test_db(&pool).await;
}

#[tokio::test]
#[serial]
async fn test_delete_user_unknown_admin() {
    let pool = setup_test_db_or_skip!();
    common::cleanup_test_db(&pool).await;

    let use_case = DeleteUserUseCase::new(Arc::new(PostgresRoomRepository::new(pool.clone())));

    let err = use_case
        .execute(DeleteUserCommand::new("user123", "admin123"))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ValidationErrorKind::RoomNotFound);
    assert_eq!(err.field, "adminCode");

    common::cleanup_test_db(&pool).await;
}
