//! Group store unit tests

use tokio_test::assert_ok;

use avdeploy::errors::DeployError;
use avdeploy::filesys::dir::Dir;
use avdeploy::models::group::EnvironmentGroup;
use avdeploy::storage::groups::{group_file_name, GroupStore};

use crate::support::*;

async fn temp_store() -> (Dir, GroupStore) {
    let dir = temp_dir("avdeploy-store").await;
    (dir.clone(), GroupStore::new(dir))
}

#[tokio::test]
async fn test_save_and_list_groups() {
    let (dir, store) = temp_store().await;

    assert_ok!(store.save(&group("prod", &["staging", "prod-east", "prod-west"])).await);
    assert_ok!(store.save(&group("dev", &["dev"])).await);

    let groups = assert_ok!(store.list().await);
    let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, vec!["dev", "prod"]);

    let prod = &groups[1];
    assert_eq!(prod.project, project());
    let envs: Vec<&str> = prod.environments.iter().map(|e| e.name.as_str()).collect();
    assert_eq!(envs, vec!["staging", "prod-east", "prod-west"]);
    assert!(prod.saved_at.is_some());

    remove_dir(&dir).await;
}

#[tokio::test]
async fn test_save_overwrites_group_with_same_name() {
    let (dir, store) = temp_store().await;

    assert_ok!(store.save(&group("prod", &["staging"])).await);
    assert_ok!(store.save(&group("prod", &["prod-east", "prod-west"])).await);

    let groups = assert_ok!(store.list().await);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].environments.len(), 2);

    remove_dir(&dir).await;
}

#[tokio::test]
async fn test_record_is_named_after_group() {
    let (dir, store) = temp_store().await;

    let file = assert_ok!(store.save(&group("web prod", &["staging"])).await);

    assert_eq!(file.path(), dir.path().join(group_file_name("web prod")));
    assert!(file.exists().await);

    remove_dir(&dir).await;
}

#[tokio::test]
async fn test_malformed_record_fails_listing() {
    let (dir, store) = temp_store().await;

    assert_ok!(store.save(&group("prod", &["staging"])).await);
    dir.file("broken.group.json")
        .write_atomic(b"{ not json")
        .await
        .unwrap();

    let err = store.list().await.unwrap_err();
    match err {
        DeployError::PersistenceError(message) => assert!(message.contains("broken.group.json")),
        other => panic!("expected persistence error, got {other:?}"),
    }

    remove_dir(&dir).await;
}

#[tokio::test]
async fn test_list_ignores_other_files() {
    let (dir, store) = temp_store().await;

    dir.file("notes.json").write_atomic(b"{}").await.unwrap();
    dir.file("avdeploy.json").write_atomic(b"{}").await.unwrap();

    assert!(assert_ok!(store.list().await).is_empty());

    remove_dir(&dir).await;
}

#[tokio::test]
async fn test_list_missing_directory_is_empty() {
    let (dir, _) = temp_store().await;
    let store = GroupStore::new(Dir::new(dir.path().join("missing")));

    assert!(assert_ok!(store.list().await).is_empty());

    remove_dir(&dir).await;
}

#[tokio::test]
async fn test_save_rejects_group_without_environments() {
    let (dir, store) = temp_store().await;

    let result = store.save(&group("empty", &[])).await;
    assert!(matches!(result, Err(DeployError::ValidationError(_))));
    assert!(assert_ok!(store.list().await).is_empty());

    remove_dir(&dir).await;
}

#[tokio::test]
async fn test_find_group_by_name() {
    let (dir, store) = temp_store().await;

    assert_ok!(store.save(&group("prod", &["staging"])).await);

    let found = assert_ok!(store.find("prod").await);
    assert_eq!(found.name, "prod");
    assert!(matches!(store.find("qa").await, Err(DeployError::NotFound(_))));

    remove_dir(&dir).await;
}

#[tokio::test]
async fn test_save_replaces_record_of_group_with_same_file_name() {
    let (dir, store) = temp_store().await;

    let first = assert_ok!(store.save(&group("a/b", &["staging"])).await);
    let second = assert_ok!(store.save(&group("a_b", &["prod-east", "prod-west"])).await);
    assert_eq!(first.path(), second.path());

    let groups = assert_ok!(store.list().await);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].name, "a_b");
    assert_eq!(groups[0].environments.len(), 2);
    assert!(matches!(store.find("a/b").await, Err(DeployError::NotFound(_))));

    remove_dir(&dir).await;
}

#[tokio::test]
async fn test_save_rejects_environment_name_used_twice() {
    let (dir, store) = temp_store().await;

    let twice = EnvironmentGroup::new("prod", project(), vec![env(1, "staging"), env(2, "staging")]);
    let result = store.save(&twice).await;

    assert!(matches!(result, Err(DeployError::ValidationError(_))));
    assert!(assert_ok!(store.list().await).is_empty());

    remove_dir(&dir).await;
}

#[tokio::test]
async fn test_hand_edited_record_with_repeated_environment_fails_listing() {
    let (dir, store) = temp_store().await;

    let twice = EnvironmentGroup::new("prod", project(), vec![env(1, "staging"), env(2, "staging")]);
    assert_ok!(dir.file("prod.group.json").write_json(&twice).await);

    match store.list().await.unwrap_err() {
        DeployError::PersistenceError(message) => {
            assert!(message.contains("prod.group.json"));
            assert!(message.contains("staging"));
        }
        other => panic!("expected persistence error, got {other:?}"),
    }
    assert!(store.find("prod").await.is_err());

    remove_dir(&dir).await;
}
