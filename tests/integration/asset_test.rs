//! Integration tests for folder and file operations.

mod helpers;

use helpers::TestApp;
use medialib_core::ErrorKind;
use medialib_entity::asset::{AssetKind, ParentRef};
use medialib_service::RequestContext;

#[tokio::test]
async fn test_move_rejects_self_and_descendants() {
    let app = TestApp::new();
    let a = app.folder("A", ParentRef::Root).await;
    let b = app.folder("B", a.id.into()).await;
    let c = app.folder("C", b.id.into()).await;

    let err = app
        .store
        .move_asset(&app.admin, a.id, a.id.into())
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));

    let err = app
        .store
        .move_asset(&app.admin, a.id, c.id.into())
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));

    // Tree is unchanged after the refusal.
    assert_eq!(app.names(ParentRef::Root).await, vec!["A"]);
    assert_eq!(app.names(b.id.into()).await, vec!["C"]);

    // Moving the other way is fine.
    app.store
        .move_asset(&app.admin, c.id, ParentRef::Root)
        .await
        .unwrap();
    assert_eq!(app.names(b.id.into()).await, Vec::<String>::new());
}

#[tokio::test]
async fn test_move_into_a_file_is_refused() {
    let app = TestApp::new();
    let folder = app.folder("Folder", ParentRef::Root).await;
    let file = app.file("a.jpg", ParentRef::Root).await;

    let err = app
        .store
        .move_asset(&app.admin, folder.id, file.id.into())
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
}

#[tokio::test]
async fn test_rename_changes_only_the_name() {
    let app = TestApp::new();
    let folder = app.folder("Events", ParentRef::Root).await;
    let file = app.file("photo.jpg", folder.id.into()).await;

    let renamed = app
        .store
        .rename(&app.admin, file.id, "new name")
        .await
        .unwrap();

    assert_eq!(renamed.name, "new name");
    assert_eq!(renamed.url, file.url);
    assert_eq!(renamed.parent_id, file.parent_id);
    assert_eq!(renamed.created_at, file.created_at);
    assert_eq!(renamed.kind, AssetKind::File);
}

#[tokio::test]
async fn test_rename_rejects_blank_names() {
    let app = TestApp::new();
    let folder = app.folder("Events", ParentRef::Root).await;

    let err = app
        .store
        .rename(&app.admin, folder.id, "   ")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));
    assert_eq!(app.names(ParentRef::Root).await, vec!["Events"]);
}

#[tokio::test]
async fn test_listing_puts_folders_first() {
    let app = TestApp::new();
    app.file("old.jpg", ParentRef::Root).await;
    app.folder("Folder", ParentRef::Root).await;
    app.file("new.jpg", ParentRef::Root).await;

    let names = app.names(ParentRef::Root).await;
    assert_eq!(names[0], "Folder");
    assert_eq!(names.len(), 3);
}

#[tokio::test]
async fn test_search_spans_folders_and_ignores_case() {
    let app = TestApp::new();
    let events = app.folder("Events", ParentRef::Root).await;
    app.file("Coronation.jpg", events.id.into()).await;
    app.file("battle.png", ParentRef::Root).await;

    let hits = app.store.search_all(&app.admin, "corON").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Coronation.jpg");

    let none = app.store.search_all(&app.admin, "").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn test_resolve_folder_by_path_reuses_existing_folders() {
    let app = TestApp::new();
    let first = app
        .store
        .resolve_folder_by_path(&app.admin, "/2024/Events/")
        .await
        .unwrap();
    let second = app
        .store
        .resolve_folder_by_path(&app.admin, "2024/Events")
        .await
        .unwrap();

    assert_eq!(first, second);
    assert!(!first.is_root());
    assert_eq!(app.names(ParentRef::Root).await, vec!["2024"]);
}

#[tokio::test]
async fn test_viewer_cannot_mutate() {
    let app = TestApp::new();
    let viewer = RequestContext::viewer("guest");
    let folder = app.folder("Events", ParentRef::Root).await;

    let err = app
        .store
        .create_folder(&viewer, "Other", ParentRef::Root)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Permission));

    let err = app
        .store
        .rename(&viewer, folder.id, "Renamed")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Permission));

    let err = app.store.soft_delete(&viewer, folder.id).await.unwrap_err();
    assert!(err.is(ErrorKind::Permission));

    // Reading is allowed.
    let listed = app.store.list(&viewer, ParentRef::Root).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Events");
}

#[tokio::test]
async fn test_operations_on_missing_ids_are_not_found() {
    let app = TestApp::new();
    let folder = app.folder("Events", ParentRef::Root).await;
    app.store.soft_delete(&app.admin, folder.id).await.unwrap();

    let err = app
        .store
        .rename(&app.admin, folder.id, "Again")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    let err = app
        .store
        .list(&app.admin, folder.id.into())
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}

#[tokio::test]
async fn test_concurrent_mutation_of_same_asset_conflicts() {
    let app = TestApp::new();
    let file = app.file("photo.jpg", ParentRef::Root).await;

    app.storage.hold_deletes();
    let store = app.store.clone();
    let ctx = app.admin.clone();
    let id = file.id;
    let purge = tokio::spawn(async move { store.hard_delete(&ctx, id).await });

    app.storage.delete_started().await;
    let err = app
        .store
        .rename(&app.admin, file.id, "other.jpg")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Conflict));

    app.storage.release();
    let removed = purge.await.unwrap().unwrap();
    assert_eq!(removed, vec![file.id]);

    let err = app.store.get_any(&app.admin, file.id).await.unwrap_err();
    assert!(err.is(ErrorKind::NotFound));
}
