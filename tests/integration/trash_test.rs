//! Integration tests for the trash lifecycle and permanent deletion.

mod helpers;

use helpers::TestApp;
use medialib_core::ErrorKind;
use medialib_entity::asset::ParentRef;
use tokio_util::sync::CancellationToken;

#[tokio::test]
async fn test_soft_delete_then_restore_round_trip() {
    let app = TestApp::new();
    let folder = app.folder("Events", ParentRef::Root).await;
    let file = app
        .store
        .upload_file(
            &app.admin,
            bytes::Bytes::from_static(b"jpeg"),
            folder.id.into(),
            "photo.jpg",
            Some("image/jpeg"),
            Some("Archive A"),
        )
        .await
        .unwrap();

    app.store.soft_delete(&app.admin, file.id).await.unwrap();
    let restored = app.store.restore(&app.admin, file.id).await.unwrap();

    assert_eq!(restored.name, file.name);
    assert_eq!(restored.parent_id, file.parent_id);
    assert_eq!(restored.url, file.url);
    assert_eq!(restored.credit, file.credit);
    assert!(restored.is_active());
    assert_eq!(app.names(folder.id.into()).await, vec!["photo.jpg"]);
}

#[tokio::test]
async fn test_trashed_assets_leave_listings_and_search() {
    let app = TestApp::new();
    let file = app.file("coronation.jpg", ParentRef::Root).await;
    app.store.soft_delete(&app.admin, file.id).await.unwrap();

    assert!(app.names(ParentRef::Root).await.is_empty());
    let hits = app.store.search_all(&app.admin, "coronation").await.unwrap();
    assert!(hits.is_empty());

    let trash = app.store.list_trash(&app.admin).await.unwrap();
    assert_eq!(trash.len(), 1);
    assert_eq!(trash[0].id, file.id);
}

#[tokio::test]
async fn test_soft_delete_twice_trashes_once() {
    let app = TestApp::new();
    let file = app.file("a.jpg", ParentRef::Root).await;

    let first = app.store.soft_delete(&app.admin, file.id).await.unwrap();
    let second = app.store.soft_delete(&app.admin, file.id).await.unwrap();

    assert_eq!(first.deleted_at, second.deleted_at);
    assert_eq!(app.store.list_trash(&app.admin).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_trashing_a_folder_keeps_children_state() {
    let app = TestApp::new();
    let folder = app.folder("Events", ParentRef::Root).await;
    let child = app.file("a.jpg", folder.id.into()).await;

    app.store.soft_delete(&app.admin, folder.id).await.unwrap();
    let trash = app.store.list_trash(&app.admin).await.unwrap();
    assert_eq!(trash.len(), 1);

    app.store.restore(&app.admin, folder.id).await.unwrap();
    assert_eq!(app.names(folder.id.into()).await, vec!["a.jpg"]);
    assert!(app.store.get(&app.admin, child.id).await.is_ok());
}

#[tokio::test]
async fn test_hard_delete_cascades_through_subfolders() {
    let app = TestApp::new();
    let f = app.folder("F", ParentRef::Root).await;
    let f1 = app.file("f1.jpg", f.id.into()).await;
    let f2 = app.file("f2.jpg", f.id.into()).await;
    let g = app.folder("G", f.id.into()).await;
    let g1 = app.file("g1.jpg", g.id.into()).await;
    app.store.soft_delete(&app.admin, g1.id).await.unwrap();
    app.store.soft_delete(&app.admin, f.id).await.unwrap();
    assert_eq!(app.storage.blob_count().await, 3);

    let removed = app.store.hard_delete(&app.admin, f.id).await.unwrap();

    assert_eq!(removed.len(), 5);
    assert_eq!(removed.last(), Some(&f.id));
    for id in [f.id, f1.id, f2.id, g.id, g1.id] {
        let err = app.store.get_any(&app.admin, id).await.unwrap_err();
        assert!(err.is(ErrorKind::NotFound));
    }
    assert_eq!(app.storage.blob_count().await, 0);
    assert!(app.store.list_trash(&app.admin).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_blob_delete_keeps_the_folder() {
    let app = TestApp::new();
    let f = app.folder("F", ParentRef::Root).await;
    let ok = app.file("ok.jpg", f.id.into()).await;
    let stuck = app.file("stuck.jpg", f.id.into()).await;
    let stuck_url = stuck.url.clone().unwrap();
    app.storage.fail_delete_of(&stuck_url);

    let err = app.store.hard_delete(&app.admin, f.id).await.unwrap_err();

    assert!(err.is(ErrorKind::Deletion));
    assert!(err.message.contains(&stuck.id.to_string()));
    assert!(app.store.get_any(&app.admin, f.id).await.is_ok());
    assert!(app.store.get_any(&app.admin, stuck.id).await.is_ok());
    assert!(app.storage.holds(&stuck_url).await);
    // Whatever was removed before the failure is fully gone, row and blob.
    if app.store.get_any(&app.admin, ok.id).await.is_err() {
        assert!(!app.storage.holds(ok.url.as_deref().unwrap()).await);
    }
}

#[tokio::test]
async fn test_cancelled_cascade_keeps_the_folder() {
    let app = TestApp::new();
    let f = app.folder("F", ParentRef::Root).await;
    app.file("a.jpg", f.id.into()).await;
    app.file("b.jpg", f.id.into()).await;
    app.file("c.jpg", f.id.into()).await;

    let token = CancellationToken::new();
    app.storage.cancel_after_deletes(1, token.clone());

    let err = app
        .store
        .hard_delete_with_cancel(&app.admin, f.id, &token)
        .await
        .unwrap_err();

    assert!(err.is(ErrorKind::Cancelled));
    assert!(app.store.get_any(&app.admin, f.id).await.is_ok());
    let remaining = app.store.list_all_descendants(f.id).await.unwrap();
    assert_eq!(remaining.len(), 2);
    assert_eq!(app.storage.blob_count().await, 2);
}

#[tokio::test]
async fn test_hard_delete_keeps_blob_shared_with_another_row() {
    let app = TestApp::new();
    let original = app.file("a.jpg", ParentRef::Root).await;
    let url = original.url.clone().unwrap();
    let copy = app
        .repos
        .assets
        .create(&medialib_entity::asset::CreateAsset::file(
            "copy.jpg",
            ParentRef::Root,
            url.clone(),
            None,
        ))
        .await
        .unwrap();

    app.store.hard_delete(&app.admin, original.id).await.unwrap();

    assert!(app.storage.holds(&url).await);
    assert!(app.store.get(&app.admin, copy.id).await.is_ok());
}

#[tokio::test]
async fn test_restore_into_purged_parent_lands_at_root() {
    let app = TestApp::new();
    let folder = app.folder("Events", ParentRef::Root).await;
    let file = app.file("a.jpg", folder.id.into()).await;
    app.store.soft_delete(&app.admin, file.id).await.unwrap();

    // The folder row disappears out from under the trashed file.
    app.repos.assets.delete(folder.id).await.unwrap();

    let restored = app.store.restore(&app.admin, file.id).await.unwrap();
    assert!(restored.parent().is_root());
    assert_eq!(app.names(ParentRef::Root).await, vec!["a.jpg"]);
}

#[tokio::test]
async fn test_empty_trash_reports_every_removed_row() {
    let app = TestApp::new();
    let folder = app.folder("Old", ParentRef::Root).await;
    app.file("inside.jpg", folder.id.into()).await;
    let loose = app.file("loose.jpg", ParentRef::Root).await;
    let kept = app.file("kept.jpg", ParentRef::Root).await;
    app.store.soft_delete(&app.admin, folder.id).await.unwrap();
    app.store.soft_delete(&app.admin, loose.id).await.unwrap();

    let report = app.store.empty_trash(&app.admin).await.unwrap();

    assert_eq!(report.purged.len(), 3);
    assert!(report.failed.is_empty());
    assert!(app.store.list_trash(&app.admin).await.unwrap().is_empty());
    assert_eq!(app.names(ParentRef::Root).await, vec![kept.name]);
    assert_eq!(app.storage.blob_count().await, 1);
}

#[tokio::test]
async fn test_empty_trash_counts_rows_removed_before_a_failure() {
    let app = TestApp::new();
    let folder = app.folder("Old", ParentRef::Root).await;
    let ok = app.file("ok.jpg", folder.id.into()).await;
    let stuck = app.file("stuck.jpg", folder.id.into()).await;
    app.storage.fail_delete_of(stuck.url.as_deref().unwrap());
    app.store.soft_delete(&app.admin, folder.id).await.unwrap();

    let report = app.store.empty_trash(&app.admin).await.unwrap();

    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, folder.id);
    assert!(!report.purged.contains(&stuck.id));
    assert!(!report.purged.contains(&folder.id));
    // The older child goes first and is already gone when the newer one fails.
    assert!(app.store.get_any(&app.admin, ok.id).await.is_err());
    assert_eq!(report.purged, vec![ok.id]);
}
