//! End-to-end walk through a typical curation session.

mod helpers;

use bytes::Bytes;
use futures::StreamExt;
use helpers::TestApp;
use medialib_entity::asset::ParentRef;

#[tokio::test]
async fn test_events_folder_session() {
    let app = TestApp::new();

    let events = app.folder("Events", ParentRef::Root).await;
    let photo = app
        .store
        .upload_file(
            &app.admin,
            Bytes::from_static(b"jpeg bytes"),
            events.id.into(),
            "photo.jpg",
            Some("image/jpeg"),
            Some("Archive A"),
        )
        .await
        .unwrap();
    let url = photo.url.clone().unwrap();

    app.store
        .rename(&app.admin, events.id, "Historical Events")
        .await
        .unwrap();
    app.store
        .move_asset(&app.admin, photo.id, ParentRef::Root)
        .await
        .unwrap();

    let root = app.store.list(&app.admin, ParentRef::Root).await.unwrap();
    assert!(root.iter().any(|a| a.id == photo.id));
    assert!(root.iter().any(|a| a.name == "Historical Events"));
    assert!(app.names(events.id.into()).await.is_empty());

    app.store.soft_delete(&app.admin, photo.id).await.unwrap();
    let trash = app.store.list_trash(&app.admin).await.unwrap();
    assert!(trash.iter().any(|a| a.id == photo.id));
    let root = app.store.list(&app.admin, ParentRef::Root).await.unwrap();
    assert!(!root.iter().any(|a| a.id == photo.id));

    app.store.restore(&app.admin, photo.id).await.unwrap();
    let root = app.store.list(&app.admin, ParentRef::Root).await.unwrap();
    assert!(root.iter().any(|a| a.id == photo.id));

    assert_eq!(
        app.store.effective_credit(&url).await.unwrap().as_deref(),
        Some("Archive A")
    );
}

#[tokio::test]
async fn test_folder_subscription_sees_changes() {
    let app = TestApp::new();
    let events = app.folder("Events", ParentRef::Root).await;

    let mut stream = app
        .store
        .subscribe_folder(&app.admin, events.id.into())
        .await
        .unwrap();
    let initial = stream.next().await.unwrap().unwrap();
    assert!(initial.is_empty());

    app.file("photo.jpg", events.id.into()).await;
    let after_upload = stream.next().await.unwrap().unwrap();
    assert_eq!(after_upload.len(), 1);
    assert_eq!(after_upload[0].name, "photo.jpg");
}
