//! Integration tests for URL-keyed credits.

mod helpers;

use helpers::TestApp;
use medialib_core::ErrorKind;
use medialib_entity::asset::{CreateAsset, ParentRef};
use medialib_entity::credit::CreditTarget;
use medialib_service::RequestContext;

#[tokio::test]
async fn test_credit_propagates_to_rows_sharing_a_url() {
    let app = TestApp::new();
    let a = app.file("a.jpg", ParentRef::Root).await;
    let url = a.url.clone().unwrap();
    let folder = app.folder("Elsewhere", ParentRef::Root).await;
    let b = app
        .repos
        .assets
        .create(&CreateAsset::file("b.jpg", folder.id.into(), url.clone(), None))
        .await
        .unwrap();

    // Warm the cache before the update.
    assert_eq!(app.store.effective_credit(&url).await.unwrap(), None);

    app.store
        .update_credit(&app.admin, CreditTarget::Asset(a.id), "Museum X")
        .await
        .unwrap();

    let b_url = b.url.unwrap();
    assert_eq!(
        app.store.effective_credit(&b_url).await.unwrap().as_deref(),
        Some("Museum X")
    );
}

#[tokio::test]
async fn test_legacy_field_is_the_fallback() {
    let app = TestApp::new();
    let legacy = app
        .repos
        .assets
        .create(&CreateAsset::file(
            "old.jpg",
            ParentRef::Root,
            "memory://media/old.jpg",
            Some("Old Archive".to_string()),
        ))
        .await
        .unwrap();
    let url = legacy.url.unwrap();

    assert_eq!(
        app.store.effective_credit(&url).await.unwrap().as_deref(),
        Some("Old Archive")
    );

    app.store
        .update_credit(&app.admin, CreditTarget::Url(url.clone()), "New Archive")
        .await
        .unwrap();
    assert_eq!(
        app.store.effective_credit(&url).await.unwrap().as_deref(),
        Some("New Archive")
    );

    // Clearing the lookup exposes the legacy text again.
    app.store
        .update_credit(&app.admin, CreditTarget::Url(url.clone()), "  ")
        .await
        .unwrap();
    assert_eq!(
        app.store.effective_credit(&url).await.unwrap().as_deref(),
        Some("Old Archive")
    );
}

#[tokio::test]
async fn test_upload_credit_is_visible_immediately() {
    let app = TestApp::new();
    let file = app
        .store
        .upload_file(
            &app.admin,
            bytes::Bytes::from_static(b"jpeg"),
            ParentRef::Root,
            "photo.jpg",
            Some("image/jpeg"),
            Some("Archive A"),
        )
        .await
        .unwrap();

    let url = file.url.unwrap();
    assert_eq!(
        app.store.effective_credit(&url).await.unwrap().as_deref(),
        Some("Archive A")
    );
    assert_eq!(file.credit.as_deref(), Some("Archive A"));
}

#[tokio::test]
async fn test_credit_update_rules() {
    let app = TestApp::new();
    let folder = app.folder("Events", ParentRef::Root).await;

    let err = app
        .store
        .update_credit(&app.admin, CreditTarget::Asset(folder.id), "X")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::NotFound));

    let err = app
        .store
        .update_credit(&app.admin, CreditTarget::Url(" ".into()), "X")
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Validation));

    let err = app
        .store
        .update_credit(
            &RequestContext::viewer("guest"),
            CreditTarget::Url("memory://media/a.jpg".into()),
            "X",
        )
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Permission));
}
