//! Integration tests for the content block editor.

mod helpers;

use helpers::TestApp;
use medialib_core::ErrorKind;
use medialib_entity::article::{BlockBody, Card};
use medialib_entity::asset::ParentRef;
use medialib_entity::credit::CreditTarget;
use medialib_service::RequestContext;

#[tokio::test]
async fn test_edit_save_and_reload() {
    let app = TestApp::new();
    let mut draft = app.editor.load(&app.admin, "tran-dynasty").await.unwrap();
    assert!(draft.blocks().is_empty());

    let heading = draft.append(BlockBody::Heading {
        text: "The Tran dynasty".into(),
        level: 1,
    });
    let body = draft.append(BlockBody::Paragraph {
        text: "Founded in 1225.".into(),
    });
    assert!(draft.move_up(body).unwrap());
    assert!(!draft.move_up(body).unwrap());
    assert!(draft.is_dirty());

    let saved = app.editor.save(&app.admin, &mut draft).await.unwrap();
    assert!(!draft.is_dirty());
    assert!(saved.updated_at.is_some());

    let reloaded = app.editor.load(&app.admin, "tran-dynasty").await.unwrap();
    let order: Vec<_> = reloaded.blocks().iter().map(|b| b.id).collect();
    assert_eq!(order, vec![body, heading]);
}

#[tokio::test]
async fn test_invalid_block_blocks_the_save() {
    let app = TestApp::new();
    let mut draft = app.editor.load(&app.admin, "draft").await.unwrap();
    draft.append(BlockBody::Paragraph {
        text: "fine".into(),
    });
    draft.append(BlockBody::CardGrid { cards: vec![] });

    let err = app.editor.save(&app.admin, &mut draft).await.unwrap_err();
    assert!(err.is(ErrorKind::Validation));
    assert!(err.message.starts_with("Block 2"));
    assert!(draft.is_dirty());

    // Nothing was written.
    let stored = app.editor.load(&app.admin, "draft").await.unwrap();
    assert!(stored.blocks().is_empty());
}

#[tokio::test]
async fn test_delete_needs_confirmation_and_viewer_cannot_save() {
    let app = TestApp::new();
    let mut draft = app.editor.load(&app.admin, "page").await.unwrap();
    let id = draft.append(BlockBody::Quote {
        text: "Sát Thát".into(),
        author: None,
    });

    assert!(draft.delete(id, false).unwrap_err().is(ErrorKind::Validation));
    assert_eq!(draft.blocks().len(), 1);
    draft.delete(id, true).unwrap();
    assert!(draft.blocks().is_empty());

    let err = app
        .editor
        .save(&RequestContext::viewer("guest"), &mut draft)
        .await
        .unwrap_err();
    assert!(err.is(ErrorKind::Permission));
}

#[tokio::test]
async fn test_image_credits_follow_the_lookup() {
    let app = TestApp::new();
    let photo = app.file("photo.jpg", ParentRef::Root).await;
    let card = app.file("card.jpg", ParentRef::Root).await;
    let photo_url = photo.url.clone().unwrap();
    let card_url = card.url.clone().unwrap();
    app.store
        .update_credit(&app.admin, CreditTarget::Asset(photo.id), "Museum X")
        .await
        .unwrap();

    let mut draft = app.editor.load(&app.admin, "gallery").await.unwrap();
    draft.append(BlockBody::Image {
        url: photo_url.clone(),
        caption: None,
    });
    draft.append(BlockBody::CardGrid {
        cards: vec![Card {
            title: "Card".into(),
            body: String::new(),
            image_url: Some(card_url.clone()),
        }],
    });
    draft.append(BlockBody::Image {
        url: photo_url.clone(),
        caption: Some("again".into()),
    });
    let saved = app.editor.save(&app.admin, &mut draft).await.unwrap();

    let credits = app.editor.image_blocks_credits(&saved).await.unwrap();
    assert_eq!(credits.len(), 2);
    assert_eq!(credits[0].url, photo_url);
    assert_eq!(credits[0].credit.as_deref(), Some("Museum X"));
    assert_eq!(credits[1].url, card_url);
    assert_eq!(credits[1].credit, None);
}
