//! View-models wired to the HTTP client and a live dev server.

use std::sync::Arc;

use snipman_app::{
    CreateViewModel, DeleteOutcome, DetailPhase, DetailViewModel, ListPhase, ListViewModel, Route,
    SubmitOutcome,
};
use snipman_client::{ClientConfig, SnippetClient};
use snipman_core::{SnippetDraft, SnippetId};
use snipman_devserver::{API_BASE_PATH, AppState, SnippetStore, router};

async fn live_client() -> Arc<SnippetClient> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router(AppState::new(SnippetStore::new()));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    let config = ClientConfig::with_base_url(format!("http://{addr}{API_BASE_PATH}"));
    Arc::new(SnippetClient::new(&config).unwrap())
}

#[tokio::test]
async fn create_then_list_shows_the_new_snippet() {
    let client = live_client().await;
    let list = ListViewModel::new(client.clone());
    assert_eq!(list.refresh().await, ListPhase::Loaded);
    assert_eq!(list.snapshot().empty_message(), Some("No snippets found."));

    let form = CreateViewModel::new(client.clone(), list.refresh_hook());
    let SubmitOutcome::Saved(created) = form.submit(SnippetDraft::new("Test", "Hi")).await else {
        panic!("create failed");
    };

    assert!(form.snapshot().draft.is_empty());
    let listed = list.snapshot().snippets;
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, created.id);
    assert_eq!(listed[0].title, "Test");
}

#[tokio::test]
async fn blank_create_is_rejected_before_the_server() {
    let client = live_client().await;
    let list = ListViewModel::new(client.clone());
    let form = CreateViewModel::new(client.clone(), list.refresh_hook());

    let outcome = form.submit(SnippetDraft::new("", "Hi")).await;
    assert!(matches!(outcome, SubmitOutcome::Invalid(_)));

    list.refresh().await;
    assert!(list.snapshot().snippets.is_empty());
}

#[tokio::test]
async fn unknown_id_shows_not_found() {
    let client = live_client().await;
    let detail = DetailViewModel::new(client, Default::default());
    let phase = detail.load(SnippetId::parse("missing-id").unwrap()).await;
    assert_eq!(phase, DetailPhase::NotFound);
}

#[tokio::test]
async fn edit_tag_and_delete_flow() {
    let client = live_client().await;
    let list = ListViewModel::new(client.clone());
    let form = CreateViewModel::new(client.clone(), list.refresh_hook());
    let SubmitOutcome::Saved(created) = form.submit(SnippetDraft::new("Test", "Hi")).await else {
        panic!("create failed");
    };

    let detail = DetailViewModel::new(client.clone(), list.refresh_hook());
    assert_eq!(detail.load(created.id.clone()).await, DetailPhase::Viewing);

    detail.toggle_edit();
    detail.set_draft_title("  Renamed  ");
    assert!(detail.submit_current_edit().await.is_saved());
    assert_eq!(detail.snapshot().snippet.unwrap().title, "Renamed");
    assert_eq!(list.snapshot().snippets[0].title, "Renamed");

    assert!(detail.add_tag("rust").await.is_saved());
    assert_eq!(list.snapshot().snippets[0].tags[0].name, "rust");

    assert_eq!(detail.delete_current(|_| false).await, DeleteOutcome::Cancelled);
    assert_eq!(list.snapshot().snippets.len(), 1);

    let outcome = detail.delete_current(|_| true).await;
    assert_eq!(outcome, DeleteOutcome::Deleted { next: Route::List });
    assert_eq!(detail.snapshot().phase, DetailPhase::Deleted);
    assert!(list.snapshot().snippets.is_empty());
}
