use std::sync::{Arc, Mutex};

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use context_panel::{
    AddContextRequest, Category, ContextEntry, ContextPanel, ContextStore, ContextStoreError,
    HttpContextStore, HttpContextStoreOptions, Phase, RenderView,
};
use serde_json::{json, Value};

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}")
}

async fn store_for(router: Router) -> HttpContextStore {
    let base_url = serve(router).await;
    HttpContextStore::new(HttpContextStoreOptions {
        base_url: Some(base_url),
        client: None,
    })
}

#[tokio::test]
async fn fetch_all_parses_the_collection() {
    let router = Router::new().route(
        "/get_context",
        get(|| async {
            Json(json!({
                "contexts": [
                    {"text": "A", "category": "education"},
                    {"text": "B", "category": "background", "confidence": 0.9},
                ]
            }))
        }),
    );
    let store = store_for(router).await;

    let entries = store.fetch_all().await.unwrap();
    assert_eq!(
        entries,
        vec![
            ContextEntry {
                text: "A".to_string(),
                category: Category::Education,
                confidence: None,
            },
            ContextEntry {
                text: "B".to_string(),
                // Legacy category strings degrade to Unknown.
                category: Category::Unknown,
                confidence: Some(0.9),
            },
        ]
    );
}

#[tokio::test]
async fn missing_or_non_array_contexts_field_is_an_empty_collection() {
    let router = Router::new().route("/get_context", get(|| async { Json(json!({})) }));
    let store = store_for(router).await;
    assert!(store.fetch_all().await.unwrap().is_empty());

    let router =
        Router::new().route("/get_context", get(|| async { Json(json!({"contexts": 42})) }));
    let store = store_for(router).await;
    assert!(store.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_all_fails_on_non_success_status() {
    let router = Router::new().route(
        "/get_context",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let store = store_for(router).await;

    match store.fetch_all().await {
        Err(ContextStoreError::StatusCode(status, body)) => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "boom");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn add_posts_the_draft_and_returns_the_stored_entry() {
    let seen: Arc<Mutex<Vec<Value>>> = Arc::default();
    let recorded = seen.clone();
    let router = Router::new().route(
        "/add_context",
        post(move |Json(body): Json<Value>| {
            let recorded = recorded.clone();
            async move {
                recorded.lock().unwrap().push(body.clone());
                Json(json!({
                    "text": body["text"],
                    "category": body["category"],
                    "confidence": 1.0,
                }))
            }
        }),
    );
    let store = store_for(router).await;

    let entry = store
        .add(&AddContextRequest {
            text: "Learned Go".to_string(),
            category: Category::Skill,
        })
        .await
        .unwrap();

    assert_eq!(
        entry,
        ContextEntry {
            text: "Learned Go".to_string(),
            category: Category::Skill,
            confidence: Some(1.0),
        }
    );
    assert_eq!(
        *seen.lock().unwrap(),
        vec![json!({"text": "Learned Go", "category": "skill"})]
    );
}

#[tokio::test]
async fn add_surfaces_an_application_level_rejection() {
    let router = Router::new().route(
        "/add_context",
        post(|| async { Json(json!({"status": "error", "message": "duplicate"})) }),
    );
    let store = store_for(router).await;

    let error = store
        .add(&AddContextRequest {
            text: "A".to_string(),
            category: Category::Education,
        })
        .await
        .unwrap_err();

    assert!(matches!(error, ContextStoreError::Rejected(ref message) if message == "duplicate"));
}

#[tokio::test]
async fn add_fails_on_non_success_status() {
    let router = Router::new().route(
        "/add_context",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "down") }),
    );
    let store = store_for(router).await;

    let error = store
        .add(&AddContextRequest {
            text: "A".to_string(),
            category: Category::Education,
        })
        .await
        .unwrap_err();

    match error {
        ContextStoreError::StatusCode(status, _) => {
            assert_eq!(status, reqwest::StatusCode::INTERNAL_SERVER_ERROR);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn panel_loads_and_submits_over_http() {
    let router = Router::new()
        .route(
            "/get_context",
            get(|| async { Json(json!({"contexts": [{"text": "A", "category": "education"}]})) }),
        )
        .route(
            "/add_context",
            post(|Json(body): Json<Value>| async move {
                Json(json!({"text": body["text"], "category": body["category"]}))
            }),
        );
    let store = Arc::new(store_for(router).await);

    let panel = ContextPanel::new(store);
    panel.initial_load().await;
    assert_eq!(panel.phase(), Phase::Ready);

    panel.set_draft_category(Category::Skill);
    panel.set_draft_text("Learned Go");
    panel.submit().await.unwrap();

    match panel.view() {
        RenderView::Ready {
            entries,
            draft_text,
            ..
        } => {
            let texts: Vec<_> = entries.iter().map(|entry| entry.text.as_str()).collect();
            assert_eq!(texts, vec!["A", "Learned Go"]);
            assert_eq!(draft_text, "");
        }
        view => panic!("expected ready view, got {view:?}"),
    }
}
