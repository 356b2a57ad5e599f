use std::path::PathBuf;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::util::ServiceExt;

use synonyms::handlers::{AppState, WordSynonyms, router};
use synonyms::index::Index;

fn make_state() -> AppState {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("dict");
    AppState {
        index: Index::load(dir).unwrap(),
    }
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn healthz_ok() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn plain_text_lists_each_token() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/?q=The%20sly%20fox%2C%20a%20zzz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/plain")
    );
    assert_eq!(
        body_string(response).await,
        "synonyms of 'the': []\n\
         synonyms of 'sly': [sly cunning]\n\
         synonyms of 'fox': [fox Reynard dodger]\n\
         synonyms of 'zzz': []\n"
    );
}

#[tokio::test]
async fn txt_suffix_is_plain_text() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/lookup.txt?q=reynard")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        "synonyms of 'reynard': [fox Reynard]\n"
    );
}

#[tokio::test]
async fn json_suffix_returns_structured_payload() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/sentence.json?q=fox+fox+trick")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body: Vec<WordSynonyms> = serde_json::from_slice(&bytes).unwrap();
    let words: Vec<&str> = body.iter().map(|e| e.word.as_str()).collect();
    assert_eq!(words, vec!["fox", "fox", "trick"]);
    assert_eq!(body[0].synonyms, vec!["fox", "Reynard", "dodger"]);
    assert_eq!(body[2].synonyms, vec!["outfox", "outsmart"]);
}

#[tokio::test]
async fn header_takes_precedence_over_query() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/x.json?q=fox")
                .header("Q", "slyly")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(
        body,
        serde_json::json!([{ "word": "slyly", "synonyms": ["slyly"] }])
    );
}

#[tokio::test]
async fn repeated_query_parameter_uses_first_value() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/?q=fox&q=sly")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        "synonyms of 'fox': [fox Reynard dodger]\n"
    );
}

#[tokio::test]
async fn header_wins_over_repeated_query_parameter() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/?q=fox&q=sly")
                .header("Q", "sly")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_string(response).await,
        "synonyms of 'sly': [sly cunning]\n"
    );
}

#[tokio::test]
async fn empty_sentence_yields_empty_payload() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/.json?q=%21%21%21")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "[]");

    let app = router(make_state());
    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "");
}

#[tokio::test]
async fn non_utf8_header_is_rejected() {
    let app = router(make_state());
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("q", &b"caf\xe9"[..])
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), 1024 * 1024).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert!(body["error"].as_str().unwrap_or_default().contains("utf-8"));
}
