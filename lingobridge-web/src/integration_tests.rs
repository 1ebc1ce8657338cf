//! End-to-end tests of the proxy router
//!
//! Requests are driven through the router with `tower::ServiceExt::oneshot`.
//! Upstream behavior comes either from `MockTranslator` or from a stub MyMemory
//! app served on an ephemeral port, so the real `MyMemoryProvider` code path is
//! exercised without leaving the machine.

#[cfg(test)]
mod tests {
    use crate::{AppState, router};
    use async_trait::async_trait;
    use axum::{
        Router,
        body::{Body, to_bytes},
        extract::Query,
        http::{Request, StatusCode, header},
        routing::get,
    };
    use lingobridge_mt::{
        MachineTranslator, MockMode, MockTranslator, MtResult, MyMemoryProvider, Translation,
    };
    use serde_json::{Value, json};
    use std::collections::HashMap;
    use tower::ServiceExt;

    async fn post_json(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn translate(app: Router, body: Value) -> (StatusCode, Value) {
        post_json(app, "/translate", body.to_string()).await
    }

    /// Serve a fixed MyMemory answer and return the base URL
    async fn spawn_upstream(status: StatusCode, body: &'static str) -> String {
        let app = Router::new().route(
            "/get",
            get(move |Query(_): Query<HashMap<String, String>>| async move {
                (status, [(header::CONTENT_TYPE, "application/json")], body)
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn mymemory_app(base_url: &str) -> Router {
        router(AppState::new(MyMemoryProvider::new(base_url).unwrap()))
    }

    fn mock_app(mode: MockMode) -> Router {
        router(AppState::new(MockTranslator::new(mode)))
    }

    struct PanickingTranslator;

    #[async_trait]
    impl MachineTranslator for PanickingTranslator {
        async fn translate(&self, _: &str, _: Option<&str>, _: &str) -> MtResult<Translation> {
            panic!("translator exploded")
        }

        fn provider_name(&self) -> &str {
            "panicking"
        }
    }

    // ============================================================================
    // Success path
    // ============================================================================

    #[tokio::test]
    async fn test_round_trip_hello_hola() {
        let upstream =
            spawn_upstream(StatusCode::OK, r#"{"responseData":{"translatedText":"Hola"}}"#).await;

        let (status, body) = translate(
            mymemory_app(&upstream),
            json!({ "q": "Hello", "source": "en", "target": "es" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "translatedText": "Hola", "provider": "mymemory" }));
    }

    #[tokio::test]
    async fn test_text_is_not_altered() {
        let upstream = spawn_upstream(
            StatusCode::OK,
            r#"{"responseData":{"translatedText":"  ¡Hola,\n  mundo!  "}}"#,
        )
        .await;

        let (status, body) = translate(
            mymemory_app(&upstream),
            json!({ "q": "Hello, world", "target": "es" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translatedText"], "  ¡Hola,\n  mundo!  ");
    }

    #[tokio::test]
    async fn test_legacy_api_path() {
        let (status, body) = post_json(
            mock_app(MockMode::Suffix),
            "/api/translate",
            json!({ "q": "hello", "source": "auto", "target": "fr" }).to_string(),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["translatedText"], "hello_fr");
        assert_eq!(body["provider"], "mock");
        assert_eq!(body["detectedSourceLanguage"], "en");
    }

    #[tokio::test]
    async fn test_languages_endpoint() {
        let request = Request::builder()
            .uri("/languages")
            .body(Body::empty())
            .unwrap();
        let response = mock_app(MockMode::NoOp).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let table: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(table.as_array().unwrap().len(), 13);
        assert_eq!(table[0], json!({ "code": "auto", "label": "Detect language" }));
    }

    // ============================================================================
    // Client errors
    // ============================================================================

    #[tokio::test]
    async fn test_missing_q_is_400() {
        let (status, body) =
            translate(mock_app(MockMode::Suffix), json!({ "source": "en", "target": "es" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing q or target");
    }

    #[tokio::test]
    async fn test_missing_target_is_400() {
        let (status, body) =
            translate(mock_app(MockMode::Suffix), json!({ "q": "Hello", "source": "en" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing q or target");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400() {
        let (status, body) = post_json(
            mock_app(MockMode::Suffix),
            "/translate",
            "{ not json".to_string(),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    // ============================================================================
    // Upstream failures
    // ============================================================================

    #[tokio::test]
    async fn test_upstream_500_is_502_without_upstream_body() {
        let upstream = spawn_upstream(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"database on fire at 10.0.0.3"}"#,
        )
        .await;

        let (status, body) = translate(
            mymemory_app(&upstream),
            json!({ "q": "Hello", "source": "en", "target": "es" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({ "error": "Upstream failed: 500" }));
    }

    #[tokio::test]
    async fn test_upstream_without_text_is_502() {
        let upstream =
            spawn_upstream(StatusCode::OK, r#"{"responseData":{"translatedText":""}}"#).await;

        let (status, body) = translate(
            mymemory_app(&upstream),
            json!({ "q": "Hello", "source": "en", "target": "es" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "No translation returned");
    }

    #[tokio::test]
    async fn test_upstream_unreachable_is_502() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (status, body) = translate(
            mymemory_app(&format!("http://{}", addr)),
            json!({ "q": "Hello", "target": "es" }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Upstream unavailable");
    }

    // ============================================================================
    // Local failures
    // ============================================================================

    #[tokio::test]
    async fn test_local_failure_is_500() {
        let (status, body) = translate(
            mock_app(MockMode::Internal("client not configured".to_string())),
            json!({ "q": "Hello", "target": "es" }),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "client not configured");
    }

    #[tokio::test]
    async fn test_panic_is_500_with_message() {
        let app = router(AppState::new(PanickingTranslator));
        let (status, body) = translate(app, json!({ "q": "Hello", "target": "es" })).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "translator exploded");
    }
}
