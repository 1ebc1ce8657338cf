//! Full-stack tests: controller → ProxyClient → proxy router → stub upstream
//!
//! Both the proxy and a stub MyMemory app are served on ephemeral ports so the
//! whole request path runs over real HTTP.

#[cfg(test)]
mod tests {
    use crate::{
        ClientError, ControllerOptions, ProxyClient, RequestLifecycle, TranslationBackend,
        TranslationController,
    };
    use axum::{
        Router,
        http::{StatusCode, header},
        routing::get,
    };
    use lingobridge::{LanguageCode, TranslationRequest};
    use lingobridge_mt::{MachineTranslator, MockMode, MockTranslator, MyMemoryProvider};
    use lingobridge_web::{AppState, router};
    use std::sync::Arc;
    use std::time::Duration;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    async fn stub_upstream(status: StatusCode, body: &'static str) -> String {
        serve(Router::new().route(
            "/get",
            get(move || async move { (status, [(header::CONTENT_TYPE, "application/json")], body) }),
        ))
        .await
    }

    async fn proxy_with(translator: impl MachineTranslator + 'static) -> ProxyClient {
        let url = serve(router(AppState::new(translator))).await;
        ProxyClient::new(&url).unwrap()
    }

    fn controller(client: ProxyClient, text: &str, source: LanguageCode) -> TranslationController {
        TranslationController::new(
            Arc::new(client),
            ControllerOptions {
                debounce: Duration::from_millis(20),
                text: text.to_string(),
                source_language: source,
                target_language: LanguageCode::Spanish,
            },
        )
    }

    #[tokio::test]
    async fn test_round_trip_hello_hola() {
        let upstream =
            stub_upstream(StatusCode::OK, r#"{"responseData":{"translatedText":"Hola"}}"#).await;
        let client = proxy_with(MyMemoryProvider::new(&upstream).unwrap()).await;
        let controller = controller(client, "Hello", LanguageCode::English);

        controller.translate().unwrap().await.unwrap();

        let result = controller.result().unwrap();
        assert_eq!(result.translated_text, "Hola");
        assert_eq!(result.provider_name, "mymemory");
        assert_eq!(controller.lifecycle(), RequestLifecycle::Succeeded);
    }

    #[tokio::test]
    async fn test_upstream_failure_surfaces_proxy_message() {
        let upstream = stub_upstream(StatusCode::INTERNAL_SERVER_ERROR, r#"{"oops":true}"#).await;
        let client = proxy_with(MyMemoryProvider::new(&upstream).unwrap()).await;

        let request =
            TranslationRequest::new("Hello", LanguageCode::English, LanguageCode::Spanish).unwrap();
        match client.translate(&request).await {
            Err(ClientError::Rejected { status, message }) => {
                assert_eq!(status.as_u16(), 502);
                assert_eq!(message, "Upstream failed: 500");
            }
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_proxy_failure_sets_error_state() {
        let client = proxy_with(MockTranslator::new(MockMode::Error("down".to_string()))).await;
        let controller = controller(client, "Hello", LanguageCode::English);

        controller.translate().unwrap().await.unwrap();

        assert_eq!(
            controller.lifecycle(),
            RequestLifecycle::Failed("Translation service error".to_string())
        );
        assert_eq!(controller.result(), None);
    }

    #[tokio::test]
    async fn test_debounced_edit_reaches_proxy() {
        let client = proxy_with(MockTranslator::new(MockMode::Suffix)).await;
        let controller = controller(client, "", LanguageCode::Auto);
        let mut updates = controller.subscribe();

        controller.update_text("Good morning");
        let state = tokio::time::timeout(
            Duration::from_secs(5),
            updates.wait_for(|state| state.lifecycle == RequestLifecycle::Succeeded),
        )
        .await
        .expect("translation did not complete")
        .unwrap()
        .clone();

        assert_eq!(state.translated_text(), "Good morning_es");
        assert_eq!(state.detected_source_language(), Some("en"));
    }

    #[tokio::test]
    async fn test_unreachable_proxy_is_transport_error() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = ProxyClient::new(&format!("http://{}", addr)).unwrap();
        let controller = controller(client, "Hello", LanguageCode::English);
        controller.translate().unwrap().await.unwrap();

        let message = controller.error().unwrap();
        assert!(message.starts_with("Request failed"));
    }

    #[tokio::test]
    async fn test_languages_from_proxy() {
        let client = proxy_with(MockTranslator::new(MockMode::NoOp)).await;
        let table = client.languages().await.unwrap();
        assert_eq!(table.len(), LanguageCode::ALL.len());
        assert_eq!(table[8].code, LanguageCode::ChineseSimplified);
    }
}
