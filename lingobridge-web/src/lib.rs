//! Translation proxy endpoint
//!
//! A stateless axum service between lingobridge clients and the upstream
//! provider. Each `POST /translate` is validated, forwarded once, and answered
//! with either the normalized `TranslateResponse` or an `ErrorBody` whose
//! status says whose fault the failure was.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use lingobridge::{ErrorBody, LanguageEntry, TranslateBody, TranslateResponse, language_table};
use lingobridge_mt::{MachineTranslator, source_for_upstream, validate_locale};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

pub mod config;
pub mod error;

// Integration tests (only available during testing)
#[cfg(test)]
mod integration_tests;

pub use config::ServerConfig;
pub use error::ProxyError;

#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<dyn MachineTranslator>,
}

impl AppState {
    pub fn new(translator: impl MachineTranslator + 'static) -> Self {
        Self {
            translator: Arc::new(translator),
        }
    }
}

/// Build the proxy router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/translate", post(translate_text))
        .route("/api/translate", post(translate_text))
        .route("/languages", get(list_languages))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// A validated `TranslateBody`
#[derive(Debug, PartialEq, Eq)]
struct ProxyRequest {
    q: String,
    source: Option<String>,
    target: String,
}

impl TryFrom<TranslateBody> for ProxyRequest {
    type Error = ProxyError;

    fn try_from(body: TranslateBody) -> Result<Self, Self::Error> {
        let present = |field: Option<String>| field.filter(|value| !value.trim().is_empty());
        let (Some(q), Some(target)) = (present(body.q), present(body.target)) else {
            return Err(ProxyError::BadRequest("Missing q or target".to_string()));
        };

        let source = source_for_upstream(body.source.as_deref()).map(str::to_string);
        validate_locale(&target)?;
        if let Some(source) = &source {
            validate_locale(source)?;
        }

        Ok(Self { q, source, target })
    }
}

async fn translate_text(
    State(state): State<AppState>,
    payload: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<TranslateResponse>, ProxyError> {
    let Json(body) =
        payload.map_err(|rejection| ProxyError::BadRequest(rejection.body_text()))?;
    let request = ProxyRequest::try_from(body)?;

    info!(
        "Translating {} chars {} → {}",
        request.q.chars().count(),
        request.source.as_deref().unwrap_or(lingobridge::AUTO),
        request.target
    );

    let translation = state
        .translator
        .translate(&request.q, request.source.as_deref(), &request.target)
        .await?;

    Ok(Json(TranslateResponse {
        translated_text: translation.text,
        provider: state.translator.provider_name().to_string(),
        detected_source_language: translation.detected_source,
    }))
}

async fn list_languages() -> Json<Vec<LanguageEntry>> {
    Json(language_table())
}

/// Turn a handler panic into the same `{ error }` shape as every other failure
fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "Unknown error".to_string()
    };
    error!("Handler panicked: {}", message);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new(message)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(q: Option<&str>, source: Option<&str>, target: Option<&str>) -> TranslateBody {
        TranslateBody {
            q: q.map(str::to_string),
            source: source.map(str::to_string),
            target: target.map(str::to_string),
        }
    }

    #[test]
    fn test_missing_fields_are_bad_request() {
        for missing in [
            body(None, Some("en"), Some("es")),
            body(Some("Hello"), Some("en"), None),
            body(Some(""), None, Some("es")),
            body(Some("   "), None, Some("es")),
            body(Some("Hello"), None, Some("")),
        ] {
            match ProxyRequest::try_from(missing) {
                Err(ProxyError::BadRequest(msg)) => assert_eq!(msg, "Missing q or target"),
                other => panic!("Expected BadRequest, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_auto_source_is_dropped() {
        for source in [None, Some("auto"), Some("")] {
            let request = ProxyRequest::try_from(body(Some("Hello"), source, Some("es"))).unwrap();
            assert_eq!(request.source, None);
        }
    }

    #[test]
    fn test_text_and_codes_pass_through() {
        let request =
            ProxyRequest::try_from(body(Some(" Hello\n"), Some("zh-CN"), Some("en"))).unwrap();
        assert_eq!(
            request,
            ProxyRequest {
                q: " Hello\n".to_string(),
                source: Some("zh-CN".to_string()),
                target: "en".to_string(),
            }
        );
    }

    #[test]
    fn test_corrupting_codes_are_bad_request() {
        let result = ProxyRequest::try_from(body(Some("Hello"), Some("en|fr"), Some("es")));
        assert!(matches!(result, Err(ProxyError::BadRequest(_))));
    }

    #[test]
    fn test_panic_payload_message() {
        let response = handle_panic(Box::new("boom"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = handle_panic(Box::new(42_u8));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
