use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Router,
};
use bytes::Bytes;
use sms_web_generic::{ResponseConverter, SendProcessor};
use tower_http::cors::CorsLayer;

#[derive(Clone)]
pub struct AppState {
    pub processor: SendProcessor,
}

/// Axum-specific response converter
pub struct AxumResponseConverter;

impl ResponseConverter for AxumResponseConverter {
    type ResponseType = axum::response::Response;

    fn from_api_response(response: sms_core::ApiResponse) -> Self::ResponseType {
        let status = StatusCode::from_u16(response.status.as_u16())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (
            status,
            [(header::CONTENT_TYPE, response.content_type)],
            response.body,
        )
            .into_response()
    }
}

/// Handler: POST /send-sms
pub async fn send_sms(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    let response = state.processor.process_send(&body);
    AxumResponseConverter::from_api_response(response)
}

/// Open CORS: any origin, method and header, with credentials.
///
/// Origin and requested headers are mirrored back since `*` is not allowed
/// together with credentials.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::very_permissive()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/send-sms", post(send_sms))
        .layer(cors_layer())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use sms_core::{SendRequest, SendResponse, SmsClient, SmsError};
    use sms_web_generic::Dispatcher;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct Unreachable;

    #[async_trait]
    impl SmsClient for Unreachable {
        fn provider(&self) -> &'static str {
            "unreachable"
        }

        async fn send(&self, _req: SendRequest<'_>) -> Result<SendResponse, SmsError> {
            Err(SmsError::Http("connection refused".into()))
        }
    }

    fn app() -> Router {
        let dispatcher = Dispatcher::new(Arc::new(Unreachable), None);
        router(AppState {
            processor: SendProcessor::new(dispatcher),
        })
    }

    #[tokio::test]
    async fn responds_with_json_content_type() {
        let response = app()
            .oneshot(
                Request::post("/send-sms")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"phone":"0912","message":"hi"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/json"
        );
    }

    #[tokio::test]
    async fn preflight_allows_any_origin_with_credentials() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/send-sms")
                    .header(header::ORIGIN, "https://love-notes.example")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,x-custom")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "https://love-notes.example"
        );
        assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_CREDENTIALS], "true");
        assert!(headers[header::ACCESS_CONTROL_ALLOW_METHODS]
            .to_str()
            .unwrap()
            .contains("POST"));
        assert!(headers[header::ACCESS_CONTROL_ALLOW_HEADERS]
            .to_str()
            .unwrap()
            .contains("x-custom"));
    }

    #[tokio::test]
    async fn other_methods_are_not_routed() {
        let response = app()
            .oneshot(Request::get("/send-sms").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
