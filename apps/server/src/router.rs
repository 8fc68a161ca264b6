use axum::Router;
use shiok::kernel::prelude::ApiState;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

/// Path of the interactive API reference.
pub(crate) const DOCS_PATH: &str = "/api";

#[derive(OpenApi)]
#[openapi(
    info(title = "Shiok", description = "Daily Singapore word for a Wordle-style game"),
    tags(
        (name = "System", description = "Service health"),
        (name = "Game", description = "Word generation"),
    )
)]
struct ApiDoc;

/// Assembles every route, the request trace layer and the Scalar UI.
pub fn init(state: ApiState) -> Router {
    let (api_routes, api_doc) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .merge(shiok::server::router::system_router())
        .merge(shiok::server::router::api_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .split_for_parts();

    Router::new().merge(api_routes).merge(Scalar::with_url(DOCS_PATH, api_doc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use shiok::domain::config::ApiConfig;
    use shiok::domain::registry::InitializedSlice;
    use shiok::features::daily_word::{DailyWord, MISSING_KEY_MESSAGE};
    use tower::ServiceExt;

    fn app() -> Router {
        let state = ApiState::builder()
            .config(ApiConfig::default())
            .register_slice(InitializedSlice::new(DailyWord::unconfigured()))
            .build()
            .unwrap();
        init(state)
    }

    #[tokio::test]
    async fn health_is_served() {
        let response =
            app().oneshot(Request::get("/health").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn daily_word_is_mounted() {
        let request = Request::post("/api/daily-word")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"category":"food"}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], MISSING_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn docs_are_served() {
        let response =
            app().oneshot(Request::get(DOCS_PATH).body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn unknown_paths_are_not_found() {
        let response =
            app().oneshot(Request::get("/api/other").body(Body::empty()).unwrap()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn openapi_documents_both_routes() {
        let (_, api) = OpenApiRouter::<ApiState>::with_openapi(ApiDoc::openapi())
            .merge(shiok::server::router::system_router())
            .merge(shiok::server::router::api_router())
            .split_for_parts();
        assert!(api.paths.paths.contains_key("/health"));
        assert!(api.paths.paths.contains_key("/api/daily-word"));
    }
}
