pub mod public;
pub mod recipes;

use crate::error::attach_error_trace;
use crate::AppState;
use axum::{middleware, Router};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

/// Error envelope returned by every failing endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false
    pub success: bool,
    pub error: String,
    /// Diagnostic detail, only present in development mode
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            stack: None,
        }
    }

    pub fn with_stack(mut self, stack: String) -> Self {
        self.stack = Some(stack);
        self
    }
}

/// Build the application router with all endpoints and the error trace layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(public::router())
        .nest("/api/recipes", recipes::router())
        .fallback(public::route_not_found)
        .method_not_allowed_fallback(public::route_not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            attach_error_trace,
        ))
        .with_state(state)
}

/// Generate the complete OpenAPI spec by merging all module specs
pub fn openapi() -> utoipa::openapi::OpenApi {
    #[derive(OpenApi)]
    #[openapi(
        info(
            title = "Recipe CRUD API",
            description = "Create, list, read, update and delete recipes"
        ),
        components(schemas(ErrorResponse))
    )]
    struct BaseApi;

    let mut spec = BaseApi::openapi();
    spec.merge(public::ApiDoc::openapi());
    spec.merge(recipes::ApiDoc::openapi());
    spec
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::config::RuntimeMode;
    use crate::AppContext;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        Router,
    };
    use recipe_core::MemoryStore;
    use serde_json::Value;
    use std::sync::Arc;
    use tower::ServiceExt;

    pub fn app_with_mode(mode: RuntimeMode) -> Router {
        super::router(Arc::new(AppContext {
            store: Arc::new(MemoryStore::new()),
            mode,
        }))
    }

    pub fn app() -> Router {
        app_with_mode(RuntimeMode::Production)
    }

    /// Send one request and return the status with the parsed JSON body.
    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let req = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        };
        let req = match req {
            Ok(r) => r,
            Err(e) => panic!("failed to build request: {e}"),
        };

        let resp = match app.clone().oneshot(req).await {
            Ok(r) => r,
            Err(e) => panic!("handler error: {e}"),
        };
        let status = resp.status();

        let bytes = match axum::body::to_bytes(resp.into_body(), 1024 * 1024).await {
            Ok(b) => b,
            Err(e) => panic!("failed to read body: {e}"),
        };
        let json = match serde_json::from_slice(&bytes) {
            Ok(v) => v,
            Err(e) => panic!("invalid JSON ({e}): {}", String::from_utf8_lossy(&bytes)),
        };

        (status, json)
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{app, send};
    use super::*;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_welcome_lists_endpoints() {
        let (status, body) = send(&app(), Method::GET, "/", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Welcome to Recipe CRUD API");
        assert_eq!(body["endpoints"]["recipes"], "/api/recipes");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, body) = send(&app(), Method::GET, "/api/ingredients", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Route not found");
    }

    #[tokio::test]
    async fn test_unsupported_method_is_route_not_found() {
        let app = app();
        for (method, uri) in [
            (Method::PATCH, "/api/recipes/67e55044-10b1-426f-9247-bb680e5fe0c8"),
            (Method::POST, "/api/recipes/abc"),
            (Method::DELETE, "/api/recipes"),
            (Method::POST, "/"),
        ] {
            let (status, body) = send(&app, method.clone(), uri, None).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "{method} {uri}");
            assert_eq!(body["success"], false);
            assert_eq!(body["message"], "Route not found");
            assert_eq!(body["error"], "Route not found");
        }
    }

    #[test]
    fn test_openapi_includes_recipe_paths() {
        let spec = openapi();
        assert!(spec.paths.paths.contains_key("/api/recipes"));
        assert!(spec.paths.paths.contains_key("/api/recipes/{id}"));
        assert!(spec.paths.paths.contains_key("/"));
    }
}
