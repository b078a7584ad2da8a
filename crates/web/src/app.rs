use std::time::Duration;

use axum::{Router, middleware};
use category_storage::Database;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::features::categories::{self, CategoryService};
use crate::middleware::{
    auth::{ApiKeys, require_api_key},
    context::attach_request_context,
};
use crate::openapi::ApiDoc;

pub const API_BASE_PATH: &str = "/api";

#[derive(Debug, Clone)]
pub struct AppState {
    pub categories: CategoryService,
    pub api_keys: ApiKeys,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(db: Database, api_keys: ApiKeys, request_timeout: Duration) -> Self {
        Self {
            categories: CategoryService::new(db),
            api_keys,
            request_timeout,
        }
    }
}

/// Builds the full application: `/api` routes behind the API key check,
/// plus the OpenAPI document and Swagger UI.
pub fn router(state: AppState) -> Router {
    let api = categories::routes::routes()
        .layer(middleware::from_fn_with_state(
            state.request_timeout,
            attach_request_context,
        ))
        .layer(middleware::from_fn_with_state(
            state.api_keys,
            require_api_key,
        ))
        .with_state(state.categories);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(API_BASE_PATH, api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
