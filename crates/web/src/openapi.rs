use utoipa::OpenApi;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

use crate::features::categories::handlers;
use crate::middleware::auth::API_KEY_HEADER;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_categories,
        handlers::get_category,
        handlers::create_category,
        handlers::update_category,
        handlers::delete_category,
    ),
    components(
        schemas(
            category_storage::dto::category::CreateCategoryRequest,
            category_storage::dto::category::UpdateCategoryRequest,
            category_storage::dto::category::CategoryResponse,
            category_storage::models::Category,
        )
    ),
    tags(
        (name = "categories", description = "Category endpoints. Every response is wrapped as {code, status, data}"),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(API_KEY_HEADER))),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_category_paths() {
        let doc = ApiDoc::openapi();

        assert!(doc.paths.paths.contains_key("/api/categories"));
        assert!(doc.paths.paths.contains_key("/api/categories/{id}"));

        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("api_key"));
    }
}
