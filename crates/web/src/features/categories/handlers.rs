use axum::{Extension, extract::State};
use category_storage::{
    RequestContext,
    dto::category::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
};

use crate::codec::{CategoryId, JsonBody, WebResponse};
use crate::error::WebResult;

use super::services::CategoryService;

#[utoipa::path(
    get,
    path = "/api/categories",
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "All categories, wrapped in the response envelope", body = Vec<CategoryResponse>),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "categories"
)]
pub async fn list_categories(
    State(service): State<CategoryService>,
    Extension(ctx): Extension<RequestContext>,
) -> WebResult<WebResponse<Vec<CategoryResponse>>> {
    let categories = service.find_all(&ctx).await?;

    Ok(WebResponse::ok(categories))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Category found", body = CategoryResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "categories"
)]
pub async fn get_category(
    State(service): State<CategoryService>,
    Extension(ctx): Extension<RequestContext>,
    CategoryId(id): CategoryId,
) -> WebResult<WebResponse<CategoryResponse>> {
    let category = service.find_by_id(&ctx, id).await?;

    Ok(WebResponse::ok(category))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CreateCategoryRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "categories"
)]
pub async fn create_category(
    State(service): State<CategoryService>,
    Extension(ctx): Extension<RequestContext>,
    JsonBody(req): JsonBody<CreateCategoryRequest>,
) -> WebResult<WebResponse<CategoryResponse>> {
    let category = service.create(&ctx, req).await?;

    Ok(WebResponse::ok(category))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    request_body = UpdateCategoryRequest,
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "categories"
)]
pub async fn update_category(
    State(service): State<CategoryService>,
    Extension(ctx): Extension<RequestContext>,
    CategoryId(id): CategoryId,
    JsonBody(mut req): JsonBody<UpdateCategoryRequest>,
) -> WebResult<WebResponse<CategoryResponse>> {
    req.id = id;

    let category = service.update(&ctx, req).await?;

    Ok(WebResponse::ok(category))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(
        ("id" = i64, Path, description = "Category ID")
    ),
    security(
        ("api_key" = [])
    ),
    responses(
        (status = 200, description = "Category deleted, `data` is null"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Category not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "categories"
)]
pub async fn delete_category(
    State(service): State<CategoryService>,
    Extension(ctx): Extension<RequestContext>,
    CategoryId(id): CategoryId,
) -> WebResult<WebResponse<()>> {
    service.delete(&ctx, id).await?;

    Ok(WebResponse::empty())
}
