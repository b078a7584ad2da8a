use axum::{Router, routing::get};

use super::handlers::{
    create_category, delete_category, get_category, list_categories, update_category,
};
use super::services::CategoryService;

pub fn routes() -> Router<CategoryService> {
    Router::new()
        .route("/categories", get(list_categories).post(create_category))
        .route(
            "/categories/:id",
            get(get_category)
                .put(update_category)
                .delete(delete_category),
        )
}
