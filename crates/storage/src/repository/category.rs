use crate::context::RequestContext;
use crate::error::{Result, StorageError};
use crate::models::Category;
use crate::store::{self, StoreTx};

/// Persistence for [`Category`]. Stateless: every call runs on the
/// transaction handed in by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryRepository;

impl CategoryRepository {
    pub fn new() -> Self {
        Self
    }

    /// Insert a category and return it with its store-assigned id
    pub async fn save(
        &self,
        ctx: &RequestContext,
        tx: &mut StoreTx<'_>,
        mut category: Category,
    ) -> Result<Category> {
        let id = store::fetch_scalar(
            ctx,
            tx,
            sqlx::query_scalar::<_, i64>("INSERT INTO category (name) VALUES ($1) RETURNING id")
                .bind(category.name.clone()),
        )
        .await?;

        category.id = id;
        Ok(category)
    }

    /// Rename a category. Affecting zero rows is not an error; callers check
    /// existence with [`CategoryRepository::find_by_id`] first.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        tx: &mut StoreTx<'_>,
        category: Category,
    ) -> Result<Category> {
        store::execute(
            ctx,
            tx,
            sqlx::query("UPDATE category SET name = $1 WHERE id = $2")
                .bind(category.name.clone())
                .bind(category.id),
        )
        .await?;

        Ok(category)
    }

    /// Delete a category by id. Deleting a missing id is a no-op.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        tx: &mut StoreTx<'_>,
        category: &Category,
    ) -> Result<()> {
        store::execute(
            ctx,
            tx,
            sqlx::query("DELETE FROM category WHERE id = $1").bind(category.id),
        )
        .await?;

        Ok(())
    }

    pub async fn find_by_id(
        &self,
        ctx: &RequestContext,
        tx: &mut StoreTx<'_>,
        id: i64,
    ) -> Result<Category> {
        store::fetch_optional(
            ctx,
            tx,
            sqlx::query_as::<_, Category>("SELECT id, name FROM category WHERE id = $1").bind(id),
        )
        .await?
        .ok_or_else(|| StorageError::not_found("category"))
    }

    /// All categories in whatever order the store returns them.
    pub async fn find_all(
        &self,
        ctx: &RequestContext,
        tx: &mut StoreTx<'_>,
    ) -> Result<Vec<Category>> {
        store::fetch_all(
            ctx,
            tx,
            sqlx::query_as::<_, Category>("SELECT id, name FROM category"),
        )
        .await
    }
}
