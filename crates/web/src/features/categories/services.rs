use category_storage::{
    Database, RequestContext, StoreTx,
    dto::category::{CategoryResponse, CreateCategoryRequest, UpdateCategoryRequest},
    error::Result,
    models::Category,
    repository::CategoryRepository,
    store,
};
use validator::Validate;

use crate::error::WebResult;

/// Runs each category operation in its own transaction.
///
/// Every method opens exactly one transaction and hands it to
/// [`store::finish`], which commits on success and rolls back on any
/// failure. Failures come back unchanged so the classifier sees the
/// original kind.
#[derive(Debug, Clone)]
pub struct CategoryService {
    db: Database,
    repository: CategoryRepository,
}

impl CategoryService {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            repository: CategoryRepository::new(),
        }
    }

    /// Create a new category
    pub async fn create(
        &self,
        ctx: &RequestContext,
        request: CreateCategoryRequest,
    ) -> WebResult<CategoryResponse> {
        request.validate()?;

        let mut tx = self.db.begin(ctx).await?;
        let outcome = self
            .repository
            .save(ctx, &mut tx, Category::from(request))
            .await;
        let category = store::finish(tx, outcome).await?;

        tracing::debug!(id = category.id, "Category created");
        Ok(category.into())
    }

    /// Rename an existing category
    pub async fn update(
        &self,
        ctx: &RequestContext,
        request: UpdateCategoryRequest,
    ) -> WebResult<CategoryResponse> {
        request.validate()?;

        let mut tx = self.db.begin(ctx).await?;
        let outcome = self.rename(ctx, &mut tx, request).await;
        let category = store::finish(tx, outcome).await?;

        tracing::debug!(id = category.id, "Category updated");
        Ok(category.into())
    }

    /// Delete a category
    pub async fn delete(&self, ctx: &RequestContext, id: i64) -> WebResult<()> {
        let mut tx = self.db.begin(ctx).await?;
        let outcome = self.remove(ctx, &mut tx, id).await;
        store::finish(tx, outcome).await?;

        tracing::debug!(id, "Category deleted");
        Ok(())
    }

    /// Get category by id
    pub async fn find_by_id(&self, ctx: &RequestContext, id: i64) -> WebResult<CategoryResponse> {
        let mut tx = self.db.begin(ctx).await?;
        let outcome = self.repository.find_by_id(ctx, &mut tx, id).await;
        let category = store::finish(tx, outcome).await?;

        Ok(category.into())
    }

    /// List all categories
    pub async fn find_all(&self, ctx: &RequestContext) -> WebResult<Vec<CategoryResponse>> {
        let mut tx = self.db.begin(ctx).await?;
        let outcome = self.repository.find_all(ctx, &mut tx).await;
        let categories = store::finish(tx, outcome).await?;

        Ok(categories.into_iter().map(CategoryResponse::from).collect())
    }

    // Another request may delete or rename the row between the lookup and
    // the write; the last commit wins.
    async fn rename(
        &self,
        ctx: &RequestContext,
        tx: &mut StoreTx<'_>,
        request: UpdateCategoryRequest,
    ) -> Result<Category> {
        let mut category = self.repository.find_by_id(ctx, tx, request.id).await?;
        category.name = request.name;

        self.repository.update(ctx, tx, category).await
    }

    async fn remove(&self, ctx: &RequestContext, tx: &mut StoreTx<'_>, id: i64) -> Result<()> {
        let category = self.repository.find_by_id(ctx, tx, id).await?;

        self.repository.delete(ctx, tx, &category).await
    }
}
