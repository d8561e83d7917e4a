//! Blog repository: articles, categories, comments, likes.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

use super::entities::article::{self, Entity as ArticleEntity};
use super::entities::article_like::{self, Entity as LikeEntity};
use super::entities::category::{self, Entity as CategoryEntity};
use super::entities::comment::{self, Entity as CommentEntity};
use crate::domain::{Article, Category, Comment};
use crate::errors::{AppError, AppResult};

/// Data access for blog content.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait ArticleRepository: Send + Sync {
    async fn find(&self, id: Uuid) -> AppResult<Option<Article>>;

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Article>>;

    /// Published articles, newest first, with total count for pagination
    async fn list_published(
        &self,
        category_id: Option<Uuid>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Article>, u64)>;

    /// Everything, including drafts (back-office listing)
    async fn list_all(&self) -> AppResult<Vec<Article>>;

    async fn count(&self) -> AppResult<u64>;

    async fn create(&self, article: Article) -> AppResult<Article>;

    async fn update(&self, article: Article) -> AppResult<Article>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn categories(&self) -> AppResult<Vec<Category>>;

    async fn find_category(&self, id: Uuid) -> AppResult<Option<Category>>;

    async fn find_category_by_name(&self, name: &str) -> AppResult<Option<Category>>;

    async fn create_category(&self, cat: Category) -> AppResult<Category>;

    async fn delete_category(&self, id: Uuid) -> AppResult<()>;

    async fn add_comment(&self, new_comment: Comment) -> AppResult<Comment>;

    /// Comments under an article, oldest first
    async fn comments(&self, article_id: Uuid) -> AppResult<Vec<Comment>>;

    async fn like_exists(&self, article_id: Uuid, user_id: Uuid) -> AppResult<bool>;

    async fn add_like(&self, article_id: Uuid, user_id: Uuid) -> AppResult<()>;

    async fn remove_like(&self, article_id: Uuid, user_id: Uuid) -> AppResult<()>;

    async fn like_count(&self, article_id: Uuid) -> AppResult<u64>;
}

/// SeaORM-backed implementation
pub struct ArticleStore {
    db: DatabaseConnection,
}

impl ArticleStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ArticleRepository for ArticleStore {
    async fn find(&self, id: Uuid) -> AppResult<Option<Article>> {
        let model = ArticleEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Article::from))
    }

    async fn find_by_slug(&self, slug: &str) -> AppResult<Option<Article>> {
        let model = ArticleEntity::find()
            .filter(article::Column::Slug.eq(slug))
            .one(&self.db)
            .await?;
        Ok(model.map(Article::from))
    }

    async fn list_published(
        &self,
        category_id: Option<Uuid>,
        offset: u64,
        limit: u64,
    ) -> AppResult<(Vec<Article>, u64)> {
        let mut query = ArticleEntity::find().filter(article::Column::IsPublished.eq(true));
        if let Some(category_id) = category_id {
            query = query.filter(article::Column::CategoryId.eq(category_id));
        }

        let total = query.clone().count(&self.db).await?;
        let paginator = query
            .order_by_desc(article::Column::CreatedAt)
            .paginate(&self.db, limit.max(1));
        let page = offset / limit.max(1);
        let models = paginator.fetch_page(page).await?;

        Ok((models.into_iter().map(Article::from).collect(), total))
    }

    async fn list_all(&self) -> AppResult<Vec<Article>> {
        let models = ArticleEntity::find()
            .order_by_desc(article::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Article::from).collect())
    }

    async fn count(&self) -> AppResult<u64> {
        Ok(ArticleEntity::find().count(&self.db).await?)
    }

    async fn create(&self, a: Article) -> AppResult<Article> {
        let model = article::ActiveModel {
            id: Set(a.id),
            title: Set(a.title),
            slug: Set(a.slug),
            author_id: Set(a.author_id),
            category_id: Set(a.category_id),
            image: Set(a.image),
            excerpt: Set(a.excerpt),
            content: Set(a.content),
            is_published: Set(a.is_published),
            created_at: Set(a.created_at),
            updated_at: Set(a.updated_at),
        }
        .insert(&self.db)
        .await?;
        Ok(Article::from(model))
    }

    async fn update(&self, a: Article) -> AppResult<Article> {
        let model = ArticleEntity::find_by_id(a.id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: article::ActiveModel = model.into();
        active.title = Set(a.title);
        active.slug = Set(a.slug);
        active.category_id = Set(a.category_id);
        active.image = Set(a.image);
        active.excerpt = Set(a.excerpt);
        active.content = Set(a.content);
        active.is_published = Set(a.is_published);
        active.updated_at = Set(chrono::Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Article::from(model))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        CommentEntity::delete_many()
            .filter(comment::Column::ArticleId.eq(id))
            .exec(&self.db)
            .await?;
        LikeEntity::delete_many()
            .filter(article_like::Column::ArticleId.eq(id))
            .exec(&self.db)
            .await?;
        let result = ArticleEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn categories(&self) -> AppResult<Vec<Category>> {
        let models = CategoryEntity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Category::from).collect())
    }

    async fn find_category(&self, id: Uuid) -> AppResult<Option<Category>> {
        let model = CategoryEntity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Category::from))
    }

    async fn find_category_by_name(&self, name: &str) -> AppResult<Option<Category>> {
        let model = CategoryEntity::find()
            .filter(category::Column::Name.eq(name))
            .one(&self.db)
            .await?;
        Ok(model.map(Category::from))
    }

    async fn create_category(&self, cat: Category) -> AppResult<Category> {
        let model = category::ActiveModel {
            id: Set(cat.id),
            name: Set(cat.name),
            slug: Set(cat.slug),
        }
        .insert(&self.db)
        .await?;
        Ok(Category::from(model))
    }

    async fn delete_category(&self, id: Uuid) -> AppResult<()> {
        let result = CategoryEntity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        Ok(())
    }

    async fn add_comment(&self, c: Comment) -> AppResult<Comment> {
        let model = comment::ActiveModel {
            id: Set(c.id),
            article_id: Set(c.article_id),
            author_id: Set(c.author_id),
            content: Set(c.content),
            created_at: Set(c.created_at),
        }
        .insert(&self.db)
        .await?;
        Ok(Comment::from(model))
    }

    async fn comments(&self, article_id: Uuid) -> AppResult<Vec<Comment>> {
        let models = CommentEntity::find()
            .filter(comment::Column::ArticleId.eq(article_id))
            .order_by_asc(comment::Column::CreatedAt)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Comment::from).collect())
    }

    async fn like_exists(&self, article_id: Uuid, user_id: Uuid) -> AppResult<bool> {
        let count = LikeEntity::find()
            .filter(article_like::Column::ArticleId.eq(article_id))
            .filter(article_like::Column::UserId.eq(user_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn add_like(&self, article_id: Uuid, user_id: Uuid) -> AppResult<()> {
        article_like::ActiveModel {
            article_id: Set(article_id),
            user_id: Set(user_id),
        }
        .insert(&self.db)
        .await?;
        Ok(())
    }

    async fn remove_like(&self, article_id: Uuid, user_id: Uuid) -> AppResult<()> {
        LikeEntity::delete_many()
            .filter(article_like::Column::ArticleId.eq(article_id))
            .filter(article_like::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await?;
        Ok(())
    }

    async fn like_count(&self, article_id: Uuid) -> AppResult<u64> {
        let count = LikeEntity::find()
            .filter(article_like::Column::ArticleId.eq(article_id))
            .count(&self.db)
            .await?;
        Ok(count)
    }
}
