//! Blog service - public reading plus back-office content management.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::BLOG_PAGE_SIZE;
use crate::domain::{
    slugify, Actor, Article, ArticleDetail, ArticleSummary, Category, Comment, CommentResponse,
};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;
use crate::types::Paginated;

/// Payload for creating an article
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewArticle {
    pub title: String,
    pub category_id: Option<Uuid>,
    pub image: Option<String>,
    pub excerpt: String,
    pub content: String,
    /// Articles go live immediately unless explicitly kept as drafts
    #[serde(default = "default_publish")]
    pub is_published: bool,
}

fn default_publish() -> bool {
    true
}

/// Partial article edit
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct ArticleUpdate {
    pub title: Option<String>,
    pub category_id: Option<Uuid>,
    pub image: Option<String>,
    pub excerpt: Option<String>,
    pub content: Option<String>,
}

/// Result of a like toggle
#[derive(Debug, Serialize, ToSchema)]
pub struct LikeStatus {
    pub liked: bool,
    pub like_count: u64,
}

/// Blog use cases.
#[async_trait]
pub trait BlogService: Send + Sync {
    /// Published articles, optionally filtered by category slug
    async fn list_articles(
        &self,
        category_slug: Option<String>,
        page: u64,
    ) -> AppResult<Paginated<ArticleSummary>>;

    async fn article_detail(&self, slug: &str) -> AppResult<ArticleDetail>;

    async fn list_categories(&self) -> AppResult<Vec<Category>>;

    async fn add_comment(
        &self,
        actor: &Actor,
        slug: &str,
        content: String,
    ) -> AppResult<CommentResponse>;

    /// Like or unlike; one like per user per article
    async fn toggle_like(&self, actor: &Actor, slug: &str) -> AppResult<LikeStatus>;

    // Back-office operations (routes are staff-guarded)

    async fn create_article(&self, actor: &Actor, data: NewArticle) -> AppResult<Article>;

    async fn edit_article(&self, article_id: Uuid, update: ArticleUpdate) -> AppResult<Article>;

    async fn toggle_publish(&self, article_id: Uuid) -> AppResult<Article>;

    /// Superuser only
    async fn delete_article(&self, actor: &Actor, article_id: Uuid) -> AppResult<()>;

    async fn create_category(&self, name: String) -> AppResult<Category>;

    async fn delete_category(&self, category_id: Uuid) -> AppResult<()>;

    async fn list_all_articles(&self) -> AppResult<Vec<Article>>;
}

/// Concrete implementation using the Unit of Work.
pub struct Newsroom<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> Newsroom<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn category_names(&self) -> AppResult<HashMap<Uuid, String>> {
        Ok(self
            .uow
            .articles()
            .categories()
            .await?
            .into_iter()
            .map(|c| (c.id, c.name))
            .collect())
    }

    /// Slug for a new article; appends a suffix when the title collides.
    async fn unique_slug(&self, title: &str) -> AppResult<String> {
        let base = slugify(title);
        let base = if base.is_empty() {
            "article".to_string()
        } else {
            base
        };

        if self.uow.articles().find_by_slug(&base).await?.is_none() {
            return Ok(base);
        }

        let suffix = Uuid::new_v4().simple().to_string();
        Ok(format!("{}-{}", base, &suffix[..8]))
    }

    async fn published_by_slug(&self, slug: &str) -> AppResult<Article> {
        let article = self
            .uow
            .articles()
            .find_by_slug(slug)
            .await?
            .ok_or(AppError::NotFound)?;
        if !article.is_published {
            return Err(AppError::NotFound);
        }
        Ok(article)
    }
}

#[async_trait]
impl<U: UnitOfWork> BlogService for Newsroom<U> {
    async fn list_articles(
        &self,
        category_slug: Option<String>,
        page: u64,
    ) -> AppResult<Paginated<ArticleSummary>> {
        let category_id = match category_slug {
            Some(slug) => {
                let category = self
                    .uow
                    .articles()
                    .categories()
                    .await?
                    .into_iter()
                    .find(|c| c.slug == slug)
                    .ok_or(AppError::NotFound)?;
                Some(category.id)
            }
            None => None,
        };

        let page = page.max(1);
        let offset = (page - 1) * BLOG_PAGE_SIZE;
        let (articles, total) = self
            .uow
            .articles()
            .list_published(category_id, offset, BLOG_PAGE_SIZE)
            .await?;

        let names = self.category_names().await?;
        let summaries = articles
            .into_iter()
            .map(|a| ArticleSummary {
                id: a.id,
                title: a.title,
                slug: a.slug,
                category: a.category_id.and_then(|id| names.get(&id).cloned()),
                image: a.image,
                excerpt: a.excerpt,
                created_at: a.created_at,
            })
            .collect();

        Ok(Paginated::new(summaries, page, BLOG_PAGE_SIZE, total))
    }

    async fn article_detail(&self, slug: &str) -> AppResult<ArticleDetail> {
        let article = self.published_by_slug(slug).await?;

        let comments = self.uow.articles().comments(article.id).await?;
        let author_ids: Vec<Uuid> = comments.iter().map(|c| c.author_id).collect();
        let authors: HashMap<Uuid, String> = self
            .uow
            .users()
            .find_many(author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.display_name()))
            .collect();

        let comments = comments
            .into_iter()
            .map(|c| CommentResponse {
                id: c.id,
                author_name: authors
                    .get(&c.author_id)
                    .cloned()
                    .unwrap_or_else(|| "Anonyme".to_string()),
                content: c.content,
                created_at: c.created_at,
            })
            .collect();

        let like_count = self.uow.articles().like_count(article.id).await?;
        let names = self.category_names().await?;

        Ok(ArticleDetail {
            id: article.id,
            title: article.title,
            slug: article.slug,
            category: article.category_id.and_then(|id| names.get(&id).cloned()),
            image: article.image,
            excerpt: article.excerpt,
            content: article.content,
            like_count,
            comments,
            created_at: article.created_at,
        })
    }

    async fn list_categories(&self) -> AppResult<Vec<Category>> {
        self.uow.articles().categories().await
    }

    async fn add_comment(
        &self,
        actor: &Actor,
        slug: &str,
        content: String,
    ) -> AppResult<CommentResponse> {
        if content.trim().is_empty() {
            return Err(AppError::validation("Comment cannot be empty"));
        }

        let article = self.published_by_slug(slug).await?;
        let author = self
            .uow
            .users()
            .find_by_id(actor.id)
            .await?
            .ok_or(AppError::NotFound)?;

        let comment = self
            .uow
            .articles()
            .add_comment(Comment {
                id: Uuid::new_v4(),
                article_id: article.id,
                author_id: actor.id,
                content,
                created_at: Utc::now(),
            })
            .await?;

        Ok(CommentResponse {
            id: comment.id,
            author_name: author.display_name(),
            content: comment.content,
            created_at: comment.created_at,
        })
    }

    async fn toggle_like(&self, actor: &Actor, slug: &str) -> AppResult<LikeStatus> {
        let article = self.published_by_slug(slug).await?;

        let liked = if self
            .uow
            .articles()
            .like_exists(article.id, actor.id)
            .await?
        {
            self.uow.articles().remove_like(article.id, actor.id).await?;
            false
        } else {
            self.uow.articles().add_like(article.id, actor.id).await?;
            true
        };

        let like_count = self.uow.articles().like_count(article.id).await?;
        Ok(LikeStatus { liked, like_count })
    }

    async fn create_article(&self, actor: &Actor, data: NewArticle) -> AppResult<Article> {
        if data.title.trim().is_empty() {
            return Err(AppError::validation("Title is required"));
        }

        let slug = self.unique_slug(&data.title).await?;
        let now = Utc::now();

        self.uow
            .articles()
            .create(Article {
                id: Uuid::new_v4(),
                title: data.title,
                slug,
                author_id: actor.id,
                category_id: data.category_id,
                image: data.image,
                excerpt: data.excerpt,
                content: data.content,
                is_published: data.is_published,
                created_at: now,
                updated_at: now,
            })
            .await
    }

    async fn edit_article(&self, article_id: Uuid, update: ArticleUpdate) -> AppResult<Article> {
        let mut article = self
            .uow
            .articles()
            .find(article_id)
            .await?
            .ok_or(AppError::NotFound)?;

        if let Some(title) = update.title {
            if title.trim().is_empty() {
                return Err(AppError::validation("Title is required"));
            }
            article.title = title;
        }
        if let Some(category_id) = update.category_id {
            article.category_id = Some(category_id);
        }
        if let Some(image) = update.image {
            article.image = Some(image);
        }
        if let Some(excerpt) = update.excerpt {
            article.excerpt = excerpt;
        }
        if let Some(content) = update.content {
            article.content = content;
        }

        self.uow.articles().update(article).await
    }

    async fn toggle_publish(&self, article_id: Uuid) -> AppResult<Article> {
        let mut article = self
            .uow
            .articles()
            .find(article_id)
            .await?
            .ok_or(AppError::NotFound)?;

        article.is_published = !article.is_published;
        self.uow.articles().update(article).await
    }

    async fn delete_article(&self, actor: &Actor, article_id: Uuid) -> AppResult<()> {
        if !actor.is_superuser {
            return Err(AppError::forbidden(
                "This action is reserved for super administrators",
            ));
        }
        self.uow.articles().delete(article_id).await
    }

    async fn create_category(&self, name: String) -> AppResult<Category> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Category name is required"));
        }
        if self
            .uow
            .articles()
            .find_category_by_name(&name)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Category"));
        }

        self.uow
            .articles()
            .create_category(Category {
                id: Uuid::new_v4(),
                slug: slugify(&name),
                name,
            })
            .await
    }

    async fn delete_category(&self, category_id: Uuid) -> AppResult<()> {
        self.uow.articles().delete_category(category_id).await
    }

    async fn list_all_articles(&self) -> AppResult<Vec<Article>> {
        self.uow.articles().list_all().await
    }
}
