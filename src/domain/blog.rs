//! Blog content: articles, categories, comments, likes.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Article category
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
}

/// A blog article. Only published articles appear on the public listing.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author_id: Uuid,
    pub category_id: Option<Uuid>,
    pub image: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing card for the public blog page
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArticleSummary {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: Option<String>,
    pub image: Option<String>,
    pub excerpt: String,
    pub created_at: DateTime<Utc>,
}

/// Full article payload with engagement counts
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ArticleDetail {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub category: Option<String>,
    pub image: Option<String>,
    pub excerpt: String,
    pub content: String,
    pub like_count: u64,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
}

/// A reader comment on an article
#[derive(Debug, Clone, Serialize)]
pub struct Comment {
    pub id: Uuid,
    pub article_id: Uuid,
    pub author_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Comment as rendered under an article
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Derive a URL slug from a title: lowercase alphanumerics joined by
/// single dashes.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut prev_dash = true;

    for c in title.chars() {
        if c.is_alphanumeric() {
            slug.extend(c.to_lowercase());
            prev_dash = false;
        } else if !prev_dash {
            slug.push('-');
            prev_dash = true;
        }
    }

    slug.trim_end_matches('-').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Réussir le Bac"), "réussir-le-bac");
        assert_eq!(slugify("  Maths: 10 astuces!  "), "maths-10-astuces");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("a  --  b"), "a-b");
    }
}
