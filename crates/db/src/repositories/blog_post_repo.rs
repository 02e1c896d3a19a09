//! Repository for the `blog_posts` table.

use sqlx::PgPool;
use raisehub_core::types::DbId;

use crate::models::blog::{BlogPost, CreateBlogPost, UpdateBlogPost};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, author_id, title, slug, excerpt, content, cover_image_url, tags, \
    is_published, published_at, created_at, updated_at";

/// Provides CRUD operations for blog posts.
pub struct BlogPostRepo;

impl BlogPostRepo {
    /// Insert a new post. `slug` and `tags` are already normalized by the caller.
    pub async fn create(
        pool: &PgPool,
        author_id: DbId,
        slug: &str,
        tags: &[String],
        input: &CreateBlogPost,
    ) -> Result<BlogPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts
                (author_id, title, slug, excerpt, content, cover_image_url, tags,
                 is_published, published_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, CASE WHEN $8 THEN NOW() END)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(author_id)
            .bind(input.title.trim())
            .bind(slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.cover_image_url)
            .bind(tags)
            .bind(input.is_published)
            .fetch_one(pool)
            .await
    }

    /// Find a post by ID regardless of publication state.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a published post by slug.
    pub async fn find_published_by_slug(
        pool: &PgPool,
        slug: &str,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM blog_posts WHERE slug = $1 AND is_published");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(slug)
            .fetch_optional(pool)
            .await
    }

    /// List published posts, newest first, optionally filtered by tag.
    pub async fn list_published(
        pool: &PgPool,
        tag: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts
             WHERE is_published AND ($1::TEXT IS NULL OR $1 = ANY(tags))
             ORDER BY published_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(tag)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// List every post including drafts, newest first.
    pub async fn list_all(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM blog_posts ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Update a post. Only non-`None` fields are applied.
    ///
    /// `published_at` is stamped the first time the post is published and
    /// kept across later edits.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        slug: Option<&str>,
        tags: Option<&[String]>,
        input: &UpdateBlogPost,
    ) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!(
            "UPDATE blog_posts SET
                title = COALESCE($2, title),
                slug = COALESCE($3, slug),
                excerpt = COALESCE($4, excerpt),
                content = COALESCE($5, content),
                cover_image_url = COALESCE($6, cover_image_url),
                tags = COALESCE($7, tags),
                is_published = COALESCE($8, is_published),
                published_at = CASE
                    WHEN COALESCE($8, is_published) THEN COALESCE(published_at, NOW())
                    ELSE published_at
                END
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .bind(input.title.as_deref().map(str::trim))
            .bind(slug)
            .bind(&input.excerpt)
            .bind(&input.content)
            .bind(&input.cover_image_url)
            .bind(tags)
            .bind(input.is_published)
            .fetch_optional(pool)
            .await
    }

    /// Delete a post. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM blog_posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
