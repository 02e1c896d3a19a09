//! Repository for the `startups` table.

use sqlx::PgPool;
use raisehub_core::types::DbId;

use crate::models::startup::{CreateStartup, Startup, StartupFilter, UpdateStartup};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, founder_id, name, tagline, description, industry, stage, \
    website_url, founded_year, team_size, is_verified, created_at, updated_at";

/// Provides CRUD operations for startups.
pub struct StartupRepo;

impl StartupRepo {
    /// Insert a startup for a founder. Fails with `uq_startups_founder_id`
    /// if the founder already has one.
    pub async fn create(
        pool: &PgPool,
        founder_id: DbId,
        input: &CreateStartup,
    ) -> Result<Startup, sqlx::Error> {
        let query = format!(
            "INSERT INTO startups
                (founder_id, name, tagline, description, industry, stage,
                 website_url, founded_year, team_size)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Startup>(&query)
            .bind(founder_id)
            .bind(input.name.trim())
            .bind(&input.tagline)
            .bind(&input.description)
            .bind(input.industry.trim())
            .bind(&input.stage)
            .bind(&input.website_url)
            .bind(input.founded_year)
            .bind(input.team_size)
            .fetch_one(pool)
            .await
    }

    /// Find a startup by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Startup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM startups WHERE id = $1");
        sqlx::query_as::<_, Startup>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the startup owned by a founder.
    pub async fn find_by_founder(
        pool: &PgPool,
        founder_id: DbId,
    ) -> Result<Option<Startup>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM startups WHERE founder_id = $1");
        sqlx::query_as::<_, Startup>(&query)
            .bind(founder_id)
            .fetch_optional(pool)
            .await
    }

    /// List startups matching the filter, newest first.
    pub async fn list(pool: &PgPool, filter: &StartupFilter) -> Result<Vec<Startup>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM startups
             WHERE ($1::text IS NULL OR LOWER(industry) = $1)
               AND ($2::text IS NULL OR stage = $2)
               AND ($3::text IS NULL OR name ILIKE $3 OR tagline ILIKE $3)
             ORDER BY created_at DESC, id DESC
             LIMIT $4 OFFSET $5"
        );
        sqlx::query_as::<_, Startup>(&query)
            .bind(&filter.industry)
            .bind(&filter.stage)
            .bind(&filter.search)
            .bind(filter.limit)
            .bind(filter.offset)
            .fetch_all(pool)
            .await
    }

    /// Update the founder's startup. Only non-`None` fields are applied.
    pub async fn update_by_founder(
        pool: &PgPool,
        founder_id: DbId,
        input: &UpdateStartup,
    ) -> Result<Option<Startup>, sqlx::Error> {
        let query = format!(
            "UPDATE startups SET
                name = COALESCE($2, name),
                tagline = COALESCE($3, tagline),
                description = COALESCE($4, description),
                industry = COALESCE($5, industry),
                stage = COALESCE($6, stage),
                website_url = COALESCE($7, website_url),
                founded_year = COALESCE($8, founded_year),
                team_size = COALESCE($9, team_size)
             WHERE founder_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Startup>(&query)
            .bind(founder_id)
            .bind(input.name.as_deref().map(str::trim))
            .bind(&input.tagline)
            .bind(&input.description)
            .bind(input.industry.as_deref().map(str::trim))
            .bind(&input.stage)
            .bind(&input.website_url)
            .bind(input.founded_year)
            .bind(input.team_size)
            .fetch_optional(pool)
            .await
    }

    /// Set the admin verification flag. Returns `None` if no such startup.
    pub async fn set_verified(
        pool: &PgPool,
        id: DbId,
        is_verified: bool,
    ) -> Result<Option<Startup>, sqlx::Error> {
        let query =
            format!("UPDATE startups SET is_verified = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Startup>(&query)
            .bind(id)
            .bind(is_verified)
            .fetch_optional(pool)
            .await
    }
}
