use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{LibraryStore, StoreError};
use crate::models::post::{GeneratedPostRow, NewPost, PostStatus};
use crate::models::profile::{CoachProfile, ProfileInput};
use crate::models::resource::{NewResource, ResourceRow, ResourceUpdate};

pub struct PgLibraryStore {
    pool: PgPool,
}

impl PgLibraryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LibraryStore for PgLibraryStore {
    async fn add_post(&self, post: NewPost) -> Result<GeneratedPostRow, StoreError> {
        Ok(sqlx::query_as::<_, GeneratedPostRow>(
            r#"
            INSERT INTO generated_posts
                (id, content, post_type, skill_level, topic, category, persona_id,
                 audience, additional_context, platform, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&post.content)
        .bind(&post.post_type)
        .bind(&post.skill_level)
        .bind(&post.topic)
        .bind(&post.category)
        .bind(&post.persona_id)
        .bind(&post.audience)
        .bind(&post.additional_context)
        .bind(&post.platform)
        .bind(&post.tags)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_post(&self, id: Uuid) -> Result<GeneratedPostRow, StoreError> {
        sqlx::query_as::<_, GeneratedPostRow>("SELECT * FROM generated_posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound { kind: "Post", id })
    }

    async fn list_posts(&self, status: PostStatus) -> Result<Vec<GeneratedPostRow>, StoreError> {
        let used_filter: Option<bool> = match status {
            PostStatus::All => None,
            PostStatus::Used => Some(true),
            PostStatus::Unused => Some(false),
        };

        Ok(sqlx::query_as::<_, GeneratedPostRow>(
            r#"
            SELECT * FROM generated_posts
            WHERE $1::BOOLEAN IS NULL OR is_used = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(used_filter)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn mark_post_used(&self, id: Uuid) -> Result<GeneratedPostRow, StoreError> {
        sqlx::query_as::<_, GeneratedPostRow>(
            r#"
            UPDATE generated_posts
            SET is_used = TRUE, used_at = COALESCE(used_at, NOW())
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound { kind: "Post", id })
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM generated_posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { kind: "Post", id });
        }
        Ok(())
    }

    async fn add_resource(&self, resource: NewResource) -> Result<ResourceRow, StoreError> {
        Ok(sqlx::query_as::<_, ResourceRow>(
            r#"
            INSERT INTO resources (id, title, url, category, tags)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&resource.title)
        .bind(&resource.url)
        .bind(&resource.category)
        .bind(&resource.tags)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn get_resource(&self, id: Uuid) -> Result<ResourceRow, StoreError> {
        sqlx::query_as::<_, ResourceRow>("SELECT * FROM resources WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound {
                kind: "Resource",
                id,
            })
    }

    async fn list_resources(&self) -> Result<Vec<ResourceRow>, StoreError> {
        Ok(
            sqlx::query_as::<_, ResourceRow>("SELECT * FROM resources ORDER BY created_at, title")
                .fetch_all(&self.pool)
                .await?,
        )
    }

    async fn update_resource(&self, id: Uuid, update: ResourceUpdate) -> Result<ResourceRow, StoreError> {
        // One statement, so concurrent partial updates cannot overwrite each other's fields.
        sqlx::query_as::<_, ResourceRow>(
            r#"
            UPDATE resources
            SET title    = COALESCE($2, title),
                url      = COALESCE($3, url),
                category = COALESCE($4, category),
                tags     = COALESCE($5, tags)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(update.title)
        .bind(update.url)
        .bind(update.category)
        .bind(update.tags)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound {
            kind: "Resource",
            id,
        })
    }

    async fn delete_resource(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM resources WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                kind: "Resource",
                id,
            });
        }
        Ok(())
    }

    async fn get_profile(&self) -> Result<Option<CoachProfile>, StoreError> {
        Ok(sqlx::query_as::<_, CoachProfile>(
            r#"
            SELECT name, school_name, team_name, email, social_handle, updated_at
            FROM coach_profile
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn save_profile(&self, profile: ProfileInput) -> Result<CoachProfile, StoreError> {
        Ok(sqlx::query_as::<_, CoachProfile>(
            r#"
            INSERT INTO coach_profile (id, name, school_name, team_name, email, social_handle)
            VALUES (1, $1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET name          = EXCLUDED.name,
                school_name   = EXCLUDED.school_name,
                team_name     = EXCLUDED.team_name,
                email         = EXCLUDED.email,
                social_handle = EXCLUDED.social_handle,
                updated_at    = NOW()
            RETURNING name, school_name, team_name, email, social_handle, updated_at
            "#,
        )
        .bind(&profile.name)
        .bind(&profile.school_name)
        .bind(&profile.team_name)
        .bind(&profile.email)
        .bind(&profile.social_handle)
        .fetch_one(&self.pool)
        .await?)
    }
}
