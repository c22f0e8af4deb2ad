use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{LibraryStore, StoreError};
use crate::models::post::{GeneratedPostRow, NewPost, PostStatus};
use crate::models::profile::{CoachProfile, ProfileInput};
use crate::models::resource::{NewResource, ResourceRow, ResourceUpdate};

/// Process-local store used when no database is configured. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryLibraryStore {
    posts: RwLock<HashMap<Uuid, GeneratedPostRow>>,
    resources: RwLock<Vec<ResourceRow>>,
    profile: RwLock<Option<CoachProfile>>,
}

impl InMemoryLibraryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn post_not_found(id: Uuid) -> StoreError {
    StoreError::NotFound { kind: "Post", id }
}

fn resource_not_found(id: Uuid) -> StoreError {
    StoreError::NotFound {
        kind: "Resource",
        id,
    }
}

#[async_trait]
impl LibraryStore for InMemoryLibraryStore {
    async fn add_post(&self, post: NewPost) -> Result<GeneratedPostRow, StoreError> {
        let row = GeneratedPostRow {
            id: Uuid::new_v4(),
            content: post.content,
            post_type: post.post_type,
            skill_level: post.skill_level,
            topic: post.topic,
            category: post.category,
            persona_id: post.persona_id,
            audience: post.audience,
            additional_context: post.additional_context,
            platform: post.platform,
            tags: post.tags,
            is_used: false,
            used_at: None,
            created_at: Utc::now(),
        };
        self.posts.write().await.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_post(&self, id: Uuid) -> Result<GeneratedPostRow, StoreError> {
        self.posts
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| post_not_found(id))
    }

    async fn list_posts(&self, status: PostStatus) -> Result<Vec<GeneratedPostRow>, StoreError> {
        let mut posts: Vec<GeneratedPostRow> = self
            .posts
            .read()
            .await
            .values()
            .filter(|p| status.matches(p))
            .cloned()
            .collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(posts)
    }

    async fn mark_post_used(&self, id: Uuid) -> Result<GeneratedPostRow, StoreError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(&id).ok_or_else(|| post_not_found(id))?;
        if !post.is_used {
            post.is_used = true;
            post.used_at = Some(Utc::now());
        }
        Ok(post.clone())
    }

    async fn delete_post(&self, id: Uuid) -> Result<(), StoreError> {
        self.posts
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| post_not_found(id))
    }

    async fn add_resource(&self, resource: NewResource) -> Result<ResourceRow, StoreError> {
        let row = ResourceRow {
            id: Uuid::new_v4(),
            title: resource.title,
            url: resource.url,
            category: resource.category,
            tags: resource.tags,
            created_at: Utc::now(),
        };
        self.resources.write().await.push(row.clone());
        Ok(row)
    }

    async fn get_resource(&self, id: Uuid) -> Result<ResourceRow, StoreError> {
        self.resources
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| resource_not_found(id))
    }

    async fn list_resources(&self) -> Result<Vec<ResourceRow>, StoreError> {
        Ok(self.resources.read().await.clone())
    }

    async fn update_resource(&self, id: Uuid, update: ResourceUpdate) -> Result<ResourceRow, StoreError> {
        let mut resources = self.resources.write().await;
        let row = resources
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| resource_not_found(id))?;
        update.apply(row);
        Ok(row.clone())
    }

    async fn delete_resource(&self, id: Uuid) -> Result<(), StoreError> {
        let mut resources = self.resources.write().await;
        let before = resources.len();
        resources.retain(|r| r.id != id);
        if resources.len() == before {
            return Err(resource_not_found(id));
        }
        Ok(())
    }

    async fn get_profile(&self) -> Result<Option<CoachProfile>, StoreError> {
        Ok(self.profile.read().await.clone())
    }

    async fn save_profile(&self, profile: ProfileInput) -> Result<CoachProfile, StoreError> {
        let row = CoachProfile {
            name: profile.name,
            school_name: profile.school_name,
            team_name: profile.team_name,
            email: profile.email,
            social_handle: profile.social_handle,
            updated_at: Utc::now(),
        };
        *self.profile.write().await = Some(row.clone());
        Ok(row)
    }
}
