//! In-memory [`TagStore`] fake used by the integration tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use rand::seq::SliceRandom;

use crate::db::store::{RelationUpdate, TagPosts, TagStore};
use crate::errors::AppError;
use crate::models::{Post, Social, Tag, TagSummary, User};
use crate::social::RelationKind;

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    tags: Vec<Tag>,
    posts: HashMap<String, Post>,
    users: HashMap<String, User>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a tag and return its id.
    pub fn seed_tag(&self, name: &str, posts_count: i64, post_ids: &[String]) -> String {
        let id = ObjectId::new().to_hex();
        self.inner.lock().unwrap().tags.push(Tag {
            id: id.clone(),
            name: name.to_string(),
            description: None,
            posts_count,
            posts: Some(post_ids.to_vec()),
        });
        id
    }

    /// Seed a post and return its id.
    pub fn seed_post(&self, title: &str) -> String {
        let id = ObjectId::new().to_hex();
        self.inner.lock().unwrap().posts.insert(
            id.clone(),
            Post {
                id: id.clone(),
                title: title.to_string(),
                body: None,
            },
        );
        id
    }

    /// Seed a user with empty relation sets and return their id.
    pub fn seed_user(&self, username: &str) -> String {
        let id = ObjectId::new().to_hex();
        self.inner.lock().unwrap().users.insert(
            id.clone(),
            User {
                id: id.clone(),
                username: username.to_string(),
                social: Social::default(),
            },
        );
        id
    }

    /// Snapshot of a seeded user, for asserting relation state directly.
    pub fn user(&self, id: &str) -> Option<User> {
        self.inner.lock().unwrap().users.get(id).cloned()
    }
}

#[async_trait]
impl TagStore for MemoryStore {
    async fn create_tag(&self, name: &str, description: Option<&str>) -> Result<Tag, AppError> {
        let tag = Tag {
            id: ObjectId::new().to_hex(),
            name: name.to_string(),
            description: description.map(str::to_string),
            posts_count: 0,
            posts: Some(Vec::new()),
        };
        self.inner.lock().unwrap().tags.push(tag.clone());

        Ok(tag)
    }

    async fn count_tags(&self) -> Result<u64, AppError> {
        Ok(self.inner.lock().unwrap().tags.len() as u64)
    }

    async fn list_tags(&self, limit: u64, skip: u64) -> Result<Vec<Tag>, AppError> {
        Ok(self
            .inner
            .lock()
            .unwrap()
            .tags
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn featured_tags(&self, limit: u64) -> Result<Vec<TagSummary>, AppError> {
        let mut tags = self.inner.lock().unwrap().tags.clone();
        tags.sort_by(|a, b| b.posts_count.cmp(&a.posts_count));

        Ok(tags
            .into_iter()
            .take(limit as usize)
            .map(|tag| TagSummary {
                id: tag.id,
                name: tag.name,
                posts_count: None,
            })
            .collect())
    }

    async fn find_tag(&self, id: ObjectId) -> Result<Option<Tag>, AppError> {
        let hex = id.to_hex();

        Ok(self
            .inner
            .lock()
            .unwrap()
            .tags
            .iter()
            .find(|tag| tag.id == hex)
            .cloned())
    }

    async fn sample_tags(&self, size: u32) -> Result<Vec<Tag>, AppError> {
        let inner = self.inner.lock().unwrap();

        Ok(inner
            .tags
            .choose_multiple(&mut rand::thread_rng(), size as usize)
            .map(|tag| Tag {
                posts: None,
                ..tag.clone()
            })
            .collect())
    }

    async fn search_tags(
        &self,
        name: &str,
        limit: u64,
        skip: u64,
    ) -> Result<Vec<TagSummary>, AppError> {
        let needle = name.to_lowercase();

        Ok(self
            .inner
            .lock()
            .unwrap()
            .tags
            .iter()
            .filter(|tag| tag.name.to_lowercase().contains(&needle))
            .skip(skip as usize)
            .take(limit as usize)
            .map(|tag| TagSummary {
                id: tag.id.clone(),
                name: tag.name.clone(),
                posts_count: Some(tag.posts_count),
            })
            .collect())
    }

    async fn tag_posts(
        &self,
        name: &str,
        limit: u64,
        skip: u64,
    ) -> Result<Option<TagPosts>, AppError> {
        let inner = self.inner.lock().unwrap();

        let Some(tag) = inner.tags.iter().find(|tag| tag.name == name) else {
            return Ok(None);
        };

        let post_ids = tag.posts.clone().unwrap_or_default();
        let total = post_ids.len() as u64;
        let posts = post_ids
            .iter()
            .skip(skip as usize)
            .take(limit as usize)
            .filter_map(|id| inner.posts.get(id).cloned())
            .collect();

        Ok(Some(TagPosts { posts, total }))
    }

    async fn find_user(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        Ok(self.user(&id.to_hex()))
    }

    async fn update_relations(
        &self,
        user_id: ObjectId,
        kind: RelationKind,
        tag_id: ObjectId,
        update: RelationUpdate,
    ) -> Result<Option<User>, AppError> {
        let mut inner = self.inner.lock().unwrap();

        let Some(user) = inner.users.get_mut(&user_id.to_hex()) else {
            return Ok(None);
        };

        let tag_hex = tag_id.to_hex();
        let (target, opposite) = match kind {
            RelationKind::Follow => (
                &mut user.social.followed_tags,
                &mut user.social.blocked_tags,
            ),
            RelationKind::Block => (
                &mut user.social.blocked_tags,
                &mut user.social.followed_tags,
            ),
        };

        match update {
            RelationUpdate::Add {
                remove_from_opposite,
            } => {
                target.push(tag_hex.clone());
                if remove_from_opposite {
                    opposite.retain(|id| *id != tag_hex);
                }
            }
            RelationUpdate::Remove => {
                target.retain(|id| *id != tag_hex);
            }
        }

        Ok(Some(user.clone()))
    }
}
