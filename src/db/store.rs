//! Injected data-access interface over the document store.
//!
//! Handlers only ever see this trait, so the HTTP layer stays decoupled from
//! the driver and tests can substitute an in-memory fake.

use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;

use crate::errors::AppError;
use crate::models::{Post, Tag, TagSummary, User};
use crate::social::RelationKind;

/// How a relation toggle is persisted for a user.
///
/// Derived from the pure toggle outcome; the store turns it into a single
/// atomic field update so concurrent toggles never clobber each other's
/// sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationUpdate {
    /// Add the tag to the target set, optionally dropping it from the
    /// opposite set in the same update.
    Add { remove_from_opposite: bool },
    /// Remove the tag from the target set.
    Remove,
}

/// A page of posts for one tag plus the tag's total post count.
#[derive(Debug, Clone)]
pub struct TagPosts {
    pub posts: Vec<Post>,
    pub total: u64,
}

/// Data access for tags, posts and user tag relations.
#[async_trait]
pub trait TagStore: Send + Sync {
    /// Insert a new tag with zero posts.
    async fn create_tag(&self, name: &str, description: Option<&str>) -> Result<Tag, AppError>;

    /// Total number of tags.
    async fn count_tags(&self) -> Result<u64, AppError>;

    /// Plain listing window.
    async fn list_tags(&self, limit: u64, skip: u64) -> Result<Vec<Tag>, AppError>;

    /// Top `limit` tags by post count, name-only projection.
    async fn featured_tags(&self, limit: u64) -> Result<Vec<TagSummary>, AppError>;

    /// Fetch a tag by id, including its post references.
    async fn find_tag(&self, id: ObjectId) -> Result<Option<Tag>, AppError>;

    /// Up to `size` uniformly random tags, posts projected away.
    async fn sample_tags(&self, size: u32) -> Result<Vec<Tag>, AppError>;

    /// Case-insensitive name match, `{id, name, postsCount}` projection.
    async fn search_tags(&self, name: &str, limit: u64, skip: u64)
        -> Result<Vec<TagSummary>, AppError>;

    /// A window of the named tag's posts plus the total post count.
    /// `None` when no tag has that name.
    async fn tag_posts(&self, name: &str, limit: u64, skip: u64)
        -> Result<Option<TagPosts>, AppError>;

    /// Fetch a user by id.
    async fn find_user(&self, id: ObjectId) -> Result<Option<User>, AppError>;

    /// Apply a relation toggle atomically and return the updated user.
    /// `None` when the user does not exist.
    async fn update_relations(
        &self,
        user_id: ObjectId,
        kind: RelationKind,
        tag_id: ObjectId,
        update: RelationUpdate,
    ) -> Result<Option<User>, AppError>;
}
