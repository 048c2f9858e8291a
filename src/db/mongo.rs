//! MongoDB implementation of [`TagStore`].
//!
//! Documents carry driver-native ObjectIds; conversion to the wire models'
//! hex string ids happens here and nowhere else.

use std::collections::HashMap;

use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, from_document, oid::ObjectId, Document};
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};

use crate::db::store::{RelationUpdate, TagPosts, TagStore};
use crate::errors::AppError;
use crate::models::{Post, Social, Tag, TagSummary, User};
use crate::social::RelationKind;

/// MongoDB-backed store.
#[derive(Clone)]
pub struct MongoStore {
    tags: Collection<TagDoc>,
    posts: Collection<PostDoc>,
    users: Collection<UserDoc>,
}

impl MongoStore {
    pub fn new(db: &Database) -> Self {
        Self {
            tags: db.collection("tags"),
            posts: db.collection("posts"),
            users: db.collection("users"),
        }
    }

    /// Create the indexes the queries below rely on.
    pub async fn ensure_indexes(&self) -> Result<(), AppError> {
        let unique_name = IndexModel::builder()
            .keys(doc! { "name": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.tags.create_index(unique_name).await?;

        let posts_count = IndexModel::builder()
            .keys(doc! { "postsCount": -1 })
            .build();
        self.tags.create_index(posts_count).await?;

        Ok(())
    }
}

#[async_trait]
impl TagStore for MongoStore {
    async fn create_tag(&self, name: &str, description: Option<&str>) -> Result<Tag, AppError> {
        let doc = TagDoc {
            id: ObjectId::new(),
            name: name.to_string(),
            description: description.map(str::to_string),
            posts_count: 0,
            posts: Some(Vec::new()),
        };
        self.tags.insert_one(&doc).await?;

        Ok(doc.into())
    }

    async fn count_tags(&self) -> Result<u64, AppError> {
        Ok(self.tags.count_documents(doc! {}).await?)
    }

    async fn list_tags(&self, limit: u64, skip: u64) -> Result<Vec<Tag>, AppError> {
        let docs: Vec<TagDoc> = self
            .tags
            .find(doc! {})
            .limit(limit as i64)
            .skip(skip)
            .await?
            .try_collect()
            .await?;

        Ok(docs.into_iter().map(Tag::from).collect())
    }

    async fn featured_tags(&self, limit: u64) -> Result<Vec<TagSummary>, AppError> {
        let docs: Vec<TagSummaryDoc> = self
            .tags
            .clone_with_type::<TagSummaryDoc>()
            .find(doc! {})
            .sort(doc! { "postsCount": -1 })
            .limit(limit as i64)
            .projection(doc! { "name": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(docs.into_iter().map(TagSummary::from).collect())
    }

    async fn find_tag(&self, id: ObjectId) -> Result<Option<Tag>, AppError> {
        let doc = self.tags.find_one(doc! { "_id": id }).await?;

        Ok(doc.map(Tag::from))
    }

    async fn sample_tags(&self, size: u32) -> Result<Vec<Tag>, AppError> {
        let pipeline = vec![
            doc! { "$sample": { "size": size as i64 } },
            doc! { "$project": { "posts": 0 } },
        ];

        let mut cursor = self.tags.aggregate(pipeline).await?;
        let mut tags = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            let tag: TagDoc = from_document(doc)?;
            tags.push(tag.into());
        }

        Ok(tags)
    }

    async fn search_tags(
        &self,
        name: &str,
        limit: u64,
        skip: u64,
    ) -> Result<Vec<TagSummary>, AppError> {
        let filter = doc! { "name": { "$regex": name, "$options": "i" } };

        let docs: Vec<TagSummaryDoc> = self
            .tags
            .clone_with_type::<TagSummaryDoc>()
            .find(filter)
            .limit(limit as i64)
            .skip(skip)
            .projection(doc! { "name": 1, "postsCount": 1 })
            .await?
            .try_collect()
            .await?;

        Ok(docs.into_iter().map(TagSummary::from).collect())
    }

    async fn tag_posts(
        &self,
        name: &str,
        limit: u64,
        skip: u64,
    ) -> Result<Option<TagPosts>, AppError> {
        let Some(tag) = self.tags.find_one(doc! { "name": name }).await? else {
            return Ok(None);
        };

        let post_ids = tag.posts.unwrap_or_default();
        let total = post_ids.len() as u64;

        let window: Vec<ObjectId> = post_ids
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect();
        if window.is_empty() {
            return Ok(Some(TagPosts {
                posts: Vec::new(),
                total,
            }));
        }

        let fetched: Vec<PostDoc> = self
            .posts
            .find(doc! { "_id": { "$in": window.clone() } })
            .await?
            .try_collect()
            .await?;

        // The tag's array order is the display order; `$in` does not keep it.
        let mut by_id: HashMap<ObjectId, PostDoc> =
            fetched.into_iter().map(|post| (post.id, post)).collect();
        let posts = window
            .iter()
            .filter_map(|id| by_id.remove(id))
            .map(Post::from)
            .collect();

        Ok(Some(TagPosts { posts, total }))
    }

    async fn find_user(&self, id: ObjectId) -> Result<Option<User>, AppError> {
        let doc = self.users.find_one(doc! { "_id": id }).await?;

        Ok(doc.map(User::from))
    }

    async fn update_relations(
        &self,
        user_id: ObjectId,
        kind: RelationKind,
        tag_id: ObjectId,
        update: RelationUpdate,
    ) -> Result<Option<User>, AppError> {
        let (target, opposite) = match kind {
            RelationKind::Follow => ("social.followedTags", "social.blockedTags"),
            RelationKind::Block => ("social.blockedTags", "social.followedTags"),
        };

        let update = match update {
            RelationUpdate::Add {
                remove_from_opposite: true,
            } => doc! {
                "$push": field_update(target, tag_id),
                "$pull": field_update(opposite, tag_id),
            },
            RelationUpdate::Add {
                remove_from_opposite: false,
            } => doc! { "$push": field_update(target, tag_id) },
            RelationUpdate::Remove => doc! { "$pull": field_update(target, tag_id) },
        };

        let updated = self
            .users
            .find_one_and_update(doc! { "_id": user_id }, update)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(updated.map(User::from))
    }
}

fn field_update(field: &str, id: ObjectId) -> Document {
    let mut doc = Document::new();
    doc.insert(field, id);
    doc
}

// Stored document shapes. Ids become hex strings at the model boundary.

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default)]
    posts_count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    posts: Option<Vec<ObjectId>>,
}

impl From<TagDoc> for Tag {
    fn from(doc: TagDoc) -> Self {
        Tag {
            id: doc.id.to_hex(),
            name: doc.name,
            description: doc.description,
            posts_count: doc.posts_count,
            posts: doc
                .posts
                .map(|ids| ids.iter().map(|id| id.to_hex()).collect()),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TagSummaryDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    name: String,
    #[serde(default)]
    posts_count: Option<i64>,
}

impl From<TagSummaryDoc> for TagSummary {
    fn from(doc: TagSummaryDoc) -> Self {
        TagSummary {
            id: doc.id.to_hex(),
            name: doc.name,
            posts_count: doc.posts_count,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<String>,
}

impl From<PostDoc> for Post {
    fn from(doc: PostDoc) -> Self {
        Post {
            id: doc.id.to_hex(),
            title: doc.title,
            body: doc.body,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserDoc {
    #[serde(rename = "_id")]
    id: ObjectId,
    username: String,
    #[serde(default)]
    social: SocialDoc,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SocialDoc {
    #[serde(default)]
    followed_tags: Vec<ObjectId>,
    #[serde(default)]
    blocked_tags: Vec<ObjectId>,
}

impl From<UserDoc> for User {
    fn from(doc: UserDoc) -> Self {
        User {
            id: doc.id.to_hex(),
            username: doc.username,
            social: Social {
                followed_tags: doc
                    .social
                    .followed_tags
                    .iter()
                    .map(|id| id.to_hex())
                    .collect(),
                blocked_tags: doc
                    .social
                    .blocked_tags
                    .iter()
                    .map(|id| id.to_hex())
                    .collect(),
            },
        }
    }
}
