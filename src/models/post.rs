//! Post model.
//!
//! Posts are authored elsewhere on the platform; this service only reads them
//! when listing the posts attached to a tag.

use serde::{Deserialize, Serialize};

/// A post referenced from a tag's `posts` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}
