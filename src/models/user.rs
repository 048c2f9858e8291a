//! User model, limited to the fields this service touches.

use serde::{Deserialize, Serialize};

/// A platform user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub social: Social,
}

/// Per-user tag relation sets.
///
/// Invariant: a tag id never appears in both sets at the same time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Social {
    #[serde(default)]
    pub followed_tags: Vec<String>,
    #[serde(default)]
    pub blocked_tags: Vec<String>,
}
