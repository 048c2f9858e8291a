//! Tag follow/block endpoints.
//!
//! Both endpoints run the same toggle flow with the roles of the two
//! relation sets swapped.

use axum::{
    extract::{Path, State},
    Json,
};
use mongodb::bson::oid::ObjectId;

use super::{parse_tag_id, ApiResult};
use crate::auth::AuthUser;
use crate::db::store::RelationUpdate;
use crate::errors::AppError;
use crate::models::User;
use crate::social::{self, RelationKind};
use crate::AppState;

/// PUT /api/tags/:tagId/follow - Toggle follow of a tag for the acting user.
pub async fn follow_tag(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(tag_id): Path<String>,
) -> ApiResult<User> {
    toggle_relation(state, user_id, &tag_id, RelationKind::Follow).await
}

/// PUT /api/tags/:tagId/block - Toggle block of a tag for the acting user.
pub async fn block_tag(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(tag_id): Path<String>,
) -> ApiResult<User> {
    toggle_relation(state, user_id, &tag_id, RelationKind::Block).await
}

/// Fetch the user's sets, compute the new membership, persist it atomically,
/// return the updated user.
async fn toggle_relation(
    state: AppState,
    user_id: ObjectId,
    raw_tag_id: &str,
    kind: RelationKind,
) -> ApiResult<User> {
    let tag_id = parse_tag_id(raw_tag_id)?;

    let user = state
        .store
        .find_user(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    let (target, opposite) = match kind {
        RelationKind::Follow => (&user.social.followed_tags, &user.social.blocked_tags),
        RelationKind::Block => (&user.social.blocked_tags, &user.social.followed_tags),
    };

    let outcome = social::toggle(target, opposite, &tag_id.to_hex());
    let update = if outcome.added {
        RelationUpdate::Add {
            remove_from_opposite: outcome.remove_from_opposite,
        }
    } else {
        RelationUpdate::Remove
    };

    let updated = state
        .store
        .update_relations(user_id, kind, tag_id, update)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(updated))
}
