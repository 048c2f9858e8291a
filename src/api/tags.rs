//! Tag API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{parse_tag_id, ApiResult, MessageResponse, Paginated};
use crate::errors::AppError;
use crate::models::{CreateTagRequest, Post, Tag, TagSummary};
use crate::paging::{self, PageRequest, DEFAULT_PAGE_LIMIT};
use crate::AppState;

/// Number of tags the featured listing returns.
const FEATURED_LIMIT: u64 = 10;

/// Results per search page, fixed by the API contract.
const SEARCH_PAGE_LIMIT: u64 = 10;

/// Query parameters for GET /api/tags.
#[derive(Debug, Deserialize)]
pub struct ListTagsQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
    #[serde(default)]
    pub category: Option<String>,
}

/// Query parameters for paginated list endpoints without a category.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

/// Query parameters for GET /api/tags/search.
#[derive(Debug, Deserialize)]
pub struct SearchTagsQuery {
    pub name: String,
    #[serde(default = "default_page")]
    pub page: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    DEFAULT_PAGE_LIMIT
}

/// A tag listing entry: the plain listing carries full tags, the featured
/// listing a name-only projection.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum TagListItem {
    Full(Tag),
    Summary(TagSummary),
}

/// POST /api/tags - Create a new tag.
pub async fn create_tag(
    State(state): State<AppState>,
    Json(request): Json<CreateTagRequest>,
) -> ApiResult<MessageResponse> {
    let name = match request.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            return Err(AppError::Validation(
                "Some field need to be filled".to_string(),
            ))
        }
    };

    let tag = state
        .store
        .create_tag(&name, request.description.as_deref())
        .await?;

    Ok(Json(MessageResponse {
        message: format!("Tag {} has been created", tag.name),
    }))
}

/// GET /api/tags - List tags with pagination metadata.
pub async fn list_tags(
    State(state): State<AppState>,
    Query(query): Query<ListTagsQuery>,
) -> ApiResult<Paginated<TagListItem>> {
    let request = PageRequest::new(query.page, query.limit)?;

    let total = state.store.count_tags().await?;
    let page = paging::paginate(total, &request, "/api/tags");

    // "all" and unrecognized categories share the plain listing.
    let data = match query.category.as_deref() {
        Some("featured-tag") => state
            .store
            .featured_tags(FEATURED_LIMIT)
            .await?
            .into_iter()
            .map(TagListItem::Summary)
            .collect(),
        _ => state
            .store
            .list_tags(request.limit(), request.skip())
            .await?
            .into_iter()
            .map(TagListItem::Full)
            .collect(),
    };

    Ok(Json(Paginated::new(data, page)))
}

/// GET /api/tags/:tagId - Fetch a single tag.
pub async fn get_tag(
    State(state): State<AppState>,
    Path(tag_id): Path<String>,
) -> ApiResult<Tag> {
    let id = parse_tag_id(&tag_id)?;

    match state.store.find_tag(id).await? {
        Some(tag) => Ok(Json(tag)),
        None => Err(AppError::NotFound(format!("Tag {} not found", tag_id))),
    }
}

/// GET /api/tags/random - One uniformly random tag.
pub async fn random_tag(State(state): State<AppState>) -> ApiResult<Tag> {
    let mut tags = state.store.sample_tags(1).await?;

    match tags.pop() {
        Some(tag) => Ok(Json(tag)),
        None => Err(AppError::NotFound("Tag doesn't exist".to_string())),
    }
}

/// GET /api/tags/random-batch - A randomly sized batch of random tags.
pub async fn random_tags(State(state): State<AppState>) -> ApiResult<Vec<Tag>> {
    let tags = state.store.sample_tags(sample_count()).await?;

    if tags.is_empty() {
        return Err(AppError::NotFound("Tags don't exist".to_string()));
    }

    Ok(Json(tags))
}

/// GET /api/tags/search - Search tags by name.
pub async fn search_tags(
    State(state): State<AppState>,
    Query(query): Query<SearchTagsQuery>,
) -> ApiResult<Vec<TagSummary>> {
    let request = PageRequest::new(query.page, SEARCH_PAGE_LIMIT)?;

    let tags = state
        .store
        .search_tags(&query.name, request.limit(), request.skip())
        .await?;

    if tags.is_empty() {
        return Err(AppError::NotFound(format!("No tag named {}", query.name)));
    }

    Ok(Json(tags))
}

/// GET /api/tags/by-name/:name/posts - Posts attached to the named tag.
pub async fn tag_posts(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Paginated<Post>> {
    let request = PageRequest::new(query.page, query.limit)?;

    let Some(found) = state
        .store
        .tag_posts(&name, request.limit(), request.skip())
        .await?
    else {
        return Err(AppError::NotFound("Tag not found".to_string()));
    };

    let base_path = format!("/api/tags/by-name/{}/posts", name);
    let page = paging::paginate(found.total, &request, &base_path);

    Ok(Json(Paginated::new(found.posts, page)))
}

/// Batch size for the random tag sample, uniform in `[1, 7]`.
fn sample_count() -> u32 {
    rand::thread_rng().gen_range(1..=7)
}

#[cfg(test)]
mod tests {
    use super::sample_count;

    #[test]
    fn test_sample_count_stays_in_range() {
        for _ in 0..200 {
            let count = sample_count();
            assert!((1..=7).contains(&count));
        }
    }
}
