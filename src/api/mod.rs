//! REST API module.
//!
//! Contains all API routes and handlers plus the shared response envelopes.

mod relations;
mod tags;

pub use relations::*;
pub use tags::*;

use axum::Json;
use mongodb::bson::oid::ObjectId;
use serde::Serialize;

use crate::errors::AppError;
use crate::paging::{Page, PageInfo, PageLinks};

/// Handler result: a JSON body or an error mapped by [`AppError`].
pub type ApiResult<T> = Result<Json<T>, AppError>;

/// Paginated response envelope shared by the list endpoints.
#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub pagination: PageInfo,
    pub links: PageLinks,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: Page) -> Self {
        Self {
            data,
            pagination: page.info,
            links: page.links,
        }
    }
}

/// Message-only response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Parse a path tag id, rejecting malformed input before it reaches the store.
pub(crate) fn parse_tag_id(raw: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid tag id {}", raw)))
}
