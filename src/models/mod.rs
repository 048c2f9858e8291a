//! Data models for the TagHub tag service.
//!
//! Ids are hex ObjectId strings on the wire; the store layer owns the
//! conversion to and from driver-native ids.

mod post;
mod tag;
mod user;

pub use post::*;
pub use tag::*;
pub use user::*;
