//! Tag relation toggling.
//!
//! A user holds two tag relation sets, followed and blocked, and a tag may
//! live in at most one of them. Follow and block share a single toggle
//! contract with the roles of the two sets swapped.

/// Which relation set a toggle targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    Follow,
    Block,
}

/// Outcome of toggling a tag's membership in a relation set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggle {
    /// The target set after the toggle.
    pub new_target_set: Vec<String>,
    /// Whether the tag was added (as opposed to removed).
    pub added: bool,
    /// Whether the tag must also be dropped from the opposite set.
    pub remove_from_opposite: bool,
}

/// Toggle `tag_id`'s membership in `target_set`.
///
/// Adding a tag that lives in `opposite_set` flags it for removal there,
/// which keeps the two sets disjoint. Removal never touches the opposite
/// set.
pub fn toggle(target_set: &[String], opposite_set: &[String], tag_id: &str) -> Toggle {
    let mut new_target_set = target_set.to_vec();

    match new_target_set.iter().position(|id| id == tag_id) {
        Some(pos) => {
            new_target_set.remove(pos);
            Toggle {
                new_target_set,
                added: false,
                remove_from_opposite: false,
            }
        }
        None => {
            new_target_set.push(tag_id.to_string());
            Toggle {
                new_target_set,
                added: true,
                remove_from_opposite: opposite_set.iter().any(|id| id == tag_id),
            }
        }
    }
}
