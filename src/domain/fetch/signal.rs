//! Invalidation signal published after successful mutations

use super::key::ResourceKind;

/// A request to revalidate cached queries for a resource.
///
/// Signals are produced by mutation paths and consumed exactly once by the
/// invalidation coordinator. A targeted signal carries the id of the mutated
/// item; a broad signal only names the resource kind. Either way the
/// coordinator also revalidates every key under the kind's prefix, so list
/// queries pick up the change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidationSignal {
    pub kind: ResourceKind,
    pub id: Option<String>,
}

impl InvalidationSignal {
    /// Signal affecting a whole resource category
    pub fn broad(kind: ResourceKind) -> Self {
        Self { kind, id: None }
    }

    /// Signal affecting one item (and, via the prefix, its category)
    pub fn targeted(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: Some(id.into()),
        }
    }
}
