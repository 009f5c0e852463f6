use crate::model::{Id, actor::ActorMarker};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Membership change requested for a post's like-set.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LikeAction {
    Add,
    Remove,
}

impl LikeAction {
    /// The action that flips the current membership.
    #[must_use]
    pub fn toggling(currently_liked: bool) -> Self {
        if currently_liked {
            LikeAction::Remove
        } else {
            LikeAction::Add
        }
    }
}

/// Actors that liked a post. Membership is unique and unordered.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct LikeSet(BTreeSet<Id<ActorMarker>>);

impl LikeSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, actor: &Id<ActorMarker>) -> bool {
        self.0.contains(actor)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Id<ActorMarker>> {
        self.0.iter()
    }

    /// Applies `action` for `actor`. Returns whether the membership changed.
    pub fn apply(&mut self, action: LikeAction, actor: &Id<ActorMarker>) -> bool {
        match action {
            LikeAction::Add => self.0.insert(actor.clone()),
            LikeAction::Remove => self.0.remove(actor),
        }
    }

    #[must_use]
    pub fn with_applied(&self, action: LikeAction, actor: &Id<ActorMarker>) -> Self {
        let mut applied = self.clone();
        applied.apply(action, actor);
        applied
    }
}

impl FromIterator<Id<ActorMarker>> for LikeSet {
    fn from_iter<T: IntoIterator<Item = Id<ActorMarker>>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
