use flutter_common::model::{
    Id,
    post::{Post, PostMarker},
};
use std::{cell::RefCell, rc::Rc};
use tracing::debug;

/// Propagates confirmed changes of one post into the collection holding it.
pub trait CollectionNotifier {
    /// Replaces the entry with `id` by `updater(entry)`. Other entries and the
    /// order are untouched; an unknown id is ignored.
    fn replace_post(&self, id: &Id<PostMarker>, updater: &dyn Fn(&Post) -> Post);

    /// Drops the entry with `id`, if present.
    fn remove_post(&self, id: &Id<PostMarker>);
}

/// Ordered list of posts shared between a feed and the views it renders.
#[derive(Clone, Debug, Default)]
pub struct PostCollection {
    posts: Rc<RefCell<Vec<Post>>>,
}

impl PostCollection {
    #[must_use]
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Rc::new(RefCell::new(posts)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.posts.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.posts.borrow().is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &Id<PostMarker>) -> Option<Post> {
        self.posts.borrow().iter().find(|post| post.id == *id).cloned()
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Post> {
        self.posts.borrow().clone()
    }

    pub fn push(&self, post: Post) {
        self.posts.borrow_mut().push(post);
    }
}

impl CollectionNotifier for PostCollection {
    fn replace_post(&self, id: &Id<PostMarker>, updater: &dyn Fn(&Post) -> Post) {
        let mut posts = self.posts.borrow_mut();
        match posts.iter_mut().find(|post| post.id == *id) {
            Some(entry) => *entry = updater(entry),
            None => debug!(%id, "Post to replace is not in the collection"),
        }
    }

    fn remove_post(&self, id: &Id<PostMarker>) {
        self.posts.borrow_mut().retain(|post| post.id != *id);
    }
}
