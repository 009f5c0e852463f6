use flutter_common::model::{
    Id,
    actor::ActorMarker,
    like::{LikeAction, LikeSet},
    post::{CreatePost, Post, PostBody, PostMarker},
};
use time::OffsetDateTime;
use tokio::sync::RwLock;
use tracing::debug;

/// In-memory post storage. Every mutation returns the stored post, or `None` if
/// no post has the given id.
#[derive(Debug, Default)]
pub struct PostStore {
    posts: RwLock<Vec<Post>>,
}

impl PostStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }

    /// All posts, newest first.
    pub async fn fetch_posts(&self) -> Vec<Post> {
        let mut posts = self.posts.read().await.clone();
        posts.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
        posts
    }

    pub async fn fetch_post(&self, post_id: &Id<PostMarker>) -> Option<Post> {
        self.posts
            .read()
            .await
            .iter()
            .find(|post| post.id == *post_id)
            .cloned()
    }

    pub async fn create_post(&self, post: CreatePost) -> Post {
        let post = Post {
            id: Id::generate(),
            body: post.body,
            posted_at: OffsetDateTime::now_utc(),
            author: post.author,
            liked_by: LikeSet::new(),
        };
        debug!(post = %post.id, author = %post.author.id, "Creating post");

        self.posts.write().await.push(post.clone());
        post
    }

    pub async fn update_body(&self, post_id: &Id<PostMarker>, body: PostBody) -> Option<Post> {
        let mut posts = self.posts.write().await;
        let post = posts.iter_mut().find(|post| post.id == *post_id)?;
        post.body = body;

        Some(post.clone())
    }

    /// Adding an existing like or removing a missing one leaves the set unchanged.
    pub async fn toggle_like(
        &self,
        post_id: &Id<PostMarker>,
        actor_id: &Id<ActorMarker>,
        action: LikeAction,
    ) -> Option<Post> {
        let mut posts = self.posts.write().await;
        let post = posts.iter_mut().find(|post| post.id == *post_id)?;
        if !post.liked_by.apply(action, actor_id) {
            debug!(post = %post_id, actor = %actor_id, ?action, "Like toggle changed nothing");
        }

        Some(post.clone())
    }

    pub async fn delete_post(&self, post_id: &Id<PostMarker>) -> Option<Post> {
        let mut posts = self.posts.write().await;
        let index = posts.iter().position(|post| post.id == *post_id)?;

        Some(posts.remove(index))
    }
}
