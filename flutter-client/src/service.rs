use crate::error::RemoteError;
use async_trait::async_trait;
use flutter_common::model::request::{DeletePost, ToggleLike, UpdatePostBody};

/// The remote authority for posts.
///
/// Each call resolves to success or a [`RemoteError`]. Post views are driven on a
/// single thread, so implementations don't need to be `Send`.
#[async_trait(?Send)]
pub trait PostService {
    async fn update_body(&self, request: &UpdatePostBody) -> Result<(), RemoteError>;
    async fn toggle_like(&self, request: &ToggleLike) -> Result<(), RemoteError>;
    async fn delete_post(&self, request: &DeletePost) -> Result<(), RemoteError>;
}
