//! Client-side interaction core for a single flutter post: liking, editing and
//! deleting, with the parent collection kept in step.

pub mod config;
pub mod delete;
pub mod draft;
pub mod edit;
pub mod error;
pub mod http;
pub mod like;
pub mod notifier;
pub mod phase;
pub mod service;
pub mod view;

#[cfg(test)]
mod testing;

pub use error::{DeleteError, EditError, LikeError, RemoteError};
pub use notifier::{CollectionNotifier, PostCollection};
pub use service::PostService;
pub use view::PostView;
