use flutter_common::model::post::InvalidPostBodyError;
use thiserror::Error;

/// Failure of a call to the post service.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum RemoteError {
    #[error("The post service could not be reached: {0}")]
    Network(String),
    #[error("The post service rejected the request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum LikeError {
    #[error("Liking requires a signed in actor")]
    Unauthenticated,
    #[error("A like toggle is already in flight for this post")]
    InFlight,
    #[error("The post was deleted")]
    PostDeleted,
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum EditError {
    #[error("Only the author may edit this post")]
    NotAuthor,
    #[error("The edit form is not open")]
    FormClosed,
    #[error("An edit is already being submitted for this post")]
    InFlight,
    #[error("The post was deleted")]
    PostDeleted,
    #[error(transparent)]
    Validation(#[from] InvalidPostBodyError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

#[derive(Clone, Eq, PartialEq, Debug, Hash, Error)]
pub enum DeleteError {
    #[error("Only the author may delete this post")]
    NotAuthor,
    #[error("A delete is already in flight for this post")]
    InFlight,
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
