use crate::{
    error::RemoteError,
    notifier::{CollectionNotifier, PostCollection},
    service::PostService,
    view::PostView,
};
use async_trait::async_trait;
use flutter_common::model::{
    Id,
    actor::{Actor, ActorMarker, DisplayName},
    like::LikeSet,
    post::{Post, PostBody},
    request::{DeletePost, ToggleLike, UpdatePostBody},
};
use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};
use time::macros::datetime;

#[derive(Clone, Eq, PartialEq, Debug)]
pub(crate) enum Request {
    UpdateBody(UpdatePostBody),
    ToggleLike(ToggleLike),
    DeletePost(DeletePost),
}

/// Records requests and answers them after one scheduler yield, so that calls
/// started together overlap.
#[derive(Default)]
pub(crate) struct FakeService {
    requests: RefCell<Vec<Request>>,
    failure: RefCell<Option<RemoteError>>,
    outstanding: Cell<usize>,
    max_outstanding: Cell<usize>,
}

impl FakeService {
    pub(crate) fn fail_with(&self, failure: Option<RemoteError>) {
        *self.failure.borrow_mut() = failure;
    }

    pub(crate) fn requests(&self) -> Vec<Request> {
        self.requests.borrow().clone()
    }

    pub(crate) fn max_outstanding(&self) -> usize {
        self.max_outstanding.get()
    }

    async fn answer(&self, request: Request) -> Result<(), RemoteError> {
        self.requests.borrow_mut().push(request);
        self.outstanding.set(self.outstanding.get() + 1);
        self.max_outstanding
            .set(self.max_outstanding.get().max(self.outstanding.get()));

        tokio::task::yield_now().await;

        self.outstanding.set(self.outstanding.get() - 1);
        self.failure.borrow().clone().map_or(Ok(()), Err)
    }
}

#[async_trait(?Send)]
impl PostService for FakeService {
    async fn update_body(&self, request: &UpdatePostBody) -> Result<(), RemoteError> {
        self.answer(Request::UpdateBody(request.clone())).await
    }

    async fn toggle_like(&self, request: &ToggleLike) -> Result<(), RemoteError> {
        self.answer(Request::ToggleLike(request.clone())).await
    }

    async fn delete_post(&self, request: &DeletePost) -> Result<(), RemoteError> {
        self.answer(Request::DeletePost(request.clone())).await
    }
}

pub(crate) fn actor(id: &str) -> Actor {
    Actor {
        id: Id::from(id),
        display_name: DisplayName::new(format!("{id} name")).unwrap(),
        avatar_url: format!("https://example.com/{id}.png"),
    }
}

pub(crate) fn likes(ids: &[&str]) -> LikeSet {
    ids.iter().copied().map(Id::<ActorMarker>::from).collect()
}

pub(crate) fn post(id: &str, author: &str) -> Post {
    Post {
        id: Id::from(id),
        body: PostBody::try_from("hello").unwrap(),
        posted_at: datetime!(2025-10-24 10:30 UTC),
        author: actor(author),
        liked_by: LikeSet::new(),
    }
}

/// Mounts a view of `post` inside a collection holding just that post.
pub(crate) fn mount(
    post: Post,
    viewer: Option<Actor>,
) -> (PostView, Rc<FakeService>, PostCollection) {
    let service = Rc::new(FakeService::default());
    let collection = PostCollection::new(vec![post.clone()]);
    let notifier: Rc<dyn CollectionNotifier> = Rc::new(collection.clone());
    let view = PostView::new(post, viewer, service.clone(), notifier);

    (view, service, collection)
}
