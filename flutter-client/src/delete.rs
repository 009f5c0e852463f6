use crate::{
    error::DeleteError,
    notifier::CollectionNotifier,
    service::PostService,
    view::{PostView, SettleGuard, ViewState},
};
use flutter_common::model::request::DeletePost;
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};
use tracing::{debug, info, warn};

impl PostView {
    /// Deletes the post, then hides the view and drops the post from the parent
    /// collection.
    ///
    /// Nothing is hidden before the service confirms. Deleting a post that is
    /// already hidden succeeds without a request. Dropping the returned future
    /// before it settles leaves the post visible and deletable.
    pub fn delete_post(&self) -> impl Future<Output = Result<(), DeleteError>> + use<> {
        let started = self.begin_delete();
        settle_delete(
            started,
            Rc::downgrade(&self.state),
            Rc::clone(&self.service),
            Rc::clone(&self.notifier),
        )
    }

    fn begin_delete(&self) -> Result<Option<(DeletePost, SettleGuard)>, DeleteError> {
        let mut state = self.state.borrow_mut();

        if !state.viewer_is_author() {
            return Err(DeleteError::NotAuthor);
        }
        if !state.visible {
            return Ok(None);
        }
        if !state.delete_phase.begin() {
            return Err(DeleteError::InFlight);
        }

        let request = DeletePost {
            id: state.post.id.clone(),
        };
        let guard = SettleGuard::new(&self.state, |state| state.delete_phase.abandon());
        Ok(Some((request, guard)))
    }
}

async fn settle_delete(
    started: Result<Option<(DeletePost, SettleGuard)>, DeleteError>,
    state: Weak<RefCell<ViewState>>,
    service: Rc<dyn PostService>,
    notifier: Rc<dyn CollectionNotifier>,
) -> Result<(), DeleteError> {
    let Some((request, guard)) = started? else {
        return Ok(());
    };
    debug!(post = %request.id, "Deleting post");

    let result = service.delete_post(&request).await;
    guard.disarm();

    if let Some(view) = state.upgrade() {
        let mut state = view.borrow_mut();
        state.delete_phase.settle(&result);
        if result.is_ok() {
            state.visible = false;
            state.edit_form = None;
        }
    }

    match result {
        Ok(()) => {
            info!(post = %request.id, "Post deleted");
            notifier.remove_post(&request.id);
            Ok(())
        }
        Err(err) => {
            warn!(error = %err, post = %request.id, "Post was not deleted");
            Err(err.into())
        }
    }
}
