use crate::{
    error::LikeError,
    service::PostService,
    view::{PostView, SettleGuard, ViewState},
};
use flutter_common::model::{like::LikeAction, request::ToggleLike};
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};
use tracing::{debug, warn};

impl PostView {
    /// Likes or unlikes the post for the viewer.
    ///
    /// The action is decided from the local like-set when this is called, and the
    /// view is marked in flight right away: any further toggle before this one
    /// settles fails with [`LikeError::InFlight`] without reaching the service. The
    /// like-set only changes once the service confirms; until then the pending
    /// action shows in [`PostView::like_count`] and [`PostView::is_liked`]. Dropping
    /// the returned future before it settles rolls the toggle back.
    pub fn toggle_like(&self) -> impl Future<Output = Result<LikeAction, LikeError>> + use<> {
        let started = self.begin_toggle();
        settle_toggle(started, Rc::downgrade(&self.state), Rc::clone(&self.service))
    }

    fn begin_toggle(&self) -> Result<(ToggleLike, SettleGuard), LikeError> {
        let mut state = self.state.borrow_mut();

        let actor_id = state
            .viewer
            .as_ref()
            .map(|viewer| viewer.id.clone())
            .ok_or(LikeError::Unauthenticated)?;
        if !state.visible {
            return Err(LikeError::PostDeleted);
        }
        if !state.like_phase.begin() {
            return Err(LikeError::InFlight);
        }

        let action = LikeAction::toggling(state.liked_by_local.contains(&actor_id));
        state.pending_like = Some(action);

        let request = ToggleLike {
            id: state.post.id.clone(),
            actor_id,
            action,
        };
        Ok((request, SettleGuard::new(&self.state, abandon_toggle)))
    }
}

fn abandon_toggle(state: &mut ViewState) {
    state.pending_like = None;
    state.like_phase.abandon();
}

async fn settle_toggle(
    started: Result<(ToggleLike, SettleGuard), LikeError>,
    state: Weak<RefCell<ViewState>>,
    service: Rc<dyn PostService>,
) -> Result<LikeAction, LikeError> {
    let (request, guard) = started?;
    debug!(post = %request.id, actor = %request.actor_id, action = ?request.action, "Toggling like");

    let result = service.toggle_like(&request).await;
    guard.disarm();

    let Some(view) = state.upgrade() else {
        debug!(post = %request.id, "Like toggle settled after the view was unmounted");
        return result.map(|()| request.action).map_err(LikeError::from);
    };
    let mut state = view.borrow_mut();
    state.pending_like = None;
    state.like_phase.settle(&result);

    match result {
        Ok(()) => {
            state
                .liked_by_local
                .apply(request.action, &request.actor_id);
            Ok(request.action)
        }
        Err(err) => {
            warn!(error = %err, post = %request.id, "Like toggle rolled back");
            Err(err.into())
        }
    }
}
