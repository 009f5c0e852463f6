//! View-state of one rendered post.
//!
//! A [`PostView`] owns the local state of a post while it is on screen: visibility,
//! the working copy of the like-set, and the edit form. The like, edit and delete
//! controllers are implemented on it in their own modules.
//!
//! Controller operations run their checks and state transitions synchronously when
//! called and return a `'static` future for the remote call. That future only holds
//! a weak reference to the view-state, so dropping the view while a call is
//! outstanding turns the completion into a no-op on the view. Dropping the future
//! itself before it settles rolls the controller back through a [`SettleGuard`].

use crate::{draft::Draft, notifier::CollectionNotifier, phase::Phase, service::PostService};
use flutter_common::model::{
    actor::Actor,
    like::{LikeAction, LikeSet},
    post::Post,
};
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};
use tracing::debug;

#[derive(Debug)]
pub(crate) struct ViewState {
    pub(crate) post: Post,
    pub(crate) viewer: Option<Actor>,
    pub(crate) visible: bool,
    pub(crate) liked_by_local: LikeSet,
    pub(crate) pending_like: Option<LikeAction>,
    pub(crate) like_phase: Phase,
    pub(crate) edit_form: Option<Draft>,
    pub(crate) edit_phase: Phase,
    pub(crate) delete_phase: Phase,
}

impl ViewState {
    pub(crate) fn viewer_is_author(&self) -> bool {
        self.viewer
            .as_ref()
            .is_some_and(|viewer| self.post.is_authored_by(&viewer.id))
    }

    fn displayed_likes(&self) -> LikeSet {
        match (self.pending_like, &self.viewer) {
            (Some(action), Some(viewer)) => self.liked_by_local.with_applied(action, &viewer.id),
            _ => self.liked_by_local.clone(),
        }
    }
}

/// Rolls a controller back when its call future is dropped before settling.
///
/// Created together with the in-flight transition and disarmed as soon as the
/// service answers.
pub(crate) struct SettleGuard {
    state: Weak<RefCell<ViewState>>,
    reset: fn(&mut ViewState),
    armed: bool,
}

impl SettleGuard {
    pub(crate) fn new(state: &Rc<RefCell<ViewState>>, reset: fn(&mut ViewState)) -> Self {
        Self {
            state: Rc::downgrade(state),
            reset,
            armed: true,
        }
    }

    pub(crate) fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for SettleGuard {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let Some(view) = self.state.upgrade() else {
            return;
        };
        if let Ok(mut state) = view.try_borrow_mut() {
            debug!(post = %state.post.id, "Call dropped before it settled");
            (self.reset)(&mut state);
        }
    }
}

pub struct PostView {
    pub(crate) state: Rc<RefCell<ViewState>>,
    pub(crate) service: Rc<dyn PostService>,
    pub(crate) notifier: Rc<dyn CollectionNotifier>,
}

impl PostView {
    /// Mounts a view of `post` for `viewer`, who is `None` when nobody is signed in.
    #[must_use]
    pub fn new(
        post: Post,
        viewer: Option<Actor>,
        service: Rc<dyn PostService>,
        notifier: Rc<dyn CollectionNotifier>,
    ) -> Self {
        let state = ViewState {
            liked_by_local: post.liked_by.clone(),
            post,
            viewer,
            visible: true,
            pending_like: None,
            like_phase: Phase::Idle,
            edit_form: None,
            edit_phase: Phase::Idle,
            delete_phase: Phase::Idle,
        };

        Self {
            state: Rc::new(RefCell::new(state)),
            service,
            notifier,
        }
    }

    /// Drops the view. Outstanding calls still run to completion.
    pub fn unmount(self) {}

    #[must_use]
    pub fn post(&self) -> Post {
        self.state.borrow().post.clone()
    }

    #[must_use]
    pub fn viewer(&self) -> Option<Actor> {
        self.state.borrow().viewer.clone()
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.state.borrow().visible
    }

    /// Like-set as last confirmed by the service.
    #[must_use]
    pub fn liked_by_local(&self) -> LikeSet {
        self.state.borrow().liked_by_local.clone()
    }

    /// Number of likes to display, including a toggle that is still in flight.
    #[must_use]
    pub fn like_count(&self) -> usize {
        self.state.borrow().displayed_likes().len()
    }

    /// Whether the viewer's like is shown as set, including a pending toggle.
    #[must_use]
    pub fn is_liked(&self) -> bool {
        let state = self.state.borrow();
        state
            .viewer
            .as_ref()
            .is_some_and(|viewer| state.displayed_likes().contains(&viewer.id))
    }

    #[must_use]
    pub fn like_in_flight(&self) -> bool {
        self.state.borrow().like_phase.is_in_flight()
    }

    #[must_use]
    pub fn like_phase(&self) -> Phase {
        self.state.borrow().like_phase
    }

    #[must_use]
    pub fn edit_form_open(&self) -> bool {
        self.state.borrow().edit_form.is_some()
    }

    #[must_use]
    pub fn draft_body(&self) -> Option<String> {
        self.state
            .borrow()
            .edit_form
            .as_ref()
            .map(|draft| draft.text().to_owned())
    }

    #[must_use]
    pub fn edit_phase(&self) -> Phase {
        self.state.borrow().edit_phase
    }

    #[must_use]
    pub fn delete_phase(&self) -> Phase {
        self.state.borrow().delete_phase
    }

    #[must_use]
    pub fn can_like(&self) -> bool {
        let state = self.state.borrow();
        state.viewer.is_some() && state.visible && !state.like_phase.is_in_flight()
    }

    #[must_use]
    pub fn can_edit(&self) -> bool {
        let state = self.state.borrow();
        state.viewer_is_author() && state.visible
    }

    #[must_use]
    pub fn can_delete(&self) -> bool {
        let state = self.state.borrow();
        state.viewer_is_author() && state.visible && !state.delete_phase.is_in_flight()
    }
}
