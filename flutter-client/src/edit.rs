use crate::{
    draft::Draft,
    error::EditError,
    notifier::CollectionNotifier,
    service::PostService,
    view::{PostView, SettleGuard, ViewState},
};
use flutter_common::model::{post::Post, request::UpdatePostBody};
use std::{
    cell::RefCell,
    rc::{Rc, Weak},
};
use tracing::{debug, warn};

impl PostView {
    /// Opens the edit form, seeding the draft with the current body. A form that is
    /// already open keeps its draft.
    pub fn open_edit(&self) -> Result<(), EditError> {
        let mut state = self.state.borrow_mut();
        ensure_editable(&state)?;

        if state.edit_form.is_none() {
            let draft = Draft::new(state.post.body.get());
            state.edit_form = Some(draft);
        }
        Ok(())
    }

    pub fn update_draft(&self, text: impl Into<String>) -> Result<(), EditError> {
        self.state
            .borrow_mut()
            .edit_form
            .as_mut()
            .ok_or(EditError::FormClosed)?
            .set(text);
        Ok(())
    }

    /// Closes the form and discards the draft. Nothing is sent.
    pub fn cancel_edit(&self) {
        self.state.borrow_mut().edit_form = None;
    }

    /// Submits the draft as the new body.
    ///
    /// An empty draft fails with [`EditError::Validation`] before anything is sent.
    /// On success the view's post and the parent collection's entry both carry the
    /// new body and the form closes. On failure the form stays open with the draft
    /// intact. If the post was deleted while the edit was in flight the delete wins
    /// and the result is [`EditError::PostDeleted`]. Dropping the returned future
    /// before it settles rolls the commit back and keeps the draft.
    pub fn commit_edit(&self) -> impl Future<Output = Result<Post, EditError>> + use<> {
        let started = self.begin_commit();
        settle_commit(
            started,
            Rc::downgrade(&self.state),
            Rc::clone(&self.service),
            Rc::clone(&self.notifier),
        )
    }

    fn begin_commit(&self) -> Result<(Post, UpdatePostBody, SettleGuard), EditError> {
        let mut state = self.state.borrow_mut();
        ensure_editable(&state)?;

        let draft = state.edit_form.as_ref().ok_or(EditError::FormClosed)?;
        if state.edit_phase.is_in_flight() {
            return Err(EditError::InFlight);
        }
        let body = draft.validate()?;
        state.edit_phase.begin();

        let request = UpdatePostBody {
            id: state.post.id.clone(),
            body,
        };
        let guard = SettleGuard::new(&self.state, |state| state.edit_phase.abandon());
        Ok((state.post.clone(), request, guard))
    }
}

fn ensure_editable(state: &ViewState) -> Result<(), EditError> {
    if !state.viewer_is_author() {
        return Err(EditError::NotAuthor);
    }
    if !state.visible {
        return Err(EditError::PostDeleted);
    }
    Ok(())
}

async fn settle_commit(
    started: Result<(Post, UpdatePostBody, SettleGuard), EditError>,
    state: Weak<RefCell<ViewState>>,
    service: Rc<dyn PostService>,
    notifier: Rc<dyn CollectionNotifier>,
) -> Result<Post, EditError> {
    let (snapshot, request, guard) = started?;
    debug!(post = %request.id, "Committing edit");

    let result = service.update_body(&request).await;
    guard.disarm();
    let view = state.upgrade();
    if let Some(view) = &view {
        view.borrow_mut().edit_phase.settle(&result);
    }

    if let Err(err) = result {
        warn!(error = %err, post = %request.id, "Edit was not saved");
        return Err(err.into());
    }

    let UpdatePostBody { id, body } = request;
    let updated = match view {
        Some(view) => {
            let mut state = view.borrow_mut();
            if !state.visible {
                debug!(post = %id, "Edit settled after the post was deleted");
                return Err(EditError::PostDeleted);
            }
            state.post.body = body.clone();
            state.edit_form = None;
            state.post.clone()
        }
        None => {
            debug!(post = %id, "Edit settled after the view was unmounted");
            snapshot.with_body(body.clone())
        }
    };

    notifier.replace_post(&id, &|post| post.with_body(body.clone()));
    Ok(updated)
}
