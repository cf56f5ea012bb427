//! Sync Controller - drives list/edit/create/update/delete against the API
//!
//! Runs on a single cooperative task. State lives in `RefCell`s that are
//! never borrowed across an `.await`; the Store and both projections are
//! touched only once the remote call has committed.

use crate::core::classify::{ErrorReport, Operation, classify};
use crate::core::editing::{ADDING_LABEL, Confirmer, EditingSurface, UPDATING_LABEL};
use crate::core::notify::{Notification, Notifier};
use crate::core::projector::{PanelAction, ProjectionKind, Transition, ViewProjector};
use crate::core::store::CatalogStore;
use catalog_client::{CatalogApi, ClientError, ConnectivityFlag};
use shared::{Product, ProductDraft, ProductId};
use std::cell::{Cell, Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

pub const DELETE_PROMPT: &str =
    "Are you sure you want to delete this product? This action cannot be undone.";

/// Result of one user-initiated operation
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// Remote call succeeded and local state was updated
    Committed(T),
    /// Remote call failed; local state untouched
    Failed(ClientError),
    /// User declined the confirmation
    Cancelled,
    /// The same action is already in flight
    Busy,
}

impl<T> Outcome<T> {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Self::Committed(value) => Outcome::Committed(f(value)),
            Self::Failed(err) => Outcome::Failed(err),
            Self::Cancelled => Outcome::Cancelled,
            Self::Busy => Outcome::Busy,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Self::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// One logical action; at most one of each may be in flight
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    List,
    Edit(ProductId),
    Create,
    Update(ProductId),
    Delete(ProductId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Confirming,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Product fetched for editing; never part of the Store
#[derive(Debug, Clone, PartialEq)]
pub struct EditState {
    pub id: ProductId,
    pub product: Product,
}

/// Host-provided surfaces the controller reports to
#[derive(Clone)]
pub struct Collaborators {
    pub notifier: Rc<dyn Notifier>,
    pub editor: Rc<dyn EditingSurface>,
    pub confirmer: Rc<dyn Confirmer>,
}

#[derive(Debug, Default)]
struct CatalogState {
    store: CatalogStore,
    projector: ViewProjector,
    list_state: ListState,
    edit_state: Option<EditState>,
}

/// Marks an action in flight until dropped
struct InFlight<'a> {
    actions: &'a RefCell<HashMap<Action, Phase>>,
    action: Action,
}

impl InFlight<'_> {
    fn set_phase(&self, phase: Phase) {
        self.actions.borrow_mut().insert(self.action.clone(), phase);
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.actions.borrow_mut().remove(&self.action);
    }
}

/// The editing form shared by every overlapping create/update
#[derive(Debug, Default)]
struct FormLease {
    depth: Cell<usize>,
    original_label: RefCell<Option<String>>,
    close_pending: Cell<bool>,
}

/// One submission holding the form; the last one out restores it
struct Submission<'a> {
    lease: &'a FormLease,
    editor: &'a dyn EditingSurface,
}

impl Submission<'_> {
    fn commit(&self) {
        self.lease.close_pending.set(true);
    }

    /// A failure keeps the form open for another attempt
    fn fail(&self) {
        self.lease.close_pending.set(false);
    }
}

impl Drop for Submission<'_> {
    fn drop(&mut self) {
        let depth = self.lease.depth.get().saturating_sub(1);
        self.lease.depth.set(depth);
        if depth > 0 {
            return;
        }
        if let Some(label) = self.lease.original_label.borrow_mut().take() {
            self.editor.set_submit_label(&label);
        }
        self.editor.set_controls_enabled(true);
        if self.lease.close_pending.replace(false) {
            self.editor.close();
        }
    }
}

pub struct SyncController<A: CatalogApi + ?Sized> {
    api: Arc<A>,
    state: RefCell<CatalogState>,
    in_flight: RefCell<HashMap<Action, Phase>>,
    form: FormLease,
    notifier: Rc<dyn Notifier>,
    editor: Rc<dyn EditingSurface>,
    confirmer: Rc<dyn Confirmer>,
    page_size: u32,
    connectivity: Option<ConnectivityFlag>,
    online: Cell<Option<bool>>,
}

impl<A: CatalogApi + ?Sized> SyncController<A> {
    pub fn new(api: Arc<A>, collaborators: Collaborators, page_size: u32) -> Self {
        Self {
            api,
            state: RefCell::new(CatalogState::default()),
            in_flight: RefCell::new(HashMap::new()),
            form: FormLease::default(),
            notifier: collaborators.notifier,
            editor: collaborators.editor,
            confirmer: collaborators.confirmer,
            page_size,
            connectivity: None,
            online: Cell::new(None),
        }
    }

    /// Share a connectivity flag with the client so offline failures classify correctly
    pub fn with_connectivity(mut self, flag: ConnectivityFlag) -> Self {
        self.connectivity = Some(flag);
        self
    }

    // ========== Operations ==========

    /// Fetch the first page and rebuild both projections
    pub async fn list(&self) -> Outcome<usize> {
        let Some(_guard) = self.begin(Action::List, Phase::Loading) else {
            return Outcome::Busy;
        };
        {
            let mut state = self.state.borrow_mut();
            state.list_state = ListState::Loading;
            state.projector.show_loading();
        }

        match self.api.list(self.page_size).await {
            Ok(products) => {
                let mut guard = self.state.borrow_mut();
                let state = &mut *guard;
                state.store.replace_all(products);
                state.projector.clear_error();
                state.projector.render_all(state.store.products());
                state.list_state = ListState::Loaded;
                let count = state.store.len();
                tracing::info!(count, "Product list loaded");
                Outcome::Committed(count)
            }
            Err(err) => {
                let report = self.report(Operation::List, &err);
                let mut guard = self.state.borrow_mut();
                let state = &mut *guard;
                // Loading cleared the projections; show what the Store still holds
                state.projector.render_all(state.store.products());
                state
                    .projector
                    .show_error(report.panel(vec![PanelAction::RetryList, PanelAction::StartFresh]));
                state.list_state = ListState::Failed;
                Outcome::Failed(err)
            }
        }
    }

    /// Drop everything and show the empty state; refused while a list is loading
    pub fn start_fresh(&self) -> bool {
        if self.in_flight.borrow().contains_key(&Action::List) {
            return false;
        }
        let mut guard = self.state.borrow_mut();
        let state = &mut *guard;
        state.store.replace_all(Vec::new());
        state.projector.clear_error();
        state.projector.render_all(state.store.products());
        state.list_state = ListState::Loaded;
        tracing::info!("Started with an empty catalog");
        true
    }

    /// Run the follow-up behind an error panel button
    pub async fn perform(&self, action: &PanelAction) -> Outcome<()> {
        match action {
            PanelAction::RetryList => self.list().await.map(|_| ()),
            PanelAction::StartFresh => {
                if self.start_fresh() {
                    Outcome::Committed(())
                } else {
                    Outcome::Busy
                }
            }
            PanelAction::RetryEdit(id) => self.begin_edit(id).await.map(|_| ()),
            // Only the edit load panel offers Dismiss
            PanelAction::Dismiss => {
                self.state.borrow_mut().edit_state = None;
                self.editor.close();
                Outcome::Committed(())
            }
        }
    }

    /// Fetch one product into the editing surface
    pub async fn begin_edit(&self, id: &ProductId) -> Outcome<Product> {
        let Some(_guard) = self.begin(Action::Edit(id.clone()), Phase::Loading) else {
            return Outcome::Busy;
        };
        self.editor.show_loading();

        match self.api.get(id).await {
            Ok(product) => {
                self.editor.populate(&product);
                self.state.borrow_mut().edit_state = Some(EditState {
                    id: id.clone(),
                    product: product.clone(),
                });
                tracing::debug!(id = %id, "Product loaded for editing");
                Outcome::Committed(product)
            }
            Err(err) => {
                let report = self.report(Operation::Load, &err);
                self.editor.show_load_error(
                    &report.panel(vec![PanelAction::RetryEdit(id.clone()), PanelAction::Dismiss]),
                );
                Outcome::Failed(err)
            }
        }
    }

    pub async fn create(&self, draft: &ProductDraft) -> Outcome<Product> {
        let Some(_guard) = self.begin(Action::Create, Phase::Submitting) else {
            return Outcome::Busy;
        };
        let draft = draft.normalized();
        let submission = self.begin_submission(ADDING_LABEL);

        match self.api.create(&draft).await {
            Ok(product) => {
                {
                    let mut state = self.state.borrow_mut();
                    if let Some(displaced) = state.store.insert_front(product.clone()) {
                        tracing::warn!(id = %displaced.id, "Create returned an id already on display");
                    }
                    state.projector.patch_insert(&product);
                }
                submission.commit();
                drop(submission);
                tracing::info!(id = %product.id, "Product created");
                self.notifier.notify(Notification::success(
                    "Success!",
                    format!(
                        "Product \"{}\" has been added successfully with ID: {}",
                        product.title, product.id
                    ),
                ));
                Outcome::Committed(product)
            }
            Err(err) => {
                submission.fail();
                drop(submission);
                self.report(Operation::Create, &err);
                Outcome::Failed(err)
            }
        }
    }

    pub async fn update(&self, id: &ProductId, draft: &ProductDraft) -> Outcome<Product> {
        let Some(_guard) = self.begin(Action::Update(id.clone()), Phase::Submitting) else {
            return Outcome::Busy;
        };
        let draft = draft.normalized();
        let submission = self.begin_submission(UPDATING_LABEL);

        match self.api.update(id, &draft).await {
            Ok(product) => {
                {
                    let mut guard = self.state.borrow_mut();
                    let state = &mut *guard;
                    match state.store.replace_by_id(product.clone()) {
                        Ok(_) => {
                            state.projector.patch_replace(&product);
                        }
                        Err(e) => tracing::warn!(error = %e, "Update committed for a product no longer on display"),
                    }
                    if state.edit_state.as_ref().is_some_and(|edit| &edit.id == id) {
                        state.edit_state = None;
                    }
                }
                submission.commit();
                drop(submission);
                tracing::info!(id = %id, "Product updated");
                self.notifier.notify(Notification::success(
                    "Success!",
                    format!("Product \"{}\" has been updated successfully!", product.title),
                ));
                Outcome::Committed(product)
            }
            Err(err) => {
                submission.fail();
                drop(submission);
                self.report(Operation::Update, &err);
                Outcome::Failed(err)
            }
        }
    }

    /// Ask for confirmation, then delete remotely and locally
    pub async fn delete(&self, id: &ProductId) -> Outcome<()> {
        let Some(in_flight) = self.begin(Action::Delete(id.clone()), Phase::Confirming) else {
            return Outcome::Busy;
        };
        if !self.confirmer.confirm(DELETE_PROMPT).await {
            tracing::debug!(id = %id, "Delete cancelled");
            return Outcome::Cancelled;
        }
        in_flight.set_phase(Phase::Submitting);

        match self.api.delete(id).await {
            Ok(()) => {
                {
                    let mut guard = self.state.borrow_mut();
                    let state = &mut *guard;
                    match state.store.remove_by_id(id) {
                        Ok(_) => {
                            state.projector.patch_remove(id);
                        }
                        Err(e) => tracing::warn!(error = %e, "Delete committed for a product no longer on display"),
                    }
                }
                tracing::info!(id = %id, "Product deleted");
                self.notifier.notify(Notification::success(
                    "Success!",
                    "Product has been deleted successfully.",
                ));
                Outcome::Committed(())
            }
            Err(err) => {
                self.report(Operation::Delete, &err);
                Outcome::Failed(err)
            }
        }
    }

    /// Host connectivity event
    pub fn connectivity_changed(&self, online: bool) {
        if let Some(flag) = &self.connectivity {
            flag.set_online(online);
        }
        let notification = match (self.online.replace(Some(online)), online) {
            (None, false) => Notification::warning(
                "No Connection",
                "You appear to be offline. Please check your internet connection.",
            ),
            (Some(true), false) => Notification::warning(
                "Connection Lost",
                "Internet connection lost. Some features may not work.",
            ),
            (Some(false), true) => Notification::success(
                "Connection Restored",
                "Internet connection has been restored.",
            ),
            _ => return,
        };
        tracing::info!(online, "Connectivity changed");
        self.notifier.notify(notification);
    }

    // ========== Accessors ==========

    pub fn store(&self) -> Ref<'_, CatalogStore> {
        Ref::map(self.state.borrow(), |s| &s.store)
    }

    pub fn projector(&self) -> Ref<'_, ViewProjector> {
        Ref::map(self.state.borrow(), |s| &s.projector)
    }

    pub fn list_state(&self) -> ListState {
        self.state.borrow().list_state
    }

    pub fn edit_state(&self) -> Option<EditState> {
        self.state.borrow().edit_state.clone()
    }

    pub fn phase(&self, action: &Action) -> Phase {
        self.in_flight
            .borrow()
            .get(action)
            .copied()
            .unwrap_or(Phase::Idle)
    }

    /// Store and both projections agree unit for unit
    pub fn is_consistent(&self) -> bool {
        let state = self.state.borrow();
        state.projector.is_consistent_with(state.store.products())
    }

    pub fn take_transitions(&self) -> Vec<Transition> {
        self.state.borrow_mut().projector.take_transitions()
    }

    pub fn set_visible(&self, kind: ProjectionKind) {
        self.state.borrow_mut().projector.set_visible(kind);
    }

    pub fn render_html(&self, kind: ProjectionKind) -> String {
        self.state.borrow().projector.to_html(kind)
    }

    // ========== Helpers ==========

    fn begin(&self, action: Action, phase: Phase) -> Option<InFlight<'_>> {
        let mut actions = self.in_flight.borrow_mut();
        if actions.contains_key(&action) {
            tracing::debug!(?action, "Action already in flight");
            return None;
        }
        actions.insert(action.clone(), phase);
        Some(InFlight {
            actions: &self.in_flight,
            action,
        })
    }

    /// Take the form for one submission
    ///
    /// The first submission disables the controls and remembers the label;
    /// later overlapping ones only swap in their progress label.
    fn begin_submission(&self, label: &str) -> Submission<'_> {
        let lease = &self.form;
        if lease.depth.get() == 0 {
            *lease.original_label.borrow_mut() = Some(self.editor.submit_label());
            lease.close_pending.set(false);
            self.editor.set_controls_enabled(false);
        }
        lease.depth.set(lease.depth.get() + 1);
        self.editor.set_submit_label(label);
        Submission {
            lease,
            editor: &*self.editor,
        }
    }

    fn report(&self, operation: Operation, err: &ClientError) -> ErrorReport {
        tracing::error!(?operation, kind = %err.kind, detail = %err.detail, "Remote call failed");
        let report = classify(operation, err);
        // The list panel is the report for a failed listing
        if operation != Operation::List {
            self.notifier.notify(report.notification());
        }
        report
    }
}
