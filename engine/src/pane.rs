//! Per-resource pane: one store, one view, at most one action in flight.
//!
//! Gateway calls run on spawned tasks and deliver their envelopes through
//! an unbounded channel; [`Pane::drain`] resolves them against the pending
//! action on the next frame tick. The pending action doubles as the busy
//! flag - while it is set, every mutating entry point is a no-op, which is
//! what serializes mutations without any locking.

use chrono::NaiveDate;
use tokio::sync::mpsc;

use roster_core::Validate;
use roster_gateway::ResourceClient;
use roster_types::Resource;

use crate::form::FormState;
use crate::notice::{Notice, NoticeSlot};
use crate::reconcile::{AfterReload, MutationKind, Reply, Step, resolve};
use crate::store::LocalStore;
use crate::view::View;

/// A delete awaiting the user's yes/no confirmation.
#[derive(Debug)]
pub struct PendingDelete<R: Resource> {
    pub id: R::Id,
    /// Human label shown in the confirmation prompt.
    pub label: String,
}

/// A gateway call waiting for [`Pane::pump`] to spawn it.
///
/// Actions only queue work here; the spawn happens on the frame tick, which
/// keeps every state transition synchronous and runtime-free.
#[derive(Debug)]
enum Dispatch<R: Resource> {
    Create { draft: R::Draft },
    Update { id: R::Id, draft: R::Draft },
    Delete { id: R::Id },
    Reload,
}

#[derive(Debug)]
pub struct Pane<R: Resource> {
    client: ResourceClient<R>,
    store: LocalStore<R>,
    view: View<R>,
    pending: Option<MutationKind<R>>,
    /// The gateway call backing `pending`, until [`Pane::pump`] spawns it.
    queued: Option<Dispatch<R>>,
    confirm: Option<PendingDelete<R>>,
    tx: mpsc::UnboundedSender<Reply<R>>,
    rx: mpsc::UnboundedReceiver<Reply<R>>,
    loaded_once: bool,
}

impl<R: Resource> Pane<R> {
    #[must_use]
    pub fn new(client: ResourceClient<R>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            client,
            store: LocalStore::new(),
            view: View::list(),
            pending: None,
            queued: None,
            confirm: None,
            tx,
            rx,
            loaded_once: false,
        }
    }

    // === Read access for rendering ===

    #[must_use]
    pub fn store(&self) -> &LocalStore<R> {
        &self.store
    }

    #[must_use]
    pub fn view(&self) -> &View<R> {
        &self.view
    }

    /// True while an action is in flight; gates every mutating affordance.
    #[must_use]
    pub fn busy(&self) -> bool {
        self.pending.is_some()
    }

    #[must_use]
    pub fn confirm(&self) -> Option<&PendingDelete<R>> {
        self.confirm.as_ref()
    }

    #[must_use]
    pub fn selected_record(&self) -> Option<&R> {
        match &self.view {
            View::List { selected } => self.store.at(*selected),
            View::Detail { id } => self.store.get(id),
            View::Form(_) => None,
        }
    }

    /// Record backing the detail view, if it is still in the store.
    #[must_use]
    pub fn detail_record(&self) -> Option<&R> {
        match &self.view {
            View::Detail { id } => self.store.get(id),
            _ => None,
        }
    }

    #[must_use]
    pub fn form(&self) -> Option<&FormState<R>> {
        match &self.view {
            View::Form(form) => Some(form),
            _ => None,
        }
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState<R>> {
        match &mut self.view {
            View::Form(form) => Some(form),
            _ => None,
        }
    }

    // === View transitions ===

    pub fn select_next(&mut self) {
        if let View::List { selected } = &mut self.view {
            let last = self.store.len().saturating_sub(1);
            *selected = (*selected + 1).min(last);
        }
    }

    pub fn select_prev(&mut self) {
        if let View::List { selected } = &mut self.view {
            *selected = selected.saturating_sub(1);
        }
    }

    pub fn open_add_form(&mut self) {
        if self.busy() {
            return;
        }
        self.confirm = None;
        self.view = View::Form(FormState::add());
    }

    /// Open the edit form for the current selection (list or detail).
    pub fn open_edit_form(&mut self) {
        if self.busy() {
            return;
        }
        let Some(record) = self.selected_record().cloned() else {
            return;
        };
        self.confirm = None;
        self.view = View::Form(FormState::edit(&record));
    }

    /// Open the detail view for the current list selection. Surfaces a
    /// not-found error when the identifier is no longer present.
    pub fn open_selected_detail(&mut self, notices: &mut NoticeSlot) {
        let Some(id) = self.selected_record().and_then(|r| r.id().cloned()) else {
            return;
        };
        self.open_detail(id, notices);
    }

    pub fn open_detail(&mut self, id: R::Id, notices: &mut NoticeSlot) {
        if self.store.contains(&id) {
            self.confirm = None;
            self.view = View::Detail { id };
        } else {
            notices.push(Notice::error(format!("{} {id} not found", R::SINGULAR)));
        }
    }

    pub fn back_to_list(&mut self) {
        self.confirm = None;
        self.view = View::list();
        self.clamp_selection();
    }

    // === Mutating actions ===

    /// First load of the pane's list. Safe to call repeatedly.
    pub fn start_initial_load(&mut self) {
        if self.loaded_once || self.busy() {
            return;
        }
        self.loaded_once = true;
        self.queue_reload(AfterReload::Stay);
    }

    /// Manual refresh from the list view.
    pub fn refresh(&mut self) {
        if self.busy() {
            return;
        }
        self.queue_reload(AfterReload::Stay);
    }

    /// Ask for confirmation before deleting the current selection.
    pub fn request_delete(&mut self) {
        if self.busy() {
            return;
        }
        let target = self
            .selected_record()
            .and_then(|record| record.id().cloned().map(|id| (id, record.display_label())));
        if let Some((id, label)) = target {
            self.confirm = Some(PendingDelete { id, label });
        }
    }

    pub fn cancel_delete(&mut self) {
        self.confirm = None;
    }

    /// The user said yes: remove optimistically and dispatch the delete.
    pub fn confirm_delete(&mut self) {
        if self.busy() {
            return;
        }
        let Some(PendingDelete { id, .. }) = self.confirm.take() else {
            return;
        };
        self.store.remove_by_id(&id);
        if matches!(&self.view, View::Detail { id: shown } if *shown == id) {
            self.view = View::list();
        }
        self.clamp_selection();
        self.pending = Some(MutationKind::Delete { id: id.clone() });
        self.queued = Some(Dispatch::Delete { id });
    }

    // === Frame plumbing ===

    /// Resolve any replies that arrived since the last tick.
    pub fn drain(&mut self, notices: &mut NoticeSlot) {
        while let Ok(reply) = self.rx.try_recv() {
            let Some(kind) = self.pending.take() else {
                tracing::warn!(
                    resource = R::COLLECTION,
                    "reply arrived with no action in flight; dropping"
                );
                continue;
            };

            match resolve(&mut self.store, &kind, reply) {
                Step::Settled { notice, .. } => {
                    if matches!(
                        kind,
                        MutationKind::Reload {
                            after: AfterReload::ShowList
                        }
                    ) {
                        self.view = View::list();
                    }
                    self.clamp_selection();
                    if let Some(notice) = notice {
                        notices.push(notice);
                    }
                }
                Step::NeedsReload { after, notice } => {
                    if let Some(notice) = notice {
                        notices.push(notice);
                    }
                    self.queue_reload(after);
                }
                Step::ReloadFailed { notice } => {
                    notices.push(notice);
                }
            }
        }
    }

    /// Spawn the queued gateway call, if any. Runs on the frame tick,
    /// inside the runtime; this is the only place the pane spawns.
    pub fn pump(&mut self) {
        let Some(dispatch) = self.queued.take() else {
            return;
        };
        let client = self.client.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let reply = match dispatch {
                Dispatch::Create { draft } => Reply::Saved(client.create(&draft).await),
                Dispatch::Update { id, draft } => Reply::Saved(client.update(&id, &draft).await),
                Dispatch::Delete { id } => Reply::Deleted(client.delete(&id).await),
                Dispatch::Reload => Reply::Loaded(client.list().await),
            };
            let _ = tx.send(reply);
        });
    }

    fn queue_reload(&mut self, after: AfterReload) {
        self.pending = Some(MutationKind::Reload { after });
        self.queued = Some(Dispatch::Reload);
    }

    fn clamp_selection(&mut self) {
        if let View::List { selected } = &mut self.view {
            *selected = (*selected).min(self.store.len().saturating_sub(1));
        }
    }
}

impl<R> Pane<R>
where
    R: Resource,
    R::Draft: Validate,
{
    /// Validate the open form and dispatch a create or update.
    ///
    /// Validation failures never reach the network: they land on the form
    /// and the pane stays where it is. An update applies its draft to the
    /// store optimistically and returns to the list; a create leaves the
    /// store and the form untouched until the backend answers.
    pub fn submit_form(&mut self, today: NaiveDate) {
        if self.busy() {
            return;
        }
        let View::Form(form) = &mut self.view else {
            return;
        };

        let draft = form.draft();
        let errors = draft.validate(today);
        if !errors.is_empty() {
            form.set_errors(errors);
            return;
        }

        match form.editing().cloned() {
            None => {
                self.pending = Some(MutationKind::Create);
                self.queued = Some(Dispatch::Create { draft });
            }
            Some(id) => {
                self.store.apply_draft(&id, &draft);
                self.pending = Some(MutationKind::Update { id: id.clone() });
                self.queued = Some(Dispatch::Update { id, draft });
                self.back_to_list();
            }
        }
    }
}
