//! Reconciliation transitions - bringing the Local Store back into
//! agreement with backend truth after each mutating action.
//!
//! The transitions here are pure functions from (store, pending action,
//! reply envelope) to a [`Step`]; the async plumbing around them lives in
//! the pane. This is a two-phase commit over local state: tentative apply
//! (done by the pane before dispatch, for update/delete), then
//! confirm-or-revert, where revert is always "refetch source of truth" -
//! never a manual inverse operation.

use roster_gateway::Envelope;
use roster_types::Resource;

use crate::notice::Notice;
use crate::store::LocalStore;

/// The action currently in flight for a pane. At most one exists at a time;
/// its presence is the busy flag that gates further mutations.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationKind<R: Resource> {
    /// Draft submitted for creation. Nothing applied locally; the created
    /// record's identifier and timestamps are never guessed client-side.
    Create,
    /// Edited fields already applied optimistically to `id`.
    Update { id: R::Id },
    /// `id` already removed optimistically.
    Delete { id: R::Id },
    /// Full refetch of the list.
    Reload { after: AfterReload },
}

/// Where to land once a reload settles successfully.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AfterReload {
    /// Keep the current view (resyncs and manual refreshes).
    Stay,
    /// Return to the list (the reload confirming a create).
    ShowList,
}

/// Reply delivered by a spawned gateway call.
#[derive(Debug)]
pub enum Reply<R: Resource> {
    /// Create or update result.
    Saved(Envelope<R>),
    Deleted(Envelope<()>),
    Loaded(Envelope<Vec<R>>),
}

/// Terminal classification of a mutating action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The optimistic (or submitted) state became final.
    Confirmed,
    /// Nothing durable happened; local state was never touched.
    RolledBack,
    /// Local state was re-fetched from the backend to settle the action.
    ReloadResynced,
}

/// What the pane must do after resolving one reply.
#[derive(Debug)]
pub enum Step {
    /// The action settled; the store reflects the result.
    Settled {
        outcome: Outcome,
        notice: Option<Notice>,
    },
    /// A follow-up reload must be dispatched to settle the action.
    NeedsReload {
        after: AfterReload,
        notice: Option<Notice>,
    },
    /// The reload itself failed; store left at last known state.
    ReloadFailed { notice: Notice },
}

/// Resolve one reply against the action that produced it.
pub fn resolve<R: Resource>(
    store: &mut LocalStore<R>,
    kind: &MutationKind<R>,
    reply: Reply<R>,
) -> Step {
    let step = match (kind, reply) {
        (MutationKind::Create, Reply::Saved(envelope)) => {
            if envelope.succeeded {
                // Store untouched until the reload brings the new record
                // (with its server-assigned id) back.
                Step::NeedsReload {
                    after: AfterReload::ShowList,
                    notice: Some(Notice::info(saved_text::<R>(&envelope))),
                }
            } else {
                Step::Settled {
                    outcome: Outcome::RolledBack,
                    notice: Some(Notice::error(format!(
                        "Failed to save {}: {}",
                        R::SINGULAR,
                        envelope.message
                    ))),
                }
            }
        }
        (MutationKind::Update { .. }, Reply::Saved(envelope)) => {
            if envelope.succeeded {
                // The optimistic fields stand as-is; the response body is
                // not diffed against intent.
                Step::Settled {
                    outcome: Outcome::Confirmed,
                    notice: Some(Notice::info(saved_text::<R>(&envelope))),
                }
            } else {
                Step::NeedsReload {
                    after: AfterReload::Stay,
                    notice: Some(Notice::error(format!(
                        "Failed to update {}: {}",
                        R::SINGULAR,
                        envelope.message
                    ))),
                }
            }
        }
        (MutationKind::Delete { .. }, Reply::Deleted(envelope)) => {
            if envelope.succeeded {
                Step::Settled {
                    outcome: Outcome::Confirmed,
                    notice: Some(Notice::info(format!("Deleted {}", R::SINGULAR))),
                }
            } else {
                // The record may still exist server-side; the reload
                // restores it if so.
                Step::NeedsReload {
                    after: AfterReload::Stay,
                    notice: Some(Notice::error(format!(
                        "Failed to delete {}: {}",
                        R::SINGULAR,
                        envelope.message
                    ))),
                }
            }
        }
        (MutationKind::Reload { after }, Reply::Loaded(envelope)) => {
            if envelope.succeeded {
                store.replace_all(envelope.payload.unwrap_or_default());
                let outcome = match after {
                    AfterReload::ShowList => Outcome::Confirmed,
                    AfterReload::Stay => Outcome::ReloadResynced,
                };
                Step::Settled {
                    outcome,
                    notice: None,
                }
            } else {
                Step::ReloadFailed {
                    notice: Notice::error(format!(
                        "Failed to load {}: {}",
                        R::COLLECTION,
                        envelope.message
                    )),
                }
            }
        }
        (kind, reply) => {
            tracing::warn!(
                resource = R::COLLECTION,
                kind = ?kind,
                reply = reply_name(&reply),
                "dropping reply that does not match the in-flight action"
            );
            Step::Settled {
                outcome: Outcome::RolledBack,
                notice: None,
            }
        }
    };

    log_step::<R>(kind, &step);
    step
}

fn saved_text<R: Resource>(envelope: &Envelope<R>) -> String {
    if envelope.message.is_empty() {
        let mut text = String::from(R::SINGULAR);
        if let Some(first) = text.get_mut(0..1) {
            first.make_ascii_uppercase();
        }
        text.push_str(" saved");
        text
    } else {
        envelope.message.clone()
    }
}

fn reply_name<R: Resource>(reply: &Reply<R>) -> &'static str {
    match reply {
        Reply::Saved(_) => "saved",
        Reply::Deleted(_) => "deleted",
        Reply::Loaded(_) => "loaded",
    }
}

fn log_step<R: Resource>(kind: &MutationKind<R>, step: &Step) {
    match step {
        Step::Settled { outcome, .. } => tracing::debug!(
            resource = R::COLLECTION,
            kind = ?kind,
            outcome = ?outcome,
            "action settled"
        ),
        Step::NeedsReload { .. } => tracing::debug!(
            resource = R::COLLECTION,
            kind = ?kind,
            "action requires reload to settle"
        ),
        Step::ReloadFailed { notice } => tracing::warn!(
            resource = R::COLLECTION,
            message = %notice.text,
            "reload failed; keeping last known state"
        ),
    }
}
