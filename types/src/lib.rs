//! Core domain types for Roster - no IO, no async.
//!
//! # Architecture
//!
//! Roster manages two record variants against a REST backend: users and
//! events. Both share the same lifecycle (draft -> persisted -> refreshed /
//! mutated -> deleted), so everything downstream of this crate is generic
//! over the [`Resource`] trait:
//!
//! - [`UserRecord`] / [`EventRecord`] - persisted records as the backend
//!   returns them, identifier and timestamps included
//! - [`UserDraft`] / [`EventDraft`] - client-settable fields only; serializing
//!   a draft is exactly the POST/PUT body, so identifiers and timestamps can
//!   never leak into a request
//! - [`Resource`] - the seam the gateway and engine are instantiated through,
//!   once per variant
//!
//! A record without an identifier has never been persisted; it exists only as
//! a draft inside a form.

mod form;
mod ids;
mod record;
mod resource;

pub use form::{FieldKind, FieldSpec, TOGGLE_OFF, TOGGLE_ON};
pub use ids::{EventId, UserId};
pub use record::{EventDraft, EventRecord, UserDraft, UserRecord};
pub use resource::Resource;
