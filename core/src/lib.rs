//! Validation rules and derived statistics for Roster.
//!
//! Everything here is pure and synchronous: drafts go in, field-keyed error
//! maps come out; store slices go in, summary counts come out. Neither
//! module holds state, so results cannot desynchronize from the Local
//! Store - they are recomputed from it on every call.

mod stats;
mod validate;

pub use stats::{EventSummary, UserSummary, event_summary, user_summary};
pub use validate::{
    FieldErrors, MIN_DESCRIPTION_LEN, MIN_TITLE_LEN, MIN_USER_AGE_YEARS, Validate, age_in_years,
};
