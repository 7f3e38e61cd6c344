//! Form field schema shared between the engine's form state and the TUI.
//!
//! Each [`Resource`](crate::Resource) exposes an ordered list of
//! [`FieldSpec`]s; the form layer keeps one raw input string per field and
//! parses them into a draft only at submit time. Validation messages key off
//! `FieldSpec::name`, so a field's error can be cleared individually when
//! that field is edited.

/// Raw form value of a switched-on [`FieldKind::Toggle`] field.
pub const TOGGLE_ON: &str = "active";
/// Raw form value of a switched-off [`FieldKind::Toggle`] field.
pub const TOGGLE_OFF: &str = "inactive";

/// How a form field is entered and parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line free text.
    Text,
    /// Multi-line free text.
    Multiline,
    /// Whole number; unparseable input reaches the validator as missing.
    Integer,
    /// `YYYY-MM-DD`; unparseable input reaches the validator as missing.
    Date,
    /// Boolean flag toggled in place.
    Toggle,
}

/// One entry in a resource's form, in render order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Stable key used for validation errors. Not a wire name.
    pub name: &'static str,
    /// Human label shown next to the input.
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldSpec {
    #[must_use]
    pub const fn new(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { name, label, kind }
    }
}
