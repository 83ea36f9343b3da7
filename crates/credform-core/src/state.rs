#![forbid(unsafe_code)]

//! Renderable form state: lifecycle phase, per-field statuses, and the
//! derived submit gate.
//!
//! [`FormState`] is what a view reads. It is a plain value with no behavior
//! of its own; every mutation goes through the controller, which keeps the
//! derived pieces (`submit_enabled`, `is_loading`) consistent with the
//! statuses and phase.

use std::fmt;

use credform_validation::FieldName;

/// Tooltip text shown for a field whose last validation passed.
pub const TOOLTIP_ALL_GOOD: &str = "All good";

// ---------------------------------------------------------------------------
// FormPhase
// ---------------------------------------------------------------------------

/// Lifecycle phase of the form.
///
/// `Submitted` is terminal: once reached, further events are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    /// No field has been edited and nothing has been submitted.
    #[default]
    Pristine,
    /// At least one edit has landed; submission may be attempted.
    Editing,
    /// A submission is in flight, waiting on the collaborator.
    Submitting,
    /// A submission resolved successfully.
    Submitted,
}

// ---------------------------------------------------------------------------
// Indication
// ---------------------------------------------------------------------------

/// One of the three states a field indicator can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indication {
    /// Field has never been edited.
    Untouched,
    /// Last validation of this field failed.
    Invalid,
    /// Last validation of this field passed.
    Valid,
}

impl Indication {
    /// The status glyph a view renders next to the field.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Untouched => "\u{25cb}",
            Self::Invalid => "\u{1f534}",
            Self::Valid => "\u{1f7e2}",
        }
    }
}

impl fmt::Display for Indication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.glyph())
    }
}

// ---------------------------------------------------------------------------
// FieldStatus
// ---------------------------------------------------------------------------

/// Validation status of a single field.
///
/// A field is born untouched but already carries its own validation verdict
/// for the empty value, so the submit gate can be derived uniformly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldStatus {
    field: FieldName,
    error: Option<String>,
    touched: bool,
}

impl FieldStatus {
    pub(crate) fn untouched(field: FieldName, error: Option<String>) -> Self {
        Self {
            field,
            error,
            touched: false,
        }
    }

    pub(crate) fn set(&mut self, error: Option<String>) {
        self.error = error;
        self.touched = true;
    }

    /// Name of the field this status describes.
    #[must_use]
    pub fn field(&self) -> &FieldName {
        &self.field
    }

    /// The current validation message, if the last validation failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `true` once at least one edit has landed on this field.
    #[must_use]
    pub fn is_touched(&self) -> bool {
        self.touched
    }

    /// `true` when the last validation of this field passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }

    /// Which of the three indicator states a view should render.
    #[must_use]
    pub fn indication(&self) -> Indication {
        if !self.touched {
            Indication::Untouched
        } else if self.error.is_some() {
            Indication::Invalid
        } else {
            Indication::Valid
        }
    }

    /// Tooltip text for the indicator: the error message when invalid,
    /// [`TOOLTIP_ALL_GOOD`] when valid.
    ///
    /// An untouched field keeps its pending message so hover reveals what is
    /// still missing.
    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        match self.indication() {
            Indication::Untouched | Indication::Invalid => self.error.as_deref(),
            Indication::Valid => Some(TOOLTIP_ALL_GOOD),
        }
    }
}

// ---------------------------------------------------------------------------
// FormState
// ---------------------------------------------------------------------------

/// Everything a view needs to render the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    phase: FormPhase,
    main_error: Option<String>,
    statuses: Vec<FieldStatus>,
    submit_enabled: bool,
}

impl FormState {
    pub(crate) fn pristine(statuses: Vec<FieldStatus>) -> Self {
        let submit_enabled = statuses.iter().all(FieldStatus::is_valid);
        Self {
            phase: FormPhase::Pristine,
            main_error: None,
            statuses,
            submit_enabled,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// `true` while a submission is in flight or has succeeded.
    ///
    /// Success is terminal, so the loading indicator stays up until the
    /// embedding shell navigates away.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, FormPhase::Submitting | FormPhase::Submitted)
    }

    /// The form-wide error from the last failed submission, if any.
    #[must_use]
    pub fn main_error(&self) -> Option<&str> {
        self.main_error.as_deref()
    }

    /// Per-field statuses in registration order.
    #[must_use]
    pub fn statuses(&self) -> &[FieldStatus] {
        &self.statuses
    }

    /// Status of a single field, if it exists.
    #[must_use]
    pub fn status_of(&self, field: &str) -> Option<&FieldStatus> {
        self.statuses.iter().find(|s| s.field().as_str() == field)
    }

    /// `true` when every field's last validation passed.
    #[must_use]
    pub fn is_submit_enabled(&self) -> bool {
        self.submit_enabled
    }

    pub(crate) fn status_mut(&mut self, field: &str) -> Option<&mut FieldStatus> {
        self.statuses
            .iter_mut()
            .find(|s| s.field().as_str() == field)
    }

    pub(crate) fn set_phase(&mut self, phase: FormPhase) {
        self.phase = phase;
    }

    pub(crate) fn set_main_error(&mut self, error: Option<String>) {
        self.main_error = error;
    }

    pub(crate) fn recompute_submit_enabled(&mut self) {
        self.submit_enabled = self.statuses.iter().all(FieldStatus::is_valid);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn status(error: Option<&str>) -> FieldStatus {
        FieldStatus::untouched(FieldName::new("email"), error.map(String::from))
    }

    // -- Indication tests --

    #[test]
    fn untouched_field_renders_neutral_glyph_with_pending_message() {
        let s = status(Some("This field is required"));
        assert_eq!(s.indication(), Indication::Untouched);
        assert_eq!(s.indication().glyph(), "\u{25cb}");
        assert_eq!(s.tooltip(), Some("This field is required"));
    }

    #[test]
    fn touched_invalid_field_renders_error_glyph_with_message() {
        let mut s = status(Some("This field is required"));
        s.set(Some("Invalid email address".to_string()));
        assert_eq!(s.indication(), Indication::Invalid);
        assert_eq!(s.indication().glyph(), "\u{1f534}");
        assert_eq!(s.tooltip(), Some("Invalid email address"));
    }

    #[test]
    fn touched_valid_field_renders_success_glyph_with_fixed_tooltip() {
        let mut s = status(Some("This field is required"));
        s.set(None);
        assert_eq!(s.indication(), Indication::Valid);
        assert_eq!(s.indication().glyph(), "\u{1f7e2}");
        assert_eq!(s.tooltip(), Some(TOOLTIP_ALL_GOOD));
    }

    #[test]
    fn indication_display_matches_glyph() {
        assert_eq!(Indication::Untouched.to_string(), "\u{25cb}");
        assert_eq!(Indication::Invalid.to_string(), "\u{1f534}");
        assert_eq!(Indication::Valid.to_string(), "\u{1f7e2}");
    }

    // -- FieldStatus tests --

    #[test]
    fn untouched_status_still_carries_its_verdict() {
        let s = status(Some("This field is required"));
        assert!(!s.is_touched());
        assert!(!s.is_valid());
        assert_eq!(s.error(), Some("This field is required"));
    }

    #[test]
    fn set_marks_touched_and_replaces_error() {
        let mut s = status(Some("This field is required"));
        s.set(None);
        assert!(s.is_touched());
        assert!(s.is_valid());
        assert_eq!(s.error(), None);

        s.set(Some("Invalid email address".to_string()));
        assert!(s.is_touched());
        assert!(!s.is_valid());
    }

    // -- FormState tests --

    #[test]
    fn pristine_state_derives_submit_gate_from_statuses() {
        let state = FormState::pristine(vec![
            status(Some("This field is required")),
            FieldStatus::untouched(FieldName::new("password"), None),
        ]);
        assert_eq!(state.phase(), FormPhase::Pristine);
        assert!(!state.is_submit_enabled());
        assert!(!state.is_loading());
        assert_eq!(state.main_error(), None);
    }

    #[test]
    fn all_valid_statuses_enable_submit() {
        let state = FormState::pristine(vec![
            FieldStatus::untouched(FieldName::new("email"), None),
            FieldStatus::untouched(FieldName::new("password"), None),
        ]);
        assert!(state.is_submit_enabled());
    }

    #[test]
    fn loading_covers_submitting_and_submitted() {
        let mut state = FormState::pristine(vec![]);
        assert!(!state.is_loading());

        state.set_phase(FormPhase::Editing);
        assert!(!state.is_loading());

        state.set_phase(FormPhase::Submitting);
        assert!(state.is_loading());

        state.set_phase(FormPhase::Submitted);
        assert!(state.is_loading());
    }

    #[test]
    fn status_lookup_finds_fields_by_name() {
        let mut state = FormState::pristine(vec![
            status(Some("This field is required")),
            FieldStatus::untouched(FieldName::new("password"), None),
        ]);
        assert!(state.status_of("email").is_some());
        assert!(state.status_of("nickname").is_none());

        state
            .status_mut("email")
            .expect("email status")
            .set(None);
        state.recompute_submit_enabled();
        assert!(state.is_submit_enabled());
    }
}
