#![forbid(unsafe_code)]

//! Thin imperative shell owning the authentication collaborator.
//!
//! [`LoginForm`] pairs a [`FormController`] with an [`Authentication`]
//! implementation. It is the only place in the core crates that calls the
//! collaborator: `submit()` runs the controller transition and, when it
//! yields [`Command::Authenticate`], performs the call exactly once and
//! feeds the outcome back. Embedders that run authentication elsewhere
//! (worker thread, async runtime) drive the controller directly instead.

use credform_validation::{FieldName, ValidationComposite};

use crate::auth::Authentication;
use crate::controller::{Command, FormController};
use crate::state::FormState;

// ---------------------------------------------------------------------------
// LoginForm
// ---------------------------------------------------------------------------

/// A login form wired to its authentication collaborator.
pub struct LoginForm<A: Authentication> {
    controller: FormController,
    auth: A,
}

impl<A: Authentication> LoginForm<A> {
    /// Create a form over the given rule registry and collaborator.
    #[must_use]
    pub fn new(rules: ValidationComposite, auth: A) -> Self {
        Self {
            controller: FormController::new(rules),
            auth,
        }
    }

    /// Feed a field edit into the controller.
    pub fn on_field_change(&mut self, field: impl Into<FieldName>, value: impl Into<String>) {
        self.controller.on_field_change(field, value);
    }

    /// Run the submit transition; when it commands an authentication call,
    /// invoke the collaborator exactly once and feed the outcome back.
    ///
    /// Returns `true` when the collaborator was called. Guarded submits
    /// (invalid form, already submitting, terminal, torn down) return
    /// `false` without a call.
    pub fn submit(&mut self) -> bool {
        match self.controller.on_submit() {
            Command::None => false,
            Command::Authenticate { token, credentials } => {
                let outcome = self.auth.authenticate(&credentials);
                let _ = self.controller.resolve_auth(token, outcome);
                true
            }
        }
    }

    /// The renderable state snapshot.
    #[must_use]
    pub fn state(&self) -> &FormState {
        self.controller.state()
    }

    /// Tear the form down; all later events are no-ops.
    pub fn teardown(&mut self) {
        self.controller.teardown();
    }

    /// The underlying controller, for trace and account access.
    #[must_use]
    pub fn controller(&self) -> &FormController {
        &self.controller
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
