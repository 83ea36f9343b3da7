#![forbid(unsafe_code)]

//! Login form state machine with a pure reducer core and a thin
//! imperative shell.
//!
//! The crate splits the form into:
//! - A [`FormController`] that applies [`FormEvent`]s as pure transitions
//!   and emits [`Command`]s for the shell
//! - A [`LoginForm`] shell that owns the [`Authentication`] collaborator
//!   and executes those commands
//! - A renderable [`FormState`] snapshot with per-field statuses, a
//!   loading flag, a main error, and a derived submit gate
//!
//! Submission resolutions are guarded by monotonic [`SubmitToken`]s so
//! stale or post-teardown outcomes never corrupt the state, and every
//! lifecycle event lands in a [`SubmitTrace`].
//!
//! # Example
//!
//! ```rust
//! use credform_core::{Account, AuthError, Authentication, Credentials, LoginForm};
//! use credform_validation::ValidationBuilder;
//!
//! struct AcceptAll;
//!
//! impl Authentication for AcceptAll {
//!     fn authenticate(&self, _credentials: &Credentials) -> Result<Account, AuthError> {
//!         Ok(Account::new("access"))
//!     }
//! }
//!
//! let rules = ValidationBuilder::new()
//!     .field("email").required().email()
//!     .field("password").required().min_length(5)
//!     .build();
//!
//! let mut form = LoginForm::new(rules, AcceptAll);
//! assert!(!form.state().is_submit_enabled());
//!
//! form.on_field_change("email", "ada@example.com");
//! form.on_field_change("password", "hunter22");
//! assert!(form.state().is_submit_enabled());
//!
//! assert!(form.submit());
//! assert!(form.state().is_loading());
//! ```

pub mod auth;
pub mod controller;
pub mod shell;
pub mod state;

pub use auth::{Account, AuthError, Authentication, Credentials};
pub use controller::{Command, FormController, FormEvent, SubmitEvent, SubmitToken, SubmitTrace};
pub use shell::LoginForm;
pub use state::{FieldStatus, FormPhase, FormState, Indication, TOOLTIP_ALL_GOOD};

// Field names come from the validation crate; re-exported so embedders can
// build `Credentials` without a direct dependency.
pub use credform_validation::FieldName;
