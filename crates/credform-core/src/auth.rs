#![forbid(unsafe_code)]

//! Authentication seam: credential snapshots, the collaborator trait, and
//! submission failures.
//!
//! The controller never talks to a transport. It hands a [`Credentials`]
//! snapshot to an [`Authentication`] implementation and folds the outcome
//! back into form state. Everything here is a value; nothing panics.

use std::fmt;
use std::sync::Arc;

use credform_validation::FieldName;

// ---------------------------------------------------------------------------
// Credentials
// ---------------------------------------------------------------------------

/// Snapshot of raw field values captured at submit time, in registration
/// order.
///
/// `Debug` never prints values; secrets must not leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pairs: Vec<(FieldName, String)>,
}

impl Credentials {
    /// Create a snapshot from `(field, value)` pairs.
    #[must_use]
    pub fn new(pairs: Vec<(FieldName, String)>) -> Self {
        Self { pairs }
    }

    /// The value captured for `field`, if that field exists.
    #[must_use]
    pub fn value_of(&self, field: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(name, _)| name.as_str() == field)
            .map(|(_, value)| value.as_str())
    }

    /// Iterate over `(field, value)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&FieldName, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name, value.as_str()))
    }

    /// Number of captured fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// `true` when no fields were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Credentials");
        for (name, value) in &self.pairs {
            s.field(
                name.as_str(),
                &format_args!("<{} chars>", value.chars().count()),
            );
        }
        s.finish()
    }
}

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// Opaque success payload from the authentication collaborator.
#[derive(Clone, PartialEq, Eq)]
pub struct Account {
    access_token: String,
}

impl Account {
    /// Create an account payload carrying an access token.
    #[must_use]
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    /// The access token issued for this session.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field(
                "access_token",
                &format_args!("<{} chars>", self.access_token.chars().count()),
            )
            .finish()
    }
}

// ---------------------------------------------------------------------------
// AuthError
// ---------------------------------------------------------------------------

/// Failure reported by the authentication collaborator.
///
/// The controller treats every variant the same way; only the user-facing
/// message differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The credentials were rejected.
    InvalidCredentials,
    /// The collaborator could not be reached or answered abnormally.
    Unavailable {
        /// Diagnostic detail for logs, never shown to the user.
        detail: String,
    },
    /// Any failure the collaborator could not classify.
    Unexpected,
}

impl AuthError {
    /// The message surfaced to the user as the form's main error.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid credentials",
            Self::Unavailable { .. } => "Service unavailable. Please try again.",
            Self::Unexpected => "Something went wrong. Please try again.",
        }
    }
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidCredentials => write!(f, "invalid credentials"),
            Self::Unavailable { detail } => {
                write!(f, "authentication service unavailable: {detail}")
            }
            Self::Unexpected => write!(f, "unexpected authentication failure"),
        }
    }
}

impl std::error::Error for AuthError {}

// ---------------------------------------------------------------------------
// Authentication Trait
// ---------------------------------------------------------------------------

/// External collaborator that checks credentials.
///
/// The call may take arbitrarily long before resolving; implementations run
/// wherever the embedding shell puts them. `Send + Sync` so shells may move
/// the call to a worker thread and feed the outcome back by token.
pub trait Authentication: Send + Sync {
    /// Check the given credentials, resolving to an [`Account`] or a failure.
    fn authenticate(&self, credentials: &Credentials) -> Result<Account, AuthError>;
}

impl<A: Authentication + ?Sized> Authentication for Arc<A> {
    fn authenticate(&self, credentials: &Credentials) -> Result<Account, AuthError> {
        (**self).authenticate(credentials)
    }
}

impl<A: Authentication + ?Sized> Authentication for Box<A> {
    fn authenticate(&self, credentials: &Credentials) -> Result<Account, AuthError> {
        (**self).authenticate(credentials)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
