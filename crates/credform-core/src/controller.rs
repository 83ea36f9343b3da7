#![forbid(unsafe_code)]

//! The form state machine: events in, commands out.
//!
//! [`FormController`] is a pure reducer. Each [`FormEvent`] is applied as a
//! synchronous transition over plain data and yields a [`Command`] for the
//! imperative shell to execute. The controller never calls the
//! authentication collaborator itself; it emits
//! [`Command::Authenticate`] with a token and a credentials snapshot, and
//! the shell feeds the outcome back as [`FormEvent::AuthResolved`].
//!
//! Tokens make resolution ordering safe: each submission attempt gets a
//! fresh monotonic [`SubmitToken`], and a resolution only applies when its
//! token is the current in-flight one. Stale and post-teardown resolutions
//! are discarded without state change.
//!
//! Every submission lifecycle event lands in a [`SubmitTrace`] for
//! debugging and invariant checking.

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};

use credform_validation::{FieldName, ValidationComposite};

use crate::auth::{Account, AuthError, Credentials};
use crate::state::{FieldStatus, FormPhase, FormState};

// ---------------------------------------------------------------------------
// SubmitToken
// ---------------------------------------------------------------------------

/// A monotonically increasing token identifying one submission attempt.
///
/// Tokens detect stale resolutions. Each accepted submit issues a new
/// token; a resolution carrying any other token is discarded.
///
/// # Invariants
///
/// - Tokens are strictly monotonic per controller: `token_n < token_{n+1}`
/// - Token 0 is reserved for "no submission"
/// - Tokens never wrap (u64 provides sufficient headroom)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubmitToken(u64);

impl SubmitToken {
    /// The null token representing no submission.
    pub const NONE: Self = Self(0);

    /// Create a token from a raw value (for testing/deserialization).
    #[must_use]
    pub const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Get the raw token value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }

    /// Check if this is the null token.
    #[must_use]
    pub const fn is_none(self) -> bool {
        self.0 == 0
    }
}

impl Default for SubmitToken {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Display for SubmitToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Token({})", self.0)
    }
}

// ---------------------------------------------------------------------------
// FormEvent
// ---------------------------------------------------------------------------

/// An input to the form state machine.
///
/// `Debug` reports value lengths rather than values; raw keystrokes must
/// not leak into logs.
#[derive(Clone, PartialEq)]
pub enum FormEvent {
    /// A field's raw value changed.
    FieldChanged {
        field: FieldName,
        value: String,
    },
    /// The user pressed submit.
    SubmitPressed,
    /// The authentication collaborator resolved for a submission attempt.
    AuthResolved {
        token: SubmitToken,
        outcome: Result<Account, AuthError>,
    },
}

impl fmt::Debug for FormEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FieldChanged { field, value } => f
                .debug_struct("FieldChanged")
                .field("field", field)
                .field("value_len", &value.chars().count())
                .finish(),
            Self::SubmitPressed => f.write_str("SubmitPressed"),
            Self::AuthResolved { token, outcome } => f
                .debug_struct("AuthResolved")
                .field("token", token)
                .field("failed", &outcome.is_err())
                .finish(),
        }
    }
}

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// What the imperative shell must do after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Nothing to do.
    None,
    /// Invoke the authentication collaborator with this snapshot and feed
    /// the outcome back as [`FormEvent::AuthResolved`] under this token.
    Authenticate {
        token: SubmitToken,
        credentials: Credentials,
    },
}

impl Command {
    /// Check if this is the no-op command.
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Check if this command requests an authentication call.
    #[must_use]
    pub fn is_authenticate(&self) -> bool {
        matches!(self, Self::Authenticate { .. })
    }
}

// ---------------------------------------------------------------------------
// SubmitEvent
// ---------------------------------------------------------------------------

/// An event in the submission lifecycle, recorded for tracing and
/// debugging.
///
/// Events form a complete audit trail of submission activity, enabling:
/// - Debugging resolution-ordering issues
/// - Verifying the single-in-flight guarantee post-hoc
/// - Golden trace comparison for regression testing
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitEvent {
    /// A submission attempt started.
    Started { token: SubmitToken },

    /// The in-flight attempt resolved and was applied.
    Resolved {
        token: SubmitToken,
        /// Whether the collaborator reported a failure.
        failed: bool,
    },

    /// A resolution arrived for a token that is not in flight.
    StaleDiscarded {
        token: SubmitToken,
        /// The in-flight token at the time (NONE when nothing was pending).
        current: SubmitToken,
    },

    /// Submit was pressed while some field still carried an error.
    RejectedInvalid,

    /// Submit was pressed while an attempt was already in flight.
    RejectedWhileLoading { in_flight: SubmitToken },

    /// The controller was torn down.
    TornDown,
}

impl SubmitEvent {
    /// Get the token associated with this event.
    ///
    /// Events without a natural token report [`SubmitToken::NONE`].
    #[must_use]
    pub fn token(&self) -> SubmitToken {
        match self {
            Self::Started { token }
            | Self::Resolved { token, .. }
            | Self::StaleDiscarded { token, .. } => *token,
            Self::RejectedWhileLoading { in_flight } => *in_flight,
            Self::RejectedInvalid | Self::TornDown => SubmitToken::NONE,
        }
    }

    /// Get the event type name for logging.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::Started { .. } => "started",
            Self::Resolved { .. } => "resolved",
            Self::StaleDiscarded { .. } => "stale_discarded",
            Self::RejectedInvalid => "rejected_invalid",
            Self::RejectedWhileLoading { .. } => "rejected_while_loading",
            Self::TornDown => "torn_down",
        }
    }
}

impl Hash for SubmitEvent {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Discriminant plus key fields feed the trace checksum
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Started { token } => token.hash(state),
            Self::Resolved { token, failed } => {
                token.hash(state);
                failed.hash(state);
            }
            Self::StaleDiscarded { token, current } => {
                token.hash(state);
                current.hash(state);
            }
            Self::RejectedWhileLoading { in_flight } => in_flight.hash(state),
            Self::RejectedInvalid | Self::TornDown => {}
        }
    }
}

// ---------------------------------------------------------------------------
// SubmitTrace
// ---------------------------------------------------------------------------

/// An append-only trace of submission events for debugging and
/// determinism verification.
///
/// Traces can be checksummed to verify that submission behavior is
/// deterministic across runs.
#[derive(Debug, Clone, Default)]
pub struct SubmitTrace {
    events: Vec<SubmitEvent>,
}

impl SubmitTrace {
    /// Create a new empty trace.
    #[must_use]
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub(crate) fn push(&mut self, event: SubmitEvent) {
        self.events.push(event);
    }

    /// Get all events in the trace.
    #[must_use]
    pub fn events(&self) -> &[SubmitEvent] {
        &self.events
    }

    /// Check if the trace contains a specific event type for a token.
    #[must_use]
    pub fn contains_event_type(&self, token: SubmitToken, event_type: &str) -> bool {
        self.events
            .iter()
            .any(|e| e.token() == token && e.event_type() == event_type)
    }

    /// Get all events for a specific token.
    #[must_use]
    pub fn events_for_token(&self, token: SubmitToken) -> Vec<&SubmitEvent> {
        self.events.iter().filter(|e| e.token() == token).collect()
    }

    /// Compute a checksum of the trace for golden comparison.
    ///
    /// The checksum includes all event data and ordering, making it
    /// suitable for detecting any change in submission behavior.
    #[must_use]
    pub fn checksum(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for event in &self.events {
            event.hash(&mut hasher);
        }
        hasher.finish()
    }

    /// Get the number of events in the trace.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Check if the trace is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Verify trace invariants.
    ///
    /// Returns a list of violations if any invariants are broken.
    #[must_use]
    pub fn verify_invariants(&self) -> Vec<String> {
        let mut violations = Vec::new();

        // Invariant 1: started tokens are strictly monotonic
        let mut last_started = SubmitToken::NONE;
        for event in &self.events {
            if let SubmitEvent::Started { token } = event {
                if *token <= last_started {
                    violations.push(format!(
                        "non-monotonic start token: {token} after {last_started}"
                    ));
                }
                last_started = *token;
            }
        }

        // Invariant 2: at most one attempt in flight, resolutions match it
        let mut pending: Option<SubmitToken> = None;
        for event in &self.events {
            match event {
                SubmitEvent::Started { token } => {
                    if let Some(open) = pending {
                        violations.push(format!("{token} started while {open} pending"));
                    }
                    pending = Some(*token);
                }
                SubmitEvent::Resolved { token, .. } => match pending {
                    Some(open) if open == *token => pending = None,
                    Some(open) => {
                        violations.push(format!("{token} resolved while {open} pending"));
                    }
                    None => violations.push(format!("{token} resolved without a start")),
                },
                SubmitEvent::RejectedWhileLoading { in_flight } => {
                    if pending != Some(*in_flight) {
                        violations.push(format!(
                            "loading rejection names {in_flight} but that attempt is not pending"
                        ));
                    }
                }
                _ => {}
            }
        }

        // Invariant 3: a discarded token is never the one in flight
        // (when nothing is in flight, current is NONE and any token is stale)
        for event in &self.events {
            if let SubmitEvent::StaleDiscarded { token, current } = event
                && token == current
                && !current.is_none()
            {
                violations.push(format!("stale discard of the in-flight token {token}"));
            }
        }

        // Invariant 4: nothing follows teardown
        if let Some(pos) = self
            .events
            .iter()
            .position(|e| matches!(e, SubmitEvent::TornDown))
        {
            for event in &self.events[pos + 1..] {
                violations.push(format!("event after teardown: {}", event.event_type()));
            }
        }

        violations
    }
}

// ---------------------------------------------------------------------------
// FormController
// ---------------------------------------------------------------------------

/// Reactive login form state machine.
///
/// Construction registers the composite's fields in order; every field
/// starts untouched with the verdict its own rules give the empty value,
/// so submit begins disabled and enables only once every field passes.
///
/// # Error contract
///
/// No entry point panics or returns an error. Collaborator failures are
/// values folded into the form's main error; unknown fields and out-of-turn
/// events are ignored.
pub struct FormController {
    rules: ValidationComposite,
    values: Vec<(FieldName, String)>,
    state: FormState,
    next_token: u64,
    in_flight: Option<SubmitToken>,
    account: Option<Account>,
    torn_down: bool,
    trace: SubmitTrace,
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("phase", &self.state.phase())
            .field("in_flight", &self.in_flight)
            .field("torn_down", &self.torn_down)
            .field("trace_events", &self.trace.len())
            .finish()
    }
}

impl FormController {
    /// Create a controller over the given rule registry.
    #[must_use]
    pub fn new(rules: ValidationComposite) -> Self {
        let fields = rules.field_names();
        let mut values = Vec::with_capacity(fields.len());
        let mut statuses = Vec::with_capacity(fields.len());
        for field in fields {
            let error = rules.validate(field.as_str(), "");
            statuses.push(FieldStatus::untouched(field.clone(), error));
            values.push((field, String::new()));
        }
        Self {
            rules,
            values,
            state: FormState::pristine(statuses),
            next_token: 0,
            in_flight: None,
            account: None,
            torn_down: false,
            trace: SubmitTrace::new(),
        }
    }

    /// Apply one event and return the command the shell must execute.
    ///
    /// After teardown or a successful submission every event is ignored.
    pub fn apply(&mut self, event: FormEvent) -> Command {
        if self.torn_down || self.state.phase() == FormPhase::Submitted {
            return Command::None;
        }
        match event {
            FormEvent::FieldChanged { field, value } => self.field_changed(&field, value),
            FormEvent::SubmitPressed => self.submit_pressed(),
            FormEvent::AuthResolved { token, outcome } => self.auth_resolved(token, outcome),
        }
    }

    /// Feed a field edit. Field changes never command the shell.
    pub fn on_field_change(&mut self, field: impl Into<FieldName>, value: impl Into<String>) {
        let _ = self.apply(FormEvent::FieldChanged {
            field: field.into(),
            value: value.into(),
        });
    }

    /// Feed a submit press and return the command to execute.
    #[must_use]
    pub fn on_submit(&mut self) -> Command {
        self.apply(FormEvent::SubmitPressed)
    }

    /// Feed a resolution for a submission attempt.
    ///
    /// Returns `true` when the outcome was applied, `false` when it was
    /// discarded as stale or post-teardown.
    pub fn resolve_auth(&mut self, token: SubmitToken, outcome: Result<Account, AuthError>) -> bool {
        let accepted = !self.torn_down && self.in_flight == Some(token);
        let _ = self.apply(FormEvent::AuthResolved { token, outcome });
        accepted
    }

    fn field_changed(&mut self, field: &FieldName, value: String) -> Command {
        let Some(idx) = self.values.iter().position(|(name, _)| name == field) else {
            return Command::None;
        };
        let error = self.rules.validate(field.as_str(), &value);
        #[cfg(feature = "tracing")]
        tracing::debug!(
            field = field.as_str(),
            valid = error.is_none(),
            "field changed"
        );
        self.values[idx].1 = value;
        if let Some(status) = self.state.status_mut(field.as_str()) {
            status.set(error);
        }
        self.state.recompute_submit_enabled();
        if self.state.phase() == FormPhase::Pristine {
            self.state.set_phase(FormPhase::Editing);
        }
        Command::None
    }

    fn submit_pressed(&mut self) -> Command {
        if let Some(in_flight) = self.in_flight {
            self.trace.push(SubmitEvent::RejectedWhileLoading { in_flight });
            #[cfg(feature = "tracing")]
            tracing::debug!("submit rejected: attempt already in flight");
            return Command::None;
        }
        if !self.state.is_submit_enabled() {
            self.trace.push(SubmitEvent::RejectedInvalid);
            #[cfg(feature = "tracing")]
            tracing::debug!("submit rejected: form invalid");
            return Command::None;
        }

        self.next_token += 1;
        let token = SubmitToken::from_raw(self.next_token);
        self.in_flight = Some(token);
        self.state.set_phase(FormPhase::Submitting);
        self.state.set_main_error(None);
        self.trace.push(SubmitEvent::Started { token });
        #[cfg(feature = "tracing")]
        tracing::info!(token = token.raw(), "submission started");

        Command::Authenticate {
            token,
            credentials: Credentials::new(self.values.clone()),
        }
    }

    fn auth_resolved(
        &mut self,
        token: SubmitToken,
        outcome: Result<Account, AuthError>,
    ) -> Command {
        if self.in_flight != Some(token) {
            self.trace.push(SubmitEvent::StaleDiscarded {
                token,
                current: self.in_flight.unwrap_or(SubmitToken::NONE),
            });
            #[cfg(feature = "tracing")]
            tracing::debug!(token = token.raw(), "stale resolution discarded");
            return Command::None;
        }

        self.in_flight = None;
        match outcome {
            Ok(account) => {
                self.trace.push(SubmitEvent::Resolved {
                    token,
                    failed: false,
                });
                #[cfg(feature = "tracing")]
                tracing::info!(token = token.raw(), "submission succeeded");
                self.account = Some(account);
                self.state.set_phase(FormPhase::Submitted);
            }
            Err(err) => {
                self.trace.push(SubmitEvent::Resolved {
                    token,
                    failed: true,
                });
                #[cfg(feature = "tracing")]
                tracing::info!(token = token.raw(), error = %err, "submission failed");
                self.state.set_phase(FormPhase::Editing);
                self.state.set_main_error(Some(err.user_message().to_string()));
            }
        }
        Command::None
    }

    /// Mark the controller torn down. Idempotent; all later events are
    /// no-ops and in-flight resolutions are silently discarded.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.trace.push(SubmitEvent::TornDown);
        #[cfg(feature = "tracing")]
        tracing::debug!("controller torn down");
    }

    /// The renderable state snapshot.
    #[must_use]
    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// The submission lifecycle trace.
    #[must_use]
    pub fn trace(&self) -> &SubmitTrace {
        &self.trace
    }

    /// The current raw value of a field, if it exists.
    #[must_use]
    pub fn value_of(&self, field: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(name, _)| name.as_str() == field)
            .map(|(_, value)| value.as_str())
    }

    /// Snapshot of the current field values.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.values.clone())
    }

    /// The token of the in-flight submission attempt, if any.
    #[must_use]
    pub fn in_flight(&self) -> Option<SubmitToken> {
        self.in_flight
    }

    /// Check if the controller has been torn down.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// The account from a successful submission, if one resolved.
    #[must_use]
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
