#![forbid(unsafe_code)]

//! Field registry, composite dispatch, and the fluent builder.
//!
//! The composite owns an ordered list of `(FieldName, rule)` pairs supplied
//! at construction and immutable thereafter. Validation selects the rules
//! registered for one field, preserving registration order, and stops at the
//! first failure; a single human-readable error is reported at a time.
//!
//! # Invariants
//!
//! - `validate(name, value)` never mutates the registry and is idempotent for
//!   a fixed `(name, value)` pair.
//! - Rules for the same field run first-registered-first; once one fails,
//!   later rules for that field are not evaluated.
//! - A field name with no registered rules validates to `None`.

use std::fmt;

use crate::rules::{Email, FieldRule, MinLength, Required};

// ---------------------------------------------------------------------------
// FieldName
// ---------------------------------------------------------------------------

/// A string identifier unique within a form.
///
/// Keys the rule registry and the per-field status list.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldName(String);

impl FieldName {
    /// Create a field name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for FieldName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl PartialEq<str> for FieldName {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for FieldName {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

// ---------------------------------------------------------------------------
// ValidationComposite
// ---------------------------------------------------------------------------

/// Ordered collection of per-field rules with first-failure dispatch.
pub struct ValidationComposite {
    rules: Vec<(FieldName, Box<dyn FieldRule>)>,
}

impl ValidationComposite {
    /// Create a composite from an ordered list of `(field, rule)` pairs.
    ///
    /// The list is stored unmodified; registration order is the tie-break
    /// order for rules targeting the same field.
    #[must_use]
    pub fn new(rules: Vec<(FieldName, Box<dyn FieldRule>)>) -> Self {
        Self { rules }
    }

    /// Start a fluent builder.
    #[must_use]
    pub fn builder() -> ValidationBuilder {
        ValidationBuilder::new()
    }

    /// Validate one field's current value.
    ///
    /// Runs the rules registered for `field` in registration order and
    /// returns the first failure's rendered message. Returns `None` when
    /// every rule passes or when no rule is registered for that name.
    #[must_use]
    pub fn validate(&self, field: &str, value: &str) -> Option<String> {
        for (name, rule) in &self.rules {
            if name.as_str() != field {
                continue;
            }
            if let Some(kind) = rule.validate(value) {
                return Some(kind.render(rule.message()));
            }
        }
        None
    }

    /// Registered field names in registration order, deduplicated.
    #[must_use]
    pub fn field_names(&self) -> Vec<FieldName> {
        let mut names: Vec<FieldName> = Vec::new();
        for (name, _) in &self.rules {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        names
    }

    /// `true` when at least one rule is registered for `field`.
    #[must_use]
    pub fn has_field(&self, field: &str) -> bool {
        self.rules.iter().any(|(name, _)| name.as_str() == field)
    }

    /// Total number of registered rules across all fields.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// `true` when no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl fmt::Debug for ValidationComposite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationComposite")
            .field("fields", &self.field_names())
            .field("rule_count", &self.rule_count())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// ValidationBuilder
// ---------------------------------------------------------------------------

/// Fluent builder producing an immutable [`ValidationComposite`].
///
/// `field(name)` selects the field that subsequent rule calls attach to;
/// interleaved `field` calls preserve overall registration order.
///
/// # Example
///
/// ```rust
/// use credform_validation::ValidationBuilder;
///
/// let rules = ValidationBuilder::new()
///     .field("email").required().email()
///     .field("password").required().min_length(5)
///     .build();
///
/// assert_eq!(rules.rule_count(), 4);
/// ```
#[derive(Default)]
pub struct ValidationBuilder {
    rules: Vec<(FieldName, Box<dyn FieldRule>)>,
    current: Option<FieldName>,
}

impl ValidationBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the field that subsequent rule calls attach to.
    #[must_use]
    pub fn field(mut self, name: impl Into<FieldName>) -> Self {
        self.current = Some(name.into());
        self
    }

    /// Attach a [`Required`] rule to the current field.
    #[must_use]
    pub fn required(self) -> Self {
        self.rule(Box::new(Required::new()))
    }

    /// Attach a [`MinLength`] rule to the current field.
    #[must_use]
    pub fn min_length(self, min: usize) -> Self {
        self.rule(Box::new(MinLength::new(min)))
    }

    /// Attach an [`Email`] rule to the current field.
    #[must_use]
    pub fn email(self) -> Self {
        self.rule(Box::new(Email::new()))
    }

    /// Attach a caller-supplied rule to the current field.
    ///
    /// Rules attached before the first `field` call have no field to target
    /// and are discarded.
    #[must_use]
    pub fn rule(mut self, rule: Box<dyn FieldRule>) -> Self {
        debug_assert!(self.current.is_some(), "rule attached before any field()");
        if let Some(field) = &self.current {
            self.rules.push((field.clone(), rule));
        }
        self
    }

    /// Finish building; the resulting composite is immutable.
    #[must_use]
    pub fn build(self) -> ValidationComposite {
        ValidationComposite::new(self.rules)
    }
}

impl fmt::Debug for ValidationBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationBuilder")
            .field("rule_count", &self.rules.len())
            .field("current", &self.current)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
