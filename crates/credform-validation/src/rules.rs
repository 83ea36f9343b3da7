#![forbid(unsafe_code)]

//! Failure kinds and built-in field rules.

use std::fmt;

// ---------------------------------------------------------------------------
// Error Codes (for programmatic handling)
// ---------------------------------------------------------------------------

/// Error code for required field validation.
pub const ERROR_CODE_REQUIRED: &str = "required";
/// Error code for minimum length validation.
pub const ERROR_CODE_MIN_LENGTH: &str = "too_short";
/// Error code for email validation.
pub const ERROR_CODE_EMAIL: &str = "email";

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// Closed set of validation failure reasons.
///
/// Each kind maps to a stable code for programmatic handling and carries the
/// parameters needed to render a message template. The message text itself is
/// owned by the rule that produced the kind, so two rules of the same kind can
/// show different wording.
///
/// # Example
///
/// ```rust
/// use credform_validation::ErrorKind;
///
/// let kind = ErrorKind::TooShort { min: 8, actual: 3 };
/// assert_eq!(kind.code(), "too_short");
/// assert_eq!(
///     kind.render("Must be at least {min} characters"),
///     "Must be at least 8 characters"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The trimmed value was empty.
    RequiredField,
    /// The value had fewer than `min` characters.
    TooShort {
        /// Minimum number of characters required.
        min: usize,
        /// Number of characters actually present.
        actual: usize,
    },
    /// The value did not have the shape of an email address.
    InvalidEmail,
}

impl ErrorKind {
    /// Stable error code for this kind.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::RequiredField => ERROR_CODE_REQUIRED,
            Self::TooShort { .. } => ERROR_CODE_MIN_LENGTH,
            Self::InvalidEmail => ERROR_CODE_EMAIL,
        }
    }

    /// Default human-readable message template for this kind.
    #[must_use]
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::RequiredField => "This field is required",
            Self::TooShort { .. } => "Must be at least {min} characters",
            Self::InvalidEmail => "Invalid email address",
        }
    }

    /// Render a message template with this kind's parameters substituted.
    ///
    /// Parameters use `{key}` syntax; kinds without parameters return the
    /// template unchanged.
    #[must_use]
    pub fn render(&self, template: &str) -> String {
        match self {
            Self::TooShort { min, actual } => template
                .replace("{min}", &min.to_string())
                .replace("{actual}", &actual.to_string()),
            Self::RequiredField | Self::InvalidEmail => template.to_string(),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(self.default_message()))
    }
}

// ---------------------------------------------------------------------------
// FieldRule Trait
// ---------------------------------------------------------------------------

/// A single pure check against one field's raw value.
///
/// Rules are stateless: `validate` is a pure function of the value and of any
/// configuration baked in at construction. Rules never see other fields and
/// must be safe to call with an empty string.
///
/// # Implementing a Custom Rule
///
/// ```rust
/// use credform_validation::{ErrorKind, FieldRule};
///
/// struct NoSpaces;
///
/// impl FieldRule for NoSpaces {
///     fn validate(&self, value: &str) -> Option<ErrorKind> {
///         if value.contains(' ') {
///             Some(ErrorKind::InvalidEmail)
///         } else {
///             None
///         }
///     }
///
///     fn message(&self) -> &str {
///         "Value must not contain spaces"
///     }
/// }
/// ```
pub trait FieldRule: Send + Sync {
    /// Check the given value. Returns the failure reason, or `None` when the
    /// value passes.
    fn validate(&self, value: &str) -> Option<ErrorKind>;

    /// The user-facing message template shown when this rule fails.
    fn message(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Built-in Rules
// ---------------------------------------------------------------------------

/// Fails iff the trimmed value is empty.
#[derive(Debug, Clone)]
pub struct Required {
    message: String,
}

impl Required {
    /// Create a new `Required` rule with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: ErrorKind::RequiredField.default_message().to_string(),
        }
    }

    /// Set a custom error message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for Required {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for Required {
    fn validate(&self, value: &str) -> Option<ErrorKind> {
        if value.trim().is_empty() {
            Some(ErrorKind::RequiredField)
        } else {
            None
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Fails iff the value has fewer than `min` characters.
///
/// The empty string passes: emptiness is `Required`'s concern, so the two
/// rules compose on one field without double-reporting. Length is counted in
/// `char`s, not bytes.
#[derive(Debug, Clone)]
pub struct MinLength {
    min: usize,
    message: String,
}

impl MinLength {
    /// Create a new `MinLength` rule with the default message.
    #[must_use]
    pub fn new(min: usize) -> Self {
        Self {
            min,
            message: ErrorKind::TooShort { min, actual: 0 }
                .default_message()
                .to_string(),
        }
    }

    /// Set a custom error message. `{min}` and `{actual}` are interpolated.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl FieldRule for MinLength {
    fn validate(&self, value: &str) -> Option<ErrorKind> {
        if value.is_empty() {
            return None;
        }
        let actual = value.chars().count();
        if actual < self.min {
            Some(ErrorKind::TooShort {
                min: self.min,
                actual,
            })
        } else {
            None
        }
    }

    fn message(&self) -> &str {
        &self.message
    }
}

/// Fails iff the value does not look like an email address.
///
/// Heuristic shape check: a non-empty local part, one `@`, and a domain with
/// at least one dot whose parts are non-empty and whose final label has two
/// or more characters. The empty string passes (compose with `Required`).
#[derive(Debug, Clone)]
pub struct Email {
    message: String,
}

impl Email {
    /// Create a new `Email` rule with the default message.
    #[must_use]
    pub fn new() -> Self {
        Self {
            message: ErrorKind::InvalidEmail.default_message().to_string(),
        }
    }

    /// Set a custom error message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl Default for Email {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldRule for Email {
    fn validate(&self, value: &str) -> Option<ErrorKind> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        let Some((local, domain)) = trimmed.split_once('@') else {
            return Some(ErrorKind::InvalidEmail);
        };

        if local.is_empty() || domain.is_empty() {
            return Some(ErrorKind::InvalidEmail);
        }

        if !domain.contains('.') {
            return Some(ErrorKind::InvalidEmail);
        }

        let labels: Vec<&str> = domain.split('.').collect();
        if labels.iter().any(|label| label.is_empty()) {
            return Some(ErrorKind::InvalidEmail);
        }

        if let Some(tld) = labels.last()
            && tld.chars().count() < 2
        {
            return Some(ErrorKind::InvalidEmail);
        }

        None
    }

    fn message(&self) -> &str {
        &self.message
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- ErrorKind tests --

    #[test]
    fn codes_are_stable() {
        assert_eq!(ErrorKind::RequiredField.code(), ERROR_CODE_REQUIRED);
        assert_eq!(
            ErrorKind::TooShort { min: 5, actual: 2 }.code(),
            ERROR_CODE_MIN_LENGTH
        );
        assert_eq!(ErrorKind::InvalidEmail.code(), ERROR_CODE_EMAIL);
    }

    #[test]
    fn render_interpolates_length_params() {
        let kind = ErrorKind::TooShort { min: 8, actual: 3 };
        assert_eq!(
            kind.render("Need {min}, got {actual}"),
            "Need 8, got 3"
        );
    }

    #[test]
    fn render_leaves_plain_templates_alone() {
        let kind = ErrorKind::RequiredField;
        assert_eq!(kind.render("This field is required"), "This field is required");
    }

    #[test]
    fn display_uses_default_message() {
        let kind = ErrorKind::TooShort { min: 5, actual: 1 };
        assert_eq!(kind.to_string(), "Must be at least 5 characters");
    }

    // -- Required tests --

    #[test]
    fn required_rejects_empty() {
        let rule = Required::new();
        assert_eq!(rule.validate(""), Some(ErrorKind::RequiredField));
    }

    #[test]
    fn required_rejects_whitespace_only() {
        let rule = Required::new();
        assert_eq!(rule.validate("   "), Some(ErrorKind::RequiredField));
        assert_eq!(rule.validate("\t\n"), Some(ErrorKind::RequiredField));
    }

    #[test]
    fn required_accepts_non_empty() {
        let rule = Required::new();
        assert_eq!(rule.validate("hello"), None);
        assert_eq!(rule.validate("  x  "), None);
    }

    #[test]
    fn required_accepts_unicode() {
        let rule = Required::new();
        assert_eq!(rule.validate("日本語"), None);
        assert_eq!(rule.validate("é"), None);
    }

    #[test]
    fn required_default_message() {
        let rule = Required::new();
        assert_eq!(rule.message(), "This field is required");
    }

    #[test]
    fn required_custom_message() {
        let rule = Required::new().with_message("Please fill this in");
        assert_eq!(rule.message(), "Please fill this in");
        // The failure kind is unchanged by the message override.
        assert_eq!(rule.validate(""), Some(ErrorKind::RequiredField));
    }

    // -- MinLength tests --

    #[test]
    fn min_length_rejects_short_values() {
        let rule = MinLength::new(5);
        assert_eq!(
            rule.validate("abc"),
            Some(ErrorKind::TooShort { min: 5, actual: 3 })
        );
    }

    #[test]
    fn min_length_accepts_exact_boundary() {
        let rule = MinLength::new(5);
        assert_eq!(rule.validate("abcde"), None);
    }

    #[test]
    fn min_length_accepts_longer_values() {
        let rule = MinLength::new(5);
        assert_eq!(rule.validate("abcdefgh"), None);
    }

    #[test]
    fn min_length_passes_empty() {
        let rule = MinLength::new(5);
        assert_eq!(rule.validate(""), None);
    }

    #[test]
    fn min_length_counts_chars_not_bytes() {
        // "héllo" is 5 chars but 6 bytes.
        let rule = MinLength::new(5);
        assert_eq!(rule.validate("héllo"), None);
        assert_eq!(
            rule.validate("héll"),
            Some(ErrorKind::TooShort { min: 5, actual: 4 })
        );
    }

    #[test]
    fn min_length_message_interpolates() {
        let rule = MinLength::new(5);
        let kind = rule.validate("ab").expect("should fail");
        assert_eq!(kind.render(rule.message()), "Must be at least 5 characters");
    }

    // -- Email tests --

    #[test]
    fn email_accepts_plain_addresses() {
        let rule = Email::new();
        assert_eq!(rule.validate("ada@example.com"), None);
        assert_eq!(rule.validate("dev.team@sub.example.org"), None);
    }

    #[test]
    fn email_passes_empty() {
        let rule = Email::new();
        assert_eq!(rule.validate(""), None);
        assert_eq!(rule.validate("   "), None);
    }

    #[test]
    fn email_rejects_missing_at() {
        let rule = Email::new();
        assert_eq!(rule.validate("ada.example.com"), Some(ErrorKind::InvalidEmail));
    }

    #[test]
    fn email_rejects_empty_local_or_domain() {
        let rule = Email::new();
        assert_eq!(rule.validate("@example.com"), Some(ErrorKind::InvalidEmail));
        assert_eq!(rule.validate("ada@"), Some(ErrorKind::InvalidEmail));
    }

    #[test]
    fn email_rejects_dotless_domain() {
        let rule = Email::new();
        assert_eq!(rule.validate("ada@example"), Some(ErrorKind::InvalidEmail));
    }

    #[test]
    fn email_rejects_empty_domain_labels() {
        let rule = Email::new();
        assert_eq!(rule.validate("ada@.com"), Some(ErrorKind::InvalidEmail));
        assert_eq!(rule.validate("ada@example..com"), Some(ErrorKind::InvalidEmail));
        assert_eq!(rule.validate("ada@example.com."), Some(ErrorKind::InvalidEmail));
    }

    #[test]
    fn email_rejects_short_tld() {
        let rule = Email::new();
        assert_eq!(rule.validate("ada@example.c"), Some(ErrorKind::InvalidEmail));
        assert_eq!(rule.validate("ada@example.co"), None);
    }

    #[test]
    fn email_trims_surrounding_whitespace() {
        let rule = Email::new();
        assert_eq!(rule.validate("  ada@example.com  "), None);
    }

    #[test]
    fn email_custom_message() {
        let rule = Email::new().with_message("That does not look like an email");
        assert_eq!(rule.message(), "That does not look like an email");
    }

    // -- Custom rule tests --

    struct Lowercase;

    impl FieldRule for Lowercase {
        fn validate(&self, value: &str) -> Option<ErrorKind> {
            if value.chars().any(|c| c.is_uppercase()) {
                Some(ErrorKind::InvalidEmail)
            } else {
                None
            }
        }

        fn message(&self) -> &str {
            "Must be lowercase"
        }
    }

    #[test]
    fn custom_rules_implement_the_trait() {
        let rule = Lowercase;
        assert_eq!(rule.validate("ok"), None);
        assert_eq!(rule.validate("Nope"), Some(ErrorKind::InvalidEmail));
        assert_eq!(rule.message(), "Must be lowercase");
    }

    #[test]
    fn rules_are_object_safe() {
        let rules: Vec<Box<dyn FieldRule>> = vec![
            Box::new(Required::new()),
            Box::new(MinLength::new(3)),
            Box::new(Email::new()),
            Box::new(Lowercase),
        ];
        assert_eq!(rules.len(), 4);
        for rule in &rules {
            // Every rule must be safe on the empty string.
            let _ = rule.validate("");
        }
    }

    #[test]
    fn rules_are_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Required>();
        assert_sync::<Required>();
        assert_send::<MinLength>();
        assert_sync::<MinLength>();
        assert_send::<Email>();
        assert_sync::<Email>();
    }
}
