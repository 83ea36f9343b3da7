#![forbid(unsafe_code)]

//! Composable field validation for login-style forms.
//!
//! This crate provides a declarative validation system with:
//! - A core `FieldRule` trait for checking one field's raw value
//! - Built-in rules for common patterns (required, min length, email)
//! - An ordered `ValidationComposite` that dispatches per field name and
//!   reports the first failure
//! - Error messages with parameter interpolation
//!
//! # Example
//!
//! ```rust
//! use credform_validation::ValidationBuilder;
//!
//! let rules = ValidationBuilder::new()
//!     .field("email").required().email()
//!     .field("password").required().min_length(5)
//!     .build();
//!
//! assert_eq!(rules.validate("email", ""), Some("This field is required".into()));
//! assert_eq!(rules.validate("email", "ada@example.com"), None);
//! assert_eq!(
//!     rules.validate("password", "abc"),
//!     Some("Must be at least 5 characters".into())
//! );
//! ```

pub mod composite;
pub mod rules;

pub use composite::{FieldName, ValidationBuilder, ValidationComposite};
pub use rules::{
    // Error codes
    ERROR_CODE_EMAIL,
    ERROR_CODE_MIN_LENGTH,
    ERROR_CODE_REQUIRED,
    // Built-in rules
    Email,
    MinLength,
    Required,
    // Core types
    ErrorKind,
    FieldRule,
};
