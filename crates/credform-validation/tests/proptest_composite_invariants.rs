//! Property tests for composite dispatch invariants.

use credform_validation::{ValidationBuilder, ValidationComposite};
use proptest::prelude::*;

fn login_rules() -> ValidationComposite {
    ValidationBuilder::new()
        .field("email")
        .required()
        .email()
        .field("password")
        .required()
        .min_length(5)
        .build()
}

proptest! {
    #[test]
    fn validate_is_idempotent(field in "[a-z]{1,10}", value in "\\PC{0,40}") {
        let rules = login_rules();
        let first = rules.validate(&field, &value);
        let second = rules.validate(&field, &value);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn unknown_fields_never_report(value in "\\PC{0,40}") {
        let rules = login_rules();
        prop_assert_eq!(rules.validate("nickname", &value), None);
    }

    #[test]
    fn required_rejects_exactly_blank_values(value in "[ a-z]{0,20}") {
        let rules = ValidationBuilder::new().field("name").required().build();
        let verdict = rules.validate("name", &value);
        if value.trim().is_empty() {
            prop_assert_eq!(verdict, Some("This field is required".to_string()));
        } else {
            prop_assert_eq!(verdict, None);
        }
    }

    #[test]
    fn calls_for_one_field_never_disturb_another(a in "\\PC{0,20}", b in "\\PC{0,20}") {
        let rules = login_rules();
        let before = rules.validate("email", &a);
        let _ = rules.validate("password", &b);
        let after = rules.validate("email", &a);
        prop_assert_eq!(before, after);
    }

    #[test]
    fn password_verdict_matches_rule_chain(value in "\\PC{0,12}") {
        // The composite's answer must agree with running the rules by hand.
        let rules = login_rules();
        let expected = if value.trim().is_empty() {
            Some("This field is required".to_string())
        } else if !value.is_empty() && value.chars().count() < 5 {
            Some("Must be at least 5 characters".to_string())
        } else {
            None
        };
        prop_assert_eq!(rules.validate("password", &value), expected);
    }
}
