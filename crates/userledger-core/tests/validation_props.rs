//! Property tests for account field validators.

use proptest::prelude::*;

use userledger_core::{ValidationError, validate_email, validate_name, validate_password};

fn domain() -> impl Strategy<Value = &'static str> {
    prop_oneof![Just("@gmail.com"), Just("@hotmail.com"), Just("@outlook.com")]
}

proptest! {
    #[test]
    fn two_token_names_accepted(first in "[A-Za-z]{1,24}", last in "[A-Za-z]{1,24}") {
        let name = format!("{first} {last}");
        prop_assert!(validate_name(&name).is_ok());
    }

    #[test]
    fn single_token_names_rejected(only in "[A-Za-z]{3,50}") {
        prop_assert_eq!(validate_name(&only), Err(ValidationError::NameMissingSurname));
    }

    #[test]
    fn names_with_digits_rejected(first in "[A-Za-z]{1,20}", last in "[A-Za-z]{1,20}", digit in 0u8..10) {
        let name = format!("{first} {last}{digit}");
        prop_assert_eq!(validate_name(&name), Err(ValidationError::NameDigits));
    }

    #[test]
    fn names_with_punctuation_rejected(
        first in "[A-Za-z]{1,20}",
        last in "[A-Za-z]{1,20}",
        mark in prop::sample::select(vec!['!', '.', '-', '@', '#', '\'', '_']),
    ) {
        let name = format!("{first}{mark} {last}");
        prop_assert_eq!(validate_name(&name), Err(ValidationError::NameSpecialCharacters));
    }

    #[test]
    fn single_at_supported_domain_accepted(local in "[a-z0-9][a-z0-9._]{0,20}", domain in domain()) {
        let email = format!("{local}{domain}");
        prop_assert!(validate_email(&email).is_ok());
    }

    #[test]
    fn extra_at_rejected(
        left in "[a-z]{1,10}",
        right in "[a-z]{1,10}",
        domain in domain(),
    ) {
        let email = format!("{left}@{right}{domain}");
        prop_assert_eq!(validate_email(&email), Err(ValidationError::EmailMultipleAt));
    }

    #[test]
    fn strong_passwords_accepted(
        lower in "[a-z]{1,15}",
        upper in "[A-Z]{1,15}",
        digits in "[0-9]{1,15}",
        special in "[!#$%&*+?@^_~-]{1,15}",
    ) {
        let password = format!("{lower}{upper}{digits}{special}");
        prop_assume!(password.len() >= 8);
        prop_assert!(validate_password(&password).is_ok());
    }

    #[test]
    fn passwords_with_space_rejected(head in "[a-zA-Z0-9!]{4,20}", tail in "[a-zA-Z0-9!]{4,20}") {
        let password = format!("{head} {tail}");
        prop_assert_eq!(validate_password(&password), Err(ValidationError::PasswordContainsSpace));
    }
}

#[test]
fn documented_examples() {
    assert_eq!(
        validate_email("a@b@gmail.com"),
        Err(ValidationError::EmailMultipleAt)
    );
    assert_eq!(
        validate_email("@gmail.com"),
        Err(ValidationError::EmailBoundary)
    );
    assert_eq!(
        validate_password("short1!"),
        Err(ValidationError::PasswordTooShort)
    );
    assert_eq!(
        validate_password("alllowercase1!"),
        Err(ValidationError::PasswordMissingUppercase)
    );
    assert_eq!(
        validate_password("NoSpecial123"),
        Err(ValidationError::PasswordMissingSpecial)
    );
    assert_eq!(
        validate_password("Has Space1!"),
        Err(ValidationError::PasswordContainsSpace)
    );
}
