//! Account field validation.
//!
//! Each validator checks its rules in a fixed order and reports the first
//! one that fails. Validators are pure: they never log or mutate.

/// Minimum name length, in characters.
pub const NAME_MIN_LEN: usize = 3;
/// Maximum name length, in characters.
pub const NAME_MAX_LEN: usize = 50;
/// Minimum password length, in characters.
pub const PASSWORD_MIN_LEN: usize = 8;
/// Maximum password length, in characters.
pub const PASSWORD_MAX_LEN: usize = 64;

/// Email suffixes accepted at registration.
pub const ALLOWED_EMAIL_DOMAINS: [&str; 3] = ["@gmail.com", "@hotmail.com", "@outlook.com"];

/// Validation error for account fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name is shorter than 3 or longer than 50 characters.
    NameLength,
    /// Name contains punctuation or symbols.
    NameSpecialCharacters,
    /// Name contains digits.
    NameDigits,
    /// Name is blank.
    EmptyName,
    /// Name lacks a surname.
    NameMissingSurname,
    /// Email address is blank.
    EmptyEmail,
    /// Email starts or ends with `@` or `.`.
    EmailBoundary,
    /// Email does not end with a supported domain.
    UnsupportedEmailDomain,
    /// Email contains more than one `@`.
    EmailMultipleAt,
    /// Password is shorter than 8 characters.
    PasswordTooShort,
    /// Password is longer than 64 characters.
    PasswordTooLong,
    /// Password contains a space.
    PasswordContainsSpace,
    /// Password has no lowercase letter.
    PasswordMissingLowercase,
    /// Password has no uppercase letter.
    PasswordMissingUppercase,
    /// Password has no digit.
    PasswordMissingDigit,
    /// Password has no punctuation or symbol.
    PasswordMissingSpecial,
}

impl ValidationError {
    /// Get human-readable error message.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NameLength => "Name must be between 3 and 50 characters",
            Self::NameSpecialCharacters => "Name must not contain special characters",
            Self::NameDigits => "Name must not contain numbers",
            Self::EmptyName => "Name must not be empty",
            Self::NameMissingSurname => "Name must include first and last name",
            Self::EmptyEmail => "Email address is required",
            Self::EmailBoundary => "Email must not start or end with \"@\" or \".\"",
            Self::UnsupportedEmailDomain => {
                "Email must end with @gmail.com, @hotmail.com or @outlook.com"
            }
            Self::EmailMultipleAt => "Email must contain a single \"@\"",
            Self::PasswordTooShort => "Weak password: at least 8 characters required",
            Self::PasswordTooLong => "Password too long: at most 64 characters",
            Self::PasswordContainsSpace => "Password must not contain spaces",
            Self::PasswordMissingLowercase => "Weak password: add a lowercase letter",
            Self::PasswordMissingUppercase => "Weak password: add an uppercase letter",
            Self::PasswordMissingDigit => "Weak password: add a number",
            Self::PasswordMissingSpecial => "Weak password: add a special character",
        }
    }

    /// Get the field name this error relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::NameLength
            | Self::NameSpecialCharacters
            | Self::NameDigits
            | Self::EmptyName
            | Self::NameMissingSurname => "name",
            Self::EmptyEmail
            | Self::EmailBoundary
            | Self::UnsupportedEmailDomain
            | Self::EmailMultipleAt => "email",
            Self::PasswordTooShort
            | Self::PasswordTooLong
            | Self::PasswordContainsSpace
            | Self::PasswordMissingLowercase
            | Self::PasswordMissingUppercase
            | Self::PasswordMissingDigit
            | Self::PasswordMissingSpecial => "password",
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ValidationError {}

/// Result of validating a single field.
pub type ValidationResult = Result<(), ValidationError>;

/// Validate a display name.
///
/// # Errors
///
/// Returns the first rule the name breaks.
pub fn validate_name(name: &str) -> ValidationResult {
    let len = name.chars().count();
    if !(NAME_MIN_LEN..=NAME_MAX_LEN).contains(&len) {
        return Err(ValidationError::NameLength);
    }
    if name.chars().any(|c| c.is_ascii_punctuation()) {
        return Err(ValidationError::NameSpecialCharacters);
    }
    // Any numeric character counts, including fractions and numerals.
    if name.chars().any(char::is_numeric) {
        return Err(ValidationError::NameDigits);
    }
    if name.trim().is_empty() {
        return Err(ValidationError::EmptyName);
    }
    if name.split_whitespace().count() < 2 {
        return Err(ValidationError::NameMissingSurname);
    }
    Ok(())
}

/// Validate an email address.
///
/// Only the provider suffixes in [`ALLOWED_EMAIL_DOMAINS`] are accepted.
///
/// # Errors
///
/// Returns the first rule the address breaks.
pub fn validate_email(email: &str) -> ValidationResult {
    if email.trim().is_empty() {
        return Err(ValidationError::EmptyEmail);
    }
    if email.starts_with(['@', '.']) || email.ends_with(['@', '.']) {
        return Err(ValidationError::EmailBoundary);
    }
    if !ALLOWED_EMAIL_DOMAINS
        .iter()
        .any(|domain| email.ends_with(domain))
    {
        return Err(ValidationError::UnsupportedEmailDomain);
    }
    // A repeated provider suffix always implies a second '@'.
    if email.matches('@').count() > 1 {
        return Err(ValidationError::EmailMultipleAt);
    }
    Ok(())
}

/// Validate password strength.
///
/// # Errors
///
/// Returns the first rule the password breaks.
pub fn validate_password(password: &str) -> ValidationResult {
    let len = password.chars().count();
    if len < PASSWORD_MIN_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if len > PASSWORD_MAX_LEN {
        return Err(ValidationError::PasswordTooLong);
    }
    if password.contains(' ') {
        return Err(ValidationError::PasswordContainsSpace);
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(ValidationError::PasswordMissingLowercase);
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(ValidationError::PasswordMissingUppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PasswordMissingDigit);
    }
    if !password.chars().any(|c| c.is_ascii_punctuation()) {
        return Err(ValidationError::PasswordMissingSpecial);
    }
    Ok(())
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;

    mod name_tests {
        use super::*;

        #[test]
        fn accepts_first_and_last_name() {
            assert!(validate_name("Ana Souza").is_ok());
            assert!(validate_name("Maria da Silva").is_ok());
        }

        #[test]
        fn accepts_accented_letters() {
            assert!(validate_name("João Conceição").is_ok());
        }

        #[test]
        fn length_bounds() {
            assert_eq!(validate_name("Al"), Err(ValidationError::NameLength));
            assert_eq!(validate_name(""), Err(ValidationError::NameLength));
            assert!(validate_name("A B").is_ok());

            let at_limit = format!("{} {}", "a".repeat(24), "b".repeat(25));
            assert_eq!(at_limit.chars().count(), 50);
            assert!(validate_name(&at_limit).is_ok());

            let over = format!("{} {}", "a".repeat(25), "b".repeat(25));
            assert_eq!(validate_name(&over), Err(ValidationError::NameLength));
        }

        #[test]
        fn length_counts_characters_not_bytes() {
            // 25 two-byte characters on each side: 51 chars, 101 bytes.
            let name = format!("{} {}", "é".repeat(25), "ã".repeat(25));
            assert_eq!(validate_name(&name), Err(ValidationError::NameLength));
        }

        #[test]
        fn rejects_punctuation() {
            assert_eq!(
                validate_name("Ana-Maria Souza"),
                Err(ValidationError::NameSpecialCharacters)
            );
            assert_eq!(
                validate_name("Ana Souza!"),
                Err(ValidationError::NameSpecialCharacters)
            );
        }

        #[test]
        fn rejects_digits() {
            assert_eq!(validate_name("Ana Souza2"), Err(ValidationError::NameDigits));
        }

        #[test]
        fn rejects_non_ascii_numerics() {
            assert_eq!(validate_name("Ana Souza½"), Err(ValidationError::NameDigits));
            assert_eq!(validate_name("Luis Ⅻ"), Err(ValidationError::NameDigits));
            assert_eq!(validate_name("Ana ٣Souza"), Err(ValidationError::NameDigits));
        }

        #[test]
        fn punctuation_checked_before_digits() {
            assert_eq!(
                validate_name("Ana 2Souza."),
                Err(ValidationError::NameSpecialCharacters)
            );
        }

        #[test]
        fn rejects_blank() {
            assert_eq!(validate_name("     "), Err(ValidationError::EmptyName));
        }

        #[test]
        fn rejects_single_token() {
            assert_eq!(
                validate_name("Ana"),
                Err(ValidationError::NameMissingSurname)
            );
            assert_eq!(
                validate_name("  Ana  "),
                Err(ValidationError::NameMissingSurname)
            );
        }
    }

    mod email_tests {
        use super::*;

        #[test]
        fn accepts_supported_domains() {
            assert!(validate_email("ana@gmail.com").is_ok());
            assert!(validate_email("ana.souza@hotmail.com").is_ok());
            assert!(validate_email("ana_souza@outlook.com").is_ok());
        }

        #[test]
        fn rejects_blank() {
            assert_eq!(validate_email(""), Err(ValidationError::EmptyEmail));
            assert_eq!(validate_email("   "), Err(ValidationError::EmptyEmail));
        }

        #[test]
        fn rejects_bad_boundaries() {
            assert_eq!(
                validate_email("@gmail.com"),
                Err(ValidationError::EmailBoundary)
            );
            assert_eq!(
                validate_email(".ana@gmail.com"),
                Err(ValidationError::EmailBoundary)
            );
            assert_eq!(
                validate_email("ana@gmail.com."),
                Err(ValidationError::EmailBoundary)
            );
            assert_eq!(validate_email("ana@"), Err(ValidationError::EmailBoundary));
        }

        #[test]
        fn rejects_other_domains() {
            assert_eq!(
                validate_email("ana@example.com"),
                Err(ValidationError::UnsupportedEmailDomain)
            );
            assert_eq!(
                validate_email("ana@GMAIL.COM"),
                Err(ValidationError::UnsupportedEmailDomain)
            );
            assert_eq!(
                validate_email("anagmail.com"),
                Err(ValidationError::UnsupportedEmailDomain)
            );
        }

        #[test]
        fn rejects_multiple_at() {
            assert_eq!(
                validate_email("a@b@gmail.com"),
                Err(ValidationError::EmailMultipleAt)
            );
            assert_eq!(
                validate_email("a@gmail.com@gmail.com"),
                Err(ValidationError::EmailMultipleAt)
            );
        }
    }

    mod password_tests {
        use super::*;

        #[test]
        fn accepts_strong_password() {
            assert!(validate_password("Passw0rd!").is_ok());
            assert!(validate_password("aB3$aB3$").is_ok());
        }

        #[test]
        fn length_bounds() {
            assert_eq!(
                validate_password("short1!"),
                Err(ValidationError::PasswordTooShort)
            );
            let max = format!("Aa1!{}", "x".repeat(60));
            assert!(validate_password(&max).is_ok());
            let over = format!("Aa1!{}", "x".repeat(61));
            assert_eq!(
                validate_password(&over),
                Err(ValidationError::PasswordTooLong)
            );
        }

        #[test]
        fn rejects_space() {
            assert_eq!(
                validate_password("Has Space1!"),
                Err(ValidationError::PasswordContainsSpace)
            );
        }

        #[test]
        fn rejects_missing_classes() {
            assert_eq!(
                validate_password("ALLUPPER1!"),
                Err(ValidationError::PasswordMissingLowercase)
            );
            assert_eq!(
                validate_password("alllowercase1!"),
                Err(ValidationError::PasswordMissingUppercase)
            );
            assert_eq!(
                validate_password("NoDigits!!"),
                Err(ValidationError::PasswordMissingDigit)
            );
            assert_eq!(
                validate_password("NoSpecial123"),
                Err(ValidationError::PasswordMissingSpecial)
            );
        }

        #[test]
        fn digit_rule_needs_ascii_digit() {
            assert_eq!(
                validate_password("Passw½rd!"),
                Err(ValidationError::PasswordMissingDigit)
            );
            assert_eq!(
                validate_password("PasswⅫrd!"),
                Err(ValidationError::PasswordMissingDigit)
            );
            assert_eq!(
                validate_password("Passw٣rd!"),
                Err(ValidationError::PasswordMissingDigit)
            );
            assert!(validate_password("Passw0rd!").is_ok());
        }
    }

    mod error_tests {
        use super::*;

        #[test]
        fn fields() {
            assert_eq!(ValidationError::NameDigits.field(), "name");
            assert_eq!(ValidationError::EmailMultipleAt.field(), "email");
            assert_eq!(ValidationError::PasswordTooLong.field(), "password");
        }

        #[test]
        fn display_uses_message() {
            let err = ValidationError::NameMissingSurname;
            assert_eq!(err.to_string(), err.message());
        }
    }
}
