//! Account model type.

use tracing::debug;

use super::validation::{
    ValidationError, ValidationResult, validate_email, validate_name, validate_password,
};

/// A registered user account.
///
/// Fields are only reachable through validating constructors and setters,
/// so an `Account` value always holds an acceptable name, email and password.
/// The password is kept in plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    name: String,
    email: String,
    password: String,
}

impl Account {
    /// Create an account, validating name, email and password in that order.
    ///
    /// # Errors
    ///
    /// Returns the first `ValidationError` raised by any of the fields.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        let email = email.into();
        let password = password.into();

        validate_name(&name)?;
        validate_email(&email)?;
        validate_password(&password)?;
        debug!("Accepted account fields for {email}");

        Ok(Self {
            name,
            email,
            password,
        })
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Email address, unique within a directory.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Plaintext password.
    #[must_use]
    pub fn password(&self) -> &str {
        &self.password
    }

    /// Replace the name if it passes validation.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; the account is left unchanged.
    pub fn set_name(&mut self, name: impl Into<String>) -> ValidationResult {
        let name = name.into();
        validate_name(&name)?;
        self.name = name;
        Ok(())
    }

    /// Replace the email if it passes validation.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; the account is left unchanged.
    pub fn set_email(&mut self, email: impl Into<String>) -> ValidationResult {
        let email = email.into();
        validate_email(&email)?;
        self.email = email;
        Ok(())
    }

    /// Replace the password if it passes validation.
    ///
    /// # Errors
    ///
    /// Returns the validation failure; the account is left unchanged.
    pub fn set_password(&mut self, password: impl Into<String>) -> ValidationResult {
        let password = password.into();
        validate_password(&password)?;
        self.password = password;
        Ok(())
    }

    /// Whether the given credentials match exactly.
    #[must_use]
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }
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

    fn sample() -> Account {
        Account::new("Ana Souza", "ana@gmail.com", "Passw0rd!").unwrap()
    }

    mod construction_tests {
        use super::*;

        #[test]
        fn new_keeps_fields() {
            let account = sample();
            assert_eq!(account.name(), "Ana Souza");
            assert_eq!(account.email(), "ana@gmail.com");
            assert_eq!(account.password(), "Passw0rd!");
        }

        #[test]
        fn new_rejects_bad_name() {
            let err = Account::new("Ana", "ana@gmail.com", "Passw0rd!").unwrap_err();
            assert_eq!(err, ValidationError::NameMissingSurname);
        }

        #[test]
        fn new_rejects_bad_email() {
            let err = Account::new("Ana Souza", "ana@example.com", "Passw0rd!").unwrap_err();
            assert_eq!(err, ValidationError::UnsupportedEmailDomain);
        }

        #[test]
        fn new_rejects_bad_password() {
            let err = Account::new("Ana Souza", "ana@gmail.com", "password").unwrap_err();
            assert_eq!(err, ValidationError::PasswordMissingUppercase);
        }

        #[test]
        fn name_checked_first() {
            let err = Account::new("A1", "bad", "bad").unwrap_err();
            assert_eq!(err.field(), "name");
        }
    }

    mod setter_tests {
        use super::*;

        #[test]
        fn set_name_applies_valid_value() {
            let mut account = sample();
            account.set_name("Ana Lima").unwrap();
            assert_eq!(account.name(), "Ana Lima");
        }

        #[test]
        fn set_name_rejects_and_keeps_old_value() {
            let mut account = sample();
            assert_eq!(
                account.set_name("Ana"),
                Err(ValidationError::NameMissingSurname)
            );
            assert_eq!(account.name(), "Ana Souza");
        }

        #[test]
        fn set_email_rejects_and_keeps_old_value() {
            let mut account = sample();
            assert_eq!(
                account.set_email("a@b@gmail.com"),
                Err(ValidationError::EmailMultipleAt)
            );
            assert_eq!(account.email(), "ana@gmail.com");
        }

        #[test]
        fn set_password_applies_valid_value() {
            let mut account = sample();
            account.set_password("N3w-Secret").unwrap();
            assert_eq!(account.password(), "N3w-Secret");
        }

        #[test]
        fn set_password_rejects_and_keeps_old_value() {
            let mut account = sample();
            assert_eq!(
                account.set_password("Has Space1!"),
                Err(ValidationError::PasswordContainsSpace)
            );
            assert_eq!(account.password(), "Passw0rd!");
        }
    }

    #[test]
    fn matches_credentials_is_exact() {
        let account = sample();
        assert!(account.matches_credentials("ana@gmail.com", "Passw0rd!"));
        assert!(!account.matches_credentials("ana@gmail.com", "passw0rd!"));
        assert!(!account.matches_credentials("ANA@gmail.com", "Passw0rd!"));
    }
}
