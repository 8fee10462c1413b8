//! Plain record form of an account, as persisted on disk.
//!
//! The key names are part of the file format and must not change.

use serde::{Deserialize, Serialize};

use super::model::Account;
use crate::{Error, Result};

/// Persisted key for the display name.
pub const NAME_KEY: &str = "Nome";
/// Persisted key for the email address.
pub const EMAIL_KEY: &str = "Email";
/// Persisted key for the password.
pub const PASSWORD_KEY: &str = "Senha";

/// Flat key-value record for one account.
///
/// Every key is optional on input so that a missing key can be reported as
/// [`Error::MissingField`] instead of a generic parse failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Display name.
    #[serde(rename = "Nome", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Email address.
    #[serde(rename = "Email", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Plaintext password.
    #[serde(rename = "Senha", skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Account {
    /// Convert to the persisted record form.
    #[must_use]
    pub fn to_record(&self) -> AccountRecord {
        AccountRecord {
            name: Some(self.name().to_string()),
            email: Some(self.email().to_string()),
            password: Some(self.password().to_string()),
        }
    }

    /// Rebuild an account from a persisted record with full validation.
    ///
    /// # Errors
    ///
    /// Returns `Error::MissingField` if a key is absent, or
    /// `Error::Validation` if a value breaks a field rule.
    pub fn from_record(record: AccountRecord) -> Result<Self> {
        let name = record.name.ok_or(Error::MissingField(NAME_KEY))?;
        let email = record.email.ok_or(Error::MissingField(EMAIL_KEY))?;
        let password = record.password.ok_or(Error::MissingField(PASSWORD_KEY))?;
        Ok(Self::new(name, email, password)?)
    }
}

impl From<&Account> for AccountRecord {
    fn from(account: &Account) -> Self {
        account.to_record()
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
    use crate::ValidationError;

    fn record(name: Option<&str>, email: Option<&str>, password: Option<&str>) -> AccountRecord {
        AccountRecord {
            name: name.map(str::to_string),
            email: email.map(str::to_string),
            password: password.map(str::to_string),
        }
    }

    #[test]
    fn to_record_uses_persisted_keys() {
        let account = Account::new("Ana Souza", "ana@gmail.com", "Passw0rd!").unwrap();
        let value = serde_json::to_value(account.to_record()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "Nome": "Ana Souza",
                "Email": "ana@gmail.com",
                "Senha": "Passw0rd!"
            })
        );
    }

    #[test]
    fn from_record_parses_existing_file_entry() {
        let json = r#"{"Nome": "João Silva", "Email": "joao@outlook.com", "Senha": "S3nha#Forte"}"#;
        let parsed: AccountRecord = serde_json::from_str(json).unwrap();
        let account = Account::from_record(parsed).unwrap();
        assert_eq!(account.name(), "João Silva");
        assert_eq!(account.email(), "joao@outlook.com");
        assert_eq!(account.password(), "S3nha#Forte");
    }

    #[test]
    fn from_record_ignores_unknown_keys() {
        let json = r#"{"Nome": "Ana Souza", "Email": "ana@gmail.com", "Senha": "Passw0rd!", "Extra": 1}"#;
        let parsed: AccountRecord = serde_json::from_str(json).unwrap();
        assert!(Account::from_record(parsed).is_ok());
    }

    #[test]
    fn from_record_reports_missing_name() {
        let err = Account::from_record(record(None, Some("ana@gmail.com"), Some("Passw0rd!")))
            .unwrap_err();
        assert!(matches!(err, Error::MissingField("Nome")));
    }

    #[test]
    fn from_record_reports_missing_email() {
        let err = Account::from_record(record(Some("Ana Souza"), None, Some("Passw0rd!")))
            .unwrap_err();
        assert!(matches!(err, Error::MissingField("Email")));
    }

    #[test]
    fn from_record_reports_missing_password() {
        let err = Account::from_record(record(Some("Ana Souza"), Some("ana@gmail.com"), None))
            .unwrap_err();
        assert!(matches!(err, Error::MissingField("Senha")));
    }

    #[test]
    fn from_record_validates_values() {
        let err = Account::from_record(record(
            Some("Ana Souza"),
            Some("ana@gmail.com"),
            Some("weak"),
        ))
        .unwrap_err();
        assert!(matches!(
            err,
            Error::Validation(ValidationError::PasswordTooShort)
        ));
    }

    #[test]
    fn from_account_ref() {
        let account = Account::new("Ana Souza", "ana@gmail.com", "Passw0rd!").unwrap();
        assert_eq!(AccountRecord::from(&account), account.to_record());
    }
}
