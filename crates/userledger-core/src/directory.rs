//! Account directory and login session.
//!
//! The directory owns every registered account and tracks at most one
//! logged-in account. All field changes go through the account's validators
//! and apply only to the logged-in account.

use std::path::Path;

use tracing::{debug, info, warn};

use crate::account::{Account, AccountRecord};
use crate::store;
use crate::{Error, Result};

pub use crate::store::DEFAULT_STORE_FILE;

/// Registered accounts plus the current login session.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    /// Accounts in registration order; emails are unique.
    accounts: Vec<Account>,
    /// Index into `accounts` of the logged-in account.
    active: Option<usize>,
}

impl Directory {
    /// Create an empty directory with no session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a directory from existing accounts, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateEmail` if two accounts share an email.
    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Result<Self> {
        let mut directory = Self::new();
        for account in accounts {
            directory.register(account)?;
        }
        Ok(directory)
    }

    /// Create a directory from the store file at `path`.
    ///
    /// A missing file yields an empty directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut directory = Self::new();
        directory.load(path)?;
        Ok(directory)
    }

    /// Registered accounts in registration order.
    #[must_use]
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Number of registered accounts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether no accounts are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Whether an account is logged in.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.active.is_some()
    }

    /// Register a new account. Does not touch the session.
    ///
    /// # Errors
    ///
    /// Returns `Error::DuplicateEmail` if the email is already registered.
    pub fn register(&mut self, account: Account) -> Result<()> {
        if self.accounts.iter().any(|a| a.email() == account.email()) {
            return Err(Error::DuplicateEmail(account.email().to_string()));
        }

        info!("Registered account {}", account.email());
        self.accounts.push(account);
        Ok(())
    }

    /// Log in with an exact email and password match.
    ///
    /// A failed attempt leaves any existing session in place.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyDirectory` if nothing is registered, or
    /// `Error::InvalidCredentials` if no account matches.
    pub fn authenticate(&mut self, email: &str, password: &str) -> Result<&Account> {
        if self.accounts.is_empty() {
            return Err(Error::EmptyDirectory);
        }

        let Some(index) = self
            .accounts
            .iter()
            .position(|a| a.matches_credentials(email, password))
        else {
            warn!("Failed login for {email}");
            return Err(Error::InvalidCredentials);
        };

        self.active = Some(index);
        info!("Logged in as {email}");
        Ok(&self.accounts[index])
    }

    /// End the session. Does nothing when already logged out.
    pub fn logout(&mut self) {
        if self.active.take().is_some() {
            info!("Logged out");
        }
    }

    /// The logged-in account.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoActiveSession` if nobody is logged in.
    pub fn current_account(&self) -> Result<&Account> {
        self.active
            .and_then(|index| self.accounts.get(index))
            .ok_or(Error::NoActiveSession)
    }

    fn current_account_mut(&mut self) -> Result<&mut Account> {
        self.active
            .and_then(|index| self.accounts.get_mut(index))
            .ok_or(Error::NoActiveSession)
    }

    /// Change the logged-in account's name.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoActiveSession` without a session, or
    /// `Error::Validation` if the name is rejected.
    pub fn update_name(&mut self, new_name: impl Into<String>) -> Result<()> {
        let account = self.current_account_mut()?;
        account.set_name(new_name)?;
        info!("Name updated for {}", account.email());
        Ok(())
    }

    /// Change the logged-in account's email.
    ///
    /// The new email is not checked against other registered accounts.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoActiveSession` without a session, or
    /// `Error::Validation` if the email is rejected.
    pub fn update_email(&mut self, new_email: impl Into<String>) -> Result<()> {
        let account = self.current_account_mut()?;
        account.set_email(new_email)?;
        info!("Email updated to {}", account.email());
        Ok(())
    }

    /// Change the logged-in account's password.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoActiveSession` without a session, or
    /// `Error::Validation` if the password is rejected.
    pub fn update_password(&mut self, new_password: impl Into<String>) -> Result<()> {
        let account = self.current_account_mut()?;
        account.set_password(new_password)?;
        info!("Password updated for {}", account.email());
        Ok(())
    }

    /// Remove an account equal to `account`.
    ///
    /// Any session is ended, whichever account was removed.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyDirectory` if nothing is registered, or
    /// `Error::NotFound` if no registered account equals `account`.
    pub fn remove(&mut self, account: &Account) -> Result<Account> {
        if self.accounts.is_empty() {
            return Err(Error::EmptyDirectory);
        }

        let index = self
            .accounts
            .iter()
            .position(|a| a == account)
            .ok_or_else(|| Error::NotFound(account.email().to_string()))?;

        let removed = self.accounts.remove(index);
        self.active = None;
        info!("Removed account {}", removed.email());
        Ok(removed)
    }

    /// Remove the logged-in account and end the session.
    ///
    /// # Errors
    ///
    /// Returns `Error::NoActiveSession` if nobody is logged in.
    pub fn remove_current(&mut self) -> Result<Account> {
        let account = self.current_account()?.clone();
        self.remove(&account)
    }

    /// Write every account to the store file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` or `Error::Serde` if writing fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let records: Vec<_> = self.accounts.iter().map(AccountRecord::from).collect();
        store::write_records(path, &records)?;
        info!("Saved {} accounts to {:?}", records.len(), path);
        Ok(())
    }

    /// Replace all accounts with those in the store file at `path`.
    ///
    /// A missing file empties the directory. The session is always ended.
    /// On error the directory is left unchanged. Records sharing an email are
    /// kept as-is; `authenticate` picks the first match.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` or `Error::Serde` if the file cannot be read,
    /// and `Error::MissingField` or `Error::Validation` for a bad record.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let Some(records) = store::read_records(path)? else {
            debug!("Store file {:?} not found, starting empty", path);
            self.accounts.clear();
            self.active = None;
            return Ok(());
        };

        let accounts = records
            .into_iter()
            .map(Account::from_record)
            .collect::<Result<Vec<_>>>()?;

        self.accounts = accounts;
        self.active = None;
        info!("Loaded {} accounts from {:?}", self.accounts.len(), path);
        Ok(())
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

    fn ana() -> Account {
        Account::new("Ana Souza", "ana@gmail.com", "Passw0rd!").unwrap()
    }

    fn joao() -> Account {
        Account::new("Joao Silva", "joao@outlook.com", "S3nha#Forte").unwrap()
    }

    fn logged_in_as_ana() -> Directory {
        let mut directory = Directory::with_accounts([ana(), joao()]).unwrap();
        directory.authenticate("ana@gmail.com", "Passw0rd!").unwrap();
        directory
    }

    mod register_tests {
        use super::*;

        #[test]
        fn appends_in_order() {
            let mut directory = Directory::new();
            directory.register(ana()).unwrap();
            directory.register(joao()).unwrap();
            let emails: Vec<_> = directory.accounts().iter().map(Account::email).collect();
            assert_eq!(emails, ["ana@gmail.com", "joao@outlook.com"]);
        }

        #[test]
        fn rejects_duplicate_email() {
            let mut directory = Directory::new();
            directory.register(ana()).unwrap();
            let twin = Account::new("Ana Lima", "ana@gmail.com", "0ther!Pass").unwrap();
            let err = directory.register(twin).unwrap_err();
            assert!(matches!(err, Error::DuplicateEmail(ref e) if e == "ana@gmail.com"));
            assert_eq!(directory.len(), 1);
        }

        #[test]
        fn does_not_log_in() {
            let mut directory = Directory::new();
            directory.register(ana()).unwrap();
            assert!(!directory.is_logged_in());
        }

        #[test]
        fn with_accounts_rejects_duplicates() {
            let result = Directory::with_accounts([ana(), ana()]);
            assert!(matches!(result, Err(Error::DuplicateEmail(_))));
        }
    }

    mod session_tests {
        use super::*;

        #[test]
        fn authenticate_sets_session() {
            let mut directory = Directory::with_accounts([ana(), joao()]).unwrap();
            let account = directory.authenticate("joao@outlook.com", "S3nha#Forte").unwrap();
            assert_eq!(account.name(), "Joao Silva");
            assert_eq!(directory.current_account().unwrap(), &joao());
        }

        #[test]
        fn authenticate_on_empty_directory() {
            let mut directory = Directory::new();
            let err = directory.authenticate("ana@gmail.com", "Passw0rd!").unwrap_err();
            assert!(matches!(err, Error::EmptyDirectory));
        }

        #[test]
        fn authenticate_with_wrong_password() {
            let mut directory = Directory::with_accounts([ana()]).unwrap();
            let err = directory.authenticate("ana@gmail.com", "wrong").unwrap_err();
            assert!(matches!(err, Error::InvalidCredentials));
            assert!(!directory.is_logged_in());
        }

        #[test]
        fn failed_login_keeps_existing_session() {
            let mut directory = logged_in_as_ana();
            assert!(directory.authenticate("joao@outlook.com", "nope").is_err());
            assert_eq!(directory.current_account().unwrap().email(), "ana@gmail.com");
        }

        #[test]
        fn logout_is_idempotent() {
            let mut directory = logged_in_as_ana();
            directory.logout();
            directory.logout();
            assert!(matches!(
                directory.current_account(),
                Err(Error::NoActiveSession)
            ));
        }

        #[test]
        fn current_account_without_login() {
            let directory = Directory::with_accounts([ana()]).unwrap();
            assert!(matches!(
                directory.current_account(),
                Err(Error::NoActiveSession)
            ));
        }
    }

    mod update_tests {
        use super::*;

        #[test]
        fn updates_require_session() {
            let mut directory = Directory::with_accounts([ana()]).unwrap();
            assert!(matches!(
                directory.update_name("Ana Lima"),
                Err(Error::NoActiveSession)
            ));
            assert!(matches!(
                directory.update_email("ana.lima@gmail.com"),
                Err(Error::NoActiveSession)
            ));
            assert!(matches!(
                directory.update_password("N3w-Secret"),
                Err(Error::NoActiveSession)
            ));
            assert_eq!(directory.accounts()[0], ana());
        }

        #[test]
        fn update_name_applies_to_active_account() {
            let mut directory = logged_in_as_ana();
            directory.update_name("Ana Lima").unwrap();
            assert_eq!(directory.current_account().unwrap().name(), "Ana Lima");
            assert_eq!(directory.accounts()[0].name(), "Ana Lima");
            assert_eq!(directory.accounts()[1], joao());
        }

        #[test]
        fn rejected_update_changes_nothing() {
            let mut directory = logged_in_as_ana();
            let err = directory.update_name("Ana").unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::NameMissingSurname)
            ));
            let err = directory.update_password("short1!").unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::PasswordTooShort)
            ));
            assert_eq!(directory.current_account().unwrap(), &ana());
        }

        #[test]
        fn update_password_changes_credentials() {
            let mut directory = logged_in_as_ana();
            directory.update_password("N3w-Secret").unwrap();
            directory.logout();
            assert!(directory.authenticate("ana@gmail.com", "Passw0rd!").is_err());
            assert!(directory.authenticate("ana@gmail.com", "N3w-Secret").is_ok());
        }

        #[test]
        fn update_email_skips_uniqueness_check() {
            let mut directory = logged_in_as_ana();
            directory.update_email("joao@outlook.com").unwrap();
            let emails: Vec<_> = directory.accounts().iter().map(Account::email).collect();
            assert_eq!(emails, ["joao@outlook.com", "joao@outlook.com"]);
        }
    }

    mod remove_tests {
        use super::*;

        #[test]
        fn remove_active_clears_session() {
            let mut directory = logged_in_as_ana();
            let removed = directory.remove(&ana()).unwrap();
            assert_eq!(removed, ana());
            assert_eq!(directory.len(), 1);
            assert!(matches!(
                directory.current_account(),
                Err(Error::NoActiveSession)
            ));
        }

        #[test]
        fn remove_other_account_also_clears_session() {
            let mut directory = logged_in_as_ana();
            directory.remove(&joao()).unwrap();
            assert!(!directory.is_logged_in());
            assert_eq!(directory.accounts(), [ana()]);
        }

        #[test]
        fn remove_from_empty_directory() {
            let mut directory = Directory::new();
            assert!(matches!(
                directory.remove(&ana()),
                Err(Error::EmptyDirectory)
            ));
        }

        #[test]
        fn remove_unknown_account() {
            let mut directory = logged_in_as_ana();
            let stranger = Account::new("Rui Costa", "rui@hotmail.com", "Passw0rd!").unwrap();
            assert!(matches!(
                directory.remove(&stranger),
                Err(Error::NotFound(ref e)) if e == "rui@hotmail.com"
            ));
            assert_eq!(directory.len(), 2);
            assert!(directory.is_logged_in());
        }

        #[test]
        fn remove_matches_all_fields() {
            let mut directory = Directory::with_accounts([ana()]).unwrap();
            let same_email = Account::new("Ana Lima", "ana@gmail.com", "Passw0rd!").unwrap();
            assert!(matches!(
                directory.remove(&same_email),
                Err(Error::NotFound(_))
            ));
        }

        #[test]
        fn remove_current_account() {
            let mut directory = logged_in_as_ana();
            let removed = directory.remove_current().unwrap();
            assert_eq!(removed.email(), "ana@gmail.com");
            assert_eq!(directory.accounts(), [joao()]);
            assert!(!directory.is_logged_in());
        }

        #[test]
        fn remove_current_without_session() {
            let mut directory = Directory::with_accounts([ana()]).unwrap();
            assert!(matches!(
                directory.remove_current(),
                Err(Error::NoActiveSession)
            ));
            assert_eq!(directory.len(), 1);
        }
    }
}
