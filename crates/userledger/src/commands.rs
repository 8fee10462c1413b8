//! Runs one command against the account store.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;
use userledger_core::{Account, Directory};

use crate::cli::Command;

/// Load the store, run `command`, and write the store back if it changed.
///
/// Returns the lines to print on success.
pub fn execute(command: Command, store_path: &Path) -> Result<Vec<String>> {
    let mut directory = Directory::open(store_path)
        .with_context(|| format!("Failed to load accounts from {}", store_path.display()))?;

    if let Some(login) = command.login() {
        directory
            .authenticate(&login.email, &login.password)
            .context("Login failed")?;
    }

    let save = command.modifies_store();
    let output = apply(&mut directory, command)?;

    if save {
        directory
            .save(store_path)
            .with_context(|| format!("Failed to save accounts to {}", store_path.display()))?;
        debug!("Store written to {}", store_path.display());
    }

    Ok(output)
}

fn apply(directory: &mut Directory, command: Command) -> Result<Vec<String>> {
    let output = match command {
        Command::Register {
            name,
            email,
            password,
        } => {
            let account = Account::new(name, email, password).context("Invalid account")?;
            let line = format!("Account created for {}", account.name());
            directory.register(account)?;
            vec![line]
        }
        Command::List => {
            if directory.is_empty() {
                vec!["No accounts registered".to_string()]
            } else {
                directory
                    .accounts()
                    .iter()
                    .map(|a| format!("{} <{}>", a.name(), a.email()))
                    .collect()
            }
        }
        Command::Show { .. } => describe(directory.current_account()?),
        Command::Rename { new_name, .. } => {
            directory.update_name(new_name)?;
            vec![format!("Name updated to {}", directory.current_account()?.name())]
        }
        Command::ChangeEmail { new_email, .. } => {
            directory.update_email(new_email)?;
            vec![format!("Email updated to {}", directory.current_account()?.email())]
        }
        Command::ChangePassword { new_password, .. } => {
            directory.update_password(new_password)?;
            vec!["Password updated".to_string()]
        }
        Command::Remove { .. } => {
            let removed = directory.remove_current()?;
            vec![format!("Account {} removed", removed.email())]
        }
    };
    Ok(output)
}

fn describe(account: &Account) -> Vec<String> {
    vec![
        format!("Name: {}", account.name()),
        format!("Email: {}", account.email()),
        format!("Password: {}", account.password()),
    ]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cli::Login;

    fn login() -> Login {
        Login {
            email: "ana@gmail.com".to_string(),
            password: "Passw0rd!".to_string(),
        }
    }

    fn register(path: &Path) {
        execute(
            Command::Register {
                name: "Ana Souza".to_string(),
                email: "ana@gmail.com".to_string(),
                password: "Passw0rd!".to_string(),
            },
            path,
        )
        .unwrap();
    }

    #[test]
    fn register_then_list() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usuario.json");
        register(&path);

        let lines = execute(Command::List, &path).unwrap();
        assert_eq!(lines, ["Ana Souza <ana@gmail.com>"]);
    }

    #[test]
    fn list_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let lines = execute(Command::List, &dir.path().join("usuario.json")).unwrap();
        assert_eq!(lines, ["No accounts registered"]);
    }

    #[test]
    fn show_requires_valid_login() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usuario.json");
        register(&path);

        let bad = Login {
            password: "wrong".to_string(),
            ..login()
        };
        assert!(execute(Command::Show { login: bad }, &path).is_err());

        let lines = execute(Command::Show { login: login() }, &path).unwrap();
        assert_eq!(lines[0], "Name: Ana Souza");
    }

    #[test]
    fn rename_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usuario.json");
        register(&path);

        execute(
            Command::Rename {
                login: login(),
                new_name: "Ana Lima".to_string(),
            },
            &path,
        )
        .unwrap();

        let directory = Directory::open(&path).unwrap();
        assert_eq!(directory.accounts()[0].name(), "Ana Lima");
    }

    #[test]
    fn rejected_update_leaves_store_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usuario.json");
        register(&path);

        let result = execute(
            Command::ChangePassword {
                login: login(),
                new_password: "weak".to_string(),
            },
            &path,
        );
        assert!(result.is_err());

        let directory = Directory::open(&path).unwrap();
        assert_eq!(directory.accounts()[0].password(), "Passw0rd!");
    }

    #[test]
    fn remove_deletes_account() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usuario.json");
        register(&path);

        execute(Command::Remove { login: login() }, &path).unwrap();
        assert!(Directory::open(&path).unwrap().is_empty());
    }
}
