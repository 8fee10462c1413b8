//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Manage registered accounts stored in a JSON file.
#[derive(Debug, Parser)]
#[command(name = "userledger", version, about)]
pub struct Cli {
    /// Account store file (overrides `USERLEDGER_STORE` and the settings file).
    #[arg(long, global = true, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Settings file to read instead of the default location.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Keep the store in the per-user data directory.
    #[arg(long, global = true, conflicts_with = "file")]
    pub user_data: bool,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Operation to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Email and password used to open a session.
#[derive(Debug, Clone, Args)]
pub struct Login {
    /// Account email.
    #[arg(long)]
    pub email: String,

    /// Account password.
    #[arg(long)]
    pub password: String,
}

/// Supported operations.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a new account.
    Register {
        /// First and last name.
        #[arg(long)]
        name: String,
        /// Email address.
        #[arg(long)]
        email: String,
        /// Password.
        #[arg(long)]
        password: String,
    },
    /// List registered accounts.
    List,
    /// Log in and show the account's details.
    Show {
        #[command(flatten)]
        login: Login,
    },
    /// Log in and change the account's name.
    Rename {
        #[command(flatten)]
        login: Login,
        /// New first and last name.
        #[arg(long)]
        new_name: String,
    },
    /// Log in and change the account's email.
    ChangeEmail {
        #[command(flatten)]
        login: Login,
        /// New email address.
        #[arg(long)]
        new_email: String,
    },
    /// Log in and change the account's password.
    ChangePassword {
        #[command(flatten)]
        login: Login,
        /// New password.
        #[arg(long)]
        new_password: String,
    },
    /// Log in and delete the account.
    Remove {
        #[command(flatten)]
        login: Login,
    },
}

impl Command {
    /// Login needed before running, if any.
    #[must_use]
    pub const fn login(&self) -> Option<&Login> {
        match self {
            Self::Register { .. } | Self::List => None,
            Self::Show { login }
            | Self::Rename { login, .. }
            | Self::ChangeEmail { login, .. }
            | Self::ChangePassword { login, .. }
            | Self::Remove { login } => Some(login),
        }
    }

    /// Whether the store must be written back afterwards.
    #[must_use]
    pub const fn modifies_store(&self) -> bool {
        !matches!(self, Self::List | Self::Show { .. })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_register() {
        let cli = Cli::try_parse_from([
            "userledger",
            "register",
            "--name",
            "Ana Souza",
            "--email",
            "ana@gmail.com",
            "--password",
            "Passw0rd!",
        ])
        .unwrap();

        match cli.command {
            Command::Register {
                name,
                email,
                password,
            } => {
                assert_eq!(name, "Ana Souza");
                assert_eq!(email, "ana@gmail.com");
                assert_eq!(password, "Passw0rd!");
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert!(cli.file.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["userledger", "list", "--file", "accounts.json", "-v"]).unwrap();
        assert_eq!(cli.file, Some(PathBuf::from("accounts.json")));
        assert!(cli.verbose);
        assert!(cli.command.login().is_none());
        assert!(!cli.command.modifies_store());
    }

    #[test]
    fn change_email_needs_login() {
        let cli = Cli::try_parse_from([
            "userledger",
            "change-email",
            "--email",
            "ana@gmail.com",
            "--password",
            "Passw0rd!",
            "--new-email",
            "ana@outlook.com",
        ])
        .unwrap();

        let login = cli.command.login().unwrap();
        assert_eq!(login.email, "ana@gmail.com");
        assert!(cli.command.modifies_store());
    }

    #[test]
    fn show_does_not_modify_store() {
        let cli = Cli::try_parse_from([
            "userledger",
            "show",
            "--email",
            "ana@gmail.com",
            "--password",
            "Passw0rd!",
        ])
        .unwrap();
        assert!(!cli.command.modifies_store());
    }

    #[test]
    fn missing_password_is_rejected() {
        let result = Cli::try_parse_from(["userledger", "remove", "--email", "ana@gmail.com"]);
        assert!(result.is_err());
    }

    #[test]
    fn file_conflicts_with_user_data() {
        let result =
            Cli::try_parse_from(["userledger", "list", "--file", "a.json", "--user-data"]);
        assert!(result.is_err());
    }
}
