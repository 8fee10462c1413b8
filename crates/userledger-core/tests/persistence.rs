//! Integration tests for saving and loading a directory.

#![allow(clippy::unwrap_used)]

use std::fs;

use userledger_core::{Account, Directory, Error, ValidationError};

fn sample_directory() -> Directory {
    Directory::with_accounts([
        Account::new("Ana Souza", "ana@gmail.com", "Passw0rd!").unwrap(),
        Account::new("João Silva", "joao@outlook.com", "S3nha#Forte").unwrap(),
        Account::new("Rui Costa", "rui@hotmail.com", "Rui_2024ok").unwrap(),
    ])
    .unwrap()
}

#[test]
fn save_then_load_preserves_accounts_and_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usuario.json");

    let original = sample_directory();
    original.save(&path).unwrap();

    let mut restored = Directory::new();
    restored.load(&path).unwrap();
    assert_eq!(restored.accounts(), original.accounts());
}

#[test]
fn open_missing_file_gives_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    let directory = Directory::open(dir.path().join("usuario.json")).unwrap();
    assert!(directory.is_empty());
    assert!(!directory.is_logged_in());
}

#[test]
fn load_missing_file_clears_existing_accounts() {
    let dir = tempfile::tempdir().unwrap();
    let mut directory = sample_directory();
    directory.load(dir.path().join("usuario.json")).unwrap();
    assert!(directory.is_empty());
}

#[test]
fn load_ends_session() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usuario.json");
    let mut directory = sample_directory();
    directory.save(&path).unwrap();

    directory.authenticate("ana@gmail.com", "Passw0rd!").unwrap();
    directory.load(&path).unwrap();
    assert!(matches!(
        directory.current_account(),
        Err(Error::NoActiveSession)
    ));
    assert_eq!(directory.len(), 3);
}

#[test]
fn reads_file_written_by_earlier_versions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usuario.json");
    fs::write(
        &path,
        r#"[
    {
        "Nome": "Maria Oliveira",
        "Email": "maria@gmail.com",
        "Senha": "M4ria@2023"
    }
]"#,
    )
    .unwrap();

    let mut directory = Directory::open(&path).unwrap();
    let account = directory.authenticate("maria@gmail.com", "M4ria@2023").unwrap();
    assert_eq!(account.name(), "Maria Oliveira");
}

#[test]
fn save_writes_persisted_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usuario.json");
    sample_directory().save(&path).unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
    let first = &value[0];
    assert_eq!(first["Nome"], "Ana Souza");
    assert_eq!(first["Email"], "ana@gmail.com");
    assert_eq!(first["Senha"], "Passw0rd!");
    assert_eq!(value.as_array().unwrap().len(), 3);
}

#[test]
fn record_missing_key_fails_and_keeps_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usuario.json");
    fs::write(&path, r#"[{"Nome": "Ana Souza", "Senha": "Passw0rd!"}]"#).unwrap();

    let mut directory = sample_directory();
    let err = directory.load(&path).unwrap_err();
    assert!(matches!(err, Error::MissingField("Email")));
    assert_eq!(directory.len(), 3);
}

#[test]
fn invalid_record_fails_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usuario.json");
    fs::write(
        &path,
        r#"[{"Nome": "Ana", "Email": "ana@gmail.com", "Senha": "Passw0rd!"}]"#,
    )
    .unwrap();

    let err = Directory::open(&path).unwrap_err();
    assert!(matches!(
        err,
        Error::Validation(ValidationError::NameMissingSurname)
    ));
}

#[test]
fn duplicate_emails_in_file_load_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usuario.json");
    fs::write(
        &path,
        r#"[
            {"Nome": "Ana Souza", "Email": "ana@gmail.com", "Senha": "Passw0rd!"},
            {"Nome": "Ana Lima", "Email": "ana@gmail.com", "Senha": "0ther!Pass"}
        ]"#,
    )
    .unwrap();

    let mut directory = Directory::open(&path).unwrap();
    assert_eq!(directory.len(), 2);
    let account = directory.authenticate("ana@gmail.com", "0ther!Pass").unwrap();
    assert_eq!(account.name(), "Ana Lima");
}

#[test]
fn email_changed_to_taken_address_still_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usuario.json");

    let mut directory = sample_directory();
    directory.authenticate("ana@gmail.com", "Passw0rd!").unwrap();
    directory.update_email("joao@outlook.com").unwrap();
    directory.save(&path).unwrap();

    let mut reopened = Directory::open(&path).unwrap();
    assert_eq!(reopened.accounts(), directory.accounts());
    assert!(!reopened.is_logged_in());

    let account = reopened.authenticate("joao@outlook.com", "Passw0rd!").unwrap();
    assert_eq!(account.name(), "Ana Souza");
    let account = reopened
        .authenticate("joao@outlook.com", "S3nha#Forte")
        .unwrap();
    assert_eq!(account.name(), "João Silva");
}

#[test]
fn save_to_unwritable_path_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = sample_directory().save(dir.path()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn full_session_lifecycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usuario.json");

    let mut directory = Directory::open(&path).unwrap();
    directory
        .register(Account::new("Ana Souza", "x@gmail.com", "Passw0rd!").unwrap())
        .unwrap();

    let account = directory.authenticate("x@gmail.com", "Passw0rd!").unwrap();
    assert_eq!(account.name(), "Ana Souza");

    directory.update_name("Ana Lima").unwrap();
    directory.update_email("ana.lima@hotmail.com").unwrap();
    directory.update_password("N3w!Secret").unwrap();
    directory.save(&path).unwrap();

    let mut reopened = Directory::open(&path).unwrap();
    let account = reopened
        .authenticate("ana.lima@hotmail.com", "N3w!Secret")
        .unwrap();
    assert_eq!(account.name(), "Ana Lima");

    reopened.remove_current().unwrap();
    assert!(reopened.is_empty());
    assert!(matches!(
        reopened.current_account(),
        Err(Error::NoActiveSession)
    ));
}
