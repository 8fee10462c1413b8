//! JSON flat-file persistence for account records.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::Result;
use crate::account::AccountRecord;

/// File name used when no store path is configured.
pub const DEFAULT_STORE_FILE: &str = "usuario.json";

/// Read every record from the store file.
///
/// Returns `Ok(None)` when the file does not exist.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not a JSON array of
/// records with text values.
pub fn read_records(path: &Path) -> Result<Option<Vec<AccountRecord>>> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("No store file at {:?}", path);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let records: Vec<AccountRecord> = serde_json::from_str(&contents)?;
    debug!("Read {} records from {:?}", records.len(), path);
    Ok(Some(records))
}

/// Write all records to the store file, replacing its contents.
///
/// Missing parent directories are created. Output is indented with four
/// spaces and keeps non-ASCII characters as-is. Records go to a temporary
/// file in the same directory which is then renamed over `path`, so a failed
/// write leaves the previous file untouched.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn write_records(path: &Path, records: &[AccountRecord]) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut buf = Vec::new();
    let mut serializer =
        serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    records.serialize(&mut serializer)?;

    let mut file = NamedTempFile::new_in(parent)?;
    file.write_all(&buf)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;

    debug!("Wrote {} records to {:?}", records.len(), path);
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
    use crate::Error;

    fn record(name: &str, email: &str, password: &str) -> AccountRecord {
        AccountRecord {
            name: Some(name.to_string()),
            email: Some(email.to_string()),
            password: Some(password.to_string()),
        }
    }

    #[test]
    fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_records(&dir.path().join("absent.json")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usuario.json");
        let records = vec![
            record("Ana Souza", "ana@gmail.com", "Passw0rd!"),
            record("João Silva", "joao@outlook.com", "S3nha#Forte"),
        ];

        write_records(&path, &records).unwrap();
        let read = read_records(&path).unwrap().unwrap();
        assert_eq!(read, records);
    }

    #[test]
    fn output_is_four_space_indented_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usuario.json");
        write_records(&path, &[record("João Silva", "joao@outlook.com", "S3nha#Forte")])
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("João Silva"));
        assert!(contents.contains("\n        \"Nome\": \"João Silva\""));
    }

    #[test]
    fn creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("usuario.json");
        write_records(&path, &[]).unwrap();
        assert!(path.exists());
        assert_eq!(read_records(&path).unwrap().unwrap(), Vec::new());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usuario.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_records(&path), Err(Error::Serde(_))));
    }

    #[test]
    fn non_text_value_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usuario.json");
        fs::write(&path, r#"[{"Nome": 42, "Email": "a@gmail.com", "Senha": "x"}]"#).unwrap();
        assert!(matches!(read_records(&path), Err(Error::Serde(_))));
    }

    #[test]
    fn overwrite_replaces_previous_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("usuario.json");
        let first = vec![
            record("Ana Souza", "ana@gmail.com", "Passw0rd!"),
            record("João Silva", "joao@outlook.com", "S3nha#Forte"),
        ];
        write_records(&path, &first).unwrap();
        write_records(&path, &first[1..]).unwrap();
        assert_eq!(read_records(&path).unwrap().unwrap(), &first[1..]);
    }

    #[test]
    fn failed_write_keeps_previous_target_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("usuario.json");
        fs::create_dir(&target).unwrap();
        let kept = target.join("keep.txt");
        fs::write(&kept, "old contents").unwrap();

        let records = [record("Ana Souza", "ana@gmail.com", "Passw0rd!")];
        let result = write_records(&target, &records);
        assert!(matches!(result, Err(Error::Io(_))));

        assert_eq!(fs::read_to_string(&kept).unwrap(), "old contents");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn write_into_directory_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            write_records(dir.path(), &[]),
            Err(Error::Io(_))
        ));
    }
}
