//! # userledger-core
//!
//! Core logic for the `UserLedger` account registry.
//!
//! This crate provides:
//! - Account entity with field validation
//! - Account directory with a single login session
//! - JSON flat-file persistence
//! - Settings resolution

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod account;
pub mod directory;
mod error;
pub mod settings;
pub mod store;

pub use account::{
    Account, AccountRecord, ValidationError, ValidationResult, validate_email, validate_name,
    validate_password,
};
pub use directory::{DEFAULT_STORE_FILE, Directory};
pub use error::{Error, Result};
pub use settings::Settings;
