//! Account entity module.
//!
//! Provides the account value type, its field validators, and the plain
//! record form used for persistence.

mod model;
mod record;
mod validation;

pub use model::Account;
pub use record::{AccountRecord, EMAIL_KEY, NAME_KEY, PASSWORD_KEY};
pub use validation::{
    ALLOWED_EMAIL_DOMAINS, ValidationError, ValidationResult, validate_email, validate_name,
    validate_password,
};
