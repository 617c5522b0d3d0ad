//! Core data models for the roster fetcher
//!
//! This module contains the record types exchanged with the GeoVictoria API
//! and the reduced user shape written to the output artifact.

pub mod credentials;
pub mod normalize;
pub mod roster;

pub use credentials::CredentialSource;
pub use normalize::normalize;
pub use roster::{FetchError, RosterClient, RosterSource};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A user record exactly as returned by the roster endpoint
///
/// The API returns a loosely typed object per account. Only a handful of keys
/// are consulted; everything else is carried along untouched.
pub type RawUserRecord = Map<String, Value>;

/// Keys consulted on each raw record
pub mod keys {
    pub const ID: &str = "Id";
    pub const IDENTIFIER: &str = "Identifier";
    pub const NAME: &str = "Name";
    pub const LAST_NAME: &str = "LastName";
    pub const GROUP_DESCRIPTION: &str = "GroupDescription";
    pub const POSITION_DESCRIPTION: &str = "PositionDescription";
    pub const ENABLED: &str = "Enabled";
}

/// Normalized user record written to the output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Internal account identifier (`Id`)
    pub id: String,
    /// Employee identifier, usually a national ID (`Identifier`)
    pub employee_id: String,
    /// First and last name joined by a single space
    pub name: String,
    /// Group the user belongs to (`GroupDescription`)
    pub group_name: String,
    /// Position held by the user (`PositionDescription`)
    pub position_name: String,
}

impl UserRecord {
    /// Field names as they appear in the serialized output
    pub const FIELD_NAMES: [&'static str; 5] =
        ["id", "employee_id", "name", "group_name", "position_name"];
}

/// Whether an account is active
///
/// The API encodes this as the string `"1"` in the `Enabled` field. Any other
/// value, including the number `1`, `"true"` or a missing key, means disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountStatus {
    Enabled,
    Disabled,
}

impl AccountStatus {
    /// Parses the raw `Enabled` value
    pub fn from_raw(value: Option<&Value>) -> Self {
        match value {
            Some(Value::String(s)) if s == "1" => AccountStatus::Enabled,
            _ => AccountStatus::Disabled,
        }
    }

    /// Reads the status of a raw record
    pub fn of(record: &RawUserRecord) -> Self {
        Self::from_raw(record.get(keys::ENABLED))
    }

    pub fn is_enabled(self) -> bool {
        self == AccountStatus::Enabled
    }
}
