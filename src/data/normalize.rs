//! Record normalizer
//!
//! Maps raw roster records onto [`UserRecord`], dropping disabled accounts.

use serde_json::Value;

use super::{keys, AccountStatus, RawUserRecord, UserRecord};

/// Normalizes raw records, keeping only enabled accounts in input order
pub fn normalize(raw_records: &[RawUserRecord]) -> Vec<UserRecord> {
    raw_records
        .iter()
        .filter(|record| AccountStatus::of(record).is_enabled())
        .map(normalize_record)
        .collect()
}

/// Maps a single raw record, regardless of its status
fn normalize_record(record: &RawUserRecord) -> UserRecord {
    let first = text_field(record, keys::NAME);
    let last = text_field(record, keys::LAST_NAME);

    UserRecord {
        id: text_field(record, keys::ID),
        employee_id: text_field(record, keys::IDENTIFIER),
        name: format!("{} {}", first, last).trim().to_string(),
        group_name: text_field(record, keys::GROUP_DESCRIPTION),
        position_name: text_field(record, keys::POSITION_DESCRIPTION),
    }
}

/// Reads a field as text, defaulting to an empty string
///
/// Numbers and booleans keep their JSON text form; nulls, arrays and objects
/// become empty.
fn text_field(record: &RawUserRecord, key: &str) -> String {
    match record.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}
