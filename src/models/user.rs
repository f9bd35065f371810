//! User record types as exchanged with the remote directory.

use serde::{Deserialize, Serialize};

/// Company a user belongs to. Only the name is tracked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
}

/// A single user entry in the directory.
///
/// Remote payloads carry extra fields (address, phone, website, ...); they
/// are ignored on decode and never serialized back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    /// Client-assigned identifier, unique within the local list.
    pub id: i64,
    pub name: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub company: Company,
}

/// Summary statistics for a listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub companies: usize,
}

impl Summary {
    /// Compute summary from a list of records.
    pub fn from_records(records: &[UserRecord]) -> Self {
        let mut companies: Vec<&str> = records
            .iter()
            .map(|r| r.company.name.as_str())
            .filter(|name| !name.is_empty())
            .collect();
        companies.sort_unstable();
        companies.dedup();
        Self {
            total: records.len(),
            companies: companies.len(),
        }
    }
}

/// Id for the next record created locally: one past the current maximum.
///
/// The maximum starts at `0`, so an empty list or one holding only
/// negative ids yields `1`. Returns `None` when the maximum is `i64::MAX`.
pub fn next_id(records: &[UserRecord]) -> Option<i64> {
    records.iter().map(|r| r.id).fold(0, i64::max).checked_add(1)
}
