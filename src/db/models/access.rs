use serde::{Deserialize, Serialize};

/// Caller's permission level on a repository. Stored as an integer in the
/// `access` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessMode {
    None = 0,
    Read = 1,
    Write = 2,
    Admin = 3,
    Owner = 4,
}

impl AccessMode {
    pub fn from_i32(value: i32) -> Self {
        match value {
            1 => AccessMode::Read,
            2 => AccessMode::Write,
            3 => AccessMode::Admin,
            v if v >= 4 => AccessMode::Owner,
            _ => AccessMode::None,
        }
    }

    pub fn can_read(self) -> bool {
        self >= AccessMode::Read
    }

    pub fn is_writer(self) -> bool {
        self >= AccessMode::Write
    }
}
