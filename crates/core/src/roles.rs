//! The three account roles and their wire/database representation.
//!
//! Roles are stored as TEXT in the `users.role` column and carried as a
//! string claim in JWTs, but all in-process comparisons go through this
//! enum rather than raw strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Account role. Determines which endpoints a caller may invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "STORE_OWNER")]
    StoreOwner,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl Role {
    /// The database/wire spelling of this role.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::StoreOwner => "STORE_OWNER",
            Role::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(Role::User),
            "STORE_OWNER" => Ok(Role::StoreOwner),
            "ADMIN" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}
