//! User entity - represents a platform account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Account role, used for authorization decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Client,
}

impl UserRole {
    /// Check if this role grants administrative access
    #[inline]
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Stable string form, matching the database enum
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Client => "client",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "client" => Ok(Self::Client),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User entity representing a registered account
///
/// The password hash never lives on this struct; repositories expose it
/// through a dedicated accessor so it cannot leak into responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub age: Option<i32>,
    pub is_employed: bool,
    pub whatsapp_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Full display name
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Check if this account has the admin role
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}
