use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminRole {
    Superadmin,
    Technician,
}

impl fmt::Display for AdminRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Superadmin => f.write_str("superadmin"),
            Self::Technician => f.write_str("technician"),
        }
    }
}

/// An administrator account
///
/// Passwords are stored and compared as plaintext. The login check is a
/// convenience gate for the admin views, not a security boundary.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Admin {
    pub username: String,
    pub password: String,
    pub name: String,
    pub role: AdminRole,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl Admin {
    #[must_use]
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        name: impl Into<String>,
        role: AdminRole,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            name: name.into(),
            role,
            last_login: None,
        }
    }

    #[must_use]
    pub fn credentials_match(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }

    /// The seed accounts every fresh document starts with
    #[must_use]
    pub fn seed(now: DateTime<Utc>) -> Vec<Self> {
        let mut admin = Self::new("admin", "admin123", "System Administrator", AdminRole::Superadmin);
        admin.last_login = Some(now);
        vec![
            admin,
            Self::new("tech", "tech123", "Technical Support", AdminRole::Technician),
        ]
    }
}

impl fmt::Debug for Admin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Admin")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("last_login", &self.last_login)
            .finish()
    }
}
