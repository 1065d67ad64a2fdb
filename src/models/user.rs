// src/models/user.rs

use serde::{Deserialize, Serialize};
use validator::Validate;

/// A login entry in `studentlogin.json` / `teacherlogin.json`.
///
/// Passwords are kept and compared in plaintext; this is a classroom tool,
/// not a hardened auth system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserCredential {
    pub username: String,
    pub password: String,
}

impl UserCredential {
    pub fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// What the admin listing returns. Passwords never leave the server.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub username: String,
}

impl From<UserCredential> for PublicUser {
    fn from(user: UserCredential) -> Self {
        Self {
            username: user.username,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    /// Maps the admin path segment (`students` / `teachers`) to a role.
    pub fn from_collection(segment: &str) -> Option<Self> {
        match segment {
            "students" => Some(Role::Student),
            "teachers" => Some(Role::Teacher),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
        }
    }

    /// Capitalized label for response messages.
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
        }
    }
}

/// DTO for login and for admin create/update of a credential.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 50,
        message = "Username must be between 1 and 50 characters."
    ))]
    pub username: String,
    #[serde(default)]
    #[validate(length(
        min = 1,
        max = 128,
        message = "Password must be between 1 and 128 characters."
    ))]
    pub password: String,
}
