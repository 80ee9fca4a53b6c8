//! Domain model for a staff user.

/// A logged-in advisor. Records keep a soft reference to `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub name: String,
}

/// Entry in the credential table
#[derive(Debug, Clone)]
pub struct Credential {
    pub user: User,
    pub password: String,
}

impl Credential {
    pub fn new(id: &str, name: &str, password: &str) -> Self {
        Self {
            user: User {
                id: id.to_string(),
                name: name.to_string(),
            },
            password: password.to_string(),
        }
    }
}
