use serde::{Deserialize, Serialize};

/// Local account identity. Owns the storage namespace; nothing more.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub username: String,
}

/// Scalar profile fields, stored as raw strings (last write wins).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: String,
    pub age: Option<String>,
    pub height: Option<String>,
    pub weight: Option<String>,
}
