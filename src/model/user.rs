use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
    Student,
}

impl Role {
    /// Admins and teachers edit rosters, groups and marks; families only read.
    pub fn can_manage_school(self) -> bool {
        matches!(self, Role::Admin | Role::Teacher)
    }
}

/// The signed-in account, as serialized into session storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}
