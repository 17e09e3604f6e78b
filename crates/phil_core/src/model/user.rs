//! Local user account record.

use serde::{Deserialize, Serialize};

/// Registered user stored in the `phil_users` and `phil_current_user` blobs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub avatar: String,
    /// Absent for federated (mock Google) accounts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}
