use serde::{Deserialize, Serialize};

use crate::entity::user::Role;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NewUser {
    /// Business key chosen by the caller.
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
}
