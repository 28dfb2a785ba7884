use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// User record in the `users` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,                      // assigned by the store on insert
    pub email: String,
    #[serde(skip_serializing)]
    pub hashed_password: String,      // opaque Argon2 blob, not exposed in JSON
    pub session_id: Option<String>,   // active login token, if any
    pub reset_token: Option<String>,  // pending password-reset flow, if any
}
