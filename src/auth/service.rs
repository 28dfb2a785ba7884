use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::errors::{AuthError, StoreError};
use crate::users::{User, UserQuery, UserStore};

/// Register a new account with a freshly hashed password.
///
/// The email must not already be registered. Empty inputs are rejected by
/// the store before anything is persisted.
pub async fn register_user(
    store: &UserStore,
    email: &str,
    password: &str,
) -> Result<User, AuthError> {
    match store.find_user_by(&UserQuery::by_email(email)).await {
        Err(StoreError::NotFound) => {}
        Ok(_) | Err(StoreError::MultipleMatches) => {
            warn!(%email, "email already registered");
            return Err(AuthError::EmailTaken(email.to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    let hashed = hash_password(password)?;
    let user = store.add_user(email, &hashed).await?;
    info!(user_id = user.id, email = %user.email, "user registered");
    Ok(user)
}

/// Whether `password` matches the stored credentials for `email`.
///
/// Unknown emails and wrong passwords both come back as `Ok(false)`;
/// only store or hashing failures are errors.
pub async fn valid_login(
    store: &UserStore,
    email: &str,
    password: &str,
) -> Result<bool, AuthError> {
    let user = match store.find_user_by(&UserQuery::by_email(email)).await {
        Ok(user) => user,
        Err(StoreError::NotFound) => {
            warn!(%email, "login with unknown email");
            return Ok(false);
        }
        Err(e) => return Err(e.into()),
    };

    let ok = verify_password(password, &user.hashed_password)?;
    if !ok {
        warn!(user_id = user.id, %email, "login with wrong password");
    }
    Ok(ok)
}
