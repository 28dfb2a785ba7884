use serde::Deserialize;

/// Exact-match lookup criteria for [`super::UserStore::find_user_by`].
///
/// One field per queryable column; every provided field must match
/// (logical AND). Columns outside this struct simply cannot be queried,
/// which is the point: the old free-form key/value lookup is replaced by
/// an enumerated shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserQuery {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub hashed_password: Option<String>,
    pub session_id: Option<String>,
    pub reset_token: Option<String>,
}

impl UserQuery {
    pub fn by_id(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn by_email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.email.is_none()
            && self.hashed_password.is_none()
            && self.session_id.is_none()
            && self.reset_token.is_none()
    }
}

/// Change-set for [`super::UserStore::update_user`].
///
/// Only the fields listed here can ever be written, so the column
/// whitelist holds at compile time. The nullable columns use a double
/// `Option`: `None` leaves the column alone, `Some(None)` clears it,
/// `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub id: Option<i64>,
    pub email: Option<String>,
    pub hashed_password: Option<String>,
    pub session_id: Option<Option<String>>,
    pub reset_token: Option<Option<String>>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.email.is_none()
            && self.hashed_password.is_none()
            && self.session_id.is_none()
            && self.reset_token.is_none()
    }
}
