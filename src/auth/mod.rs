mod guard;
mod password;
mod service;

pub use guard::{authorization_header, current_user, require_auth, HeaderSource};
pub use password::{hash_password, verify_password};
pub use service::{register_user, valid_login};
