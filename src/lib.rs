//! Minimal user-authentication core.
//!
//! This crate implements:
//! - Argon2 password hashing and verification
//! - a SQLite-backed user store (add / find / update, whitelisted fields)
//! - path-exclusion checks for deciding whether a request needs auth
//! - registration and login validation on top of the store
//!
//! The surrounding HTTP layer (routing, status codes, token issuance) is
//! deliberately not here; embed this crate and translate its errors at the
//! transport boundary.

pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod users;

pub use auth::{
    authorization_header, current_user, hash_password, register_user, require_auth, valid_login,
    verify_password, HeaderSource,
};
pub use config::AppConfig;
pub use errors::{AuthError, StoreError};
pub use users::{User, UserQuery, UserStore, UserUpdate};
