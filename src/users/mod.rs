mod dto;
mod repo;
mod repo_types;

pub use dto::{UserQuery, UserUpdate};
pub use repo::UserStore;
pub use repo_types::User;
