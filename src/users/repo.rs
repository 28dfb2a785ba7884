use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::errors::StoreError;
use crate::users::dto::{UserQuery, UserUpdate};
use crate::users::repo_types::User;

/// SQLite-backed store for [`User`] records.
///
/// Holds the pool it was constructed with; every mutating call runs inside
/// its own transaction and either commits or rolls back before returning.
#[derive(Clone)]
pub struct UserStore {
    db: SqlitePool,
}

impl UserStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Insert a new user and return the stored record with its fresh id.
    pub async fn add_user(&self, email: &str, hashed_password: &str) -> Result<User, StoreError> {
        if email.is_empty() || hashed_password.is_empty() {
            return Err(StoreError::Validation(
                "email and hashed_password must be provided".into(),
            ));
        }

        // An uncommitted transaction rolls back when dropped, so every
        // early return below leaves the table untouched.
        let mut tx = self.db.begin().await?;
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, hashed_password)
            VALUES (?, ?)
            RETURNING id, email, hashed_password, session_id, reset_token
            "#,
        )
        .bind(email)
        .bind(hashed_password)
        .fetch_one(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(user)
    }

    /// Find the single user matching every provided criterion.
    pub async fn find_user_by(&self, query: &UserQuery) -> Result<User, StoreError> {
        if query.is_empty() {
            return Err(StoreError::InvalidQuery(
                "no search criteria provided".into(),
            ));
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT id, email, hashed_password, session_id, reset_token FROM users WHERE ",
        );
        {
            let mut sep = qb.separated(" AND ");
            if let Some(id) = query.id {
                sep.push("id = ");
                sep.push_bind_unseparated(id);
            }
            if let Some(email) = &query.email {
                sep.push("email = ");
                sep.push_bind_unseparated(email.clone());
            }
            if let Some(hash) = &query.hashed_password {
                sep.push("hashed_password = ");
                sep.push_bind_unseparated(hash.clone());
            }
            if let Some(session_id) = &query.session_id {
                sep.push("session_id = ");
                sep.push_bind_unseparated(session_id.clone());
            }
            if let Some(reset_token) = &query.reset_token {
                sep.push("reset_token = ");
                sep.push_bind_unseparated(reset_token.clone());
            }
        }
        // Two rows are enough to tell "unique" from "ambiguous".
        qb.push(" LIMIT 2");

        let mut rows: Vec<User> = qb.build_query_as().fetch_all(&self.db).await?;
        if rows.len() > 1 {
            return Err(StoreError::MultipleMatches);
        }
        rows.pop().ok_or(StoreError::NotFound)
    }

    /// Apply the provided field assignments to the user with `user_id`.
    pub async fn update_user(&self, user_id: i64, changes: &UserUpdate) -> Result<(), StoreError> {
        if changes.is_empty() {
            return Err(StoreError::Validation("no fields to update".into()));
        }

        let mut tx = self.db.begin().await?;
        let existing = sqlx::query_as::<_, User>(
            "SELECT id, email, hashed_password, session_id, reset_token FROM users WHERE id = ?",
        )
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await?;
        if existing.is_none() {
            return Err(StoreError::NotFound);
        }

        let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE users SET ");
        {
            let mut sep = qb.separated(", ");
            if let Some(id) = changes.id {
                sep.push("id = ");
                sep.push_bind_unseparated(id);
            }
            if let Some(email) = &changes.email {
                sep.push("email = ");
                sep.push_bind_unseparated(email.clone());
            }
            if let Some(hash) = &changes.hashed_password {
                sep.push("hashed_password = ");
                sep.push_bind_unseparated(hash.clone());
            }
            if let Some(session_id) = &changes.session_id {
                sep.push("session_id = ");
                sep.push_bind_unseparated(session_id.clone());
            }
            if let Some(reset_token) = &changes.reset_token {
                sep.push("reset_token = ");
                sep.push_bind_unseparated(reset_token.clone());
            }
        }
        qb.push(" WHERE id = ");
        qb.push_bind(user_id);

        qb.build().execute(&mut *tx).await?;
        tx.commit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    async fn test_store() -> UserStore {
        let pool = db::in_memory().await.expect("in-memory db");
        UserStore::new(pool)
    }

    #[tokio::test]
    async fn add_then_find_by_email() {
        let store = test_store().await;
        let added = store.add_user("a@x.com", "h1").await.expect("add");
        assert!(added.id > 0);
        assert_eq!(added.email, "a@x.com");
        assert_eq!(added.hashed_password, "h1");
        assert!(added.session_id.is_none());
        assert!(added.reset_token.is_none());

        let found = store
            .find_user_by(&UserQuery::by_email("a@x.com"))
            .await
            .expect("find");
        assert_eq!(found.id, added.id);
        assert_eq!(found.hashed_password, "h1");
    }

    #[tokio::test]
    async fn ids_are_fresh_and_increasing() {
        let store = test_store().await;
        let first = store.add_user("a@x.com", "h1").await.expect("add first");
        let second = store.add_user("b@x.com", "h2").await.expect("add second");
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn add_rejects_empty_arguments() {
        let store = test_store().await;
        let err = store.add_user("", "h1").await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
        let err = store.add_user("a@x.com", "").await.unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));
    }

    #[tokio::test]
    async fn find_with_empty_criteria_is_rejected() {
        let store = test_store().await;
        let err = store.find_user_by(&UserQuery::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::InvalidQuery(_)));
    }

    #[tokio::test]
    async fn find_unknown_id_is_not_found() {
        let store = test_store().await;
        store.add_user("a@x.com", "h1").await.expect("add");
        let err = store
            .find_user_by(&UserQuery::by_id(9999))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn find_with_ambiguous_criteria_is_an_error() {
        let store = test_store().await;
        store.add_user("dup@x.com", "h1").await.expect("add");
        store.add_user("dup@x.com", "h2").await.expect("add");
        let err = store
            .find_user_by(&UserQuery::by_email("dup@x.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MultipleMatches));
    }

    #[tokio::test]
    async fn criteria_are_combined_with_and() {
        let store = test_store().await;
        store.add_user("dup@x.com", "h1").await.expect("add");
        let target = store.add_user("dup@x.com", "h2").await.expect("add");

        let found = store
            .find_user_by(&UserQuery {
                email: Some("dup@x.com".into()),
                hashed_password: Some("h2".into()),
                ..UserQuery::default()
            })
            .await
            .expect("find");
        assert_eq!(found.id, target.id);
    }

    #[tokio::test]
    async fn update_sets_only_the_provided_fields() {
        let store = test_store().await;
        let user = store.add_user("a@x.com", "h1").await.expect("add");

        store
            .update_user(
                user.id,
                &UserUpdate {
                    session_id: Some(Some("tok1".into())),
                    ..UserUpdate::default()
                },
            )
            .await
            .expect("update");

        let found = store
            .find_user_by(&UserQuery::by_id(user.id))
            .await
            .expect("find");
        assert_eq!(found.session_id.as_deref(), Some("tok1"));
        assert_eq!(found.email, "a@x.com");
        assert_eq!(found.hashed_password, "h1");
        assert!(found.reset_token.is_none());
    }

    #[tokio::test]
    async fn update_can_clear_a_nullable_column() {
        let store = test_store().await;
        let user = store.add_user("a@x.com", "h1").await.expect("add");

        store
            .update_user(
                user.id,
                &UserUpdate {
                    session_id: Some(Some("tok1".into())),
                    ..UserUpdate::default()
                },
            )
            .await
            .expect("set");
        store
            .update_user(
                user.id,
                &UserUpdate {
                    session_id: Some(None),
                    ..UserUpdate::default()
                },
            )
            .await
            .expect("clear");

        let found = store
            .find_user_by(&UserQuery::by_id(user.id))
            .await
            .expect("find");
        assert!(found.session_id.is_none());
    }

    #[tokio::test]
    async fn empty_update_is_rejected_and_mutates_nothing() {
        let store = test_store().await;
        let user = store.add_user("a@x.com", "h1").await.expect("add");

        let err = store
            .update_user(user.id, &UserUpdate::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)));

        let found = store
            .find_user_by(&UserQuery::by_id(user.id))
            .await
            .expect("find");
        assert_eq!(found.email, "a@x.com");
        assert_eq!(found.hashed_password, "h1");
        assert!(found.session_id.is_none());
        assert!(found.reset_token.is_none());
    }

    #[tokio::test]
    async fn update_of_unknown_user_is_not_found() {
        let store = test_store().await;
        let err = store
            .update_user(
                9999,
                &UserUpdate {
                    email: Some("b@x.com".into()),
                    ..UserUpdate::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn update_several_fields_at_once() {
        let store = test_store().await;
        let user = store.add_user("a@x.com", "h1").await.expect("add");

        store
            .update_user(
                user.id,
                &UserUpdate {
                    email: Some("b@x.com".into()),
                    hashed_password: Some("h2".into()),
                    reset_token: Some(Some("rt".into())),
                    ..UserUpdate::default()
                },
            )
            .await
            .expect("update");

        let found = store
            .find_user_by(&UserQuery::by_id(user.id))
            .await
            .expect("find");
        assert_eq!(found.email, "b@x.com");
        assert_eq!(found.hashed_password, "h2");
        assert_eq!(found.reset_token.as_deref(), Some("rt"));
        assert!(found.session_id.is_none());
    }

    #[tokio::test]
    async fn id_is_part_of_the_update_whitelist() {
        let store = test_store().await;
        let user = store.add_user("a@x.com", "h1").await.expect("add");

        store
            .update_user(
                user.id,
                &UserUpdate {
                    id: Some(4242),
                    ..UserUpdate::default()
                },
            )
            .await
            .expect("update id");

        let found = store
            .find_user_by(&UserQuery::by_id(4242))
            .await
            .expect("find under new id");
        assert_eq!(found.email, "a@x.com");
    }
}
