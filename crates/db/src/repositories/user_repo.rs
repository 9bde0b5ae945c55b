//! Repository for the `users` collection.

use mongodb::bson::{doc, DateTime};
use mongodb::options::IndexOptions;
use mongodb::{Collection, Database, IndexModel};

use crate::models::user::{CreateUser, User};

const COLLECTION: &str = "users";

/// Provides user persistence and lookup.
pub struct UserRepo;

impl UserRepo {
    fn collection(db: &Database) -> Collection<User> {
        db.collection::<User>(COLLECTION)
    }

    /// Create the unique index on `username`. Idempotent; run once at
    /// startup before serving requests.
    pub async fn ensure_indexes(db: &Database) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! { "username": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        Self::collection(db).create_index(index).await?;
        tracing::debug!("Unique username index ensured");
        Ok(())
    }

    /// Insert a new user, returning it with its assigned id.
    ///
    /// A duplicate username surfaces as a driver error carrying server code
    /// 11000; classify it with [`crate::is_duplicate_key_error`].
    pub async fn create(
        db: &Database,
        input: &CreateUser,
    ) -> Result<User, mongodb::error::Error> {
        let user = User {
            id: None,
            username: input.username.clone(),
            password_hash: input.password_hash.clone(),
            created_at: DateTime::now(),
        };
        let result = Self::collection(db).insert_one(&user).await?;
        Ok(User {
            id: result.inserted_id.as_object_id(),
            ..user
        })
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username(
        db: &Database,
        username: &str,
    ) -> Result<Option<User>, mongodb::error::Error> {
        Self::collection(db)
            .find_one(doc! { "username": username })
            .await
    }
}
