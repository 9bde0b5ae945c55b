//! User document model and DTOs.

use mongodb::bson::oid::ObjectId;
use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// Full user document from the `users` collection.
///
/// Contains the password hash -- NEVER serialize this to API responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime,
}

/// DTO for creating a new user. The password arrives here already hashed.
#[derive(Debug)]
pub struct CreateUser {
    pub username: String,
    pub password_hash: String,
}
