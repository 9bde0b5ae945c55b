//! MongoDB access layer for the potion catalog.
//!
//! Exposes a connection helper, the document models, and repository structs
//! holding every query and aggregation pipeline. Handlers never build BSON
//! themselves; they go through [`repositories::UserRepo`] and
//! [`repositories::PotionRepo`].

pub mod analytics;
pub mod models;
pub mod repositories;

use mongodb::bson::doc;
use mongodb::{Client, Database};

/// Connect to the deployment and select the application database.
///
/// The driver connects lazily; this performs no I/O beyond parsing the URI
/// (SRV lookup aside). Callers that want to fail fast at startup should
/// follow up with [`health_check`].
pub async fn connect(uri: &str, db_name: &str) -> Result<Database, mongodb::error::Error> {
    let client = Client::with_uri_str(uri).await?;
    Ok(client.database(db_name))
}

/// Round-trip a `ping` command to verify the deployment is reachable.
pub async fn health_check(db: &Database) -> Result<(), mongodb::error::Error> {
    db.run_command(doc! { "ping": 1 }).await?;
    Ok(())
}

/// Whether a driver error is a unique-index violation (server code 11000).
///
/// Callers use this to classify duplicate usernames as a conflict rather
/// than a generic store failure.
pub fn is_duplicate_key_error(err: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};
    match &*err.kind {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}
