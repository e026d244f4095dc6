//! Database connection utilities.

use crate::RegistryResult;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use psephos_error::{RegistryError, RegistryErrorKind};

/// Establish a connection to the PostgreSQL database.
///
/// Reads the `DATABASE_URL` environment variable to determine the connection
/// string.
///
/// # Errors
///
/// Returns an error if:
/// - `DATABASE_URL` environment variable is not set
/// - Connection to the database fails
pub fn establish_connection() -> RegistryResult<PgConnection> {
    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        RegistryError::new(RegistryErrorKind::Connection(
            "DATABASE_URL environment variable not set".to_string(),
        ))
    })?;

    PgConnection::establish(&database_url)
        .map_err(|e| RegistryError::new(RegistryErrorKind::Connection(e.to_string())))
}
