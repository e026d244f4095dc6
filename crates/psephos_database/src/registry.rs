//! Voter registry trait and its PostgreSQL implementation.

use crate::models::{AdminConfigRow, NewAdminConfigRow, NewUserRow, UserRow};
use crate::schema::{admin_config, users};
use crate::RegistryResult;
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use psephos_core::{AdminConfig, VoterRecord, VoterStatus};
use psephos_error::RegistryError;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

/// Primitive operations on the voter registry.
///
/// Business rules (duplicate registration, lock enforcement, NIN matching)
/// live in the flows that call this trait; implementations only move rows.
#[async_trait]
pub trait VoterRegistry: Send + Sync {
    /// Look up a registration by wallet address, case-insensitively.
    async fn find_by_wallet(&self, wallet_address: &str) -> RegistryResult<Option<VoterRecord>>;

    /// Look up a registration by NIN.
    async fn find_by_nin(&self, nin: &str) -> RegistryResult<Option<VoterRecord>>;

    /// Insert a new registration with status `'N'`.
    async fn insert_voter(&self, wallet_address: &str, nin: &str) -> RegistryResult<VoterRecord>;

    /// Set one voter's vote-status flag.
    async fn set_status(&self, wallet_address: &str, status: VoterStatus) -> RegistryResult<()>;

    /// Reset every voter's status to `'N'`, e.g. when a new election is
    /// created. Returns the number of rows changed.
    async fn reset_all_statuses(&self) -> RegistryResult<usize>;

    /// All registrations, newest first.
    async fn all_voters(&self) -> RegistryResult<Vec<VoterRecord>>;

    /// Whether NIN submissions are currently locked. An absent config row
    /// reads as unlocked.
    async fn submission_locked(&self) -> RegistryResult<bool>;

    /// Lock or unlock NIN submissions, creating the config row if absent.
    async fn set_submission_lock(&self, locked: bool, admin_address: &str) -> RegistryResult<()>;

    /// The admin configuration row, if one exists.
    async fn admin_config(&self) -> RegistryResult<Option<AdminConfig>>;
}

/// PostgreSQL implementation of [`VoterRegistry`] using Diesel.
///
/// Wallet addresses are normalized to lowercase on every write and lookup so
/// comparisons are case-insensitive regardless of how a wallet reports its
/// address.
///
/// # Example
/// ```no_run
/// use psephos_database::{PgVoterRegistry, VoterRegistry, establish_connection};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let conn = establish_connection()?;
///     let registry = PgVoterRegistry::new(conn);
///     let voter = registry.find_by_wallet("0xAbC...").await?;
///     Ok(())
/// }
/// ```
pub struct PgVoterRegistry {
    /// Database connection wrapped in Arc<Mutex> for async safety.
    conn: Arc<Mutex<PgConnection>>,
}

impl PgVoterRegistry {
    /// Create a new registry over a PostgreSQL connection.
    pub fn new(conn: PgConnection) -> Self {
        Self {
            conn: Arc::new(Mutex::new(conn)),
        }
    }

    /// Create a registry from a shared connection.
    pub fn from_arc(conn: Arc<Mutex<PgConnection>>) -> Self {
        Self { conn }
    }
}

fn normalize(wallet_address: &str) -> String {
    wallet_address.trim().to_lowercase()
}

#[async_trait]
impl VoterRegistry for PgVoterRegistry {
    #[instrument(skip(self))]
    async fn find_by_wallet(&self, wallet_address: &str) -> RegistryResult<Option<VoterRecord>> {
        let wallet = normalize(wallet_address);
        let mut conn = self.conn.lock().await;

        let row: Option<UserRow> = users::table
            .filter(users::wallet_address.eq(&wallet))
            .first(&mut *conn)
            .optional()
            .map_err(RegistryError::from)?;

        debug!(found = row.is_some(), "Wallet lookup");
        Ok(row.map(VoterRecord::from))
    }

    #[instrument(skip(self, nin))]
    async fn find_by_nin(&self, nin: &str) -> RegistryResult<Option<VoterRecord>> {
        let mut conn = self.conn.lock().await;

        let row: Option<UserRow> = users::table
            .filter(users::nin.eq(nin))
            .first(&mut *conn)
            .optional()
            .map_err(RegistryError::from)?;

        Ok(row.map(VoterRecord::from))
    }

    #[instrument(skip(self, nin))]
    async fn insert_voter(&self, wallet_address: &str, nin: &str) -> RegistryResult<VoterRecord> {
        let new_row = NewUserRow {
            wallet_address: normalize(wallet_address),
            nin: nin.to_string(),
            status: VoterStatus::NotVoted.as_str().to_string(),
        };
        let mut conn = self.conn.lock().await;

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .get_result(&mut *conn)
            .map_err(RegistryError::from)?;

        info!(wallet = %row.wallet_address, "Registered voter");
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn set_status(&self, wallet_address: &str, status: VoterStatus) -> RegistryResult<()> {
        let wallet = normalize(wallet_address);
        let mut conn = self.conn.lock().await;

        diesel::update(users::table.filter(users::wallet_address.eq(&wallet)))
            .set(users::status.eq(status.as_str()))
            .execute(&mut *conn)
            .map_err(RegistryError::from)?;

        debug!(wallet = %wallet, status = %status, "Updated voter status");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn reset_all_statuses(&self) -> RegistryResult<usize> {
        let mut conn = self.conn.lock().await;

        let changed = diesel::update(
            users::table.filter(users::status.ne(VoterStatus::NotVoted.as_str())),
        )
        .set(users::status.eq(VoterStatus::NotVoted.as_str()))
        .execute(&mut *conn)
        .map_err(RegistryError::from)?;

        info!(changed, "Reset voter statuses for new election");
        Ok(changed)
    }

    #[instrument(skip(self))]
    async fn all_voters(&self) -> RegistryResult<Vec<VoterRecord>> {
        let mut conn = self.conn.lock().await;

        let rows: Vec<UserRow> = users::table
            .order(users::created_at.desc())
            .load(&mut *conn)
            .map_err(RegistryError::from)?;

        Ok(rows.into_iter().map(VoterRecord::from).collect())
    }

    #[instrument(skip(self))]
    async fn submission_locked(&self) -> RegistryResult<bool> {
        let mut conn = self.conn.lock().await;

        let row: Option<AdminConfigRow> = admin_config::table
            .order(admin_config::id.desc())
            .first(&mut *conn)
            .optional()
            .map_err(RegistryError::from)?;

        // No config row yet means registrations are open.
        Ok(row.map(|r| r.locked).unwrap_or(false))
    }

    #[instrument(skip(self))]
    async fn set_submission_lock(&self, locked: bool, admin_address: &str) -> RegistryResult<()> {
        let mut conn = self.conn.lock().await;

        let existing: Option<AdminConfigRow> = admin_config::table
            .order(admin_config::id.desc())
            .first(&mut *conn)
            .optional()
            .map_err(RegistryError::from)?;

        match existing {
            Some(row) => {
                diesel::update(admin_config::table.filter(admin_config::id.eq(row.id)))
                    .set(admin_config::locked.eq(locked))
                    .execute(&mut *conn)
                    .map_err(RegistryError::from)?;
            }
            None => {
                let new_row = NewAdminConfigRow {
                    admin_address: normalize(admin_address),
                    locked,
                };
                diesel::insert_into(admin_config::table)
                    .values(&new_row)
                    .execute(&mut *conn)
                    .map_err(RegistryError::from)?;
            }
        }

        info!(locked, "Toggled NIN submission lock");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn admin_config(&self) -> RegistryResult<Option<AdminConfig>> {
        let mut conn = self.conn.lock().await;

        let row: Option<AdminConfigRow> = admin_config::table
            .order(admin_config::id.desc())
            .first(&mut *conn)
            .optional()
            .map_err(RegistryError::from)?;

        Ok(row.map(AdminConfig::from))
    }
}
