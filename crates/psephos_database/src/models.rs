//! Row types and conversions for the registry tables.

use crate::schema::{admin_config, users};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use psephos_core::{AdminConfig, VoterRecord, VoterStatus};

/// A row in the `users` table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users, primary_key(wallet_address))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    /// Wallet address, stored lowercase
    pub wallet_address: String,
    /// National Identification Number
    pub nin: String,
    /// Vote-status flag, 'Y' or 'N'
    pub status: String,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl From<UserRow> for VoterRecord {
    fn from(row: UserRow) -> Self {
        let status = VoterStatus::from_flag(&row.status);
        VoterRecord::new(row.wallet_address, row.nin, status, row.created_at)
    }
}

/// Insertable registration row. `created_at` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    /// Wallet address, stored lowercase
    pub wallet_address: String,
    /// National Identification Number
    pub nin: String,
    /// Vote-status flag, always 'N' at registration
    pub status: String,
}

/// A row in the `admin_config` table.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = admin_config)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct AdminConfigRow {
    /// Row id
    pub id: i32,
    /// Administrator wallet address
    pub admin_address: String,
    /// Whether NIN submissions are locked
    pub locked: bool,
}

/// Insertable admin configuration row. `id` is assigned by the database.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = admin_config)]
pub struct NewAdminConfigRow {
    /// Administrator wallet address
    pub admin_address: String,
    /// Whether NIN submissions are locked
    pub locked: bool,
}

impl From<AdminConfigRow> for AdminConfig {
    fn from(row: AdminConfigRow) -> Self {
        AdminConfig::new(row.id, row.admin_address, row.locked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_row_converts_to_record() {
        let row = UserRow {
            wallet_address: "0xabc".to_string(),
            nin: "12345678901".to_string(),
            status: "Y".to_string(),
            created_at: Utc::now(),
        };
        let record: VoterRecord = row.into();
        assert_eq!(record.wallet_address(), "0xabc");
        assert_eq!(*record.status(), VoterStatus::Voted);
    }

    #[test]
    fn unknown_status_flag_reads_as_not_voted() {
        let row = UserRow {
            wallet_address: "0xabc".to_string(),
            nin: "12345678901".to_string(),
            status: "weird".to_string(),
            created_at: Utc::now(),
        };
        let record: VoterRecord = row.into();
        assert_eq!(*record.status(), VoterStatus::NotVoted);
    }
}
