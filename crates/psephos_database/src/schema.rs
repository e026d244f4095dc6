//! Diesel schema for the hosted voter registry.
//!
//! The tables already exist in the hosted database; no migrations are
//! managed here.

diesel::table! {
    /// Registered voters, keyed by wallet address.
    users (wallet_address) {
        /// Wallet address, stored lowercase
        wallet_address -> Text,
        /// National Identification Number
        nin -> Text,
        /// 'Y' once the voter has voted in the current election, else 'N'
        status -> Text,
        /// Registration time
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Single-row administrator configuration.
    admin_config (id) {
        /// Row id
        id -> Int4,
        /// Administrator wallet address
        admin_address -> Text,
        /// Whether NIN submissions are locked
        locked -> Bool,
    }
}

diesel::allow_tables_to_appear_in_same_query!(users, admin_config);
