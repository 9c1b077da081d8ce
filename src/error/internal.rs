use thiserror::Error;

/// Internal issues with stored data indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A stored balance is negative.
    ///
    /// Balances are only ever increased by captures and set by admins through a
    /// non-negative value, so this points at an external write to the table.
    #[error("Player {user_id} has a negative stored balance: {balance}")]
    NegativeBalance {
        /// The player owning the row
        user_id: u64,
        /// The offending stored value
        balance: i64,
    },

    /// A stored streak counter is negative.
    #[error("Player {user_id} has a negative stored streak: {streak}")]
    NegativeStreak {
        /// The player owning the row
        user_id: u64,
        /// The offending stored value
        streak: i32,
    },

    /// An amount to credit or store exceeds the largest storable balance.
    #[error("Amount {amount} for player {user_id} exceeds the storable balance range")]
    BalanceOutOfRange {
        /// The player the amount was meant for
        user_id: u64,
        /// The rejected amount
        amount: u64,
    },
}
