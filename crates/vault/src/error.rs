//! Error types for the vault engine.

use alloy_primitives::{Address, U256};
use thiserror::Error;

/// Errors that can occur while operating a vault or one of its strategies.
///
/// Every error aborts the whole operation: the vault restores its state and
/// the ledger to what they were before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VaultError {
    // Validation
    /// An amount, address or duration that must be non-zero was zero
    #[error("Value must be non-zero")]
    Zero,

    /// A parameter is outside its domain
    #[error("Invalid value: {0}")]
    InvalidValue(U256),

    /// The new value equals the current one
    #[error("Value is already set")]
    AlreadyValue,

    /// A value exceeds its upper bound
    #[error("Value {value} is above maximum {max}")]
    AboveMaximum { value: U256, max: U256 },

    /// A value is below its lower bound
    #[error("Value {value} is below minimum {min}")]
    BelowMinimum { value: U256, min: U256 },

    // Authorization
    /// Only the owning vault may call this strategy method
    #[error("Caller {caller} is not the vault")]
    NotVault { caller: Address },

    /// Caller lacks the required role
    #[error("Caller {caller} is not authorized")]
    Unauthorized { caller: Address },

    // Registry and pause state
    /// Strategy is already in the queue
    #[error("Strategy {strategy} is already added")]
    AlreadyStrategy { strategy: Address },

    /// Strategy is not in the queue
    #[error("Strategy {strategy} is not added")]
    NotStrategy { strategy: Address },

    /// Strategy was deployed for another vault or asset
    #[error("Strategy {strategy} does not belong to this vault")]
    StrategyDoesNotBelongToQueue { strategy: Address },

    /// Queue has reached its maximum length
    #[error("Strategy queue is full ({max} strategies)")]
    StrategyQueueFull { max: usize },

    /// Queue index outside the queue
    #[error("Queue index {index} out of bounds for queue of length {len}")]
    QueueIndexOutOfBounds { index: usize, len: usize },

    /// Deposits and withdrawals are paused
    #[error("Vault is paused")]
    Paused,

    // Economic
    /// Harvest found nothing to claim
    #[error("No rewards to harvest")]
    NoRewards,

    /// Invest found no idle balance
    #[error("Nothing to invest")]
    NothingToInvest,

    /// No swap route between two tokens
    #[error("No swap route from {token_in} to {token_out}")]
    NoRoute { token_in: Address, token_out: Address },

    // Ledger
    /// Holder does not have enough of a token
    #[error("Insufficient balance of {token} for {holder}: have {have}, need {need}")]
    InsufficientBalance {
        token: Address,
        holder: Address,
        have: U256,
        need: U256,
    },

    /// Spender does not have enough allowance
    #[error("Insufficient allowance from {owner} to {spender}: have {have}, need {need}")]
    InsufficientAllowance {
        owner: Address,
        spender: Address,
        have: U256,
        need: U256,
    },

    /// Share math hit an empty denominator
    #[error("Division by zero")]
    DivisionByZero,

    /// A component was wired to a different asset
    #[error("Asset mismatch: expected {expected}, got {actual}")]
    AssetMismatch { expected: Address, actual: Address },
}

/// Result type alias for vault operations.
pub type Result<T> = std::result::Result<T, VaultError>;
