//! Error types for ledger operations.

use thiserror::Error;

use crate::Points;

/// Top-level error returned by [`Ledger::apply`](super::Ledger::apply).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LedgerError {
    #[error("deposit rejected: {0}")]
    Deposit(#[from] DepositError),

    #[error("spend rejected: {0}")]
    Spend(#[from] SpendError),
}

impl LedgerError {
    /// True for malformed or out-of-domain input, false for a well-formed
    /// request the ledger cannot honour.
    pub fn is_validation(&self) -> bool {
        match self {
            LedgerError::Deposit(_) => true,
            LedgerError::Spend(e) => e.is_validation(),
        }
    }
}

/// Deposit validation failure. The ledger is left unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DepositError {
    #[error("payer must not be empty")]
    EmptyPayer,
    #[error("points must not be negative, got {0}")]
    NegativePoints(Points),
    #[error("unparseable timestamp '{0}'")]
    InvalidTimestamp(String),
    #[error("depositing {1} would overflow the ledger total of {0}")]
    Overflow(Points, Points),
}

/// Spend failure. The ledger is left unchanged.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SpendError {
    #[error("points to spend must be positive, got {0}")]
    NonPositive(Points),
    #[error("insufficient funds: available {available}, requested {requested}")]
    InsufficientFunds { available: Points, requested: Points },
}

impl SpendError {
    pub fn is_validation(&self) -> bool {
        matches!(self, SpendError::NonPositive(_))
    }
}
