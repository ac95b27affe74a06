//! Core domain types for the points ledger.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Points;
use crate::ledger::{Balance, DepositError};

/// Payer identifier.
pub type Payer = String;

/// Instant a deposit was made; the sole ordering key for spends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Timestamp(instant)
    }

    pub fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Timestamp(instant)
    }
}

/// Accepts RFC 3339 (`2020-11-02T14:00:00Z`, any offset is normalized to UTC)
/// or a naive `YYYY-MM-DDTHH:MM:SS[.fff]`, read as UTC.
impl FromStr for Timestamp {
    type Err = DepositError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(instant) = DateTime::parse_from_rfc3339(s) {
            return Ok(Timestamp(instant.with_timezone(&Utc)));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| Timestamp(naive.and_utc()))
            .map_err(|_| DepositError::InvalidTimestamp(s.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

/// Whether a deposit still has points to give.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionState {
    /// Some points remain.
    Active,
    /// Fully consumed by spends. Terminal.
    Exhausted,
}

/// A single deposit and what is left of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub payer: Payer,
    /// Points as deposited. Never changes.
    pub points: Points,
    pub timestamp: Timestamp,
    /// Points not yet consumed; `0 <= remaining <= points`.
    remaining: Points,
}

impl Transaction {
    pub fn new(payer: Payer, points: Points, timestamp: Timestamp) -> Self {
        Self {
            payer,
            points,
            timestamp,
            remaining: points,
        }
    }

    pub fn remaining(&self) -> Points {
        self.remaining
    }

    pub fn state(&self) -> TransactionState {
        if self.remaining.is_positive() {
            TransactionState::Active
        } else {
            TransactionState::Exhausted
        }
    }

    /// Take up to `wanted` points from this deposit and return how many were taken.
    pub(crate) fn consume(&mut self, wanted: Points) -> Points {
        let taken = self.remaining.min(wanted);
        self.remaining -= taken;
        debug_assert!(!self.remaining.is_negative());
        taken
    }
}

/// A typed request decoded by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Credit points from a payer at a point in time.
    Deposit {
        payer: Payer,
        points: Points,
        timestamp: Timestamp,
    },
    /// Debit points from the whole ledger, oldest deposits first.
    Spend { points: Points },
    /// Report remaining points per payer.
    GetBalance,
}

/// Points removed from one payer by a spend. `points` is negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayerDelta {
    pub payer: Payer,
    pub points: Points,
}

/// The typed result of a successfully applied [`Command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Acknowledgement; carries no body.
    Deposited,
    /// Per-payer deltas in the order each payer was first debited.
    Spent(Vec<PayerDelta>),
    Balance(Balance),
}
