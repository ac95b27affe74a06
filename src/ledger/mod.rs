//! Points ledger.
//!
//! The ledger owns every deposit ever made and spends points oldest-first
//! across all payers. Deposits are never removed; a fully spent deposit stays
//! in the history with nothing remaining.

use std::collections::BTreeMap;
use std::ops::Bound;
use tracing::{debug, info};

use crate::Points;
use crate::model::{Command, PayerDelta, Response, Timestamp, Transaction};

mod state;
pub use state::Balance;

mod error;
pub use error::{DepositError, LedgerError, SpendError};

mod shared;
pub use shared::SharedLedger;

/// Spend order: timestamp, then insertion sequence for equal timestamps.
type SpendKey = (Timestamp, u64);

/// The in-memory points ledger.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    transactions: BTreeMap<SpendKey, Transaction>,
    next_seq: u64,
    /// Every transaction ordered before this key is exhausted.
    spend_from: Option<SpendKey>,
    /// Sum of `remaining` over all transactions.
    available: Points,
}

/// Public API
impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single command on top of the current ledger state.
    pub fn apply(&mut self, command: Command) -> Result<Response, LedgerError> {
        match command {
            Command::Deposit {
                payer,
                points,
                timestamp,
            } => {
                let result = self.deposit(&payer, points, timestamp);
                match &result {
                    Ok(()) => info!(
                        payer = %payer,
                        points = %points,
                        timestamp = %timestamp,
                        "deposit applied"
                    ),
                    Err(e) => info!(
                        payer = %payer,
                        points = %points,
                        timestamp = %timestamp,
                        reason = %e,
                        "deposit skipped"
                    ),
                }
                result?;
                Ok(Response::Deposited)
            }
            Command::Spend { points } => {
                let result = self.spend(points);
                match &result {
                    Ok(deltas) => info!(
                        points = %points,
                        payers = deltas.len(),
                        available = %self.available,
                        "spend applied"
                    ),
                    Err(e) => info!(points = %points, reason = %e, "spend skipped"),
                }
                Ok(Response::Spent(result?))
            }
            Command::GetBalance => Ok(Response::Balance(self.balance())),
        }
    }

    /// Record a new deposit with all of its points remaining.
    ///
    /// Deposits are never merged, even with the same payer and timestamp.
    pub fn deposit(
        &mut self,
        payer: &str,
        points: Points,
        timestamp: Timestamp,
    ) -> Result<(), DepositError> {
        if payer.trim().is_empty() {
            return Err(DepositError::EmptyPayer);
        }
        if points.is_negative() {
            return Err(DepositError::NegativePoints(points));
        }
        let available = self
            .available
            .checked_add(points)
            .ok_or(DepositError::Overflow(self.available, points))?;

        let key = (timestamp, self.next_seq);
        self.next_seq += 1;
        self.transactions
            .insert(key, Transaction::new(payer.to_string(), points, timestamp));
        if self.spend_from.is_some_and(|from| key < from) {
            self.spend_from = Some(key);
        }
        self.available = available;

        Ok(())
    }

    /// Debit `points` from the oldest deposits first.
    ///
    /// Returns the points taken from each payer as negative deltas, in the
    /// order payers were first debited. Either the full amount is spent or
    /// nothing changes.
    pub fn spend(&mut self, points: Points) -> Result<Vec<PayerDelta>, SpendError> {
        if !points.is_positive() {
            return Err(SpendError::NonPositive(points));
        }
        if self.available < points {
            return Err(SpendError::InsufficientFunds {
                available: self.available,
                requested: points,
            });
        }

        let mut deltas: Vec<PayerDelta> = Vec::new();
        let mut needed = points;
        let mut last = None;
        let start = self.spend_from.map_or(Bound::Unbounded, Bound::Included);

        for (key, tx) in self.transactions.range_mut((start, Bound::Unbounded)) {
            if !needed.is_positive() {
                break;
            }
            last = Some(*key);
            let taken = tx.consume(needed);
            if !taken.is_positive() {
                continue;
            }
            needed -= taken;

            match deltas.iter_mut().find(|d| d.payer == tx.payer) {
                Some(delta) => delta.points -= taken,
                None => deltas.push(PayerDelta {
                    payer: tx.payer.clone(),
                    points: -taken,
                }),
            }
        }

        debug_assert_eq!(needed, Points::ZERO, "available total out of sync");
        self.available -= points;
        if last.is_some() {
            self.spend_from = last;
        }

        Ok(deltas)
    }

    /// Remaining points of every payer that ever deposited.
    pub fn balance(&self) -> Balance {
        let balance = Balance::from_transactions(self.transactions.values());
        debug!(payers = balance.len(), total = %balance.total(), "balance read");
        balance
    }

    /// Total points that can still be spent.
    pub fn available(&self) -> Points {
        self.available
    }

    /// All deposits in spend order, including exhausted ones.
    pub fn transactions(&self) -> impl Iterator<Item = &Transaction> + '_ {
        self.transactions.values()
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
