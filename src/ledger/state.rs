use serde::Serialize;
use std::collections::BTreeMap;

use crate::Points;
use crate::model::{Payer, Transaction};

/// Remaining points per payer, ordered by payer identifier.
/// Every payer that ever deposited is present, even when drained to zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Balance(BTreeMap<Payer, Points>);

impl Balance {
    /// Aggregate the remaining points of each transaction by payer.
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let mut balance = Balance::default();
        for tx in transactions {
            balance.credit(&tx.payer, tx.remaining());
        }
        balance
    }

    pub fn get(&self, payer: &str) -> Option<Points> {
        self.0.get(payer).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Points)> + '_ {
        self.0.iter().map(|(payer, points)| (payer.as_str(), *points))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> Points {
        self.0.values().copied().sum()
    }

    fn credit(&mut self, payer: &str, points: Points) {
        // avoid allocating the key for payers already present
        match self.0.get_mut(payer) {
            Some(existing) => *existing += points,
            None => {
                self.0.insert(payer.to_string(), points);
            }
        }
    }
}
