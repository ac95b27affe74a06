//! Ledger handle for concurrent callers.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio_stream::{Stream, StreamExt};

use super::{Balance, DepositError, Ledger, LedgerError, SpendError};
use crate::Points;
use crate::model::{Command, PayerDelta, Response, Timestamp};

/// A clonable handle to one ledger shared between threads or tasks.
///
/// Deposits and spends hold the write lock for their whole
/// validate-then-mutate sequence, so two spends can never both pass the
/// funds check against the same total. Balance reads share the read lock
/// and never observe a half-applied mutation.
#[derive(Debug, Clone, Default)]
pub struct SharedLedger {
    inner: Arc<RwLock<Ledger>>,
}

impl SharedLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&self, command: Command) -> Result<Response, LedgerError> {
        match command {
            Command::GetBalance => Ok(Response::Balance(self.balance())),
            command => self.inner.write().apply(command),
        }
    }

    /// Run the ledger over a stream of decoded requests, yielding one result per
    /// request in arrival order.
    ///
    /// A request the transport already rejected is passed through untouched and
    /// never reaches the ledger.
    pub fn run(
        &self,
        requests: impl Stream<Item = Result<Command, LedgerError>>,
    ) -> impl Stream<Item = Result<Response, LedgerError>> {
        let ledger = self.clone();
        requests.map(move |request| request.and_then(|command| ledger.apply(command)))
    }

    pub fn deposit(
        &self,
        payer: &str,
        points: Points,
        timestamp: Timestamp,
    ) -> Result<(), DepositError> {
        self.inner.write().deposit(payer, points, timestamp)
    }

    pub fn spend(&self, points: Points) -> Result<Vec<PayerDelta>, SpendError> {
        self.inner.write().spend(points)
    }

    pub fn balance(&self) -> Balance {
        self.inner.read().balance()
    }

    pub fn available(&self) -> Points {
        self.inner.read().available()
    }

    /// A consistent copy of the whole ledger.
    pub fn snapshot(&self) -> Ledger {
        self.inner.read().clone()
    }
}

impl From<Ledger> for SharedLedger {
    fn from(ledger: Ledger) -> Self {
        Self {
            inner: Arc::new(RwLock::new(ledger)),
        }
    }
}
