pub mod csv;
pub mod json;
pub mod ledger;
pub mod model;
pub mod points;

pub use ledger::{Ledger, SharedLedger};
pub use model::{Command, Payer, PayerDelta, Response, Timestamp, Transaction};
pub use points::Points;
