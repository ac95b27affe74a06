//! JSON encoding of command results, one line per response.

use serde::Serialize;
use std::io::{self, Write};

use crate::ledger::LedgerError;
use crate::model::Response;

/// Body written for a rejected command.
#[derive(Debug, Serialize)]
struct ErrorBody {
    msg: String,
}

/// Write the JSON line for one command result.
///
/// Deposits are acknowledged without a body, so nothing is written for them.
pub fn write_response(
    writer: &mut impl Write,
    result: &Result<Response, LedgerError>,
) -> io::Result<()> {
    match result {
        Ok(Response::Deposited) => return Ok(()),
        Ok(Response::Spent(deltas)) => serde_json::to_writer(&mut *writer, deltas)?,
        Ok(Response::Balance(balance)) => serde_json::to_writer(&mut *writer, balance)?,
        Err(e) => serde_json::to_writer(
            &mut *writer,
            &ErrorBody { msg: e.to_string() },
        )?,
    }
    writer.write_all(b"\n")
}
