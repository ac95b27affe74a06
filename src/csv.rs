use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::ledger::{DepositError, LedgerError};
use crate::model::{Command, Timestamp};
use crate::Points;

/// Errors that can occur when reading the command file
#[derive(Debug, Error)]
pub enum CsvError {
    #[error("failed to open command file: {0}")]
    Open(#[source] csv::Error),

    #[error("line {line}: failed to parse row: {source}")]
    Parse { line: usize, source: csv::Error },

    #[error("line {line}: unrecognized command type '{command}'")]
    UnrecognizedType { line: usize, command: String },

    #[error("line {line}: {command} missing {field}")]
    MissingField {
        line: usize,
        command: &'static str,
        field: &'static str,
    },

    #[error("line {line}: {source}")]
    Deposit { line: usize, source: DepositError },
}

impl CsvError {
    /// Split off rows that decoded as a command but failed its validation.
    ///
    /// Those are rejections the caller must be answered for, just like a
    /// rejection from the ledger itself. Any other error is a malformed row.
    pub fn into_rejection(self) -> Result<LedgerError, CsvError> {
        match self {
            CsvError::Deposit { source, .. } => Ok(LedgerError::Deposit(source)),
            other => Err(other),
        }
    }
}

#[derive(Debug, Deserialize)]
struct InputRow {
    r#type: String,
    payer: Option<String>,
    points: Option<i64>,
    timestamp: Option<String>,
}

/// Read ledger commands from a csv file with the header
/// `type,payer,points,timestamp`.
pub fn read_commands(
    path: impl AsRef<Path>,
) -> Result<impl Iterator<Item = Result<Command, CsvError>>, CsvError> {
    let reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(CsvError::Open)?;

    Ok(reader
        .into_deserialize::<InputRow>()
        .enumerate()
        .map(|(idx, result)| {
            let line = idx + 2; // 1-indexed, skip header
            let row = result.map_err(|source| CsvError::Parse { line, source })?;
            parse_row(line, row)
        }))
}

fn parse_row(line: usize, row: InputRow) -> Result<Command, CsvError> {
    let missing = |command, field| CsvError::MissingField {
        line,
        command,
        field,
    };

    match row.r#type.as_str() {
        "deposit" => {
            let payer = row.payer.ok_or_else(|| missing("deposit", "payer"))?;
            let points = row.points.ok_or_else(|| missing("deposit", "points"))?;
            let timestamp = row
                .timestamp
                .ok_or_else(|| missing("deposit", "timestamp"))?
                .parse::<Timestamp>()
                .map_err(|source| CsvError::Deposit { line, source })?;
            Ok(Command::Deposit {
                payer,
                points: Points::new(points),
                timestamp,
            })
        }
        "spend" => {
            let points = row.points.ok_or_else(|| missing("spend", "points"))?;
            Ok(Command::Spend {
                points: Points::new(points),
            })
        }
        "balance" => Ok(Command::GetBalance),
        other => Err(CsvError::UnrecognizedType {
            line,
            command: other.to_string(),
        }),
    }
}
