//! CSV exchange files
//!
//! One header row, then one row per record. Records must be flat.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};

use crate::error::{BankError, BankResult};

pub fn write_records<T: Serialize, W: Write>(writer: W, records: &[T]) -> BankResult<()> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer
            .serialize(record)
            .map_err(|e| BankError::Export(e.to_string()))?;
    }
    writer.flush().map_err(|e| BankError::Export(e.to_string()))
}

pub fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> BankResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    reader
        .deserialize()
        .enumerate()
        .map(|(i, row)| {
            // Row 1 is the header
            row.map_err(|e| BankError::Import(format!("row {}: {}", i + 2, e)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Account, AccountNumber, ClientId, Money};

    #[test]
    fn test_accounts_have_flat_columns() {
        let accounts = vec![Account::with_balance(
            ClientId::new(7),
            AccountNumber::new(2),
            Money::from_cents(1050),
        )];
        let mut out = Vec::new();
        write_records(&mut out, &accounts).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("client_id,number,balance"));
        assert!(lines.next().unwrap().starts_with("7,2,1050,"));
    }

    #[test]
    fn test_bad_row_reports_its_line() {
        let data = "client_id,number,balance,created_at,updated_at\n\
                    x,1,0,2026-01-01T00:00:00Z,2026-01-01T00:00:00Z\n";
        let err = read_records::<Account, _>(data.as_bytes()).unwrap_err();
        match err {
            BankError::Import(msg) => assert!(msg.starts_with("row 2")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
