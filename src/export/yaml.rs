//! YAML exchange files
//!
//! A header comment followed by a sequence of records.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};

use crate::error::{BankError, BankResult};

pub fn write_records<T: Serialize, W: Write>(mut writer: W, records: &[T]) -> BankResult<()> {
    writeln!(writer, "# ibank export").map_err(|e| BankError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())
        .map_err(|e| BankError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, records).map_err(|e| BankError::Export(e.to_string()))
}

pub fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> BankResult<Vec<T>> {
    serde_yaml::from_reader(reader).map_err(|e| BankError::Import(e.to_string()))
}
