//! JSON exchange files
//!
//! A pretty-printed array of records.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::{Read, Write};

use crate::error::{BankError, BankResult};

pub fn write_records<T: Serialize, W: Write>(writer: W, records: &[T]) -> BankResult<()> {
    serde_json::to_writer_pretty(writer, records).map_err(|e| BankError::Export(e.to_string()))
}

pub fn read_records<T: DeserializeOwned, R: Read>(reader: R) -> BankResult<Vec<T>> {
    serde_json::from_reader(reader).map_err(|e| BankError::Import(e.to_string()))
}
