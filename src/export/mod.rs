//! Record exchange for ibank
//!
//! Managers move clients, accounts, ATMs and services in and out of the
//! bank through exchange files in one of three formats:
//! - JSON: pretty-printed array of records
//! - YAML: human-readable sequence of records
//! - CSV: spreadsheet-compatible, one row per record
//!
//! Files live at `<base>/exchange/<entity>.<ext>`. Imports create or
//! overwrite records by key after checking them against the current data.

pub mod csv;
pub mod json;
pub mod yaml;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::str::FromStr;

use crate::config::paths::BankPaths;
use crate::error::{BankError, BankResult};
use crate::models::{normalize_phone, Account, Atm, Client, Service};
use crate::storage::Storage;

/// Exchange file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeFormat {
    Json,
    Yaml,
    Csv,
}

impl ExchangeFormat {
    pub const ALL: [ExchangeFormat; 3] = [Self::Json, Self::Yaml, Self::Csv];

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Yaml => "yaml",
            Self::Csv => "csv",
        }
    }

    fn write<T: Serialize, W: Write>(&self, writer: W, records: &[T]) -> BankResult<()> {
        match self {
            Self::Json => json::write_records(writer, records),
            Self::Yaml => yaml::write_records(writer, records),
            Self::Csv => csv::write_records(writer, records),
        }
    }

    fn read<T: DeserializeOwned>(&self, file: File) -> BankResult<Vec<T>> {
        let reader = BufReader::new(file);
        match self {
            Self::Json => json::read_records(reader),
            Self::Yaml => yaml::read_records(reader),
            Self::Csv => csv::read_records(reader),
        }
    }
}

impl fmt::Display for ExchangeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExchangeFormat {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            other => Err(BankError::Validation(format!(
                "Unknown format '{}'. Use json, yaml or csv",
                other
            ))),
        }
    }
}

/// Which records an exchange file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Clients,
    Accounts,
    Atms,
    Services,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [Self::Clients, Self::Accounts, Self::Atms, Self::Services];

    pub fn file_stem(&self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Accounts => "accounts",
            Self::Atms => "atms",
            Self::Services => "services",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

impl FromStr for EntityKind {
    type Err = BankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clients" | "client" => Ok(Self::Clients),
            "accounts" | "account" => Ok(Self::Accounts),
            "atms" | "atm" => Ok(Self::Atms),
            "services" | "service" => Ok(Self::Services),
            other => Err(BankError::Validation(format!(
                "Unknown record type '{}'. Use clients, accounts, atms or services",
                other
            ))),
        }
    }
}

/// Path of the exchange file for a record type and format
pub fn exchange_file(paths: &BankPaths, kind: EntityKind, format: ExchangeFormat) -> PathBuf {
    paths
        .exchange_dir()
        .join(format!("{}.{}", kind.file_stem(), format.extension()))
}

/// Write every record of one type to its exchange file
pub fn export_records(
    storage: &Storage,
    kind: EntityKind,
    format: ExchangeFormat,
) -> BankResult<PathBuf> {
    let path = exchange_file(storage.paths(), kind, format);
    let file = File::create(&path)
        .map_err(|e| BankError::Export(format!("{}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);

    let count = match kind {
        EntityKind::Clients => write_all(format, &mut writer, &storage.clients.get_all()?)?,
        EntityKind::Accounts => write_all(format, &mut writer, &storage.accounts.get_all()?)?,
        EntityKind::Atms => write_all(format, &mut writer, &storage.atms.get_all()?)?,
        EntityKind::Services => write_all(format, &mut writer, &storage.services.get_all()?)?,
    };
    writer
        .flush()
        .map_err(|e| BankError::Export(format!("{}: {}", path.display(), e)))?;

    tracing::info!(%kind, %format, count, path = %path.display(), "records exported");
    Ok(path)
}

fn write_all<T: Serialize, W: Write>(
    format: ExchangeFormat,
    writer: W,
    records: &[T],
) -> BankResult<usize> {
    format.write(writer, records)?;
    Ok(records.len())
}

/// Read one type's exchange file and create or overwrite its records
///
/// Every record is checked before any is stored: clients must be valid,
/// accounts must belong to a known client and services must pay into a
/// known account. The records are then stored as one unit, so a clash
/// such as a repeated login leaves the store untouched. Returns the number
/// of records imported.
pub fn import_records(
    storage: &Storage,
    kind: EntityKind,
    format: ExchangeFormat,
) -> BankResult<usize> {
    let path = exchange_file(storage.paths(), kind, format);
    let file = File::open(&path)
        .map_err(|e| BankError::Import(format!("{}: {}", path.display(), e)))?;

    let count = match kind {
        EntityKind::Clients => import_clients(storage, format.read(file)?)?,
        EntityKind::Accounts => import_accounts(storage, format.read(file)?)?,
        EntityKind::Atms => import_atms(storage, format.read(file)?)?,
        EntityKind::Services => import_services(storage, format.read(file)?)?,
    };

    tracing::info!(%kind, %format, count, path = %path.display(), "records imported");
    Ok(count)
}

fn import_clients(storage: &Storage, clients: Vec<Client>) -> BankResult<usize> {
    let mut checked = Vec::with_capacity(clients.len());
    for mut client in clients {
        client.phone = normalize_phone(&client.phone)
            .map_err(|e| BankError::Import(format!("client {}: {}", client.id, e)))?;
        client
            .validate()
            .map_err(|e| BankError::Import(format!("client {}: {}", client.id, e)))?;
        checked.push(client);
    }

    storage.clients.upsert_all(checked)
}

fn import_accounts(storage: &Storage, accounts: Vec<Account>) -> BankResult<usize> {
    for account in &accounts {
        if storage.clients.get(account.client_id)?.is_none() {
            return Err(BankError::Import(format!(
                "account {} belongs to unknown client {}",
                account.reference(),
                account.client_id
            )));
        }
        account
            .validate()
            .map_err(|e| BankError::Import(format!("account {}: {}", account.reference(), e)))?;
    }

    storage.accounts.upsert_all(accounts)
}

fn import_atms(storage: &Storage, atms: Vec<Atm>) -> BankResult<usize> {
    if let Some(atm) = atms.iter().find(|a| a.address.trim().is_empty()) {
        return Err(BankError::Import(format!("ATM {} has no address", atm.id)));
    }

    storage.atms.upsert_all(atms)
}

fn import_services(storage: &Storage, services: Vec<Service>) -> BankResult<usize> {
    let known: HashSet<_> = storage
        .accounts
        .get_all()?
        .iter()
        .map(Account::reference)
        .collect();

    for service in &services {
        if service.name.trim().is_empty() {
            return Err(BankError::Import(format!("service {} has no name", service.id)));
        }
        if !known.contains(&service.target()) {
            return Err(BankError::Import(format!(
                "service {} pays into unknown account {}",
                service.id,
                service.target()
            )));
        }
    }

    storage.services.upsert_all(services)
}
