//! Back-office terminal
//!
//! Managers register clients, open accounts, register services and ATMs,
//! move records in and out through exchange files, add other managers and
//! replenish balances.

use std::io::{BufRead, Write};

use crate::error::BankResult;
use crate::export::{export_records, import_records, EntityKind, ExchangeFormat};
use crate::models::{AccountRef, Manager};
use crate::services::{
    AccountService, AtmService, ClientService, ManagerService, NewClient, ServiceRegistry,
};
use crate::storage::Storage;

use super::input::{non_empty, parse_account_number, parse_amount, parse_client_id, parse_phone};
use super::terminal::Terminal;

const GUEST_COMMANDS: &str = "\
Choose a command:
  1) Log in
  q) Quit";

const SESSION_COMMANDS: &str = "\
Choose a command:
  1) Add a client
  2) Open an account for a client
  3) Add a service
  4) Add an ATM
  5) Export records
  6) Import records
  7) Add a manager
  8) Replenish an account
  q) Log out";

/// An authenticated back-office operator
#[derive(Debug, Clone)]
pub struct ManagerSession {
    pub manager: Manager,
}

pub struct ManagerMenu<'a> {
    storage: &'a Storage,
}

impl<'a> ManagerMenu<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Run until the operator quits or the input ends
    pub fn run<R: BufRead, W: Write>(&self, term: &mut Terminal<R, W>) -> BankResult<()> {
        tracing::info!("manager terminal started");
        term.say("Welcome to ibank back office!")?;

        loop {
            let command = term.ask(GUEST_COMMANDS)?;
            match command.as_str() {
                "1" => {
                    if let Some(session) = self.login(term)? {
                        self.session(term, &session)?;
                        tracing::info!(manager = %session.manager.login, "manager logged out");
                    }
                }
                "q" => break,
                other => term.say(format!("Unknown command: {}", other))?,
            }
        }

        tracing::info!("manager terminal finished");
        Ok(())
    }

    fn login<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> BankResult<Option<ManagerSession>> {
        let login = term.ask("Enter login")?;
        let password = term.ask("Enter password")?;

        match ManagerService::new(self.storage).authenticate(&login, &password) {
            Ok(Some(manager)) => Ok(Some(ManagerSession { manager })),
            Ok(None) => {
                term.say("Wrong login or password. Try again.")?;
                Ok(None)
            }
            Err(err) => {
                term.report(Err(err))?;
                Ok(None)
            }
        }
    }

    fn session<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
        session: &ManagerSession,
    ) -> BankResult<()> {
        loop {
            let command = term.ask(SESSION_COMMANDS)?;
            let result = match command.as_str() {
                "1" => self.add_client(term),
                "2" => self.open_account(term),
                "3" => self.add_service(term),
                "4" => self.add_atm(term),
                "5" => self.export(term),
                "6" => self.import(term),
                "7" => self.add_manager(term, session),
                "8" => self.replenish(term),
                "q" => return Ok(()),
                other => Ok(format!("Unknown command: {}", other)),
            };
            term.report(result)?;
        }
    }

    fn add_client<R: BufRead, W: Write>(&self, term: &mut Terminal<R, W>) -> BankResult<String> {
        let input = NewClient {
            name: term.ask_parsed("Enter name", |s| non_empty("Name", s))?,
            login: term.ask_parsed("Choose a login", |s| non_empty("Login", s))?,
            password: term.ask("Choose a password")?,
            phone: term.ask_parsed("Enter phone number", parse_phone)?,
        };

        let client = ClientService::new(self.storage).create(input)?;
        Ok(format!("Client added! Client id: {}", client.id))
    }

    fn open_account<R: BufRead, W: Write>(&self, term: &mut Terminal<R, W>) -> BankResult<String> {
        let phone = term.ask_parsed("Enter the client's phone number", parse_phone)?;
        let client_id = ClientService::new(self.storage).resolve_by_phone(&phone)?;

        let account = AccountService::new(self.storage).open_account(client_id)?;
        Ok(format!("Account added! Account number: {}", account.reference()))
    }

    fn add_service<R: BufRead, W: Write>(&self, term: &mut Terminal<R, W>) -> BankResult<String> {
        let name = term.ask_parsed("Enter the service name", |s| non_empty("Service name", s))?;
        let phone = term.ask_parsed("Enter the phone number of the service owner", parse_phone)?;
        let owner = ClientService::new(self.storage).resolve_by_phone(&phone)?;

        let service = ServiceRegistry::new(self.storage).register(&name, owner)?;
        Ok(format!(
            "Service added! Service number: {}\nPayments go to account {}",
            service.id,
            service.target()
        ))
    }

    fn add_atm<R: BufRead, W: Write>(&self, term: &mut Terminal<R, W>) -> BankResult<String> {
        let address = term.ask_parsed("Enter the ATM address", |s| non_empty("Address", s))?;

        let atm = AtmService::new(self.storage).add(&address)?;
        Ok(format!("ATM added! ATM number: {}", atm.id))
    }

    fn ask_exchange<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> BankResult<(EntityKind, ExchangeFormat)> {
        let format = term.ask_parsed("Choose a format: json, yaml or csv", |s| {
            s.parse::<ExchangeFormat>()
        })?;
        let kind = term.ask_parsed("Choose records: clients, accounts, atms or services", |s| {
            s.parse::<EntityKind>()
        })?;
        Ok((kind, format))
    }

    fn export<R: BufRead, W: Write>(&self, term: &mut Terminal<R, W>) -> BankResult<String> {
        let (kind, format) = self.ask_exchange(term)?;
        let path = export_records(self.storage, kind, format)?;
        Ok(format!("Export complete! Written to {}", path.display()))
    }

    fn import<R: BufRead, W: Write>(&self, term: &mut Terminal<R, W>) -> BankResult<String> {
        let (kind, format) = self.ask_exchange(term)?;
        let count = import_records(self.storage, kind, format)?;
        Ok(format!("Import complete! {} {} imported", count, kind))
    }

    fn add_manager<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
        session: &ManagerSession,
    ) -> BankResult<String> {
        let login = term.ask_parsed("Choose a login", |s| non_empty("Login", s))?;
        let password = term.ask("Choose a password")?;

        let manager = ManagerService::new(self.storage).create(&login, &password)?;
        tracing::info!(by = %session.manager.login, manager = %manager.login, "manager added");
        Ok("Manager added!".to_string())
    }

    fn replenish<R: BufRead, W: Write>(&self, term: &mut Terminal<R, W>) -> BankResult<String> {
        let client_id = term.ask_parsed("Enter the client id", parse_client_id)?;
        let number = term.ask_parsed("Enter the account number", parse_account_number)?;
        let amount = term.ask_parsed("Enter the amount", parse_amount)?;

        let account = AccountService::new(self.storage)
            .replenish(AccountRef::new(client_id, number), amount)?;
        Ok(format!(
            "Balance replenished! Account {} balance: {}",
            account.reference(),
            account.balance
        ))
    }
}
