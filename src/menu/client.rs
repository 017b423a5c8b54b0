//! Customer terminal
//!
//! Guests can browse ATM addresses. After logging in a client can view
//! their accounts, send money by account number or phone number, and pay
//! for services. A client can only ever send from their own accounts.

use std::io::{BufRead, Write};

use crate::config::settings::Settings;
use crate::display::{format_account_choices, format_account_list, format_atm_list};
use crate::error::BankResult;
use crate::models::{AccountNumber, AccountRef, Client, Receiver, TransferReceipt};
use crate::services::{AccountService, AtmService, ClientService, TransferEngine};
use crate::storage::Storage;

use super::input::{
    parse_account_number, parse_account_ref, parse_amount, parse_phone, parse_service_id,
};
use super::terminal::Terminal;

const GUEST_COMMANDS: &str = "\
Choose a command:
  1) Log in
  2) ATM addresses
  q) Quit";

const SESSION_COMMANDS: &str = "\
Choose a command:
  1) My accounts
  2) Transfer to an account number
  3) Transfer by phone number
  4) Pay for a service
  5) ATM addresses
  q) Log out";

/// An authenticated customer
#[derive(Debug, Clone)]
pub struct ClientSession {
    pub client: Client,
}

impl ClientSession {
    /// One of the session owner's own accounts
    pub fn account(&self, number: AccountNumber) -> AccountRef {
        AccountRef::new(self.client.id, number)
    }
}

pub struct ClientMenu<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

impl<'a> ClientMenu<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Run until the guest quits or the input ends
    pub fn run<R: BufRead, W: Write>(&self, term: &mut Terminal<R, W>) -> BankResult<()> {
        tracing::info!("client terminal started");
        term.say("Welcome to ibank!")?;

        loop {
            let command = term.ask(GUEST_COMMANDS)?;
            match command.as_str() {
                "1" => {
                    if let Some(session) = self.login(term)? {
                        self.session(term, &session)?;
                        tracing::info!(client = %session.client.id, "client logged out");
                    }
                }
                "2" => {
                    let result = self.atm_list();
                    term.report(result)?;
                }
                "q" => break,
                other => term.say(format!("Unknown command: {}", other))?,
            }
        }

        tracing::info!("client terminal finished");
        Ok(())
    }

    fn login<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
    ) -> BankResult<Option<ClientSession>> {
        let login = term.ask("Enter login")?;
        let password = term.ask("Enter password")?;

        match ClientService::new(self.storage).authenticate(&login, &password) {
            Ok(Some(client)) => {
                term.say(format!("Hello, {}!", client.name))?;
                Ok(Some(ClientSession { client }))
            }
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
        session: &ClientSession,
    ) -> BankResult<()> {
        loop {
            let command = term.ask(SESSION_COMMANDS)?;
            let result = match command.as_str() {
                "1" => self.account_list(session),
                "2" => self.transfer_to_account(term, session),
                "3" => self.transfer_by_phone(term, session),
                "4" => self.pay_for_service(term, session),
                "5" => self.atm_list(),
                "q" => return Ok(()),
                other => Ok(format!("Unknown command: {}", other)),
            };
            term.report(result)?;
        }
    }

    fn account_list(&self, session: &ClientSession) -> BankResult<String> {
        let accounts = AccountService::new(self.storage).list_accounts(session.client.id)?;
        Ok(format_account_list(&accounts, &self.settings.currency_symbol))
    }

    fn atm_list(&self) -> BankResult<String> {
        let atms = AtmService::new(self.storage).list()?;
        Ok(format!("ATM addresses:\n{}", format_atm_list(&atms)))
    }

    /// Show the client's own accounts and read which one to send from
    fn choose_sender<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
        session: &ClientSession,
    ) -> BankResult<AccountRef> {
        term.say(self.account_list(session)?)?;
        let number = term.ask_parsed(
            "Choose the account to pay from (last four digits)",
            parse_account_number,
        )?;
        Ok(session.account(number))
    }

    fn transfer_to_account<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
        session: &ClientSession,
    ) -> BankResult<String> {
        let receiver =
            term.ask_parsed("Enter the receiver's account number (13 digits)", parse_account_ref)?;
        let sender = self.choose_sender(term, session)?;
        let amount = term.ask_parsed("Enter the amount", parse_amount)?;

        let receipt = TransferEngine::new(self.storage).send(
            sender,
            &Receiver::Account(receiver),
            amount,
        )?;
        Ok(self.transfer_complete("Transfer complete!", &receipt))
    }

    fn transfer_by_phone<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
        session: &ClientSession,
    ) -> BankResult<String> {
        let phone = term.ask_parsed("Enter the receiver's phone number", parse_phone)?;

        let engine = TransferEngine::new(self.storage);
        let offered = engine.accounts_for_phone(&phone)?;
        if offered.is_empty() {
            return Ok("The receiver has no accounts yet.".to_string());
        }

        term.say("Receiver's accounts:")?;
        term.say(format_account_choices(&offered))?;
        let account = term.ask_parsed("Choose the receiver's account", parse_account_number)?;

        let sender = self.choose_sender(term, session)?;
        let amount = term.ask_parsed("Enter the amount", parse_amount)?;

        let receipt = engine.send(sender, &Receiver::Phone { phone, account }, amount)?;
        Ok(self.transfer_complete("Transfer complete!", &receipt))
    }

    fn pay_for_service<R: BufRead, W: Write>(
        &self,
        term: &mut Terminal<R, W>,
        session: &ClientSession,
    ) -> BankResult<String> {
        let service = term.ask_parsed("Enter the service number", parse_service_id)?;
        let sender = self.choose_sender(term, session)?;
        let amount = term.ask_parsed("Enter the amount", parse_amount)?;

        let receipt = TransferEngine::new(self.storage).pay_service(sender, service, amount)?;
        Ok(self.transfer_complete("Payment complete!", &receipt))
    }

    fn transfer_complete(&self, headline: &str, receipt: &TransferReceipt) -> String {
        format!(
            "{}\nAccount {} balance: {}",
            headline,
            receipt.sender.reference(),
            receipt
                .sender
                .balance
                .format_with_symbol(&self.settings.currency_symbol)
        )
    }
}
