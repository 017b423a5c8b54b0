//! The narrow store interface the banking core runs against
//!
//! Services and the transfer engine only see [`LedgerStore`]. Every method
//! either fully succeeds or leaves the store unchanged.

use crate::error::{BankError, BankResult};
use crate::models::{Account, AccountRef, Client, ClientId, Money, Service, ServiceId};

pub trait LedgerStore {
    fn account(&self, account: AccountRef) -> BankResult<Option<Account>>;

    /// Accounts of one client in creation order
    fn accounts_of(&self, client_id: ClientId) -> BankResult<Vec<Account>>;

    /// Add a positive amount to a balance and persist it
    fn credit(&self, account: AccountRef, amount: Money) -> BankResult<Account>;

    /// Remove a positive amount from a balance, never below zero, and persist it
    fn debit(&self, account: AccountRef, amount: Money) -> BankResult<Account>;

    fn client_by_login(&self, login: &str) -> BankResult<Option<Client>>;

    fn client_by_phone(&self, phone: &str) -> BankResult<Option<Client>>;

    fn service(&self, id: ServiceId) -> BankResult<Option<Service>>;

    /// Debit `from` and credit `to` as one unit
    ///
    /// Stores with a native transaction override this. The default runs the
    /// two steps separately and refunds the debit when the credit fails; the
    /// caller then gets [`BankError::PartialTransferFailure`] describing
    /// whether the refund went through.
    fn transfer(
        &self,
        from: AccountRef,
        to: AccountRef,
        amount: Money,
    ) -> BankResult<(Account, Account)> {
        let debited = self.debit(from, amount)?;

        let credit_err = match self.credit(to, amount) {
            Ok(credited) => return Ok((debited, credited)),
            Err(err) => err,
        };

        tracing::warn!(
            %from,
            %to,
            %amount,
            error = %credit_err,
            "credit failed after debit, refunding"
        );

        let detail = match self.credit(from, amount) {
            Ok(_) => format!(
                "crediting {} failed ({}); the debit of {} from {} was refunded",
                to, credit_err, amount, from
            ),
            Err(refund_err) => {
                tracing::error!(
                    %from,
                    %amount,
                    error = %refund_err,
                    "refund after failed credit failed"
                );
                format!(
                    "crediting {} failed ({}); refunding {} to {} also failed ({})",
                    to, credit_err, amount, from, refund_err
                )
            }
        };

        Err(BankError::PartialTransferFailure(detail))
    }
}
