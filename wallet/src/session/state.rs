//! Active-account session state.
//!
//! A session holds at most one account and exactly one poll handle for it.
//! Switching accounts cancels the old poller before the new one starts, and
//! signing out cancels it and drops the account, which wipes local keys.

use rust_decimal::Decimal;
use tokio::sync::watch;
use tracing::info;

use crate::account::WalletAccount;
use crate::crypto::address::validate_address;
use crate::error::{WalletError, WalletResult};
use crate::transaction::chain::ExternalSigner;
use crate::transaction::signer::SignerSource;

use super::poller::{BalancePoller, PollHandle};

/// The account a session acts as.
#[derive(Debug)]
pub enum SessionAccount {
    /// Keys held in this process.
    Local(WalletAccount),
    /// Keys held by an external signer; we only know the address.
    External { address: String },
}

impl SessionAccount {
    /// SS58 address of the account.
    pub fn address(&self) -> &str {
        match self {
            Self::Local(account) => account.address(),
            Self::External { address } => address,
        }
    }
}

struct Active {
    account: SessionAccount,
    poll: PollHandle,
}

/// One user's wallet session.
pub struct Session {
    poller: BalancePoller,
    ss58_prefix: u16,
    active: Option<Active>,
}

impl Session {
    /// An empty session. Every selected account must carry `ss58_prefix`.
    pub fn new(poller: BalancePoller, ss58_prefix: u16) -> Self {
        Self {
            poller,
            ss58_prefix,
            active: None,
        }
    }

    /// Make `account` the active account and start polling its balance.
    ///
    /// Any previous account's poller is cancelled first. An account on a
    /// different SS58 prefix is refused and leaves the session unchanged.
    /// Must be called inside a Tokio runtime.
    pub fn select_account(&mut self, account: SessionAccount) -> WalletResult<()> {
        match &account {
            SessionAccount::Local(local) if local.prefix() != self.ss58_prefix => {
                return Err(WalletError::invalid(format!(
                    "account uses SS58 prefix {}, session expects {}",
                    local.prefix(),
                    self.ss58_prefix
                )));
            }
            SessionAccount::Local(_) => {}
            SessionAccount::External { address } => validate_address(address, self.ss58_prefix)?,
        }

        if let Some(previous) = self.active.take() {
            info!(address = %previous.account.address(), "switching away from account");
            previous.poll.cancel();
        }

        let poll = self.poller.poll(account.address());
        info!(address = %account.address(), "account selected");
        self.active = Some(Active { account, poll });
        Ok(())
    }

    /// Cancel polling and drop the active account.
    pub fn sign_out(&mut self) {
        if let Some(previous) = self.active.take() {
            info!(address = %previous.account.address(), "signed out");
            previous.poll.cancel();
        }
    }

    /// Whether an account is selected.
    pub fn is_signed_in(&self) -> bool {
        self.active.is_some()
    }

    /// The selected account, if any.
    pub fn active_account(&self) -> Option<&SessionAccount> {
        self.active.as_ref().map(|a| &a.account)
    }

    /// Address of the selected account, if any.
    pub fn active_address(&self) -> Option<&str> {
        self.active_account().map(SessionAccount::address)
    }

    /// Latest polled balance of the active account, in tokens.
    pub fn balance(&self) -> Option<Decimal> {
        self.active.as_ref().and_then(|a| a.poll.latest())
    }

    /// Balance updates for the active account.
    pub fn subscribe_balance(&self) -> Option<watch::Receiver<Option<Decimal>>> {
        self.active.as_ref().map(|a| a.poll.subscribe())
    }

    /// How the active account signs. External accounts use `external`.
    pub fn signer_source<'a>(
        &'a self,
        external: &'a dyn ExternalSigner,
    ) -> Option<SignerSource<'a>> {
        self.active.as_ref().map(|a| match &a.account {
            SessionAccount::Local(account) => SignerSource::Local(account),
            SessionAccount::External { address } => SignerSource::External {
                address,
                signer: external,
            },
        })
    }
}
