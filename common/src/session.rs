//! Dialog session state machine.
//!
//! Holds everything the wallet dialog tracks: the active tab, id-based
//! selections, draft fields, the last balance result and the per-action busy
//! latches. Rendering and the actual chain calls live in the UI crate; this
//! module only decides what an interaction does to the state.
//!
//! External actions follow a launch/complete split. `begin_*` checks
//! preconditions and, if they hold, arms the busy latch and returns a
//! snapshot of everything the call needs (address, endpoint, secret,
//! amount). The caller performs the chain call and feeds the outcome back
//! through `complete_*`, which drops the latch on every path. Balance
//! snapshots carry an epoch; changing the network or wallet selection bumps
//! it, so a completion launched against the previous pairing is discarded
//! instead of overwriting a result it no longer describes.

use std::fmt;

use crate::amount::{self, AmountError, BALANCE_DISPLAY_DECIMALS};
use crate::chain::{ChainError, TransferReceipt};
use crate::network::{NetworkDescriptor, NetworkList};
use crate::wallet::{ConnectOutcome, WalletDirectory};

/// The dialog's tabs. Exactly one is active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Tab {
    #[default]
    Balance,
    Connect,
    Transaction,
}

impl Tab {
    pub fn all() -> &'static [Tab] {
        &[Tab::Balance, Tab::Connect, Tab::Transaction]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Balance => "Balance",
            Tab::Connect => "Connect wallet",
            Tab::Transaction => "Payment",
        }
    }
}

/// Why an action launch was rejected. Surfaced to the user verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Precondition {
    NoNetwork,
    NoWallet,
    NoSender,
    NoRecipient,
    EmptyAddress,
    EmptyKey,
    BadAmount(AmountError),
    BalanceCheckRunning,
    SendRunning,
}

impl fmt::Display for Precondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoNetwork => write!(f, "Select a network"),
            Self::NoWallet => write!(f, "Select a wallet"),
            Self::NoSender => write!(f, "Select a sender"),
            Self::NoRecipient => write!(f, "Select a recipient"),
            Self::EmptyAddress => write!(f, "Enter a wallet address"),
            Self::EmptyKey => write!(f, "Enter a private key"),
            Self::BadAmount(err) => write!(f, "{err}"),
            Self::BalanceCheckRunning => {
                write!(f, "A balance check is already running")
            }
            Self::SendRunning => write!(f, "A payment is already in flight"),
        }
    }
}

/// A stored balance, tagged with the token it is denominated in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceResult {
    /// Display-unit amount fixed to four decimal places.
    pub amount: String,
    pub token_name: String,
}

/// Launch snapshot of a balance check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BalanceProbe {
    pub address: String,
    pub endpoint: String,
    token_name: String,
    epoch: u64,
}

/// What a balance completion did to the session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BalanceCompletion {
    /// Result stored and now showing.
    Stored(BalanceResult),
    /// Query failed; any prior result is still showing.
    Failed(ChainError),
    /// Selection changed after launch; outcome discarded.
    Stale,
}

/// Launch snapshot of a transfer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferOrder {
    pub secret: String,
    pub to: String,
    pub amount: String,
    pub endpoint: String,
}

/// One wallet dialog's worth of state. Multiple dialogs get one session
/// each; nothing here is shared.
#[derive(Clone, Debug)]
pub struct DialogSession {
    tab: Tab,
    networks: NetworkList,
    wallets: WalletDirectory,

    selected_network: Option<String>,
    selected_wallet: Option<String>,
    selected_sender: Option<String>,
    selected_recipient: Option<String>,

    pub address_draft: String,
    pub key_draft: String,
    pub amount_draft: String,

    balance: Option<BalanceResult>,
    balance_epoch: u64,
    checking_balance: bool,
    sending: bool,
}

impl DialogSession {
    pub fn new(networks: NetworkList, wallets: WalletDirectory) -> Self {
        Self {
            tab: Tab::default(),
            networks,
            wallets,
            selected_network: None,
            selected_wallet: None,
            selected_sender: None,
            selected_recipient: None,
            address_draft: String::new(),
            key_draft: String::new(),
            amount_draft: String::new(),
            balance: None,
            balance_epoch: 0,
            checking_balance: false,
            sending: false,
        }
    }

    // ─── Read side ───────────────────────────────────────────────────────

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn networks(&self) -> &NetworkList {
        &self.networks
    }

    pub fn wallets(&self) -> &WalletDirectory {
        &self.wallets
    }

    pub fn selected_network_id(&self) -> Option<&str> {
        self.selected_network.as_deref()
    }

    pub fn selected_wallet_id(&self) -> Option<&str> {
        self.selected_wallet.as_deref()
    }

    pub fn selected_sender_id(&self) -> Option<&str> {
        self.selected_sender.as_deref()
    }

    pub fn selected_recipient_id(&self) -> Option<&str> {
        self.selected_recipient.as_deref()
    }

    pub fn balance(&self) -> Option<&BalanceResult> {
        self.balance.as_ref()
    }

    pub fn checking_balance(&self) -> bool {
        self.checking_balance
    }

    pub fn sending(&self) -> bool {
        self.sending
    }

    /// The selected network resolved against the live list. A selection
    /// whose id has left the list counts as no selection.
    pub fn current_network(&self) -> Option<&NetworkDescriptor> {
        self.networks.by_id(self.selected_network.as_deref()?)
    }

    // ─── Pure state changes ──────────────────────────────────────────────

    pub fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
    }

    /// Selecting a network invalidates the stored balance and any balance
    /// check still in flight; both were computed against the old pairing.
    pub fn select_network(&mut self, id: &str) {
        if self.selected_network.as_deref() == Some(id) {
            return;
        }
        self.selected_network = Some(id.to_string());
        self.invalidate_balance();
    }

    pub fn select_wallet(&mut self, id: &str) {
        if self.selected_wallet.as_deref() == Some(id) {
            return;
        }
        self.selected_wallet = Some(id.to_string());
        self.invalidate_balance();
    }

    pub fn select_sender(&mut self, id: &str) {
        self.selected_sender = Some(id.to_string());
    }

    pub fn select_recipient(&mut self, id: &str) {
        self.selected_recipient = Some(id.to_string());
    }

    fn invalidate_balance(&mut self) {
        self.balance = None;
        self.balance_epoch += 1;
    }

    // ─── Wallet connect (no external call) ───────────────────────────────

    /// Add the drafted address/key pair to the wallet set. Drafts are
    /// cleared only when a record was actually appended.
    pub fn connect_wallet(&mut self) -> Result<ConnectOutcome, Precondition> {
        let address = self.address_draft.trim().to_string();
        let key = self.key_draft.trim().to_string();
        if address.is_empty() {
            return Err(Precondition::EmptyAddress);
        }
        if key.is_empty() {
            return Err(Precondition::EmptyKey);
        }

        let outcome = self.wallets.add(address, key);
        if outcome == ConnectOutcome::Added {
            self.address_draft.clear();
            self.key_draft.clear();
        }
        Ok(outcome)
    }

    // ─── Balance check ───────────────────────────────────────────────────

    pub fn begin_balance_check(&mut self) -> Result<BalanceProbe, Precondition> {
        if self.checking_balance {
            return Err(Precondition::BalanceCheckRunning);
        }
        let network = self.current_network().ok_or(Precondition::NoNetwork)?;
        let wallet = self
            .selected_wallet
            .as_deref()
            .and_then(|id| self.wallets.by_id(id))
            .ok_or(Precondition::NoWallet)?;

        let probe = BalanceProbe {
            address: wallet.name.clone(),
            endpoint: network.id.clone(),
            token_name: network.token_name.clone(),
            epoch: self.balance_epoch,
        };
        self.checking_balance = true;
        Ok(probe)
    }

    /// Apply the outcome of a balance check. The latch drops on every path;
    /// the result is stored only when the probe's epoch still matches and
    /// the query succeeded. A failed query leaves any prior result showing.
    pub fn complete_balance_check(
        &mut self,
        probe: &BalanceProbe,
        outcome: Result<String, ChainError>,
    ) -> BalanceCompletion {
        self.checking_balance = false;
        if probe.epoch != self.balance_epoch {
            return BalanceCompletion::Stale;
        }
        match outcome {
            Ok(raw) => {
                let result = BalanceResult {
                    amount: amount::fixed_decimals(&raw, BALANCE_DISPLAY_DECIMALS),
                    token_name: probe.token_name.clone(),
                };
                self.balance = Some(result.clone());
                BalanceCompletion::Stored(result)
            }
            Err(err) => BalanceCompletion::Failed(err),
        }
    }

    // ─── Transfer ────────────────────────────────────────────────────────

    /// Sender and recipient may be the same record; a self-transfer is valid
    /// on-chain and the node enforces whatever policy applies.
    pub fn begin_transfer(&mut self) -> Result<TransferOrder, Precondition> {
        if self.sending {
            return Err(Precondition::SendRunning);
        }
        let sender = self
            .selected_sender
            .as_deref()
            .and_then(|id| self.wallets.by_id(id))
            .ok_or(Precondition::NoSender)?;
        let recipient = self
            .selected_recipient
            .as_deref()
            .and_then(|id| self.wallets.by_id(id))
            .ok_or(Precondition::NoRecipient)?;
        let network = self.current_network().ok_or(Precondition::NoNetwork)?;

        let amount = self.amount_draft.trim().to_string();
        amount::validate_display_amount(&amount).map_err(Precondition::BadAmount)?;

        let order = TransferOrder {
            secret: sender.id.clone(),
            to: recipient.name.clone(),
            amount,
            endpoint: network.id.clone(),
        };
        self.sending = true;
        Ok(order)
    }

    /// Drop the send latch and hand the outcome back for notification.
    pub fn complete_transfer(
        &mut self,
        outcome: Result<TransferReceipt, ChainError>,
    ) -> Result<TransferReceipt, ChainError> {
        self.sending = false;
        if outcome.is_ok() {
            self.amount_draft.clear();
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wallet::WalletRecord;

    fn session() -> DialogSession {
        let networks = NetworkList::new(vec![NetworkDescriptor {
            id: "N1".into(),
            name: "Net1".into(),
            token_name: "T1".into(),
        }]);
        let wallets = WalletDirectory::new(vec![WalletRecord {
            id: "W1".into(),
            name: "0xAAA".into(),
        }]);
        DialogSession::new(networks, wallets)
    }

    fn two_wallet_session() -> DialogSession {
        let networks = NetworkList::new(vec![NetworkDescriptor {
            id: "N1".into(),
            name: "Net1".into(),
            token_name: "T1".into(),
        }]);
        let wallets = WalletDirectory::new(vec![
            WalletRecord {
                id: "W1".into(),
                name: "0xAAA".into(),
            },
            WalletRecord {
                id: "W2".into(),
                name: "0xBBB".into(),
            },
        ]);
        DialogSession::new(networks, wallets)
    }

    #[test]
    fn tab_switch_preserves_selections() {
        let mut s = session();
        s.select_network("N1");
        s.select_wallet("W1");
        s.select_tab(Tab::Connect);
        s.select_tab(Tab::Balance);
        assert_eq!(s.selected_network_id(), Some("N1"));
        assert_eq!(s.selected_wallet_id(), Some("W1"));
    }

    #[test]
    fn balance_check_without_wallet_is_rejected() {
        let mut s = session();
        s.select_network("N1");
        assert_eq!(s.begin_balance_check(), Err(Precondition::NoWallet));
        assert!(!s.checking_balance());
    }

    #[test]
    fn balance_check_without_network_is_rejected() {
        let mut s = session();
        s.select_wallet("W1");
        assert_eq!(s.begin_balance_check(), Err(Precondition::NoNetwork));
    }

    #[test]
    fn balance_probe_carries_address_and_endpoint() {
        let mut s = session();
        s.select_network("N1");
        s.select_wallet("W1");
        let probe = s.begin_balance_check().unwrap();
        assert_eq!(probe.address, "0xAAA");
        assert_eq!(probe.endpoint, "N1");
        assert!(s.checking_balance());
    }

    #[test]
    fn balance_result_is_truncated_and_tagged() {
        let mut s = session();
        s.select_network("N1");
        s.select_wallet("W1");
        let probe = s.begin_balance_check().unwrap();
        let done = s.complete_balance_check(&probe, Ok("1.23456".into()));
        let stored = BalanceResult {
            amount: "1.2345".into(),
            token_name: "T1".into(),
        };
        assert_eq!(done, BalanceCompletion::Stored(stored.clone()));
        assert_eq!(s.balance(), Some(&stored));
        assert!(!s.checking_balance());
    }

    #[test]
    fn changing_network_clears_balance_immediately() {
        let mut s = session();
        s.select_network("N1");
        s.select_wallet("W1");
        let probe = s.begin_balance_check().unwrap();
        s.complete_balance_check(&probe, Ok("5".into()));
        assert!(s.balance().is_some());

        s.select_network("N2");
        assert!(s.balance().is_none());
    }

    #[test]
    fn changing_wallet_clears_balance_immediately() {
        let mut s = two_wallet_session();
        s.select_network("N1");
        s.select_wallet("W1");
        let probe = s.begin_balance_check().unwrap();
        s.complete_balance_check(&probe, Ok("5".into()));

        s.select_wallet("W2");
        assert!(s.balance().is_none());
    }

    #[test]
    fn reselecting_same_wallet_keeps_balance() {
        let mut s = session();
        s.select_network("N1");
        s.select_wallet("W1");
        let probe = s.begin_balance_check().unwrap();
        s.complete_balance_check(&probe, Ok("5".into()));

        s.select_wallet("W1");
        assert!(s.balance().is_some());
    }

    #[test]
    fn stale_completion_is_discarded() {
        let mut s = two_wallet_session();
        s.select_network("N1");
        s.select_wallet("W1");
        let probe = s.begin_balance_check().unwrap();

        // Selection changes while the query is in flight.
        s.select_wallet("W2");
        let done = s.complete_balance_check(&probe, Ok("9.9999".into()));
        assert_eq!(done, BalanceCompletion::Stale);
        assert!(s.balance().is_none());
        assert!(!s.checking_balance());
    }

    #[test]
    fn failed_check_keeps_prior_result_and_drops_latch() {
        let mut s = session();
        s.select_network("N1");
        s.select_wallet("W1");
        let probe = s.begin_balance_check().unwrap();
        s.complete_balance_check(&probe, Ok("5".into()));

        let probe = s.begin_balance_check().unwrap();
        let done = s.complete_balance_check(
            &probe,
            Err(ChainError::Transport("connection refused".into())),
        );
        assert!(matches!(done, BalanceCompletion::Failed(_)));
        assert_eq!(s.balance().unwrap().amount, "5.0000");
        assert!(!s.checking_balance());
    }

    #[test]
    fn second_balance_check_while_running_is_rejected() {
        let mut s = session();
        s.select_network("N1");
        s.select_wallet("W1");
        let _probe = s.begin_balance_check().unwrap();
        assert_eq!(
            s.begin_balance_check(),
            Err(Precondition::BalanceCheckRunning)
        );
    }

    #[test]
    fn connect_appends_and_clears_drafts() {
        let mut s = session();
        s.address_draft = "0xNEW".into();
        s.key_draft = "kNEW".into();
        assert_eq!(s.connect_wallet(), Ok(ConnectOutcome::Added));
        assert!(s.address_draft.is_empty());
        assert!(s.key_draft.is_empty());
        assert_eq!(s.wallets().entries().len(), 2);
    }

    #[test]
    fn connect_known_pair_is_noop() {
        let mut s = session();
        s.address_draft = "0xAAA".into();
        s.key_draft = "W1".into();
        assert_eq!(s.connect_wallet(), Ok(ConnectOutcome::AlreadyKnown));
        assert_eq!(s.wallets().entries().len(), 1);
    }

    #[test]
    fn connect_requires_both_drafts() {
        let mut s = session();
        s.key_draft = "k1".into();
        assert_eq!(s.connect_wallet(), Err(Precondition::EmptyAddress));
        s.address_draft = "0xNEW".into();
        s.key_draft = "  ".into();
        assert_eq!(s.connect_wallet(), Err(Precondition::EmptyKey));
    }

    #[test]
    fn transfer_requires_selections_and_amount() {
        let mut s = two_wallet_session();
        assert_eq!(s.begin_transfer(), Err(Precondition::NoSender));
        s.select_sender("W1");
        assert_eq!(s.begin_transfer(), Err(Precondition::NoRecipient));
        s.select_recipient("W2");
        assert_eq!(s.begin_transfer(), Err(Precondition::NoNetwork));
        s.select_network("N1");
        assert_eq!(
            s.begin_transfer(),
            Err(Precondition::BadAmount(AmountError::Empty))
        );
        s.amount_draft = "0".into();
        assert_eq!(
            s.begin_transfer(),
            Err(Precondition::BadAmount(AmountError::NotPositive))
        );
    }

    #[test]
    fn transfer_order_binds_launch_time_state() {
        let mut s = two_wallet_session();
        s.select_network("N1");
        s.select_sender("W1");
        s.select_recipient("W2");
        s.amount_draft = "1.5".into();
        let order = s.begin_transfer().unwrap();
        assert_eq!(order.secret, "W1");
        assert_eq!(order.to, "0xBBB");
        assert_eq!(order.amount, "1.5");
        assert_eq!(order.endpoint, "N1");
        assert!(s.sending());
    }

    #[test]
    fn self_transfer_passes_validation() {
        let mut s = session();
        s.select_network("N1");
        s.select_sender("W1");
        s.select_recipient("W1");
        s.amount_draft = "2".into();
        let order = s.begin_transfer().unwrap();
        assert_eq!(order.secret, "W1");
        assert_eq!(order.to, "0xAAA");
    }

    #[test]
    fn second_transfer_while_sending_is_rejected() {
        let mut s = two_wallet_session();
        s.select_network("N1");
        s.select_sender("W1");
        s.select_recipient("W2");
        s.amount_draft = "1".into();
        let _order = s.begin_transfer().unwrap();
        assert_eq!(s.begin_transfer(), Err(Precondition::SendRunning));
    }

    #[test]
    fn transfer_completion_drops_latch_on_both_paths() {
        let mut s = two_wallet_session();
        s.select_network("N1");
        s.select_sender("W1");
        s.select_recipient("W2");
        s.amount_draft = "1".into();

        let _order = s.begin_transfer().unwrap();
        let receipt = TransferReceipt {
            tx_hash: "0xfeed".into(),
            amount: "1".into(),
            to: "0xBBB".into(),
        };
        assert!(s.complete_transfer(Ok(receipt)).is_ok());
        assert!(!s.sending());
        assert!(s.amount_draft.is_empty());

        s.amount_draft = "1".into();
        let _order = s.begin_transfer().unwrap();
        let failed =
            s.complete_transfer(Err(ChainError::Rejected("nonce too low".into())));
        assert!(failed.is_err());
        assert!(!s.sending());
        assert_eq!(s.amount_draft, "1");
    }

    #[test]
    fn orphaned_selection_counts_as_unselected() {
        let mut s = session();
        s.select_network("N1");
        s.select_wallet("GONE");
        assert_eq!(s.begin_balance_check(), Err(Precondition::NoWallet));
    }
}
