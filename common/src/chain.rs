use serde::{Deserialize, Serialize};

/// Receipt returned by the node once a transfer is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    /// Transaction hash assigned by the node.
    pub tx_hash: String,
    /// Amount moved, as a display-unit decimal string.
    pub amount: String,
    /// Recipient address.
    pub to: String,
}

/// Errors from chain operations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChainError {
    /// The node did not recognise the address.
    InvalidAddress(String),
    /// The amount draft could not be converted to base units.
    InvalidAmount(String),
    /// The sender cannot cover the transfer.
    InsufficientFunds { available: String, requested: String },
    /// The node accepted the request shape but rejected it.
    Rejected(String),
    /// The node could not be reached or answered garbage.
    Transport(String),
}

impl std::fmt::Display for ChainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidAddress(addr) => write!(f, "invalid address: {addr}"),
            Self::InvalidAmount(msg) => write!(f, "invalid amount: {msg}"),
            Self::InsufficientFunds {
                available,
                requested,
            } => write!(
                f,
                "insufficient funds: have {available}, need {requested}"
            ),
            Self::Rejected(msg) => write!(f, "rejected by node: {msg}"),
            Self::Transport(msg) => write!(f, "node unreachable: {msg}"),
        }
    }
}

/// Abstraction over the node a network endpoint points at.
///
/// A client is bound to one endpoint URL at construction; the dialog builds
/// a fresh client from the launch snapshot of each action, so a selection
/// change mid-flight never redirects an operation. Amounts are decimal
/// strings in the display unit on both methods; base-unit conversion is the
/// client's concern.
#[allow(async_fn_in_trait)]
pub trait ChainClient {
    /// Current balance of `address`, as a display-unit decimal string.
    async fn query_balance(&self, address: &str) -> Result<String, ChainError>;

    /// Sign a transfer of `amount` to `to` with `secret` and submit it,
    /// waiting for the node's acceptance.
    async fn submit_transfer(
        &self,
        secret: &str,
        to: &str,
        amount: &str,
    ) -> Result<TransferReceipt, ChainError>;
}
