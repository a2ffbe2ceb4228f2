//! The wallet dialog controller.
//!
//! Renders the tabbed panel over one `DialogSession` and dispatches the two
//! chain actions. Components read the session from shared context, mutate it
//! through its methods, and hand launch snapshots to `spawn`ed futures; the
//! future reports back through the session's `complete_*` methods, so a
//! completion that outlived its selections is discarded there, not here.

use dioxus::prelude::*;

use saldo_common::chain::ChainClient;
use saldo_common::session::{BalanceCompletion, DialogSession, Tab};
use saldo_common::wallet::ConnectOutcome;

use super::chain_remote::ChainRemote;
use super::listbox::{ListBox, ListOption};
use super::modal::ModalDialog;
use super::notices::{use_notices, NoticeKind};
use super::text_input::{InputKind, TextInput};

pub fn use_dialog_session() -> Signal<DialogSession> {
    use_context::<Signal<DialogSession>>()
}

fn network_options(session: &DialogSession) -> Vec<ListOption> {
    session
        .networks()
        .entries()
        .iter()
        .map(|n| ListOption {
            id: n.id.clone(),
            name: n.name.clone(),
        })
        .collect()
}

fn wallet_options(session: &DialogSession) -> Vec<ListOption> {
    session
        .wallets()
        .entries()
        .iter()
        .map(|w| ListOption {
            id: w.id.clone(),
            name: w.name.clone(),
        })
        .collect()
}

#[component]
pub fn WalletDialog(on_close: EventHandler<()>) -> Element {
    let mut session = use_dialog_session();

    let tab = session.read().tab();
    let networks = network_options(&session.read());
    let selected_network = session.read().selected_network_id().map(str::to_string);

    rsx! {
        ModalDialog {
            title: "Balance/Payment".to_string(),
            on_close: move |_| on_close.call(()),

            ListBox {
                label: "Network".to_string(),
                placeholder: "Select a network".to_string(),
                options: networks,
                selected: selected_network,
                on_select: move |opt: ListOption| session.write().select_network(&opt.id),
            }

            nav { class: "dialog-tabs",
                for t in Tab::all() {
                    button {
                        class: if *t == tab { "tab-btn tab-active" } else { "tab-btn" },
                        onclick: move |_| session.write().select_tab(*t),
                        {t.label()}
                    }
                }
            }

            match tab {
                Tab::Balance => rsx! { BalanceTab {} },
                Tab::Connect => rsx! { ConnectTab {} },
                Tab::Transaction => rsx! { TransactionTab {} },
            }

            footer { class: "dialog-footer",
                button {
                    class: "btn-secondary",
                    onclick: move |_| on_close.call(()),
                    "Cancel"
                }
            }
        }
    }
}

#[component]
fn BalanceTab() -> Element {
    let mut session = use_dialog_session();
    let mut notices = use_notices();

    let wallets = wallet_options(&session.read());
    let selected_wallet = session.read().selected_wallet_id().map(str::to_string);
    let checking = session.read().checking_balance();
    let balance = session.read().balance().cloned();

    let check = move |_| {
        let launch = session.write().begin_balance_check();
        match launch {
            Ok(probe) => {
                tracing::debug!(
                    endpoint = %probe.endpoint,
                    address = %probe.address,
                    "balance check started"
                );
                spawn(async move {
                    let client = ChainRemote::new(probe.endpoint.clone());
                    let outcome = client.query_balance(&probe.address).await;
                    let done = session.write().complete_balance_check(&probe, outcome);
                    match done {
                        BalanceCompletion::Stored(_) => {}
                        BalanceCompletion::Failed(err) => {
                            tracing::warn!(%err, "balance check failed");
                            notices
                                .write()
                                .push(NoticeKind::Error, format!("Balance check failed: {err}"));
                        }
                        BalanceCompletion::Stale => {
                            tracing::debug!("stale balance result discarded");
                        }
                    }
                });
            }
            Err(precondition) => {
                notices.write().push(NoticeKind::Info, precondition.to_string());
            }
        }
    };

    rsx! {
        div { class: "tab-panel",
            ListBox {
                label: "Wallet".to_string(),
                placeholder: "Select a wallet".to_string(),
                options: wallets,
                selected: selected_wallet,
                on_select: move |opt: ListOption| session.write().select_wallet(&opt.id),
            }
            button {
                class: "btn-primary",
                disabled: checking,
                onclick: check,
                if checking { "Checking…" } else { "Check balance" }
            }
            if let Some(result) = balance {
                div { class: "balance-result",
                    span { class: "balance-amount", "{result.amount}" }
                    span { class: "balance-token", " {result.token_name}" }
                }
            }
        }
    }
}

#[component]
fn ConnectTab() -> Element {
    let mut session = use_dialog_session();
    let mut notices = use_notices();

    let address = session.read().address_draft.clone();
    let key = session.read().key_draft.clone();

    let connect = move |_| {
        let outcome = session.write().connect_wallet();
        match outcome {
            Ok(ConnectOutcome::Added) => {
                notices.write().push(NoticeKind::Success, "Wallet connected");
            }
            Ok(ConnectOutcome::AlreadyKnown) => {
                notices
                    .write()
                    .push(NoticeKind::Info, "Wallet is already in the list");
            }
            Err(precondition) => {
                notices.write().push(NoticeKind::Info, precondition.to_string());
            }
        }
    };

    rsx! {
        div { class: "tab-panel",
            TextInput {
                label: "Wallet address".to_string(),
                kind: InputKind::Text,
                placeholder: "0x…".to_string(),
                value: address,
                on_input: move |v: String| session.write().address_draft = v,
            }
            TextInput {
                label: "Private key".to_string(),
                kind: InputKind::Password,
                placeholder: "Stays in this session".to_string(),
                value: key,
                on_input: move |v: String| session.write().key_draft = v,
            }
            button { class: "btn-primary", onclick: connect, "Connect wallet" }
        }
    }
}

#[component]
fn TransactionTab() -> Element {
    let mut session = use_dialog_session();
    let mut notices = use_notices();

    let wallets = wallet_options(&session.read());
    let selected_sender = session.read().selected_sender_id().map(str::to_string);
    let selected_recipient = session.read().selected_recipient_id().map(str::to_string);
    let amount = session.read().amount_draft.clone();
    let sending = session.read().sending();

    let send = move |_| {
        let launch = session.write().begin_transfer();
        match launch {
            Ok(order) => {
                tracing::debug!(
                    endpoint = %order.endpoint,
                    to = %order.to,
                    amount = %order.amount,
                    "transfer submitted"
                );
                spawn(async move {
                    let client = ChainRemote::new(order.endpoint.clone());
                    let outcome = client
                        .submit_transfer(&order.secret, &order.to, &order.amount)
                        .await;
                    let done = session.write().complete_transfer(outcome);
                    match done {
                        Ok(receipt) => {
                            notices.write().push(
                                NoticeKind::Success,
                                format!("Payment confirmed: {}", receipt.tx_hash),
                            );
                        }
                        Err(err) => {
                            tracing::warn!(%err, "transfer failed");
                            notices
                                .write()
                                .push(NoticeKind::Error, format!("Payment failed: {err}"));
                        }
                    }
                });
            }
            Err(precondition) => {
                notices.write().push(NoticeKind::Info, precondition.to_string());
            }
        }
    };

    rsx! {
        div { class: "tab-panel",
            ListBox {
                label: "From".to_string(),
                placeholder: "Select a sender".to_string(),
                options: wallets.clone(),
                selected: selected_sender,
                on_select: move |opt: ListOption| session.write().select_sender(&opt.id),
            }
            ListBox {
                label: "To".to_string(),
                placeholder: "Select a recipient".to_string(),
                options: wallets,
                selected: selected_recipient,
                on_select: move |opt: ListOption| session.write().select_recipient(&opt.id),
            }
            TextInput {
                label: "Amount".to_string(),
                kind: InputKind::Number,
                placeholder: "0.0".to_string(),
                value: amount,
                on_input: move |v: String| session.write().amount_draft = v,
            }
            button {
                class: "btn-primary",
                disabled: sending,
                onclick: send,
                if sending { "Sending…" } else { "Send" }
            }
        }
    }
}
