use dioxus::prelude::*;

use saldo_common::network::NetworkList;
use saldo_common::session::DialogSession;
use saldo_common::wallet::WalletDirectory;

use super::notices::{NoticeBoard, NoticeTray};
use super::wallet_dialog::WalletDialog;

static STYLES: Asset = asset!("/assets/saldo.css");

#[component]
pub fn App() -> Element {
    use_context_provider(|| {
        Signal::new(DialogSession::new(
            NetworkList::seeded(),
            WalletDirectory::default(),
        ))
    });
    use_context_provider(|| Signal::new(NoticeBoard::default()));

    let mut dialog_open = use_signal(|| false);

    rsx! {
        document::Stylesheet { href: STYLES }
        div { class: "saldo-app",
            header { class: "app-header",
                h1 { "Saldo" }
                p { "Check balances and send native-asset payments" }
            }
            main {
                button {
                    class: "btn-primary open-wallet",
                    onclick: move |_| dialog_open.set(true),
                    "Open wallet"
                }
            }
            if dialog_open() {
                WalletDialog { on_close: move |_| dialog_open.set(false) }
            }
            NoticeTray {}
        }
    }
}
