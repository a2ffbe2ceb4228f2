use dioxus::prelude::*;

/// Modal shell: dimmed overlay, centered panel, title header with a cross
/// button. Content renders between header and footer; the shell owns no
/// state beyond relaying close requests.
#[component]
pub fn ModalDialog(title: String, on_close: EventHandler<()>, children: Element) -> Element {
    rsx! {
        div { class: "modal-overlay",
            div { class: "modal-dialog",
                header { class: "modal-header",
                    h2 { "{title}" }
                    button {
                        class: "modal-close",
                        onclick: move |_| on_close.call(()),
                        "✕"
                    }
                }
                {children}
            }
        }
    }
}
