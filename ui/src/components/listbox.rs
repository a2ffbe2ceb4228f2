use dioxus::prelude::*;

/// One selectable entry: a stable identifier plus its display label.
#[derive(Clone, Debug, PartialEq)]
pub struct ListOption {
    pub id: String,
    pub name: String,
}

/// Generic dropdown over a list of labeled options.
///
/// The caller owns the selection and passes it back in as an id; the control
/// resolves it against the current options for display, so a selection whose
/// id has left the list falls back to the placeholder. `on_select` fires
/// exactly once per user pick and carries the full option, never just the
/// id. An empty option list renders a single inert row.
#[component]
pub fn ListBox(
    label: Option<String>,
    placeholder: Option<String>,
    options: Vec<ListOption>,
    #[props(!optional)] selected: Option<String>,
    on_select: EventHandler<ListOption>,
) -> Element {
    let mut open = use_signal(|| false);

    let current = selected
        .as_ref()
        .and_then(|id| options.iter().find(|o| &o.id == id))
        .cloned();
    let has_selection = current.is_some();
    let button_text = match current {
        Some(option) => option.name,
        None => placeholder.unwrap_or_else(|| "Select an option".to_string()),
    };
    let is_open = open();

    rsx! {
        div { class: "listbox",
            if let Some(text) = label {
                span { class: "listbox-label", "{text}" }
            }
            button {
                class: "listbox-btn",
                "data-active": has_selection,
                onclick: move |_| {
                    let showing = open();
                    open.set(!showing);
                },
                span { class: "listbox-value", "{button_text}" }
                span { class: "listbox-chevron",
                    if is_open { "▴" } else { "▾" }
                }
            }
            if is_open {
                ul { class: "listbox-options",
                    if options.is_empty() {
                        li { class: "listbox-empty", "Nothing to select" }
                    }
                    for option in options.clone() {
                        {
                            let key = option.id.clone();
                            let display = option.name.clone();
                            rsx! {
                                li {
                                    key: "{key}",
                                    class: "listbox-option",
                                    onclick: move |_| {
                                        open.set(false);
                                        on_select.call(option.clone());
                                    },
                                    "{display}"
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
