use dioxus::prelude::*;

/// Field kinds the dialog uses. Maps onto the HTML input `type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Number,
    Password,
}

impl InputKind {
    fn as_html(self) -> &'static str {
        match self {
            InputKind::Text => "text",
            InputKind::Number => "number",
            InputKind::Password => "password",
        }
    }
}

/// Labeled field forwarding every resulting value to `on_input`. Validation
/// is the caller's job.
#[component]
pub fn TextInput(
    label: String,
    kind: InputKind,
    placeholder: Option<String>,
    value: String,
    on_input: EventHandler<String>,
) -> Element {
    rsx! {
        div { class: "form-group",
            label { "{label}" }
            input {
                r#type: kind.as_html(),
                placeholder: placeholder.unwrap_or_default(),
                value: "{value}",
                oninput: move |evt| on_input.call(evt.value()),
            }
        }
    }
}
