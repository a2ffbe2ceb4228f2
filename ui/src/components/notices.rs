use dioxus::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

impl NoticeKind {
    fn class(self) -> &'static str {
        match self {
            NoticeKind::Info => "notice notice-info",
            NoticeKind::Success => "notice notice-success",
            NoticeKind::Error => "notice notice-error",
        }
    }
}

/// One user-facing message.
#[derive(Clone, Debug, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub text: String,
}

/// The session's notice list, provided as shared context. Precondition
/// rejections, action outcomes and chain failures all land here; nothing in
/// the dialog blocks on a notice.
#[derive(Clone, Debug, Default)]
pub struct NoticeBoard {
    next_id: u64,
    entries: Vec<Notice>,
}

impl NoticeBoard {
    pub fn push(&mut self, kind: NoticeKind, text: impl Into<String>) {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notice {
            id,
            kind,
            text: text.into(),
        });
    }

    pub fn dismiss(&mut self, id: u64) {
        self.entries.retain(|n| n.id != id);
    }

    pub fn entries(&self) -> &[Notice] {
        &self.entries
    }
}

pub fn use_notices() -> Signal<NoticeBoard> {
    use_context::<Signal<NoticeBoard>>()
}

/// Renders the notice list as dismissible toasts in a corner stack.
#[component]
pub fn NoticeTray() -> Element {
    let mut notices = use_notices();
    let entries = notices.read().entries().to_vec();

    rsx! {
        div { class: "notice-tray",
            for notice in entries {
                {
                    let id = notice.id;
                    let class = notice.kind.class();
                    let text = notice.text.clone();
                    rsx! {
                        div { key: "{id}", class: class,
                            span { class: "notice-text", "{text}" }
                            button {
                                class: "notice-dismiss",
                                onclick: move |_| notices.write().dismiss(id),
                                "✕"
                            }
                        }
                    }
                }
            }
        }
    }
}
