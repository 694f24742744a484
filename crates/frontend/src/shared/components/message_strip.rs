use leptos::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Error,
    Success,
    Info,
}

impl MessageKind {
    fn class(self) -> &'static str {
        match self {
            MessageKind::Error => "message-strip message-strip--error",
            MessageKind::Success => "message-strip message-strip--success",
            MessageKind::Info => "message-strip message-strip--info",
        }
    }

    fn glyph(self) -> &'static str {
        match self {
            MessageKind::Error => "⚠",
            MessageKind::Success => "✓",
            MessageKind::Info => "ℹ",
        }
    }
}

/// Inline message near a form or list; renders nothing while `message` is None
#[component]
pub fn MessageStrip(
    #[prop(into)] message: Signal<Option<String>>,
    #[prop(optional)] kind: Option<MessageKind>,
) -> impl IntoView {
    let kind = kind.unwrap_or(MessageKind::Error);
    move || {
        message.get().map(|text| {
            view! {
                <div class=kind.class() role="status">
                    <span class="message-strip__glyph">{kind.glyph()}</span>
                    <span class="message-strip__text">{text}</span>
                </div>
            }
        })
    }
}
