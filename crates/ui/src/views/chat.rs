use std::sync::Arc;

use dioxus::core::spawn_forever;
use dioxus::document::eval;
use dioxus::prelude::*;
use lingua_core::model::{ChatInput, Message, MessagePatch, Transcript, UserSettings};
use services::{AppStateStore, ChatError, ChatService};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{MessageBody, MessageVm, map_messages};

/// Chat state owned by the layout.
///
/// It outlives `ChatView`, so a reply keeps streaming into it while the learner
/// is on another page.
#[derive(Clone, Copy, PartialEq)]
pub struct ChatSession {
    transcript: Signal<Transcript>,
    in_flight: Signal<bool>,
    error: Signal<Option<ViewError>>,
}

impl ChatSession {
    #[must_use]
    pub fn new(
        transcript: Signal<Transcript>,
        in_flight: Signal<bool>,
        error: Signal<Option<ViewError>>,
    ) -> Self {
        Self {
            transcript,
            in_flight,
            error,
        }
    }

    #[must_use]
    pub fn transcript(&self) -> Signal<Transcript> {
        self.transcript
    }

    #[must_use]
    pub fn error(&self) -> Option<ViewError> {
        self.error.read().clone()
    }

    /// True from the moment a message is submitted until its reply settles.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        *self.in_flight.read() || self.transcript.read().is_awaiting_reply()
    }

    /// Submit `raw` and stream the reply into the transcript.
    ///
    /// Blank input only sets the inline error. Returns `false` when nothing was
    /// sent. The reply runs on a root-scoped task so unmounting the chat does
    /// not cancel it.
    pub fn send(
        mut self,
        chat: Arc<ChatService>,
        store: Arc<AppStateStore>,
        raw: &str,
    ) -> bool {
        if self.is_busy() {
            tracing::debug!("submit ignored while a reply streams");
            return false;
        }
        if let Err(err) = ChatInput::parse(raw) {
            self.error.set(Some(ViewError::from(ChatError::from(err))));
            return false;
        }

        self.in_flight.set(true);
        self.error.set(None);
        let raw = raw.to_string();
        let _ = spawn_forever(async move {
            match chat.submit(&raw).await {
                Ok(pending) => {
                    self.reload(&store);
                    chat.stream_reply(&pending, move |updated: &Message| {
                        self.apply(updated);
                    })
                    .await;
                }
                Err(err) => self.error.set(Some(ViewError::from(err))),
            }
            self.reload(&store);
            self.in_flight.set(false);
        });
        true
    }

    fn reload(mut self, store: &AppStateStore) {
        match store.snapshot() {
            Ok(state) => self.transcript.set(state.transcript),
            Err(err) => tracing::warn!(error = %err, "could not read transcript"),
        }
    }

    fn apply(mut self, updated: &Message) {
        let patch = MessagePatch {
            content: Some(updated.content().to_string()),
            is_streaming: Some(updated.is_streaming()),
        };
        self.transcript.with_mut(|transcript| {
            transcript.apply_patch(updated.id(), &patch);
        });
    }
}

/// What the chat form can ask for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatIntent {
    Edit(String),
    Submit,
}

#[component]
pub fn ChatView() -> Element {
    let ctx = use_context::<AppContext>();
    let settings = use_context::<Signal<UserSettings>>();
    let session = use_context::<ChatSession>();
    let transcript = session.transcript();
    let mut draft = use_signal(String::new);

    use_effect(move || {
        let _ = transcript.read().len();
        let _ = eval("document.getElementById('chat-end')?.scrollIntoView({ behavior: 'smooth' });");
    });

    let dispatch = use_callback(move |intent: ChatIntent| match intent {
        ChatIntent::Edit(value) => draft.set(value),
        ChatIntent::Submit => {
            let raw = draft.peek().clone();
            if session.send(ctx.chat(), ctx.store(), &raw) {
                draft.set(String::new());
            }
        }
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ChatTestHandles>() {
                handles.register(dispatch);
            }
        }
    }

    let awaiting = session.is_busy();
    let rows = map_messages(transcript.read().messages(), settings.read().name());

    rsx! {
        section { class: "chat",
            div { class: "chat-scroll",
                for row in rows {
                    ChatBubble { key: "{row.id}", row }
                }
                div { id: "chat-end" }
            }

            form {
                class: "chat-form",
                onsubmit: move |evt: FormEvent| {
                    evt.prevent_default();
                    dispatch.call(ChatIntent::Submit);
                },
                div { class: "chat-field",
                    input {
                        id: "chat-input",
                        r#type: "text",
                        autocomplete: "off",
                        placeholder: "Your text here",
                        value: "{draft}",
                        oninput: move |evt| dispatch.call(ChatIntent::Edit(evt.value())),
                    }
                    if let Some(err) = session.error() {
                        p { class: "field-error", "{err.message()}" }
                    }
                }
                button {
                    r#type: "submit",
                    class: "btn btn-primary",
                    disabled: awaiting,
                    "Submit"
                }
            }
        }
    }
}

#[component]
fn ChatBubble(row: MessageVm) -> Element {
    rsx! {
        div { class: row.bubble_class(),
            if let Some(label) = row.label.as_ref() {
                span { class: "bubble-label", "{label}" }
            }
            match &row.body {
                MessageBody::Text(text) => rsx! {
                    span { class: "bubble-text", "{text}" }
                },
                MessageBody::Html(html) => rsx! {
                    div { class: "markdown", dangerous_inner_html: "{html}" }
                },
            }
            if row.show_cursor {
                span { class: "streaming-cursor" }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct ChatTestHandles {
    dispatch: std::rc::Rc<std::cell::RefCell<Option<Callback<ChatIntent>>>>,
}

#[cfg(test)]
impl ChatTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<ChatIntent>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
    }

    pub(crate) fn dispatch(&self) -> Callback<ChatIntent> {
        (*self.dispatch.borrow()).expect("chat dispatch registered")
    }
}
