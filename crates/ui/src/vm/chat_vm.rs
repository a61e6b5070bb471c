use lingua_core::model::{Author, Message, MessageId};

use super::markdown_vm::markdown_to_html;

/// Display name shown above every tutor reply.
pub const TUTOR_LABEL: &str = "Teacher";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MessageBody {
    Text(String),
    /// Sanitized HTML rendered from markdown.
    Html(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageVm {
    pub id: MessageId,
    pub author: Author,
    pub label: Option<String>,
    pub body: MessageBody,
    pub show_cursor: bool,
}

impl MessageVm {
    #[must_use]
    pub fn bubble_class(&self) -> &'static str {
        match self.author {
            Author::User => "bubble bubble-user",
            Author::System => "bubble bubble-tutor",
        }
    }
}

/// Map the transcript to display rows.
///
/// Learner messages carry `user_name` only when they start a run of
/// consecutive learner messages. Tutor replies are always labelled and
/// rendered as markdown.
#[must_use]
pub fn map_messages(messages: &[Message], user_name: &str) -> Vec<MessageVm> {
    messages
        .iter()
        .enumerate()
        .map(|(index, message)| {
            let previous = index
                .checked_sub(1)
                .and_then(|prev| messages.get(prev))
                .map(Message::author);
            match message.author() {
                Author::User => MessageVm {
                    id: message.id(),
                    author: Author::User,
                    label: (previous != Some(Author::User)).then(|| user_name.to_string()),
                    body: MessageBody::Text(message.content().to_string()),
                    show_cursor: false,
                },
                Author::System => MessageVm {
                    id: message.id(),
                    author: Author::System,
                    label: Some(TUTOR_LABEL.to_string()),
                    body: MessageBody::Html(markdown_to_html(message.content())),
                    show_cursor: message.is_streaming(),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingua_core::model::{ChatInput, MessagePatch};

    fn user(text: &str) -> Message {
        Message::user(&ChatInput::parse(text).unwrap())
    }

    fn reply(text: &str, streaming: bool) -> Message {
        let mut message = Message::reply_placeholder();
        message.apply(&MessagePatch {
            content: Some(text.to_string()),
            is_streaming: Some(streaming),
        });
        message
    }

    #[test]
    fn learner_label_only_starts_a_run() {
        let messages = vec![
            user("Hola"),
            user("Qué tal?"),
            reply("Bien", false),
            user("Gracias"),
        ];
        let rows = map_messages(&messages, "Ana");
        let labels: Vec<Option<&str>> = rows.iter().map(|row| row.label.as_deref()).collect();
        assert_eq!(
            labels,
            vec![Some("Ana"), None, Some("Teacher"), Some("Ana")]
        );
    }

    #[test]
    fn tutor_replies_render_markdown_with_cursor_while_streaming() {
        let rows = map_messages(&[reply("**Hola**", true)], "You");
        assert_eq!(
            rows[0].body,
            MessageBody::Html("<p><strong>Hola</strong></p>\n".to_string())
        );
        assert!(rows[0].show_cursor);
        assert_eq!(rows[0].bubble_class(), "bubble bubble-tutor");
    }

    #[test]
    fn learner_text_is_not_interpreted() {
        let rows = map_messages(&[user("**literal**")], "You");
        assert_eq!(rows[0].body, MessageBody::Text("**literal**".to_string()));
        assert!(!rows[0].show_cursor);
    }
}
