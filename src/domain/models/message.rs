#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use chrono::Local;

use super::Role;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MessageType {
    Normal,
    Error,
}

/// A single entry in the chat log. Messages are never mutated after
/// construction, so every field is read through a getter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Message {
    role: Role,
    content: String,
    media: Option<String>,
    timestamp: String,
    mtype: MessageType,
}

fn timestamp_now() -> String {
    return Local::now().format("%I:%M %p").to_string();
}

impl Message {
    pub fn new(role: Role, text: &str) -> Message {
        return Message::new_with_type(role, MessageType::Normal, text);
    }

    pub fn new_with_type(role: Role, mtype: MessageType, text: &str) -> Message {
        return Message {
            role,
            content: text.to_string(),
            media: None,
            timestamp: timestamp_now(),
            mtype,
        };
    }

    /// Media can only be attached to assistant messages.
    pub fn new_with_media(text: &str, media: Option<String>) -> Message {
        let mut message = Message::new(Role::Assistant, text);
        message.media = media;
        return message;
    }

    pub fn role(&self) -> Role {
        return self.role;
    }

    pub fn content(&self) -> &str {
        return &self.content;
    }

    pub fn media(&self) -> Option<&str> {
        return self.media.as_deref();
    }

    pub fn timestamp(&self) -> &str {
        return &self.timestamp;
    }

    pub fn message_type(&self) -> MessageType {
        return self.mtype;
    }

    /// Formats the message for line based output: a header with the author and
    /// capture time, the indented content, and the media reference if any.
    pub fn as_string_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("[{}] {}:", self.timestamp, self.role)];

        for line in self.content.split('\n') {
            if line.trim().is_empty() {
                lines.push("".to_string());
                continue;
            }
            lines.push(format!("  {line}"));
        }

        if let Some(media) = &self.media {
            lines.push(format!("  [image] {media}"));
        }

        return lines;
    }
}
