use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// One chat's conversation log.
///
/// Messages can only be appended. The log lives as long as the session and
/// there is no way to clear it.
#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
    pending: bool,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_welcome(text: &str) -> Self {
        let mut session = Self::new();
        session.push(Sender::Bot, text.to_owned());
        session
    }

    /// Records a user submission and returns the trimmed text to answer.
    ///
    /// Blank input is ignored. While a reply is pending further submissions
    /// are refused, so replies stay in submission order.
    pub fn submit(&mut self, text: &str) -> Option<String> {
        let text = text.trim();
        if text.is_empty() || self.pending {
            return None;
        }

        self.push(Sender::User, text.to_owned());
        self.pending = true;
        Some(text.to_owned())
    }

    pub fn reply(&mut self, text: impl Into<String>) {
        self.push(Sender::Bot, text.into());
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    fn push(&mut self, sender: Sender, text: String) {
        self.messages.push(Message {
            sender,
            text,
            timestamp: Utc::now(),
        });
    }
}
