pub mod dispatch;

use chrono::{DateTime, Local};
use clap::ValueEnum;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::responders::ResponderSet;
pub use dispatch::{ChatCommand, DispatchOutcome, dispatch, reply_text};

/// Which responder handles the next message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    #[value(alias = "ia")]
    Chat,
    #[value(alias = "clima")]
    Weather,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Chat => "chat",
            Mode::Weather => "weather",
        }
    }

    /// Label used in the prompt and in `/mode` output.
    pub fn label(self) -> &'static str {
        match self {
            Mode::Chat => "Chat con IA",
            Mode::Weather => "Consultar Clima",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "chat" | "ia" => Ok(Mode::Chat),
            "weather" | "clima" => Ok(Mode::Weather),
            other => Err(format!("Unknown mode '{}'. Use: chat, weather", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn label(self) -> &'static str {
        match self {
            Sender::User => "Usuario",
            Sender::Bot => "Chatbot",
        }
    }
}

/// One transcript line. Fields are private so a message cannot change after
/// it has been appended.
#[derive(Debug, Clone)]
pub struct Message {
    sender: Sender,
    text: String,
    sent_at: DateTime<Local>,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Sender::User, text)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Sender::Bot, text)
    }

    fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            sender,
            text: text.into(),
            sent_at: Local::now(),
        }
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sent_at(&self) -> DateTime<Local> {
        self.sent_at
    }
}

/// Append-only list of messages in display order.
#[derive(Debug, Default)]
pub struct Transcript {
    messages: Vec<Message>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }

    /// Messages appended at or after `start`.
    pub fn since(&self, start: usize) -> &[Message] {
        self.messages.get(start..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }
}

pub struct ChatSession {
    pub mode: Mode,
    pub input: String,
    pub transcript: Transcript,
    pub should_continue: bool,
}

impl ChatSession {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            input: String::new(),
            transcript: Transcript::new(),
            should_continue: true,
        }
    }

    /// Sends the pending input through the dispatcher. The input buffer is
    /// empty afterwards.
    pub async fn submit(&mut self, responders: &ResponderSet) -> DispatchOutcome {
        let command = ChatCommand::new(self.mode, std::mem::take(&mut self.input));
        dispatch(command, responders, &mut self.transcript).await
    }
}
