use tracing::debug;

use super::{Message, Mode, Transcript};
use crate::core::error::ClimaError;
use crate::responders::ResponderSet;

/// A user submission as produced by the interface layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCommand {
    pub mode: Mode,
    pub text: String,
}

impl ChatCommand {
    pub fn new(mode: Mode, text: impl Into<String>) -> Self {
        Self {
            mode,
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Empty input, nothing was appended.
    Ignored,
    /// A user message and a bot message were appended.
    Replied,
}

/// Routes one command to the responder for its mode and records the exchange.
pub async fn dispatch(
    command: ChatCommand,
    responders: &ResponderSet,
    transcript: &mut Transcript,
) -> DispatchOutcome {
    if command.text.is_empty() {
        return DispatchOutcome::Ignored;
    }

    let responder = responders.for_mode(command.mode);
    debug!(mode = %command.mode, service = %responder.service(), "dispatching message");

    transcript.push(Message::user(command.text.as_str()));
    let result = responder.respond(&command.text).await;
    transcript.push(Message::bot(reply_text(result)));

    DispatchOutcome::Replied
}

/// Turns a responder result into the text shown for the bot.
pub fn reply_text(result: Result<String, ClimaError>) -> String {
    match result {
        Ok(reply) => reply,
        Err(err) => {
            debug!(kind = ?err.kind(), "responder failed: {}", err);
            err.to_string()
        }
    }
}
