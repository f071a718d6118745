use crate::chat::{ChatSession, Mode};
use crate::core::error::ClimaError;
use crate::display;

use console::style;

pub trait CommandHandler {
    fn execute(&self, session: &mut ChatSession, args: &[&str])
    -> Result<Option<String>, ClimaError>;
    fn help(&self) -> &'static str;
}

pub struct QuitCommand;
pub struct HelpCommand;
pub struct ModeCommand;
pub struct HistoryCommand;
pub struct ClearCommand;

impl CommandHandler for QuitCommand {
    fn execute(
        &self,
        session: &mut ChatSession,
        _args: &[&str],
    ) -> Result<Option<String>, ClimaError> {
        session.should_continue = false;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/quit - Exit the chat session"
    }
}

impl CommandHandler for HelpCommand {
    fn execute(
        &self,
        _session: &mut ChatSession,
        _args: &[&str],
    ) -> Result<Option<String>, ClimaError> {
        let title = style("Available Commands").bold().underlined();
        let help_text = [
            title.to_string(),
            QuitCommand.help().to_string(),
            HelpCommand.help().to_string(),
            ModeCommand.help().to_string(),
            HistoryCommand.help().to_string(),
            ClearCommand.help().to_string(),
        ]
        .join("\n");

        Ok(Some(help_text))
    }

    fn help(&self) -> &'static str {
        "/help - Show available commands"
    }
}

impl CommandHandler for ModeCommand {
    fn execute(
        &self,
        session: &mut ChatSession,
        args: &[&str],
    ) -> Result<Option<String>, ClimaError> {
        let Some(name) = args.first() else {
            return Ok(Some(format!(
                "Current mode: {} ({})",
                session.mode,
                session.mode.label()
            )));
        };

        let mode: Mode = name.parse().map_err(ClimaError::Input)?;
        session.mode = mode;
        Ok(Some(format!("Mode changed to: {} ({})", mode, mode.label())))
    }

    fn help(&self) -> &'static str {
        "/mode [chat|weather] - Show or change where messages are sent"
    }
}

impl CommandHandler for HistoryCommand {
    fn execute(
        &self,
        session: &mut ChatSession,
        _args: &[&str],
    ) -> Result<Option<String>, ClimaError> {
        if session.transcript.is_empty() {
            return Ok(Some("No messages yet.".to_string()));
        }

        let lines: Vec<String> = session
            .transcript
            .iter()
            .map(display::format_history_line)
            .collect();
        Ok(Some(lines.join("\n")))
    }

    fn help(&self) -> &'static str {
        "/history - Show the messages of this session"
    }
}

impl CommandHandler for ClearCommand {
    fn execute(
        &self,
        _session: &mut ChatSession,
        _args: &[&str],
    ) -> Result<Option<String>, ClimaError> {
        console::Term::stdout().clear_screen()?;
        Ok(None)
    }

    fn help(&self) -> &'static str {
        "/clear - Clear the screen (the session history is kept)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Message;

    #[test]
    fn quit_stops_the_session() {
        let mut session = ChatSession::new(Mode::Chat);
        QuitCommand.execute(&mut session, &[]).unwrap();
        assert!(!session.should_continue);
    }

    #[test]
    fn mode_without_argument_reports_current_mode() {
        let mut session = ChatSession::new(Mode::Weather);
        let output = ModeCommand.execute(&mut session, &[]).unwrap().unwrap();
        assert!(output.contains("weather"));
        assert_eq!(session.mode, Mode::Weather);
    }

    #[test]
    fn mode_switches_and_rejects_unknown_names() {
        let mut session = ChatSession::new(Mode::Chat);
        ModeCommand.execute(&mut session, &["clima"]).unwrap();
        assert_eq!(session.mode, Mode::Weather);

        let err = ModeCommand.execute(&mut session, &["radio"]).unwrap_err();
        assert!(matches!(err, ClimaError::Input(_)));
        assert_eq!(session.mode, Mode::Weather);
    }

    #[test]
    fn history_lists_messages_in_order() {
        let mut session = ChatSession::new(Mode::Chat);
        assert_eq!(
            HistoryCommand.execute(&mut session, &[]).unwrap().as_deref(),
            Some("No messages yet.")
        );

        session.transcript.push(Message::user("hola"));
        session.transcript.push(Message::bot("¡Hola!"));
        let output = HistoryCommand.execute(&mut session, &[]).unwrap().unwrap();
        let user_at = output.find("Usuario: hola").unwrap();
        let bot_at = output.find("Chatbot: ¡Hola!").unwrap();
        assert!(user_at < bot_at);
    }
}
