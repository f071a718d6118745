use super::{
    handler::{ClearCommand, HelpCommand, HistoryCommand, ModeCommand, QuitCommand},
    registry::CommandRegistry,
};
use crate::chat::ChatSession;
use crate::core::error::ClimaError;
use std::sync::Arc;

#[derive(Clone)]
pub struct CommandDispatcher {
    registry: Arc<CommandRegistry>,
}

impl CommandDispatcher {
    pub fn new(registry: Arc<CommandRegistry>) -> Self {
        Self { registry }
    }

    pub fn execute(
        &self,
        command: &str,
        args: &[&str],
        session: &mut ChatSession,
    ) -> Result<Option<String>, ClimaError> {
        self.registry.execute(command, args, session)
    }

    pub fn get_command_names(&self) -> Vec<String> {
        self.registry.get_command_names()
    }
}

pub fn create_command_registry() -> CommandDispatcher {
    let mut registry = CommandRegistry::new();

    registry.register("quit", QuitCommand);
    registry.register("help", HelpCommand);
    registry.register("mode", ModeCommand);
    registry.register("history", HistoryCommand);
    registry.register("clear", ClearCommand);

    CommandDispatcher::new(Arc::new(registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::Mode;

    #[test]
    fn registers_all_commands() {
        let dispatcher = create_command_registry();
        assert_eq!(
            dispatcher.get_command_names(),
            vec!["clear", "help", "history", "mode", "quit"]
        );
    }

    #[test]
    fn unknown_command_is_an_input_error() {
        let dispatcher = create_command_registry();
        let mut session = ChatSession::new(Mode::Chat);
        let err = dispatcher.execute("save", &[], &mut session).unwrap_err();
        assert_eq!(err.to_string(), "Input error: Unknown command: /save");
        assert!(session.should_continue);
    }

    #[test]
    fn executes_with_arguments() {
        let dispatcher = create_command_registry();
        let mut session = ChatSession::new(Mode::Chat);
        dispatcher.execute("mode", &["weather"], &mut session).unwrap();
        assert_eq!(session.mode, Mode::Weather);
    }
}
