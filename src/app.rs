use crate::chat::{ChatSession, DispatchOutcome, Mode};
use crate::cli::Args;
use crate::commands::{CommandDispatcher, parse_slash_command};
use crate::config::Config;
use crate::core::error::ClimaError;
use crate::display;
use crate::input;
use crate::responders::ResponderSet;
use is_terminal::IsTerminal;
use std::io::{self, Read};
use tracing::{debug, info};

pub struct Application {
    pub args: Args,
    pub config: Config,
    pub responders: ResponderSet,
    pub command_dispatcher: CommandDispatcher,
}

impl Application {
    pub fn new(
        args: Args,
        config: Config,
        responders: ResponderSet,
        command_dispatcher: CommandDispatcher,
    ) -> Self {
        Self {
            args,
            config,
            responders,
            command_dispatcher,
        }
    }

    pub async fn run(&mut self) -> Result<(), ClimaError> {
        let mode = self.config.default_mode;

        if let Some(query) = self.args.query.clone() {
            return self.handle_one_shot(mode, query).await;
        }

        if !io::stdin().is_terminal() {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(|e| ClimaError::Input(format!("Failed to read from stdin: {}", e)))?;
            return self.handle_one_shot(mode, buffer).await;
        }

        self.handle_interactive(mode).await
    }

    async fn handle_one_shot(&self, mode: Mode, text: String) -> Result<(), ClimaError> {
        let mut session = ChatSession::new(mode);
        session.input = text.trim().to_string();
        info!(%mode, "one-shot message");

        if session.submit(&self.responders).await == DispatchOutcome::Ignored {
            return Err(ClimaError::Input("No message provided".to_string()));
        }
        session.transcript.iter().for_each(display::display_message);
        Ok(())
    }

    async fn handle_interactive(&self, mode: Mode) -> Result<(), ClimaError> {
        let mut session = ChatSession::new(mode);
        let mut editor = input::create_editor(self.command_dispatcher.clone())?;
        display::display_banner(session.mode);

        while session.should_continue {
            let line = match input::read_input(&mut editor, session.mode)? {
                Some(line) => line.trim().to_string(),
                None => break,
            };

            if line.is_empty() {
                continue;
            }

            if let Some((command, args)) = parse_slash_command(&line) {
                debug!(command, "running slash command");
                match self.command_dispatcher.execute(command, &args, &mut session) {
                    Ok(Some(output)) => println!("{}", output),
                    Ok(None) => {}
                    Err(e) => display::display_error(&e),
                }
                continue;
            }

            let before = session.transcript.len();
            session.input = line;
            session.submit(&self.responders).await;
            session
                .transcript
                .since(before)
                .iter()
                .for_each(display::display_message);
        }

        info!(messages = session.transcript.len(), "session finished");
        Ok(())
    }
}
