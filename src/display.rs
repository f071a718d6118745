use crate::chat::{Message, Mode, Sender};
use console::style;

/// Print the greeting shown when the interactive session starts
pub fn display_banner(mode: Mode) {
    println!("\n{}", style("☁️  climachat").bold().blue());
    println!(
        "{} {}",
        style("Modo:").dim(),
        style(mode.label()).bold().cyan()
    );
    println!(
        "{}",
        style("Type '/help' for available commands. Press Ctrl+D or type /quit to exit.").dim()
    );
}

/// Print one transcript entry
pub fn display_message(message: &Message) {
    match message.sender() {
        Sender::User => {
            println!("{}: {}", style(Sender::User.label()).bold(), message.text());
        }
        Sender::Bot => {
            let label = style(Sender::Bot.label()).bold().blue();
            if looks_like_markdown(message.text()) {
                println!("{}:", label);
                display_markdown(message.text());
            } else {
                println!("{}: {}", label, style(message.text()).blue());
            }
        }
    }
}

pub fn display_markdown(text: &str) {
    termimad::print_text(text);
}

pub fn display_error(err: &dyn std::fmt::Display) {
    eprintln!("{} {}", style("✖").bold().red(), style(err).red());
}

/// Plain `[HH:MM:SS] Sender: text` line used by `/history`.
pub fn format_history_line(message: &Message) -> String {
    format!(
        "[{}] {}: {}",
        message.sent_at().format("%H:%M:%S"),
        message.sender().label(),
        message.text()
    )
}

/// Line-editor prompt for the given mode
pub fn prompt(mode: Mode, styled: bool) -> String {
    let text = format!("[{}] > ", mode);
    if styled {
        style(text).bold().cyan().to_string()
    } else {
        text
    }
}

fn looks_like_markdown(text: &str) -> bool {
    text.contains("```")
        || text.contains("**")
        || text.contains('`')
        || text.lines().any(|line| {
            let line = line.trim_start();
            line.starts_with('#') || line.starts_with("- ") || line.starts_with("* ")
        })
}
