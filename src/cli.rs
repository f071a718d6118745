use crate::chat::Mode;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Chat with an AI assistant or look up the weather", long_about = None)]
pub struct Args {
    /// Message to send once and exit. Without it an interactive session starts
    pub query: Option<String>,

    /// Responder for the message: chat (AI) or weather
    #[arg(short, long, value_enum)]
    pub mode: Option<Mode>,

    /// Chat model to use
    #[arg(long)]
    pub model: Option<String>,

    /// Language for weather descriptions (e.g. es, en)
    #[arg(long)]
    pub lang: Option<String>,

    /// Weather units: metric, imperial or standard
    #[arg(long)]
    pub units: Option<String>,

    /// Path to the YAML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_and_mode_are_optional() {
        let args = Args::parse_from(["climachat"]);
        assert!(args.query.is_none());
        assert!(args.mode.is_none());
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn parses_one_shot_weather_query() {
        let args = Args::parse_from(["climachat", "-m", "weather", "-vv", "Madrid"]);
        assert_eq!(args.query.as_deref(), Some("Madrid"));
        assert_eq!(args.mode, Some(Mode::Weather));
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(Args::try_parse_from(["climachat", "--mode", "radio"]).is_err());
    }
}
