use clap::Parser;
use dotenv::dotenv;
use std::process;
use tracing_subscriber::{EnvFilter, fmt};

use climachat::app::Application;
use climachat::cli::Args;
use climachat::commands::create_command_registry;
use climachat::config::{Config, Credentials};
use climachat::core::error::ClimaError;
use climachat::display;
use climachat::responders::build_responders;

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

async fn run(args: Args) -> Result<(), ClimaError> {
    let config = Config::load(args.config.as_deref())?.merge_args(&args);
    let credentials = Credentials::from_env(&config);
    tracing::debug!(?credentials, mode = %config.default_mode, "resolved settings");

    let responders = build_responders(&config, &credentials)?;
    let command_dispatcher = create_command_registry();

    let mut app = Application::new(args, config, responders, command_dispatcher);
    app.run().await
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args).await {
        tracing::error!("climachat failed: {:?}", e);
        display::display_error(&e);
        process::exit(1);
    }
}
