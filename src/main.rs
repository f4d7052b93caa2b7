use std::io;

use minish::{
    executable::{PathFinder, Runner},
    prompt::ConsolePrompter,
    Config, Shell,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_logging(config: &Config) {
    let filter = match &config.log_filter {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::new("off"),
    };

    // stdout belongs to the prompt and to command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

fn main() -> anyhow::Result<()> {
    let config = Config::from_env();
    init_logging(&config);

    let reader = io::stdin().lock();
    let prompter = ConsolePrompter::new(reader, io::stdout(), io::stderr());

    let code = Shell::new(config, prompter, PathFinder::new(), Runner::new()).run()?;
    std::process::exit(code);
}
