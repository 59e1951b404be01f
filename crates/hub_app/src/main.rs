mod app;
mod browser;
mod config;
mod effects;
mod notify;
mod ui;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    let config = config::AppConfig::try_from(config::Cli::parse())?;
    hub_logging::initialize(&config.log_destination, config.log_level);
    app::run(config)
}
