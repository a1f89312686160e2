#![allow(non_snake_case)]

mod cli;

use std::env;
use std::sync::Arc;

use log::error;
use milongaBoard::config::{AppConfig, RunMode, Settings};
use milongaBoard::logging::init_logging;
use milongaBoard::models::event::load_events;
use milongaBoard::runtime;
use milongaBoard::service::event_service::EventDirectory;

#[tokio::main]
async fn main() {
    let config = match env::var("CONFIG_FILE") {
        Ok(path) => AppConfig::from_file(&path).unwrap_or_default(),
        Err(_) => AppConfig::default(),
    };
    let settings = Settings::resolve(&config).expect("Invalid configuration");
    if let Err(e) = init_logging(&settings.log_level) {
        eprintln!("Logging disabled: {}", e);
    }

    let directory = match load_events(&settings.events_file).and_then(EventDirectory::new) {
        Ok(directory) => directory,
        Err(e) => {
            error!("event=events_load_failed error={}", e);
            EventDirectory::default()
        }
    };

    match settings.run_mode {
        RunMode::Api => runtime::run_api(Arc::new(directory), settings.api_port).await,
        RunMode::Cli => cli::cli(settings, directory).await,
    }
}
