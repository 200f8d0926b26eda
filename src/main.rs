use bevy::prelude::*;
use battery_config_bevy::app_setup::setup_bevy_app;
use battery_config_bevy::battery_config_plugin::{validation, BatteryConfigStore, ESchemaRevision};
use battery_config_bevy::error::AppError;
use battery_config_bevy::logging::setup_logging;
use std::env;
use std::path::PathBuf;

const DEFAULT_CONFIG_PATH: &str = "assets/battery_config.json";

fn config_path_from_args() -> PathBuf {
    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            if let Some(path) = args.next() {
                return PathBuf::from(path);
            }
        }
    }
    env::var("BATTERY_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH))
}

fn main() -> Result<(), AppError> {
    let check_only = env::args().any(|arg| arg == "--check");
    let store = BatteryConfigStore::new(config_path_from_args());

    let loaded = store.load()?;
    let revision = loaded.revision();
    let config = loaded.into_current();

    setup_logging(config.verbose_logging);
    info!("Loaded battery config from '{}'", store.path().display());
    if revision == ESchemaRevision::V1 {
        info!("Battery config uses the base schema revision, upgrading in memory");
    }

    if let Err(e) = validation::validate(&config) {
        error!("Battery config is invalid: {}", e);
        return Err(e.into());
    }
    if check_only {
        info!("Battery config is valid.");
        return Ok(());
    }

    info!("Starting battery config service...");
    let (mut app, _app_external_channel_ends) = setup_bevy_app(config, Some(store));

    // A settings frontend would hold app_external_channel_ends: it submits
    // whole records through config_submission_sender and reads the verdict
    // from config_outcome_receiver.

    app.run();

    info!("Battery config service shutting down.");
    Ok(())
}
