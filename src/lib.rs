// Declare all modules that make up the library
pub mod common;
pub mod error;
pub mod logging;
pub mod app_setup;

pub mod battery_config_plugin;
pub mod battery_provider_plugin;
