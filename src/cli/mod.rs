// ABOUTME: CLI module for docrender
// ABOUTME: Exports argument parsing, configuration loading and the application driver

pub mod app;
pub mod args;
pub mod commands;
pub mod config;

pub use app::App;
pub use args::Args;
pub use config::Config;
