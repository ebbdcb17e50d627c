pub mod actions;
pub mod app;
pub mod client;
pub mod config;
pub mod diff;
pub mod errors;
pub mod form;
pub mod models;
pub mod poller;
pub mod presenter;
pub mod session;

pub use app::Console;
pub use config::{ConsoleConfig, load_form, resolve_config};
pub use errors::ConsoleError;
