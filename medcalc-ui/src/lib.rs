pub mod app;
pub mod commands;
pub mod i18n;
pub mod logging;
pub mod preferences;
pub mod state;
pub mod utils;
pub mod views;
