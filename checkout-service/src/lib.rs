pub mod config;
pub mod dtos;
pub mod handlers;
pub mod i18n;
pub mod models;
pub mod services;
pub mod startup;

pub use startup::{AppState, Application};
