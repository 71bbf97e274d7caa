pub mod api;
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod events;
pub mod logging;
pub mod models;
pub mod normalize;
pub mod status;
pub mod ui;
