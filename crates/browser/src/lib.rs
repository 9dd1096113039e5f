pub mod browser;
pub mod command;
pub mod detail;
pub mod error;
pub mod manager;
pub mod render;
pub mod state;
