pub mod api;
pub mod board;
pub mod config;
pub mod credentials;
pub mod fetch;
pub mod output;
pub mod quiz;
pub mod roster;
pub mod scoring;
pub mod tui;
