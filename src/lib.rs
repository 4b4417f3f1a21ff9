pub mod activity;
pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod monitor;
pub mod notify;
pub mod rank;
pub mod state;
pub mod types;
