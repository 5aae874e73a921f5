pub mod auth;
pub mod browse;
pub mod config_cmd;
pub mod entity;
pub mod stats;
