pub mod repository;

pub mod event_bus;

pub mod id_generator;

pub mod config;
pub use config::{CompensationConfig, FeedConfig, ServerConfig};

pub mod auth;
