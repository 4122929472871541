//! MongoDB connection management

mod config;
mod connector;
mod health;

pub use config::MongoConfig;
pub use connector::{connect_from_config, connect_from_config_with_retry};

pub use mongodb::{Client, Collection, Database};
