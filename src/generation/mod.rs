//! Forest generation configuration

pub mod config;

pub use config::ForestConfig;
