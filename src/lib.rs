pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod output;
pub mod predictions;
pub mod services;
pub mod stops;
pub mod tags;
