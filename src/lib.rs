pub mod auth_client;
pub mod configuration;
pub mod domain;
pub mod runner;
pub mod scenarios;
pub mod telemetry;
