pub mod authentication;
pub mod configuration;
pub mod domain;
pub mod routes;
pub mod services;
pub mod startup;
pub mod store;
pub mod telemetry;
pub mod utils;
