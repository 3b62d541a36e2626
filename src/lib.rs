pub mod config;
pub mod errors;
pub mod models;
pub mod relay;
pub mod router;
pub mod routes;
pub mod store;
pub mod templates;
pub mod transport;
