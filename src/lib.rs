pub mod config;
pub mod datasource;
pub mod helper;
pub mod models;
pub mod routes;
pub mod setup;
pub mod state;
