//! invoice-service: invoice drafting, validation and the REST store.
pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;
