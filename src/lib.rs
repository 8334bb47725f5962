//! Rodadex API
//!
//! Backend de futebol: partidos, clasificaciones y media de equipos servidos
//! a través de una caché TTL con degradación controlada, más cuentas de
//! usuario y equipos favoritos.

pub mod cache;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

pub use routes::create_router;
pub use state::AppState;
