//! Services module
//!
//! Lógica de negocio sobre los proveedores externos de datos de futebol.

pub mod football_service;

pub use football_service::{FootballError, FootballService, LeagueDefaults};
