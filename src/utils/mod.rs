//! Utilidades del sistema
//!
//! Manejo de errores, JWT y validación de parámetros.

pub mod errors;
pub mod jwt;
pub mod validation;

pub use errors::{AppError, AppResult};
