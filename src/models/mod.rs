//! Modelos del sistema
//!
//! Structs que mapean las tablas PostgreSQL.

pub mod favorite;
pub mod user;
