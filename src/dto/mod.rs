//! DTOs de la API
//!
//! Cuerpos de request/response expuestos por los handlers HTTP.

pub mod auth_dto;
pub mod favorite_dto;
pub mod football_dto;
