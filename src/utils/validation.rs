//! Utilidades de validación
//!
//! Helpers para convertir los parámetros de query string de los endpoints
//! de futebol. Los parámetros obligatorios ausentes o inválidos producen
//! `AppError::BadRequest`; los opcionales inválidos caen al valor por defecto.

use std::str::FromStr;

use crate::utils::errors::AppError;

/// Tope superior para `next` en los listados de partidos
pub const MAX_NEXT_FIXTURES: usize = 50;

/// Valor recortado, `None` si está vacío
pub fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Texto obligatorio y no vacío
pub fn require_text(value: Option<&str>, name: &str) -> Result<String, AppError> {
    non_empty(value)
        .map(str::to_string)
        .ok_or_else(|| AppError::BadRequest(format!("{} is required", name)))
}

/// Identificador obligatorio, entero positivo
pub fn require_positive_id(value: Option<&str>, name: &str) -> Result<i64, AppError> {
    let raw = non_empty(value).ok_or_else(|| AppError::BadRequest(format!("{} is required", name)))?;

    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::BadRequest(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
    }
}

/// Número positivo opcional; ausente, inválido o no positivo usa `default`
pub fn positive_or<T>(value: Option<&str>, default: T) -> T
where
    T: FromStr + PartialOrd + Default,
{
    non_empty(value)
        .and_then(|raw| raw.parse::<T>().ok())
        .filter(|parsed| *parsed > T::default())
        .unwrap_or(default)
}

/// Cantidad de partidos pedida, acotada a `1..=MAX_NEXT_FIXTURES`
pub fn next_count(value: Option<&str>, default: usize) -> usize {
    positive_or(value, default).min(MAX_NEXT_FIXTURES)
}
