//! Configuración de cache
//!
//! Política estática de TTL por categoría de datos. Fixtures y clasificación
//! cambian en día de rodada; los datos del equipo y su media casi nunca.

use serde::Serialize;

/// Categorías de datos cacheados
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    Fixtures,
    Standings,
    TeamMedia,
    TeamData,
}

impl DataCategory {
    /// TTL en segundos de la categoría
    pub const fn ttl_seconds(self) -> u64 {
        match self {
            DataCategory::Fixtures => 15 * 60,          // 15 minutos
            DataCategory::Standings => 30 * 60,         // 30 minutos
            DataCategory::TeamMedia => 3 * 24 * 60 * 60, // 3 días
            DataCategory::TeamData => 24 * 60 * 60,     // 1 día
        }
    }
}
