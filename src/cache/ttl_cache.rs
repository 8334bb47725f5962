//! Caché en memoria con expiración por entrada
//!
//! Mapa clave → entrada compartido entre requests. La expiración es perezosa:
//! se comprueba en cada lectura y no existe ningún barrido en background.
//! No hay límite de tamaño; claves sin normalizar hacen crecer el mapa sin cota.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Fuente de tiempo de la caché (inyectable en tests)
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Entrada almacenada en la caché
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub value: Value,
    pub stored_at: DateTime<Utc>,
    pub ttl_seconds: u64,
}

impl CacheEntry {
    /// Un TTL de 0 se eleva a 1 segundo: toda entrada vive al menos 1s
    pub fn new(value: Value, stored_at: DateTime<Utc>, ttl_seconds: u64) -> Self {
        Self {
            value,
            stored_at,
            ttl_seconds: ttl_seconds.max(1),
        }
    }

    /// Fresca mientras `now - stored_at <= ttl * 1000` (milisegundos)
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        let age_ms = (now - self.stored_at).num_milliseconds();
        let ttl_ms = i64::try_from(self.ttl_seconds)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000);
        age_ms <= ttl_ms
    }
}

/// Resultado de una consulta a la caché
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
    /// Entrada vigente
    Fresh(Value),
    /// Entrada expirada: ya fue eliminada del mapa, se devuelve completa
    Expired(CacheEntry),
    Missing,
}

/// Estadísticas de la caché
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    pub keys: usize,
    pub approx_bytes: usize,
}

#[derive(Clone)]
pub struct TtlCache {
    entries: Arc<RwLock<HashMap<String, CacheEntry>>>,
    clock: Clock,
}

impl fmt::Debug for TtlCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TtlCache").finish_non_exhaustive()
    }
}

impl Default for TtlCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TtlCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            clock,
        }
    }

    /// Obtener un valor vigente. Una entrada expirada se elimina y se reporta ausente.
    pub async fn get(&self, key: &str) -> Option<Value> {
        match self.lookup(key).await {
            CacheLookup::Fresh(value) => Some(value),
            CacheLookup::Expired(_) | CacheLookup::Missing => None,
        }
    }

    /// Igual que `get`, pero entrega el valor recién expirado al llamador
    pub async fn lookup(&self, key: &str) -> CacheLookup {
        let now = (self.clock)();
        let mut entries = self.entries.write().await;

        match entries.entry(key.to_string()) {
            Entry::Vacant(_) => {
                log::debug!("❌ Cache MISS para clave: {}", key);
                CacheLookup::Missing
            }
            Entry::Occupied(entry) if entry.get().is_fresh_at(now) => {
                log::debug!("📥 Cache HIT para clave: {}", key);
                CacheLookup::Fresh(entry.get().value.clone())
            }
            Entry::Occupied(entry) => {
                log::debug!("⏰ Cache expirada para clave: {}", key);
                CacheLookup::Expired(entry.remove())
            }
        }
    }

    /// Leer la entrada actual sin comprobar expiración
    pub async fn peek(&self, key: &str) -> Option<CacheEntry> {
        self.entries.read().await.get(key).cloned()
    }

    /// Guardar un valor, sobrescribiendo cualquier entrada previa
    pub async fn set(&self, key: &str, value: Value, ttl_seconds: u64) {
        let entry = CacheEntry::new(value, (self.clock)(), ttl_seconds);
        self.entries.write().await.insert(key.to_string(), entry);
        log::debug!("💾 Cache SET para clave: {} (TTL: {}s)", key, ttl_seconds.max(1));
    }

    /// Reinsertar una entrada tal cual, conservando `stored_at` y TTL
    ///
    /// A diferencia de `set`, no la vuelve fresca: una entrada expirada sigue
    /// expirada, pero vuelve a estar disponible para `peek` y `lookup`.
    pub async fn restore(&self, key: &str, entry: CacheEntry) {
        self.entries.write().await.insert(key.to_string(), entry);
        log::debug!("♻️ Cache RESTORE para clave: {}", key);
    }

    /// Eliminar una clave; no hace nada si no existe
    pub async fn delete(&self, key: &str) -> bool {
        let removed = self.entries.write().await.remove(key).is_some();
        log::debug!("🗑️ Cache DELETE para clave: {} (eliminada: {})", key, removed);
        removed
    }

    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        let count = entries.len();
        entries.clear();
        log::info!("🧹 Cache limpiada ({} claves)", count);
    }

    pub async fn stats(&self) -> CacheStats {
        let entries = self.entries.read().await;
        let approx_bytes = entries
            .iter()
            .map(|(key, entry)| key.len() + entry.value.to_string().len())
            .sum();

        CacheStats {
            keys: entries.len(),
            approx_bytes,
        }
    }
}
