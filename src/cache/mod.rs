//! Cache
//!
//! Este módulo contiene la caché en memoria de respuestas de los proveedores
//! externos, la política de TTL por categoría y la construcción de claves.

pub mod cache_config;
pub mod keys;
pub mod ttl_cache;

pub use cache_config::DataCategory;
pub use ttl_cache::{CacheEntry, CacheLookup, CacheStats, Clock, TtlCache};
