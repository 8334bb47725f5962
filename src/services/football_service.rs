//! Servicio de datos de futebol
//!
//! Lecturas cache-aside sobre los proveedores externos con degradación
//! controlada: si el proveedor falla se sirve el último valor conocido
//! marcado como `stale`, y solo "sin caché y proveedor caído" escala al
//! llamador. Cada lectura sigue la secuencia
//! `{CacheCheck} -> {UpstreamCall}? -> {StoreOrFallback} -> {Return}`.

use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use thiserror::Error;

use crate::cache::{keys, CacheLookup, CacheStats, DataCategory, TtlCache};
use crate::clients::{FootballProvider, MediaProvider, UpstreamError};
use crate::dto::football_dto::{
    CacheWarning, Cached, CombinedFromCache, CombinedTeamDto, FixtureDto, MediaDto, StandingDto, TeamDto,
};

/// Errores del servicio de futebol
#[derive(Debug, Error)]
pub enum FootballError {
    /// Proveedor caído y nada en caché para esta clave
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(#[from] UpstreamError),

    #[error("Not found: {0}")]
    NotFound(String),
}

/// Liga y temporada usadas cuando el llamador no indica otras
#[derive(Debug, Clone, Copy)]
pub struct LeagueDefaults {
    pub league_id: i64,
    pub season: i32,
}

impl Default for LeagueDefaults {
    fn default() -> Self {
        Self {
            league_id: 71, // Brasileirão Série A
            season: 2023,
        }
    }
}

pub struct FootballService {
    football: Arc<dyn FootballProvider>,
    media: Arc<dyn MediaProvider>,
    cache: TtlCache,
    defaults: LeagueDefaults,
}

impl FootballService {
    pub fn new(
        football: Arc<dyn FootballProvider>,
        media: Arc<dyn MediaProvider>,
        cache: TtlCache,
        defaults: LeagueDefaults,
    ) -> Self {
        Self {
            football,
            media,
            cache,
            defaults,
        }
    }

    pub fn defaults(&self) -> LeagueDefaults {
        self.defaults
    }

    /// Lectura cache-aside con fallback al último valor conocido
    async fn read_through<F, Fut>(
        &self,
        key: &str,
        category: DataCategory,
        fetch: F,
    ) -> Result<Cached<Value>, FootballError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, FootballError>>,
    {
        let evicted = match self.cache.lookup(key).await {
            CacheLookup::Fresh(value) => {
                log::info!("✅ {} servido desde caché", key);
                return Ok(Cached::hit(value));
            }
            CacheLookup::Expired(entry) => Some(entry),
            CacheLookup::Missing => None,
        };

        match fetch().await {
            Ok(body) => {
                self.cache.set(key, body.clone(), category.ttl_seconds()).await;
                Ok(Cached::fresh(body))
            }
            Err(FootballError::UpstreamUnavailable(err)) => {
                log::error!("❌ Proveedor no disponible para {}: {}", key, err);

                // El fallback ignora la expiración: vale la entrada actual o la recién expirada.
                // La expirada vuelve al mapa con su marca original para el siguiente fallo.
                let last_known = match (self.cache.peek(key).await, evicted) {
                    (Some(entry), _) => Some(entry.value),
                    (None, Some(entry)) => {
                        self.cache.restore(key, entry.clone()).await;
                        Some(entry.value)
                    }
                    (None, None) => None,
                };

                match last_known {
                    Some(value) => {
                        log::warn!("⚠️ Sirviendo valor stale para {}", key);
                        Ok(Cached::stale(value))
                    }
                    None => Err(FootballError::UpstreamUnavailable(err)),
                }
            }
            Err(other) => Err(other),
        }
    }

    /// Próximos partidos de un equipo en la temporada por defecto
    pub async fn team_next_fixtures(
        &self,
        team_id: i64,
        next: usize,
    ) -> Result<Cached<Vec<FixtureDto>>, FootballError> {
        let season = self.defaults.season;
        let key = keys::fixtures_by_team(team_id, season);

        let cached = self
            .read_through(&key, DataCategory::Fixtures, move || async move {
                self.football
                    .fixtures_by_team(team_id, season)
                    .await
                    .map_err(FootballError::from)
            })
            .await?;

        Ok(cached.map(|body| FixtureDto::next_from_response(&body, next)))
    }

    /// Partidos de una liga/temporada, opcionalmente de una rodada
    pub async fn league_fixtures(
        &self,
        league_id: i64,
        season: i32,
        round: Option<&str>,
    ) -> Result<Cached<Vec<FixtureDto>>, FootballError> {
        let key = keys::fixtures_by_league(league_id, season, round);

        let cached = self
            .read_through(&key, DataCategory::Fixtures, move || async move {
                self.football
                    .fixtures_by_league(league_id, season, round)
                    .await
                    .map_err(FootballError::from)
            })
            .await?;

        Ok(cached.map(|body| FixtureDto::list_from_response(&body)))
    }

    pub async fn league_standings(
        &self,
        league_id: i64,
        season: i32,
    ) -> Result<Cached<Vec<StandingDto>>, FootballError> {
        let key = keys::standings(league_id, season);

        let cached = self
            .read_through(&key, DataCategory::Standings, move || async move {
                self.football
                    .standings_by_league(league_id, season)
                    .await
                    .map_err(FootballError::from)
            })
            .await?;

        Ok(cached.map(|body| StandingDto::list_from_response(&body)))
    }

    /// Equipo por id; una respuesta vacía es `NotFound` y no se cachea
    pub async fn team_by_id(&self, team_id: i64) -> Result<Cached<TeamDto>, FootballError> {
        let key = keys::team_by_id(team_id);

        let cached = self
            .read_through(&key, DataCategory::TeamData, move || async move {
                let body = self.football.team_by_id(team_id).await?;
                if TeamDto::list_from_response(&body).is_empty() {
                    return Err(FootballError::NotFound(format!(
                        "team with id '{}' not found",
                        team_id
                    )));
                }
                Ok::<_, FootballError>(body)
            })
            .await?;

        let team = TeamDto::list_from_response(&cached.data)
            .into_iter()
            .next()
            .ok_or_else(|| FootballError::NotFound(format!("team with id '{}' not found", team_id)))?;

        Ok(cached.map(|_| team))
    }

    /// Búsqueda por nombre; una búsqueda sin resultados no se cachea
    pub async fn search_teams(
        &self,
        query: &str,
        league_id: i64,
    ) -> Result<Cached<Vec<TeamDto>>, FootballError> {
        let key = keys::team_search(query, league_id);

        let result = self
            .read_through(&key, DataCategory::TeamData, move || async move {
                let body = self.football.search_teams(query, league_id).await?;
                if TeamDto::list_from_response(&body).is_empty() {
                    return Err(FootballError::NotFound(format!(
                        "no teams match '{}'",
                        query.trim()
                    )));
                }
                Ok::<_, FootballError>(body)
            })
            .await;

        match result {
            Ok(cached) => Ok(cached.map(|body| TeamDto::list_from_response(&body))),
            Err(FootballError::NotFound(_)) => Ok(Cached::fresh(Vec::new())),
            Err(e) => Err(e),
        }
    }

    /// Escudo, banner, estadio y descripción; sin coincidencias es `NotFound` y no se cachea
    pub async fn team_media(&self, team_name: &str) -> Result<Cached<MediaDto>, FootballError> {
        let key = keys::team_media(team_name);
        let not_found = move || {
            FootballError::NotFound(format!("team '{}' not found in media database", team_name.trim()))
        };

        let cached = self
            .read_through(&key, DataCategory::TeamMedia, move || async move {
                let body = self.media.search_team_media(team_name).await?;
                if MediaDto::from_sportsdb(&body).is_none() {
                    return Err(not_found());
                }
                Ok::<_, FootballError>(body)
            })
            .await?;

        let media = MediaDto::from_sportsdb(&cached.data).ok_or_else(not_found)?;
        Ok(cached.map(|_| media))
    }

    /// Vista combinada de un equipo a partir de su nombre
    ///
    /// El primer resultado de la búsqueda gana. Fixtures y media se piden en
    /// paralelo; una media inexistente deja `media` en `None`, pero un fallo
    /// irrecuperable de cualquiera de las dos partes hace fallar el conjunto.
    pub async fn team_combined(
        &self,
        team_name: &str,
        next: usize,
    ) -> Result<CombinedTeamDto, FootballError> {
        let search = self.search_teams(team_name, self.defaults.league_id).await?;
        let team = search.data.first().cloned().ok_or_else(|| {
            FootballError::NotFound(format!("team '{}' not found", team_name.trim()))
        })?;

        log::info!("🔍 Equipo resuelto: '{}' -> {} ({})", team_name, team.name, team.id);

        let (fixtures, media) = futures::future::join(
            self.team_next_fixtures(team.id, next),
            self.team_media(&team.name),
        )
        .await;

        let fixtures = fixtures?;
        let (media, media_from_cache, media_stale) = match media {
            Ok(cached) => {
                let stale = cached.is_stale();
                (Some(cached.data), cached.from_cache, stale)
            }
            Err(FootballError::NotFound(reason)) => {
                log::info!("🖼️ Sin media para {}: {}", team.name, reason);
                (None, false, false)
            }
            Err(e) => return Err(e),
        };

        let warning = if search.is_stale() || fixtures.is_stale() || media_stale {
            Some(CacheWarning::Stale)
        } else {
            None
        };

        Ok(CombinedTeamDto {
            team,
            media,
            next_fixtures: fixtures.data,
            warning,
            from_cache: CombinedFromCache {
                team: search.from_cache,
                fixtures: fixtures.from_cache,
                media: media_from_cache,
            },
        })
    }

    pub async fn invalidate(&self, key: &str) -> bool {
        self.cache.delete(key).await
    }

    pub async fn clear_cache(&self) {
        self.cache.clear().await;
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Clock;
    use async_trait::async_trait;
    use chrono::{DateTime, Duration, Utc};
    use serde_json::json;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct FakeFootball {
        calls: AtomicUsize,
        fail: AtomicBool,
        teams: Mutex<Vec<Value>>,
    }

    impl FakeFootball {
        fn respond(&self, response: Value) -> Result<Value, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(UpstreamError::Status {
                    status: 503,
                    body: "down".to_string(),
                });
            }
            Ok(json!({ "errors": [], "response": response }))
        }
    }

    #[async_trait]
    impl FootballProvider for FakeFootball {
        async fn fixtures_by_team(&self, team_id: i64, _season: i32) -> Result<Value, UpstreamError> {
            self.respond(json!([{
                "fixture": { "id": 10, "date": "2023-05-01T20:00:00+00:00",
                             "status": { "short": "NS", "long": "Not Started" } },
                "teams": { "home": { "id": team_id, "name": "Cruzeiro", "logo": null },
                           "away": { "id": 127, "name": "Flamengo", "logo": null } },
                "goals": { "home": null, "away": null }
            }]))
        }

        async fn fixtures_by_league(&self, _: i64, _: i32, _: Option<&str>) -> Result<Value, UpstreamError> {
            self.respond(json!([]))
        }

        async fn standings_by_league(&self, _: i64, _: i32) -> Result<Value, UpstreamError> {
            self.respond(json!([{ "league": { "standings": [[{
                "rank": 1, "team": { "id": 121, "name": "Palmeiras", "logo": null },
                "points": 70, "goalsDiff": 20, "group": "Serie A", "form": "WWWWD",
                "description": null,
                "all": { "played": 34, "win": 21, "draw": 7, "lose": 6,
                         "goals": { "for": 58, "against": 38 } }
            }]] } }]))
        }

        async fn team_by_id(&self, _: i64) -> Result<Value, UpstreamError> {
            let teams = self.teams.lock().unwrap().clone();
            self.respond(Value::Array(teams))
        }

        async fn search_teams(&self, _: &str, _: i64) -> Result<Value, UpstreamError> {
            let teams = self.teams.lock().unwrap().clone();
            self.respond(Value::Array(teams))
        }
    }

    #[derive(Default)]
    struct FakeMedia {
        calls: AtomicUsize,
        fail: AtomicBool,
        found: AtomicBool,
        nameless: AtomicBool,
    }

    #[async_trait]
    impl MediaProvider for FakeMedia {
        async fn search_team_media(&self, team_name: &str) -> Result<Value, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail.load(Ordering::SeqCst) {
                return Err(UpstreamError::Malformed("boom".to_string()));
            }
            if !self.found.load(Ordering::SeqCst) {
                return Ok(json!({ "teams": null }));
            }
            if self.nameless.load(Ordering::SeqCst) {
                return Ok(json!({ "teams": [{ "strTeam": null, "strTeamBadge": "badge.png" }] }));
            }
            Ok(json!({ "teams": [{ "strTeam": team_name, "strTeamBadge": "badge.png" }] }))
        }
    }

    fn cruzeiro() -> Value {
        json!({ "team": { "id": 135, "name": "Cruzeiro", "country": "Brazil", "founded": 1921 },
                "venue": { "name": "Mineirão" } })
    }

    struct Fixture {
        football: Arc<FakeFootball>,
        media: Arc<FakeMedia>,
        now: Arc<Mutex<DateTime<Utc>>>,
        service: FootballService,
    }

    fn setup() -> Fixture {
        let football = Arc::new(FakeFootball::default());
        let media = Arc::new(FakeMedia::default());
        let now = Arc::new(Mutex::new(Utc::now()));
        let handle = now.clone();
        let clock: Clock = Arc::new(move || *handle.lock().unwrap());

        let service = FootballService::new(
            football.clone(),
            media.clone(),
            TtlCache::with_clock(clock),
            LeagueDefaults::default(),
        );

        Fixture { football, media, now, service }
    }

    impl Fixture {
        fn advance(&self, by: Duration) {
            let mut guard = self.now.lock().unwrap();
            *guard = *guard + by;
        }
    }

    #[tokio::test]
    async fn test_second_standings_call_hits_cache() {
        let fx = setup();

        let first = fx.service.league_standings(71, 2023).await.unwrap();
        assert!(!first.from_cache);
        assert_eq!(first.data[0].team.name, "Palmeiras");
        assert_eq!(fx.football.calls.load(Ordering::SeqCst), 1);

        let second = fx.service.league_standings(71, 2023).await.unwrap();
        assert!(second.from_cache);
        assert!(second.warning.is_none());
        assert_eq!(fx.football.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_entry_is_refetched() {
        let fx = setup();

        fx.service.league_standings(71, 2023).await.unwrap();
        fx.advance(Duration::seconds(DataCategory::Standings.ttl_seconds() as i64 + 1));

        let again = fx.service.league_standings(71, 2023).await.unwrap();
        assert!(!again.from_cache);
        assert_eq!(fx.football.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_upstream_failure_serves_stale_value() {
        let fx = setup();

        fx.service.league_standings(71, 2023).await.unwrap();
        fx.advance(Duration::hours(2));
        fx.football.fail.store(true, Ordering::SeqCst);

        let stale = fx.service.league_standings(71, 2023).await.unwrap();
        assert!(stale.from_cache);
        assert!(stale.is_stale());
        assert_eq!(stale.data[0].team.name, "Palmeiras");
    }

    #[tokio::test]
    async fn test_upstream_failure_without_cache_escalates() {
        let fx = setup();
        fx.football.fail.store(true, Ordering::SeqCst);

        let result = fx.service.league_standings(71, 2023).await;
        assert!(matches!(result, Err(FootballError::UpstreamUnavailable(_))));
    }

    #[tokio::test]
    async fn test_repeated_upstream_failure_keeps_serving_stale() {
        let fx = setup();

        fx.service.league_standings(71, 2023).await.unwrap();
        fx.advance(Duration::hours(2));
        fx.football.fail.store(true, Ordering::SeqCst);

        let first = fx.service.league_standings(71, 2023).await.unwrap();
        let second = fx.service.league_standings(71, 2023).await.unwrap();

        assert!(first.is_stale());
        assert!(second.is_stale());
        assert_eq!(second.data[0].team.name, "Palmeiras");
        assert_eq!(fx.football.calls.load(Ordering::SeqCst), 3);

        // La entrada restaurada sigue expirada: al volver el proveedor se refresca
        fx.football.fail.store(false, Ordering::SeqCst);
        let recovered = fx.service.league_standings(71, 2023).await.unwrap();
        assert!(!recovered.from_cache);
        assert!(recovered.warning.is_none());
    }

    #[tokio::test]
    async fn test_team_by_id_not_found_is_not_cached() {
        let fx = setup();

        let result = fx.service.team_by_id(999).await;
        assert!(matches!(result, Err(FootballError::NotFound(_))));
        assert_eq!(fx.service.cache_stats().await.keys, 0);
    }

    #[tokio::test]
    async fn test_search_key_is_normalized() {
        let fx = setup();
        fx.football.teams.lock().unwrap().push(cruzeiro());

        fx.service.search_teams("Cruzeiro", 71).await.unwrap();
        let again = fx.service.search_teams("cruzeiro ", 71).await.unwrap();

        assert!(again.from_cache);
        assert_eq!(fx.football.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_search_is_not_cached() {
        let fx = setup();

        let empty = fx.service.search_teams("Cruzeiro", 71).await.unwrap();
        assert!(empty.data.is_empty());
        assert!(!empty.from_cache);
        assert_eq!(fx.service.cache_stats().await.keys, 0);

        fx.football.teams.lock().unwrap().push(cruzeiro());
        let found = fx.service.search_teams("Cruzeiro", 71).await.unwrap();
        assert_eq!(found.data.len(), 1);
        assert_eq!(fx.football.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_unparseable_media_is_not_cached() {
        let fx = setup();
        fx.media.found.store(true, Ordering::SeqCst);
        fx.media.nameless.store(true, Ordering::SeqCst);

        let result = fx.service.team_media("Cruzeiro").await;
        assert!(matches!(result, Err(FootballError::NotFound(_))));
        assert_eq!(fx.service.cache_stats().await.keys, 0);

        fx.media.nameless.store(false, Ordering::SeqCst);
        let media = fx.service.team_media("Cruzeiro").await.unwrap();
        assert_eq!(media.data.team_name, "Cruzeiro");
        assert!(!media.from_cache);
        assert_eq!(fx.media.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_media_not_found_is_not_cached() {
        let fx = setup();

        let result = fx.service.team_media("Nowhere FC").await;
        assert!(matches!(result, Err(FootballError::NotFound(_))));

        let _ = fx.service.team_media("Nowhere FC").await;
        assert_eq!(fx.media.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_combined_fails_before_sub_fetches_when_no_match() {
        let fx = setup();

        let result = fx.service.team_combined("Inexistente", 1).await;
        assert!(matches!(result, Err(FootballError::NotFound(_))));
        // Solo la búsqueda llegó al proveedor
        assert_eq!(fx.football.calls.load(Ordering::SeqCst), 1);
        assert_eq!(fx.media.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_combined_without_media_still_succeeds() {
        let fx = setup();
        fx.football.teams.lock().unwrap().push(cruzeiro());

        let combined = fx.service.team_combined("Cruzeiro", 1).await.unwrap();
        assert_eq!(combined.team.id, 135);
        assert!(combined.media.is_none());
        assert_eq!(combined.next_fixtures.len(), 1);
        assert!(!combined.from_cache.fixtures);
    }

    #[tokio::test]
    async fn test_combined_reports_per_part_cache_origin() {
        let fx = setup();
        fx.football.teams.lock().unwrap().push(cruzeiro());
        fx.media.found.store(true, Ordering::SeqCst);

        fx.service.team_combined("Cruzeiro", 1).await.unwrap();
        let combined = fx.service.team_combined("CRUZEIRO", 1).await.unwrap();

        assert_eq!(combined.media.as_ref().unwrap().badge.as_deref(), Some("badge.png"));
        assert_eq!(
            combined.from_cache,
            CombinedFromCache { team: true, fixtures: true, media: true }
        );
    }

    #[tokio::test]
    async fn test_combined_flags_stale_parts() {
        let fx = setup();
        fx.football.teams.lock().unwrap().push(cruzeiro());
        fx.media.found.store(true, Ordering::SeqCst);

        let healthy = fx.service.team_combined("Cruzeiro", 1).await.unwrap();
        assert!(healthy.warning.is_none());

        // Todas las partes expiran y ambos proveedores caen
        fx.advance(Duration::days(4));
        fx.football.fail.store(true, Ordering::SeqCst);
        fx.media.fail.store(true, Ordering::SeqCst);

        for _ in 0..2 {
            let combined = fx.service.team_combined("Cruzeiro", 1).await.unwrap();
            assert_eq!(
                combined.from_cache,
                CombinedFromCache { team: true, fixtures: true, media: true }
            );
            assert_eq!(combined.warning, Some(CacheWarning::Stale));

            let body = serde_json::to_value(&combined).unwrap();
            assert_eq!(body["warning"], "stale");
        }
    }

    #[tokio::test]
    async fn test_combined_propagates_unrecoverable_media_failure() {
        let fx = setup();
        fx.football.teams.lock().unwrap().push(cruzeiro());
        fx.media.fail.store(true, Ordering::SeqCst);

        let result = fx.service.team_combined("Cruzeiro", 1).await;
        assert!(matches!(result, Err(FootballError::UpstreamUnavailable(_))));
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let fx = setup();

        fx.service.league_standings(71, 2023).await.unwrap();
        assert!(fx.service.invalidate(&keys::standings(71, 2023)).await);
        fx.service.league_standings(71, 2023).await.unwrap();

        assert_eq!(fx.football.calls.load(Ordering::SeqCst), 2);
    }
}
