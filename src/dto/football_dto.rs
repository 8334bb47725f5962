//! DTOs de datos de futebol
//!
//! Proyecciones de solo lectura de las respuestas de los proveedores. Se
//! construyen a partir del cuerpo crudo guardado en caché y se descartan
//! tras enviar la respuesta.

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Estados de API-Football que indican un partido por jugar
const UPCOMING_STATUSES: [&str; 3] = ["NS", "TBD", "PST"];

// ---------------------------------------------------------------------------
// Envoltorio de respuesta
// ---------------------------------------------------------------------------

/// Aviso adjunto a un valor servido desde caché tras un fallo del proveedor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheWarning {
    Stale,
}

/// Resultado de una lectura: datos + procedencia
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cached<T> {
    pub data: T,
    pub from_cache: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<CacheWarning>,
}

impl<T> Cached<T> {
    /// Recién obtenido del proveedor
    pub fn fresh(data: T) -> Self {
        Self {
            data,
            from_cache: false,
            warning: None,
        }
    }

    /// Servido desde una entrada vigente
    pub fn hit(data: T) -> Self {
        Self {
            data,
            from_cache: true,
            warning: None,
        }
    }

    /// Servido desde el último valor conocido porque el proveedor falló
    pub fn stale(data: T) -> Self {
        Self {
            data,
            from_cache: true,
            warning: Some(CacheWarning::Stale),
        }
    }

    pub fn is_stale(&self) -> bool {
        self.warning == Some(CacheWarning::Stale)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Cached<U> {
        Cached {
            data: f(self.data),
            from_cache: self.from_cache,
            warning: self.warning,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs expuestos
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRefDto {
    pub id: i64,
    pub name: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VenueDto {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub capacity: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamDto {
    pub id: i64,
    pub name: String,
    pub code: Option<String>,
    pub country: Option<String>,
    pub founded: Option<i32>,
    pub logo: Option<String>,
    pub venue: Option<VenueDto>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureDto {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub status_short: String,
    pub status_long: String,
    pub league_round: Option<String>,
    pub home: TeamRefDto,
    pub away: TeamRefDto,
    pub goals_home: Option<i32>,
    pub goals_away: Option<i32>,
}

impl FixtureDto {
    pub fn is_upcoming(&self) -> bool {
        UPCOMING_STATUSES.contains(&self.status_short.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingDto {
    pub rank: i32,
    pub team: TeamRefDto,
    pub points: i32,
    pub goals_diff: i32,
    pub group: Option<String>,
    pub form: Option<String>,
    pub description: Option<String>,
    pub played: i32,
    pub win: i32,
    pub draw: i32,
    pub lose: i32,
    pub goals_for: i32,
    pub goals_against: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaDto {
    pub team_name: String,
    pub badge: Option<String>,
    pub banner: Option<String>,
    pub stadium: Option<String>,
    pub description: Option<String>,
}

/// Procedencia de cada parte de la vista combinada
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CombinedFromCache {
    pub team: bool,
    pub fixtures: bool,
    pub media: bool,
}

/// Vista combinada de un equipo: datos + próximos partidos + media
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedTeamDto {
    pub team: TeamDto,
    pub media: Option<MediaDto>,
    pub next_fixtures: Vec<FixtureDto>,
    pub from_cache: CombinedFromCache,
    /// `stale` si alguna de las partes se sirvió como último valor conocido
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<CacheWarning>,
}

// ---------------------------------------------------------------------------
// Formato de API-Football
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ApiTeamRef {
    id: i64,
    name: String,
    logo: Option<String>,
}

impl From<ApiTeamRef> for TeamRefDto {
    fn from(team: ApiTeamRef) -> Self {
        Self {
            id: team.id,
            name: team.name,
            logo: team.logo,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ApiFixtureItem {
    fixture: ApiFixture,
    #[serde(default)]
    league: Option<ApiFixtureLeague>,
    teams: ApiFixtureTeams,
    #[serde(default)]
    goals: Option<ApiGoals>,
}

#[derive(Debug, Deserialize)]
struct ApiFixture {
    id: i64,
    date: DateTime<Utc>,
    status: ApiFixtureStatus,
}

#[derive(Debug, Deserialize)]
struct ApiFixtureStatus {
    short: String,
    long: String,
}

#[derive(Debug, Deserialize)]
struct ApiFixtureLeague {
    round: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiFixtureTeams {
    home: ApiTeamRef,
    away: ApiTeamRef,
}

#[derive(Debug, Deserialize)]
struct ApiGoals {
    home: Option<i32>,
    away: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ApiStandingsItem {
    league: ApiStandingsLeague,
}

#[derive(Debug, Deserialize)]
struct ApiStandingsLeague {
    #[serde(default)]
    standings: Vec<Vec<ApiStanding>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiStanding {
    rank: i32,
    team: ApiTeamRef,
    points: i32,
    goals_diff: i32,
    group: Option<String>,
    form: Option<String>,
    description: Option<String>,
    all: ApiStandingRecord,
}

#[derive(Debug, Deserialize)]
struct ApiStandingRecord {
    played: Option<i32>,
    win: Option<i32>,
    draw: Option<i32>,
    lose: Option<i32>,
    goals: ApiStandingGoals,
}

#[derive(Debug, Deserialize)]
struct ApiStandingGoals {
    #[serde(rename = "for")]
    scored: Option<i32>,
    against: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct ApiTeamItem {
    team: ApiTeam,
    #[serde(default)]
    venue: Option<ApiVenue>,
}

#[derive(Debug, Deserialize)]
struct ApiTeam {
    id: i64,
    name: String,
    code: Option<String>,
    country: Option<String>,
    founded: Option<i32>,
    logo: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiVenue {
    id: Option<i64>,
    name: Option<String>,
    city: Option<String>,
    capacity: Option<i64>,
}

// ---------------------------------------------------------------------------
// Formato de TheSportsDB
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SportsDbTeam {
    str_team: String,
    str_team_badge: Option<String>,
    str_badge: Option<String>,
    str_team_banner: Option<String>,
    str_banner: Option<String>,
    str_team_fanart1: Option<String>,
    str_fanart1: Option<String>,
    str_stadium_thumb: Option<String>,
    #[serde(rename = "strDescriptionEN")]
    str_description_en: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Items del array `response`; los que no encajan en el formato se descartan
fn response_items<T: DeserializeOwned>(body: &Value) -> Vec<T> {
    body.get("response")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| match serde_json::from_value::<T>(item.clone()) {
                    Ok(parsed) => Some(parsed),
                    Err(e) => {
                        log::warn!("⚠️ Item del proveedor descartado: {}", e);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

impl FixtureDto {
    pub fn list_from_response(body: &Value) -> Vec<FixtureDto> {
        response_items::<ApiFixtureItem>(body)
            .into_iter()
            .map(|item| FixtureDto {
                id: item.fixture.id,
                date: item.fixture.date,
                status_short: item.fixture.status.short,
                status_long: item.fixture.status.long,
                league_round: item.league.and_then(|league| league.round),
                home: item.teams.home.into(),
                away: item.teams.away.into(),
                goals_home: item.goals.as_ref().and_then(|g| g.home),
                goals_away: item.goals.as_ref().and_then(|g| g.away),
            })
            .collect()
    }

    /// Próximos `next` partidos por fecha; sin partidos pendientes, los `next` más recientes
    pub fn next_from_response(body: &Value, next: usize) -> Vec<FixtureDto> {
        let mut fixtures = Self::list_from_response(body);
        fixtures.sort_by_key(|fixture| fixture.date);

        let upcoming: Vec<FixtureDto> = fixtures
            .iter()
            .filter(|fixture| fixture.is_upcoming())
            .take(next)
            .cloned()
            .collect();

        if !upcoming.is_empty() {
            return upcoming;
        }

        let skip = fixtures.len().saturating_sub(next);
        fixtures.into_iter().skip(skip).collect()
    }
}

impl StandingDto {
    /// Todas las tablas (grupos) de la liga, en el orden del proveedor
    pub fn list_from_response(body: &Value) -> Vec<StandingDto> {
        response_items::<ApiStandingsItem>(body)
            .into_iter()
            .flat_map(|item| item.league.standings)
            .flatten()
            .map(|row| StandingDto {
                rank: row.rank,
                team: row.team.into(),
                points: row.points,
                goals_diff: row.goals_diff,
                group: row.group,
                form: row.form,
                description: row.description,
                played: row.all.played.unwrap_or(0),
                win: row.all.win.unwrap_or(0),
                draw: row.all.draw.unwrap_or(0),
                lose: row.all.lose.unwrap_or(0),
                goals_for: row.all.goals.scored.unwrap_or(0),
                goals_against: row.all.goals.against.unwrap_or(0),
            })
            .collect()
    }
}

impl TeamDto {
    pub fn list_from_response(body: &Value) -> Vec<TeamDto> {
        response_items::<ApiTeamItem>(body)
            .into_iter()
            .map(|item| TeamDto {
                id: item.team.id,
                name: item.team.name,
                code: item.team.code,
                country: item.team.country,
                founded: item.team.founded,
                logo: item.team.logo,
                venue: item.venue.map(|venue| VenueDto {
                    id: venue.id,
                    name: venue.name,
                    city: venue.city,
                    capacity: venue.capacity,
                }),
            })
            .collect()
    }
}

impl MediaDto {
    /// Primer equipo de la búsqueda; `None` si no hay coincidencias
    pub fn from_sportsdb(body: &Value) -> Option<MediaDto> {
        let first = body.get("teams")?.as_array()?.first()?.clone();
        let team: SportsDbTeam = match serde_json::from_value(first) {
            Ok(team) => team,
            Err(e) => {
                log::warn!("⚠️ Equipo de TheSportsDB con formato inesperado: {}", e);
                return None;
            }
        };

        let banner = non_empty(team.str_team_banner)
            .or(non_empty(team.str_banner))
            .or(non_empty(team.str_team_fanart1))
            .or(non_empty(team.str_fanart1));

        Some(MediaDto {
            team_name: team.str_team,
            badge: non_empty(team.str_team_badge).or(non_empty(team.str_badge)),
            banner,
            stadium: non_empty(team.str_stadium_thumb),
            description: non_empty(team.str_description_en),
        })
    }
}
