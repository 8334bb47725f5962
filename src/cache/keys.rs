//! Claves de caché
//!
//! Cada operación de lectura genera una clave determinista a partir de su
//! nombre y de sus parámetros normalizados.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref SPECIAL_CHARS: Regex = Regex::new(r"[^a-z0-9\s]").unwrap();
}

/// Normalizar un nombre de equipo: minúsculas, sin acentos, sin caracteres especiales
pub fn normalize_team_name(name: &str) -> String {
    let folded: String = name
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    SPECIAL_CHARS.replace_all(&folded, "").trim().to_string()
}

pub fn fixtures_by_team(team_id: i64, season: i32) -> String {
    format!("fixtures:team:{}:{}", team_id, season)
}

pub fn fixtures_by_league(league_id: i64, season: i32, round: Option<&str>) -> String {
    match round {
        Some(round) => format!(
            "fixtures:league:{}:{}:{}",
            league_id,
            season,
            normalize_team_name(round)
        ),
        None => format!("fixtures:league:{}:{}", league_id, season),
    }
}

pub fn standings(league_id: i64, season: i32) -> String {
    format!("standings:{}:{}", league_id, season)
}

pub fn team_by_id(team_id: i64) -> String {
    format!("team:{}", team_id)
}

pub fn team_search(query: &str, league_id: i64) -> String {
    format!("teams:search:{}:{}", normalize_team_name(query), league_id)
}

pub fn team_media(team_name: &str) -> String {
    format!("media:team:{}", normalize_team_name(team_name))
}
