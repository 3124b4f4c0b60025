use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::model::game::Match;
use crate::teams::{is_team_label, normalize_team_name};

static TIME_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}:\d{2})").expect("time token regex"));

/// Visible text pieces of one games-table row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RowFragments {
    /// Text of the time cell; `None` for rows without one (headers).
    pub time: Option<String>,
    pub teams: Vec<String>,
    pub venues: Vec<String>,
}

/// Why a row produced no match. Always contained to that row.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RowError {
    #[error("row has no time cell")]
    MissingTimeCell,
    #[error("no start time in {0:?}")]
    NoTimeToken(String),
}

/// Build a match from one row. Missing teams leave the fields empty; a missing
/// start time rejects the row.
pub fn parse_row(fragments: &RowFragments, date: &str, is_test_mode: bool) -> Result<Match, RowError> {
    let full_text = fragments.time.as_deref().ok_or(RowError::MissingTimeCell)?.trim();
    let time = TIME_TOKEN
        .captures(full_text)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| RowError::NoTimeToken(full_text.to_string()))?;

    let mut teams = fragments
        .teams
        .iter()
        .map(|fragment| fragment.trim())
        .filter(|fragment| is_team_label(fragment))
        .map(normalize_team_name);
    let home_team = teams.next().unwrap_or_default();
    let away_team = teams.next().unwrap_or_default();

    let venue = fragments
        .venues
        .first()
        .map(|venue| strip_category(venue.trim()).to_string())
        .unwrap_or_default();

    Ok(Match {
        date: date.to_string(),
        time,
        home_team,
        away_team,
        venue,
        full_text: full_text.to_string(),
        is_test_mode,
    })
}

/// Drop a trailing " - <category>" qualifier: "Parc Durocher - Baseball Mineur" -> "Parc Durocher".
pub fn strip_category(venue: &str) -> &str {
    match venue.split_once(" - ") {
        Some((name, _)) => name.trim_end(),
        None => venue,
    }
}
