use chrono::NaiveDate;
use tracing::{debug, info, instrument, warn};

use crate::artifact::{DEBUG_PAGE_NAME, DiagnosticSink};
use crate::dates::AcceptedDates;
use crate::error::ScheduleError;
use crate::gate::{self, GateReport, Verdict};
use crate::model::game::Match;
use crate::renderer::{DomNode, NodeHandle, Renderer, Scope};
use crate::row::{RowError, RowFragments, parse_row};

const TABLE_SELECTOR: &str = "table.MuiTable-root";
const ROW_SELECTOR: &str = "tr.MuiTableRow-root";
const TIME_SELECTOR: &str = "td.column-time span.MuiTypography-noWrap";
const TEAM_SELECTOR: &str = "td.column-homeTeamId p.MuiTypography-displayInline";
const VENUE_SELECTOR: &str = "td.column-arenaId p.MuiTypography-displayInline";

/// Where to look for the games table relative to the confirmed date heading.
struct TablePattern {
    name: &'static str,
    scope: fn(NodeHandle) -> Scope,
}

// Tried in order; the first pattern that finds a table wins.
const TABLE_PATTERNS: &[TablePattern] = &[
    TablePattern { name: "following sibling", scope: Scope::FollowingSiblings },
    TablePattern { name: "following", scope: Scope::Following },
    TablePattern { name: "parent", scope: Scope::Parent },
    TablePattern { name: "enclosing div", scope: |heading| Scope::NearestAncestor(heading, "div") },
];

/// Reads the games listed under one day's heading on the league's games page.
#[derive(Debug)]
pub struct ScheduleExtractor<S> {
    games_url: String,
    sink: S,
}

impl<S: DiagnosticSink> ScheduleExtractor<S> {
    pub fn new(games_url: impl Into<String>, sink: S) -> Self {
        Self { games_url: games_url.into(), sink }
    }

    /// Load the games page and return the games scheduled on `target`.
    ///
    /// An empty list means either no games or an unconfirmed date; only a
    /// failure to load the page is an error. `today` marks records taken for
    /// another day as test-mode records.
    #[instrument(level = "info", skip(self, renderer), fields(url = %self.games_url))]
    pub fn extract<R: Renderer>(&self, renderer: &mut R, target: NaiveDate, today: NaiveDate) -> Result<Vec<Match>, ScheduleError> {
        let dates = AcceptedDates::for_date(target);
        let is_test_mode = target != today;
        if is_test_mode {
            info!(target = %target, today = %today, "Test mode: looking for another day's games");
        }
        info!(padded = dates.padded(), unpadded = dates.unpadded(), "Looking for date heading");

        renderer.load(&self.games_url)?;

        let report = gate::evaluate(&*renderer, &dates);
        let matches = match report.verdict() {
            Verdict::Allow => extract_rows(&*renderer, &report, &dates, is_test_mode),
            Verdict::Deny(reason) => {
                warn!(reason = %reason, "Date not confirmed; no games extracted");
                self.record_denial(&*renderer, &report);
                Vec::new()
            }
        };

        let matches = report.release(matches);
        info!(count = matches.len(), "Extraction finished");
        Ok(matches)
    }

    fn record_denial<R: Renderer>(&self, renderer: &R, report: &GateReport) {
        for candidate in report.candidates() {
            info!(text = %candidate.text, "Available date heading");
        }
        match renderer.page_text() {
            Ok(source) => {
                if let Err(e) = self.sink.write_artifact(DEBUG_PAGE_NAME, &source) {
                    warn!(error = %e, "Could not save page source for inspection");
                }
            }
            Err(e) => warn!(error = %e, "Page source unavailable; nothing saved"),
        }
    }
}

fn extract_rows<R: Renderer>(renderer: &R, report: &GateReport, dates: &AcceptedDates, is_test_mode: bool) -> Vec<Match> {
    let Some(heading) = report.confirmed_heading() else {
        warn!("Allowed without a confirmed heading; skipping extraction");
        return Vec::new();
    };
    let Some(table) = locate_table(renderer, heading) else {
        warn!(heading = %heading.text, "No games table found for the confirmed date");
        return Vec::new();
    };

    let rows = match renderer.query(Scope::Within(table.handle), ROW_SELECTOR) {
        Ok(rows) => rows,
        Err(e) => {
            warn!(error = %e, "Could not list table rows");
            return Vec::new();
        }
    };
    info!(rows = rows.len(), "Scanning games table");

    let mut matches = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let fragments = match read_fragments(renderer, row) {
            Ok(fragments) => fragments,
            Err(e) => {
                warn!(row = index, error = %e, "Could not read row; skipping");
                continue;
            }
        };
        match parse_row(&fragments, dates.padded(), is_test_mode) {
            Ok(game) => {
                info!(row = index, time = %game.time, home = %game.home_team, away = %game.away_team, "Match added");
                matches.push(game);
            }
            Err(RowError::MissingTimeCell) => debug!(row = index, "Row without time cell skipped"),
            Err(e) => warn!(row = index, error = %e, "Row skipped"),
        }
    }
    matches
}

fn locate_table<R: Renderer>(renderer: &R, heading: &DomNode) -> Option<DomNode> {
    for pattern in TABLE_PATTERNS {
        match renderer.query((pattern.scope)(heading.handle), TABLE_SELECTOR) {
            Ok(tables) => {
                if let Some(table) = tables.into_iter().next() {
                    info!(pattern = pattern.name, "Games table located");
                    return Some(table);
                }
                debug!(pattern = pattern.name, "No table for pattern");
            }
            Err(e) => debug!(pattern = pattern.name, error = %e, "Table pattern failed"),
        }
    }
    None
}

fn read_fragments<R: Renderer>(renderer: &R, row: &DomNode) -> Result<RowFragments, ScheduleError> {
    let scope = Scope::Within(row.handle);
    let time = renderer.query(scope, TIME_SELECTOR)?.into_iter().next().map(|node| node.text);
    let teams = renderer.query(scope, TEAM_SELECTOR)?.into_iter().map(|node| node.text).collect();
    let venues = renderer.query(scope, VENUE_SELECTOR)?.into_iter().map(|node| node.text).collect();
    Ok(RowFragments { time, teams, venues })
}
