#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::path::PathBuf;

use titans_schedule_lambda_rust::artifact::DiagnosticSink;
use titans_schedule_lambda_rust::error::ScheduleError;
use titans_schedule_lambda_rust::html_page::HtmlPage;
use titans_schedule_lambda_rust::model::game::Match;
use titans_schedule_lambda_rust::renderer::{DomNode, Renderer, Scope};

pub const GAMES_URL: &str = "https://play.spordle.test/games";

pub fn load_games_page() -> String {
    std::fs::read_to_string("tests/fixtures/games_page.html").expect("failed to read games_page.html")
}

/// Serves a fixed page and counts how it is used.
pub struct FixtureRenderer {
    page: HtmlPage,
    pub loads: RefCell<Vec<String>>,
    pub queries: Cell<usize>,
    pub fail_queries: bool,
    pub fail_page_text: bool,
    /// Queries with exactly this selector fail.
    pub fail_selector: Option<&'static str>,
}

impl FixtureRenderer {
    pub fn new(html: &str) -> Self {
        Self {
            page: HtmlPage::parse(GAMES_URL, html),
            loads: RefCell::new(Vec::new()),
            queries: Cell::new(0),
            fail_queries: false,
            fail_page_text: false,
            fail_selector: None,
        }
    }
}

impl Renderer for FixtureRenderer {
    fn load(&mut self, url: &str) -> Result<(), ScheduleError> {
        self.loads.borrow_mut().push(url.to_string());
        Ok(())
    }

    fn page_text(&self) -> Result<String, ScheduleError> {
        if self.fail_page_text {
            return Err(ScheduleError::NoPage);
        }
        Ok(self.page.source().to_string())
    }

    fn query(&self, scope: Scope, selector: &str) -> Result<Vec<DomNode>, ScheduleError> {
        self.queries.set(self.queries.get() + 1);
        if self.fail_queries || self.fail_selector == Some(selector) {
            return Err(ScheduleError::Browser("tab crashed".to_string()));
        }
        self.page.select(scope, selector)
    }
}

/// Keeps artifacts in memory.
#[derive(Default)]
pub struct RecordingSink {
    pub written: RefCell<Vec<(String, String)>>,
}

impl DiagnosticSink for RecordingSink {
    fn write_artifact(&self, name: &str, content: &str) -> Result<PathBuf, ScheduleError> {
        self.written.borrow_mut().push((name.to_string(), content.to_string()));
        Ok(PathBuf::from(name))
    }
}

/// A sink whose writes always fail.
pub struct BrokenSink;

impl DiagnosticSink for BrokenSink {
    fn write_artifact(&self, _name: &str, _content: &str) -> Result<PathBuf, ScheduleError> {
        Err(ScheduleError::Io(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only")))
    }
}

pub fn sample_match(time: &str, home: &str, away: &str, venue: &str) -> Match {
    Match {
        date: "Wednesday, July 09, 2025".to_string(),
        time: time.to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        venue: venue.to_string(),
        full_text: time.to_string(),
        is_test_mode: false,
    }
}
