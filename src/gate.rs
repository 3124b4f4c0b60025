//! Date confirmation that must pass before any games-table row is read.
//!
//! Two independent signals are required: the target date appears somewhere in
//! the page source, and a date heading element reads exactly as the target
//! date. Anything short of both, including renderer errors, denies extraction.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info, warn};

use crate::dates::AcceptedDates;
use crate::error::ScheduleError;
use crate::model::game::Match;
use crate::renderer::{DomNode, Renderer, Scope};

const MAX_HEADING_LEN: usize = 100;

static HEADING_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\w+day,.*\d{4}").expect("heading shape regex"));

/// A selector for date headings plus a filter on the text it yields.
struct HeadingPattern {
    selector: &'static str,
    keep: fn(&str, &AcceptedDates) -> bool,
}

// Every pattern is consulted; candidates from all of them are pooled.
const HEADING_PATTERNS: &[HeadingPattern] = &[
    HeadingPattern {
        selector: "h6.MuiTypography-subtitle2.MuiTypography-displayInline",
        keep: |_, _| true,
    },
    HeadingPattern {
        selector: "h6.MuiTypography-root",
        keep: |text, dates| text.contains(&dates.year().to_string()),
    },
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    Allow,
    Deny(DenyReason),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DenyReason {
    /// No accepted date string occurs in the page source.
    DateAbsentFromPage,
    /// The source mentions the date but no heading reads exactly as it.
    NoExactHeading,
    /// The renderer failed while checking.
    Renderer(String),
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenyReason::DateAbsentFromPage => write!(f, "target date not found in page source"),
            DenyReason::NoExactHeading => write!(f, "no date heading matches the target date exactly"),
            DenyReason::Renderer(e) => write!(f, "renderer failed during date check: {e}"),
        }
    }
}

/// Furthest point the check reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GateStage {
    Unvalidated,
    HtmlChecked,
    DomConfirmed,
    DomDenied,
}

/// Outcome of one date check. Built once by [`evaluate`] and never modified.
#[derive(Clone, Debug)]
pub struct GateReport {
    stage: GateStage,
    html_confirmed: bool,
    dom_confirmed: bool,
    candidates: Vec<DomNode>,
    confirmed_heading: Option<DomNode>,
    verdict: Verdict,
}

impl GateReport {
    /// A report that denies extraction without having looked at anything.
    pub fn denied(reason: DenyReason) -> Self {
        Self::deny(GateStage::Unvalidated, false, Vec::new(), reason)
    }

    fn deny(stage: GateStage, html_confirmed: bool, candidates: Vec<DomNode>, reason: DenyReason) -> Self {
        Self {
            stage,
            html_confirmed,
            dom_confirmed: false,
            candidates,
            confirmed_heading: None,
            verdict: Verdict::Deny(reason),
        }
    }

    fn allow(candidates: Vec<DomNode>, heading: DomNode) -> Self {
        Self {
            stage: GateStage::DomConfirmed,
            html_confirmed: true,
            dom_confirmed: true,
            candidates,
            confirmed_heading: Some(heading),
            verdict: Verdict::Allow,
        }
    }

    pub fn verdict(&self) -> &Verdict {
        &self.verdict
    }

    pub fn is_allowed(&self) -> bool {
        self.verdict == Verdict::Allow
    }

    pub fn stage(&self) -> GateStage {
        self.stage
    }

    pub fn html_confirmed(&self) -> bool {
        self.html_confirmed
    }

    pub fn dom_confirmed(&self) -> bool {
        self.dom_confirmed
    }

    /// Every date-looking heading seen, for diagnostics.
    pub fn candidates(&self) -> &[DomNode] {
        &self.candidates
    }

    /// The heading whose text equals an accepted date string.
    pub fn confirmed_heading(&self) -> Option<&DomNode> {
        self.confirmed_heading.as_ref()
    }

    /// Hand back `matches` only when this report allows extraction and its
    /// flags agree with that; otherwise return nothing.
    pub fn release(&self, matches: Vec<Match>) -> Vec<Match> {
        let consistent = match self.verdict {
            Verdict::Allow => self.html_confirmed && self.dom_confirmed && self.confirmed_heading.is_some(),
            Verdict::Deny(_) => false,
        };
        if consistent {
            return matches;
        }
        if !matches.is_empty() {
            warn!(
                count = matches.len(),
                verdict = ?self.verdict,
                html_confirmed = self.html_confirmed,
                dom_confirmed = self.dom_confirmed,
                "Discarding matches produced without a confirmed date"
            );
        }
        Vec::new()
    }
}

/// Run the two-stage date check against the page currently held by `renderer`.
pub fn evaluate<R: Renderer + ?Sized>(renderer: &R, dates: &AcceptedDates) -> GateReport {
    let page_text = match renderer.page_text() {
        Ok(text) => text,
        Err(e) => return failed(GateStage::Unvalidated, false, e),
    };

    if !dates.found_in(&page_text) {
        info!(padded = dates.padded(), unpadded = dates.unpadded(), "Target date absent from page source");
        return GateReport::deny(GateStage::Unvalidated, false, Vec::new(), DenyReason::DateAbsentFromPage);
    }
    debug!("Target date present in page source; checking date headings");

    let candidates = match heading_candidates(renderer, dates) {
        Ok(candidates) => candidates,
        Err(e) => return failed(GateStage::HtmlChecked, true, e),
    };

    match candidates.iter().find(|c| dates.matches_exactly(&c.text)).cloned() {
        Some(heading) => {
            info!(heading = %heading.text, "Date heading confirmed");
            GateReport::allow(candidates, heading)
        }
        None => {
            info!(candidates = candidates.len(), "No date heading matches the target date exactly");
            GateReport::deny(GateStage::DomDenied, true, candidates, DenyReason::NoExactHeading)
        }
    }
}

fn failed(stage: GateStage, html_confirmed: bool, error: ScheduleError) -> GateReport {
    warn!(error = %error, stage = ?stage, "Date check failed; denying extraction");
    GateReport::deny(stage, html_confirmed, Vec::new(), DenyReason::Renderer(error.to_string()))
}

fn heading_candidates<R: Renderer + ?Sized>(renderer: &R, dates: &AcceptedDates) -> Result<Vec<DomNode>, ScheduleError> {
    let mut candidates: Vec<DomNode> = Vec::new();
    let mut last_error = None;
    let mut answered = 0;
    for pattern in HEADING_PATTERNS {
        let nodes = match renderer.query(Scope::Document, pattern.selector) {
            Ok(nodes) => nodes,
            Err(e) => {
                debug!(selector = pattern.selector, error = %e, "Heading pattern failed; trying next");
                last_error = Some(e);
                continue;
            }
        };
        answered += 1;
        for node in nodes {
            let looks_like_date = HEADING_SHAPE.is_match(&node.text) && node.text.chars().count() < MAX_HEADING_LEN;
            if !looks_like_date || !(pattern.keep)(&node.text, dates) {
                continue;
            }
            if candidates.iter().any(|c| c.handle == node.handle) {
                continue;
            }
            debug!(text = %node.text, selector = pattern.selector, "Date heading candidate");
            candidates.push(node);
        }
    }
    // Only a renderer that failed every pattern is reported as a failure.
    match last_error {
        Some(e) if answered == 0 => Err(e),
        _ => Ok(candidates),
    }
}
