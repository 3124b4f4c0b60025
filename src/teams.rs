use std::sync::LazyLock;

use regex::Regex;

// "TOROS 3 - 9U - B - Masculin - LOTBINIÈRE": code, optional team number, age bracket, division.
static VERBOSE_TEAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\p{Lu}+(?:\s+\d+)?).*?(\d+U).*?([AB])").expect("verbose team regex")
});

// First token all capitals (accents allowed), optionally followed by a team number.
static TEAM_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\p{Lu}[\p{Lu}\d'-]*(?:\s+\d+)?(?:\s|$)").expect("team code regex")
});

// Labels rendered in the same cells as team names.
static HEADER_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:game|partie|match|parc|terrain|field|court)\b").expect("header word regex")
});

/// Collapse a verbose team label to "<CODE> <#> <AGE><DIVISION>", e.g.
/// "TOROS 3 - 9U - B - LOTBINIÈRE" becomes "TOROS 3 9UB".
///
/// Labels that do not have that shape are returned unchanged; applying the
/// function to its own output is a no-op.
pub fn normalize_team_name(label: &str) -> String {
    match VERBOSE_TEAM.captures(label) {
        Some(caps) => format!("{} {}{}", caps[1].trim(), &caps[2], &caps[3]),
        None => label.to_string(),
    }
}

/// Whether a cell fragment looks like a team label rather than stray cell text.
///
/// This is a shape heuristic tuned to the league's naming; unusual team names
/// can slip through either way.
pub fn is_team_label(fragment: &str) -> bool {
    TEAM_CODE.is_match(fragment) && !HEADER_WORD.is_match(fragment)
}
