use serde::{Deserialize, Serialize};

/// One game scheduled on the target day, as read from the games table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// Display form of the target day, e.g. "Wednesday, July 09, 2025".
    pub date: String,
    /// Start time token, e.g. "7:30".
    pub time: String,
    pub home_team: String,
    pub away_team: String,
    /// Venue with its " - <category>" suffix removed.
    pub venue: String,
    /// Raw time cell text, kept for diagnostics.
    pub full_text: String,
    /// Set when the target day is not the real current day.
    pub is_test_mode: bool,
}
