use chrono::NaiveDate;

use crate::model::game::Match;
use crate::row::strip_category;

pub const INTRO: &str = "Venez encourager nos Titans ! Voici les matchs de la journée sur nos terrains:";
pub const DISCLAIMER: &str = "*** Ceci est un message automatisé, toujours valider l'horaire sur: https://page.spordle.com/fr/ligue-de-baseball-mineur-de-la-region-de-quebec/schedule-stats-standings ***";
pub const SPONSOR_THANKS: &str = "Merci à nos commanditaires !";

/// Format the day's games as the text of a page post, in the order given.
pub fn compose_message(target: NaiveDate, matches: &[Match]) -> String {
    let mut body = String::with_capacity(256 + matches.len() * 64);
    body.push_str(INTRO);
    body.push_str("\n\n");
    body.push_str(&format!("⚾ Matchs de la journée ({}) ⚾\n\n", target.format("%Y-%m-%d")));
    for game in matches {
        body.push_str(&format!(
            "⏰ {}  {}  vs  {}  🏟️ {}\n",
            game.time,
            game.home_team,
            game.away_team,
            strip_category(&game.venue)
        ));
    }
    body.push('\n');
    body.push_str(DISCLAIMER);
    body.push_str("\n\n");
    body.push_str(SPONSOR_THANKS);
    body
}
