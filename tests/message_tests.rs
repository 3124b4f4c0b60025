mod common;

use chrono::NaiveDate;

use common::sample_match;
use titans_schedule_lambda_rust::message::{DISCLAIMER, INTRO, SPONSOR_THANKS, compose_message};

#[test]
fn composes_full_post_body() {
    let target = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
    let matches = vec![
        sample_match("7:30", "TOROS 3 9UB", "AIGLES 1 9UA", "Parc Durocher"),
        sample_match("18:45", "TITANS 1 13UB", "CARDINAUX 2 13UB", "Parc Ferland - Baseball Mineur"),
    ];

    let body = compose_message(target, &matches);

    let expected = format!(
        "{INTRO}\n\n⚾ Matchs de la journée (2025-07-09) ⚾\n\n\
         ⏰ 7:30  TOROS 3 9UB  vs  AIGLES 1 9UA  🏟️ Parc Durocher\n\
         ⏰ 18:45  TITANS 1 13UB  vs  CARDINAUX 2 13UB  🏟️ Parc Ferland\n\
         \n{DISCLAIMER}\n\n{SPONSOR_THANKS}"
    );
    assert_eq!(body, expected);
}

#[test]
fn keeps_input_order() {
    let target = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
    let matches = vec![
        sample_match("19:00", "LATE", "GAME", "Parc B"),
        sample_match("9:00", "EARLY", "GAME", "Parc A"),
    ];

    let body = compose_message(target, &matches);

    let late = body.find("LATE").expect("late game listed");
    let early = body.find("EARLY").expect("early game listed");
    assert!(late < early, "body was: {}", body);
}

#[test]
fn strips_any_venue_category() {
    let target = NaiveDate::from_ymd_opt(2025, 7, 9).unwrap();
    let matches = vec![sample_match("7:30", "A", "B", "Parc Durocher - Softball Féminin")];

    let body = compose_message(target, &matches);

    assert!(body.contains("🏟️ Parc Durocher\n"), "body was: {}", body);
    assert!(!body.contains("Softball"), "body was: {}", body);
}
