use chrono::{NaiveDate, Utc};
use lambda_runtime::{Error, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::artifact::FsArtifactSink;
use crate::browser::{Authenticator, BrowserSession};
use crate::config::Config;
use crate::dates::{SITE_TZ, target_date};
use crate::error::ScheduleError;
use crate::extractor::ScheduleExtractor;
use crate::facebook::Facebook;
use crate::message::compose_message;
use crate::model::game::Match;
use crate::publish::publish_schedule;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Scrape and compose, but do not publish.
    Test,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    pub mode: Mode,
    /// Overrides DATE_OFFSET for this invocation.
    #[serde(default)]
    pub date_offset: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    pub message: String,
    pub matches: Vec<Match>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
}

#[instrument(skip(event))]
pub async fn handler(event: LambdaEvent<Request>) -> Result<Response, Error> {
    let payload = event.payload;
    let config = Config::from_env()?;

    let now = Utc::now().with_timezone(&SITE_TZ);
    let today = now.date_naive();
    let offset = payload.date_offset.unwrap_or(config.date_offset);
    let target = target_date(&now, offset)?;
    if offset != 0 {
        info!(offset, target = %target, "Date shifted from today");
    }

    // spawn_blocking needs owned, 'static inputs; the browser session and ureq calls block.
    let scrape_config = config.clone();
    let matches = tokio::task::spawn_blocking(move || scrape_matches(&scrape_config, target, today)).await??;

    if matches.is_empty() {
        let message = format!(
            "Aucun match trouvé pour le {} ; aucune publication effectuée.",
            target.format("%Y-%m-%d")
        );
        warn!(target = %target, "No matches for the target date; nothing published");
        return Ok(Response { message, matches, post_id: None });
    }
    info!(count = matches.len(), "Matches found for the target date");

    let body = compose_message(target, &matches);
    info!(message = %body, "Prepared message");

    match payload.mode {
        Mode::Test => {
            info!("Test mode; skipping publication");
            Ok(Response { message: body, matches, post_id: None })
        }
        Mode::Production => {
            let facebook = Facebook::new(config.facebook.clone());
            let sponsor_dir = config.sponsor_dir.clone();
            let post_body = body.clone();
            let post_id =
                tokio::task::spawn_blocking(move || publish_schedule(&facebook, &post_body, &sponsor_dir)).await??;
            Ok(Response { message: body, matches, post_id: Some(post_id) })
        }
    }
}

/// Launch the browser, log in and extract the games for `target`.
pub fn scrape_matches(config: &Config, target: NaiveDate, today: NaiveDate) -> Result<Vec<Match>, ScheduleError> {
    let mut session = BrowserSession::launch(&config.browser, &config.spordle)?;
    session.login()?;
    let extractor = ScheduleExtractor::new(
        config.spordle.games_url.clone(),
        FsArtifactSink::new(config.artifact_dir.clone()),
    );
    extractor.extract(&mut session, target, today)
}
