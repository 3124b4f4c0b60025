use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ScheduleError;

pub const DEFAULT_LOGIN_URL: &str = "https://myaccount.spordle.com/login?c=play&identity=0c74c85b-ba18-41f7-b170-e7b0dd3f4719&r=https%3A%2F%2Fplay.spordle.com%2Flogin%3Fu%3Dgunadeau%40hotmail.com&link=1";
pub const DEFAULT_GAMES_URL: &str = "https://play.spordle.com/games?filter=%7B%22_include%22%3A%5B%22gameBracket%22%5D%2C%22homeTeamOffices%22%3A%5B3784%5D%2C%22seasonId%22%3A%222025-26%22%7D&order=ASC&order=ASC&order=ASC&page=1&perPage=25&sort=date&sort=startTime&sort=number";
pub const DEFAULT_GRAPH_URL: &str = "https://graph.facebook.com/v22.0";

/// Scheduling site access.
#[derive(Clone)]
pub struct SpordleConfig {
    pub login_url: String,
    pub games_url: String,
    pub password: String,
}

impl fmt::Debug for SpordleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpordleConfig")
            .field("login_url", &self.login_url)
            .field("games_url", &self.games_url)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Facebook page the schedule is published to.
#[derive(Clone)]
pub struct FacebookConfig {
    pub page_id: String,
    pub access_token: String,
    pub graph_url: String,
}

impl fmt::Debug for FacebookConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FacebookConfig")
            .field("page_id", &self.page_id)
            .field("access_token", &"<redacted>")
            .field("graph_url", &self.graph_url)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct BrowserConfig {
    pub headless: bool,
    pub chrome_path: Option<PathBuf>,
    /// Longest wait for the games table to render after navigation.
    pub settle_timeout: Duration,
    /// Longest wait for the login redirect.
    pub login_timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub spordle: SpordleConfig,
    pub facebook: FacebookConfig,
    pub browser: BrowserConfig,
    /// Days added to today to pick the target date.
    pub date_offset: i64,
    pub sponsor_dir: PathBuf,
    pub artifact_dir: PathBuf,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ScheduleError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through `lookup`, which returns a variable's value if set.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ScheduleError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ScheduleError::MissingEnv(name));

        let spordle = SpordleConfig {
            login_url: var("SPORDLE_LOGIN_URL").unwrap_or_else(|| DEFAULT_LOGIN_URL.to_string()),
            games_url: var("SPORDLE_GAMES_URL").unwrap_or_else(|| DEFAULT_GAMES_URL.to_string()),
            password: required("SPORDLE_PASS")?,
        };
        let facebook = FacebookConfig {
            page_id: required("FACEBOOK_PAGE_ID")?,
            access_token: required("FACEBOOK_ACCESS_TOKEN")?,
            graph_url: var("FACEBOOK_GRAPH_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_GRAPH_URL.to_string()),
        };
        let browser = BrowserConfig {
            headless: parsed(var("CHROME_HEADLESS"), "CHROME_HEADLESS", true)?,
            chrome_path: var("CHROME_PATH").map(PathBuf::from),
            settle_timeout: Duration::from_secs(parsed(var("PAGE_SETTLE_SECS"), "PAGE_SETTLE_SECS", 10)?),
            login_timeout: Duration::from_secs(parsed(var("LOGIN_TIMEOUT_SECS"), "LOGIN_TIMEOUT_SECS", 15)?),
        };

        Ok(Self {
            spordle,
            facebook,
            browser,
            date_offset: parsed(var("DATE_OFFSET"), "DATE_OFFSET", 0)?,
            sponsor_dir: var("SPONSOR_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("Commanditaire")),
            artifact_dir: var("ARTIFACT_DIR").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("temp")),
        })
    }
}

fn parsed<T: FromStr>(value: Option<String>, name: &'static str, default: T) -> Result<T, ScheduleError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ScheduleError::InvalidEnv { name, value: raw }),
    }
}
