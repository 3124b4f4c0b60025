use thiserror::Error;

/// Failures that escape a run: configuration, browser, network and publishing problems.
///
/// A denied date check is not represented here; it surfaces as an empty match list.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("environment variable {0} must be set")]
    MissingEnv(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("date offset {0} days is out of range")]
    DateOffsetOutOfRange(i64),

    #[error("browser failure: {0}")]
    Browser(String),

    #[error("login did not reach the schedule site (landed on {0})")]
    LoginRejected(String),

    #[error("no page has been loaded yet")]
    NoPage,

    #[error("invalid selector `{selector}`: {reason}")]
    Selector { selector: String, reason: String },

    #[error("node {0} is not part of the current page")]
    UnknownNode(usize),

    #[error("HTTP request failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("Facebook rejected the request: {0}")]
    Publish(String),

    #[error("image processing failed: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
