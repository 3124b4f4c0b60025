//! Daily game list for the Titans: read the day's games from the league's
//! Spordle schedule and publish them to the club's Facebook page.

pub mod artifact;
pub mod browser;
pub mod config;
pub mod dates;
pub mod error;
pub mod extractor;
pub mod facebook;
pub mod gate;
pub mod handler;
pub mod html_page;
pub mod images;
pub mod message;
pub mod model;
pub mod publish;
pub mod renderer;
pub mod row;
pub mod teams;
