use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::{debug, info, info_span, instrument, warn};

use crate::config::{BrowserConfig, SpordleConfig};
use crate::error::ScheduleError;
use crate::html_page::HtmlPage;
use crate::renderer::{DomNode, Renderer, Scope};

const PASSWORD_FIELD: &str = "input[name=\"password\"]";
const SCHEDULE_HOST: &str = "play.spordle.com";
// Present once the games list has rendered.
const RENDERED_MARKER: &str = "table.MuiTable-root";
const LOGIN_POLL: Duration = Duration::from_millis(500);

/// Performs the scheduling site's login flow.
pub trait Authenticator {
    fn login(&mut self) -> Result<(), ScheduleError>;
}

/// A headless Chrome tab logged into the scheduling site.
///
/// Each `load` replaces the held snapshot of the rendered DOM; queries run
/// against that snapshot.
pub struct BrowserSession {
    _browser: Browser,
    tab: Arc<Tab>,
    settings: BrowserConfig,
    site: SpordleConfig,
    snapshot: Option<HtmlPage>,
}

impl fmt::Debug for BrowserSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrowserSession")
            .field("settings", &self.settings)
            .field("site", &self.site)
            .field("snapshot", &self.snapshot.as_ref().map(HtmlPage::url))
            .finish()
    }
}

impl BrowserSession {
    /// Start the browser and open a blank tab.
    #[instrument(level = "info", skip_all, fields(headless = settings.headless))]
    pub fn launch(settings: &BrowserConfig, site: &SpordleConfig) -> Result<Self, ScheduleError> {
        let options = LaunchOptions::default_builder()
            .headless(settings.headless)
            .sandbox(false)
            .window_size(Some((1920, 1080)))
            .path(settings.chrome_path.clone())
            .build()
            .map_err(browser_error)?;
        let browser = Browser::new(options).map_err(browser_error)?;
        let tab = browser.new_tab().map_err(browser_error)?;
        info!("Browser started");
        Ok(Self {
            _browser: browser,
            tab,
            settings: settings.clone(),
            site: site.clone(),
            snapshot: None,
        })
    }
}

impl Authenticator for BrowserSession {
    fn login(&mut self) -> Result<(), ScheduleError> {
        let _span = info_span!("spordle_login").entered();
        self.tab.navigate_to(&self.site.login_url).map_err(browser_error)?;
        self.tab.wait_until_navigated().map_err(browser_error)?;
        info!("Login page loaded");

        let field = self.tab.wait_for_element(PASSWORD_FIELD).map_err(browser_error)?;
        field.click().map_err(browser_error)?;
        field.type_into(&self.site.password).map_err(browser_error)?;
        self.tab.press_key("Enter").map_err(browser_error)?;
        info!("Login submitted");

        let deadline = Instant::now() + self.settings.login_timeout;
        loop {
            let url = self.tab.get_url();
            if url.contains(SCHEDULE_HOST) {
                info!(url = %url, "Logged in to Spordle");
                return Ok(());
            }
            if Instant::now() >= deadline {
                warn!(url = %url, "Login did not redirect to the schedule site");
                return Err(ScheduleError::LoginRejected(url));
            }
            std::thread::sleep(LOGIN_POLL);
        }
    }
}

impl Renderer for BrowserSession {
    fn load(&mut self, url: &str) -> Result<(), ScheduleError> {
        let _span = info_span!("page_render", url = %url).entered();
        self.snapshot = None;
        self.tab.navigate_to(url).map_err(browser_error)?;
        self.tab.wait_until_navigated().map_err(browser_error)?;
        if let Err(e) = self
            .tab
            .wait_for_element_with_custom_timeout(RENDERED_MARKER, self.settings.settle_timeout)
        {
            // Not fatal: the date check decides what an incomplete page means.
            debug!(error = %e, "Games table did not render before the settle timeout");
        }
        let source = self.tab.get_content().map_err(browser_error)?;
        info!(bytes = source.len(), "Captured rendered page");
        self.snapshot = Some(HtmlPage::parse(url, source));
        Ok(())
    }

    fn page_text(&self) -> Result<String, ScheduleError> {
        self.snapshot
            .as_ref()
            .map(|page| page.source().to_string())
            .ok_or(ScheduleError::NoPage)
    }

    fn query(&self, scope: Scope, selector: &str) -> Result<Vec<DomNode>, ScheduleError> {
        self.snapshot.as_ref().ok_or(ScheduleError::NoPage)?.select(scope, selector)
    }
}

fn browser_error(e: impl fmt::Display) -> ScheduleError {
    ScheduleError::Browser(e.to_string())
}
