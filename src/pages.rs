use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::core::{BookView, RecommendationResponse};
use crate::engine::{RecommendQuery, RecommendationEngine};
use crate::session::{LoginOutcome, Session};

pub const ALREADY_LOGGED_IN: &str = "You are already logged in.";
pub const LOGIN_SUCCESS: &str = "Logged in successfully!";
pub const LOGIN_MISSING: &str = "Please enter both username and password.";
pub const ACCESS_DENIED: &str = "Please log in to access the Book Recommendations page.";
pub const ENTER_TITLE: &str = "Please enter a book title.";
pub const NO_RECOMMENDATIONS: &str = "No recommendations found.";

/// Sidebar navigation choices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    Login,
    Home,
    Recommendations,
}

impl Page {
    /// Sidebar order; the first entry is the default
    pub const ALL: [Page; 3] = [Page::Login, Page::Home, Page::Recommendations];

    pub fn label(self) -> &'static str {
        match self {
            Page::Login => "Login",
            Page::Home => "Home",
            Page::Recommendations => "Book Recommendations",
        }
    }

    /// URL path of the page
    pub fn path(self) -> &'static str {
        match self {
            Page::Login => "/login",
            Page::Home => "/home",
            Page::Recommendations => "/recommendations",
        }
    }
}

impl Default for Page {
    fn default() -> Self {
        Page::Login
    }
}

/// User interaction submitted with a page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Plain navigation
    View,
    /// Login button pressed
    Login { username: String, password: String },
    /// "Get Recommendations" button pressed
    Recommend { title: String },
}

/// Flash message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// What a page shows, independent of how it is rendered
#[derive(Debug, Clone)]
pub enum Screen {
    /// Login form with an optional result message
    LoginForm { flash: Option<(Level, &'static str)> },
    /// Login page while logged in: only the sidebar note
    AlreadyLoggedIn,
    Home { books: Vec<BookView> },
    /// Recommendations page for a logged-in user
    Recommendations { title: String, result: Option<RecommendResult> },
    AccessDenied,
}

/// Outcome of pressing "Get Recommendations"
#[derive(Debug, Clone)]
pub enum RecommendResult {
    /// Blank title, no lookup performed
    MissingTitle,
    Found(RecommendationResponse),
}

impl RecommendResult {
    /// Recommendations split into the two display columns (first three, rest)
    pub fn columns(&self) -> (&[BookView], &[BookView]) {
        match self {
            RecommendResult::MissingTitle => (&[], &[]),
            RecommendResult::Found(response) => {
                let split = response.books.len().min(3);
                response.books.split_at(split)
            }
        }
    }
}

/// Page controller: runs one interaction top to bottom against the session
pub struct PageController<'a> {
    engine: &'a RecommendationEngine,
    config: &'a AppConfig,
}

impl<'a> PageController<'a> {
    pub fn new(engine: &'a RecommendationEngine, config: &'a AppConfig) -> Self {
        Self { engine, config }
    }

    pub fn handle(&self, page: Page, action: Action, session: &mut Session) -> Screen {
        match page {
            Page::Login => self.login_page(action, session),
            Page::Home => self.home_page(),
            Page::Recommendations if session.logged_in => self.recommendations_page(action),
            Page::Recommendations => Screen::AccessDenied,
        }
    }

    fn login_page(&self, action: Action, session: &mut Session) -> Screen {
        if session.logged_in {
            return Screen::AlreadyLoggedIn;
        }

        let flash = match action {
            Action::Login { username, password } => match session.login(&username, &password) {
                LoginOutcome::Success => {
                    tracing::info!("🔓 Session logged in as '{}'", username);
                    Some((Level::Success, LOGIN_SUCCESS))
                }
                LoginOutcome::MissingCredentials => Some((Level::Error, LOGIN_MISSING)),
            },
            _ => None,
        };
        Screen::LoginForm { flash }
    }

    fn home_page(&self) -> Screen {
        let books = self
            .engine
            .catalog()
            .featured(self.config.home_min_reviews, self.config.home_min_rating)
            .into_iter()
            .map(|b| b.view())
            .collect();
        Screen::Home { books }
    }

    fn recommendations_page(&self, action: Action) -> Screen {
        match action {
            Action::Recommend { title } => {
                let result = if title.trim().is_empty() {
                    RecommendResult::MissingTitle
                } else {
                    let query = RecommendQuery::new(title.as_str()).with_top_n(self.config.top_n);
                    RecommendResult::Found(self.engine.recommend(&query))
                };
                Screen::Recommendations { title, result: Some(result) }
            }
            _ => Screen::Recommendations { title: String::new(), result: None },
        }
    }
}
