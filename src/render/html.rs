//! Server-rendered pages. The markup lives in `templates/*.rs.html`
//! (compiled by ructe, escaping every interpolated value); the structs here
//! hand the templates ready-to-print values.

use std::io::{self, Write};

use crate::core::BookView;
use crate::pages::{Level, Page, RecommendResult, Screen};
use crate::render::stars::rating_to_stars;

include!(concat!(env!("OUT_DIR"), "/templates.rs"));

const STYLE: &str = "body{font-family:sans-serif;margin:0;display:flex;background:#0e1117;color:#fafafa}\
aside{width:240px;padding:1.5rem;background:#262730;min-height:100vh}\
aside a{color:inherit;text-decoration:none;display:block;margin:.4rem 0}\
main{flex:1;padding:2rem 3rem}\
.columns{display:flex;gap:3rem}.column{flex:1}\
.success{color:#21c354}.error{color:#ff4b4b}.notice{color:#ffbd45}\
figure{margin:0}figcaption{font-size:.85rem;color:#aaa}";

/// Render a full page: sidebar navigation plus the screen body
pub fn render_page<W: Write>(out: &mut W, page: Page, screen: &Screen) -> io::Result<()> {
    let view = PageView::new(page, screen);
    match screen {
        Screen::LoginForm { flash } => templates::login_html(out, &view, flash.map(Flash::from)),
        Screen::AlreadyLoggedIn => {
            templates::header_html(&mut *out, &view)?;
            templates::footer_html(out)
        }
        Screen::Home { books } => {
            let cards: Vec<BookCard> = books.iter().map(BookCard::new).collect();
            templates::home_html(out, &view, &cards)
        }
        Screen::Recommendations { title, result } => {
            let form = RecommendForm::new(title, result.as_ref());
            templates::recommendations_html(out, &view, &form)
        }
        Screen::AccessDenied => templates::denied_html(out, &view),
    }
}

/// Page chrome: document title, styles and the sidebar
pub struct PageView<'a> {
    page: Page,
    screen: &'a Screen,
}

impl<'a> PageView<'a> {
    fn new(page: Page, screen: &'a Screen) -> Self {
        Self { page, screen }
    }

    pub fn title(&self) -> &'static str {
        self.page.label()
    }

    pub fn critical_css(&self) -> templates::Html<&'static str> {
        templates::Html(STYLE)
    }

    /// Sidebar entries in display order, the current page marked
    pub fn nav(&self) -> Vec<NavLink> {
        Page::ALL
            .iter()
            .map(|&page| NavLink {
                path: page.path(),
                marker: if page == self.page { "◉" } else { "○" },
                label: page.label(),
            })
            .collect()
    }

    pub fn already_logged_in(&self) -> bool {
        matches!(self.screen, Screen::AlreadyLoggedIn)
    }
}

pub struct NavLink {
    pub path: &'static str,
    pub marker: &'static str,
    pub label: &'static str,
}

/// Login result message and its CSS class
#[derive(Debug, Clone, Copy)]
pub struct Flash {
    pub class: &'static str,
    pub message: &'static str,
}

impl From<(Level, &'static str)> for Flash {
    fn from((level, message): (Level, &'static str)) -> Self {
        let class = match level {
            Level::Success => "success",
            Level::Error => "error",
        };
        Self { class, message }
    }
}

/// Recommendations page state: the echoed query and what to show below it
pub struct RecommendForm<'a> {
    title: &'a str,
    missing_title: bool,
    notice: Option<&'a str>,
    no_results: bool,
    left: Vec<BookCard<'a>>,
    right: Vec<BookCard<'a>>,
}

impl<'a> RecommendForm<'a> {
    fn new(title: &'a str, result: Option<&'a RecommendResult>) -> Self {
        let mut form = Self {
            title,
            missing_title: false,
            notice: None,
            no_results: false,
            left: Vec::new(),
            right: Vec::new(),
        };

        let Some(result) = result else {
            return form;
        };
        match result {
            RecommendResult::MissingTitle => form.missing_title = true,
            RecommendResult::Found(response) => {
                form.notice = response.notice.as_deref();
                form.no_results = response.is_empty();
                let (left, right) = result.columns();
                form.left = left.iter().map(BookCard::new).collect();
                form.right = right.iter().map(BookCard::new).collect();
            }
        }
        form
    }

    pub fn title(&self) -> &str {
        self.title
    }

    pub fn action(&self) -> &'static str {
        Page::Recommendations.path()
    }

    pub fn missing_title(&self) -> bool {
        self.missing_title
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice
    }

    pub fn no_results(&self) -> bool {
        self.no_results
    }

    pub fn has_results(&self) -> bool {
        !self.left.is_empty()
    }

    /// First three recommendations
    pub fn left(&self) -> &[BookCard<'a>] {
        &self.left
    }

    pub fn right(&self) -> &[BookCard<'a>] {
        &self.right
    }
}

/// One book as shown on the Home and Recommendations pages
pub struct BookCard<'a> {
    book: &'a BookView,
}

impl<'a> BookCard<'a> {
    pub fn new(book: &'a BookView) -> Self {
        Self { book }
    }

    pub fn title(&self) -> &str {
        &self.book.title
    }

    pub fn author(&self) -> &str {
        &self.book.author
    }

    pub fn image_url(&self) -> &str {
        &self.book.image_url
    }

    /// "More like this" link back to the Recommendations page
    pub fn link(&self) -> String {
        format!(
            "{}?title={}",
            Page::Recommendations.path(),
            urlencoding::encode(&self.book.title)
        )
    }

    pub fn rating(&self) -> String {
        format!("{:.1}", self.book.rating)
    }

    pub fn stars(&self) -> String {
        rating_to_stars(self.book.rating)
    }

    pub fn reviews(&self) -> u64 {
        self.book.reviews
    }
}
