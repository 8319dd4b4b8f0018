//! HTTP surface: page routes with a cookie-backed session, plus `/health`

use axum::{
    extract::{Form, Query, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::config::AppConfig;
use crate::engine::RecommendationEngine;
use crate::error::BookEngineError;
use crate::pages::{Action, Page, PageController};
use crate::render::render_page;
use crate::session::{session_cookie, session_id_from_cookie, SessionStore};

#[derive(Clone)]
pub struct AppState {
    engine: Arc<RecommendationEngine>,
    sessions: Arc<SessionStore>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(engine: RecommendationEngine, config: AppConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            sessions: Arc::new(SessionStore::new()),
            config: Arc::new(config),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }
}

#[derive(Debug, Deserialize)]
struct LoginForm {
    #[serde(default)]
    username: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
struct RecommendParams {
    title: Option<String>,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    books: usize,
    terms: usize,
    matcher: String,
    loaded_at: DateTime<Utc>,
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(login_handler))
        .route("/login", get(login_handler).post(login_submit_handler))
        .route("/home", get(home_handler))
        .route("/recommendations", get(recommendations_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        books: state.engine.catalog().len(),
        terms: state.engine.matrix().dims(),
        matcher: state.engine.matcher_name().to_string(),
        loaded_at: state.engine.catalog().loaded_at(),
    })
}

async fn login_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    run_page(&state, &headers, Page::Login, Action::View)
}

async fn login_submit_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let action = Action::Login {
        username: form.username,
        password: form.password,
    };
    run_page(&state, &headers, Page::Login, action)
}

async fn home_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    run_page(&state, &headers, Page::Home, Action::View)
}

async fn recommendations_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<RecommendParams>,
) -> Result<Response, AppError> {
    let action = match params.title {
        Some(title) => Action::Recommend { title },
        None => Action::View,
    };
    run_page(&state, &headers, Page::Recommendations, action)
}

/// Resolve the session, run the page logic and render it
fn run_page(
    state: &AppState,
    headers: &HeaderMap,
    page: Page,
    action: Action,
) -> Result<Response, AppError> {
    let cookie_id = headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(session_id_from_cookie);
    let (id, mut session, created) = state.sessions.resolve(cookie_id);

    tracing::debug!("{:?} {} (session {})", page, action_name(&action), id);

    let controller = PageController::new(&state.engine, &state.config);
    let screen = controller.handle(page, action, &mut session);
    state.sessions.update(id, session);

    let mut body = Vec::new();
    render_page(&mut body, page, &screen)?;

    let mut response = Html(body).into_response();
    if created {
        let cookie = HeaderValue::from_str(&session_cookie(id))
            .map_err(|e| BookEngineError::Other(format!("Invalid session cookie: {}", e)))?;
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    Ok(response)
}

/// Action label for logs, without the submitted password
fn action_name(action: &Action) -> &'static str {
    match action {
        Action::View => "view",
        Action::Login { .. } => "login",
        Action::Recommend { .. } => "recommend",
    }
}

// Error handling
struct AppError(BookEngineError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let message = self.0.to_string();

        tracing::error!("❌ Error: {} - {}", status, message);

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<BookEngineError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::pages::{ACCESS_DENIED, LOGIN_SUCCESS};
    use crate::session::SESSION_COOKIE;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/books.json");

    fn state() -> AppState {
        let engine = RecommendationEngine::new(Catalog::load(FIXTURE).unwrap());
        AppState::new(engine, AppConfig::default())
    }

    fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
        let mut request = Request::builder().uri(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        request.body(Body::empty()).unwrap()
    }

    fn login(form: &str, cookie: Option<&str>) -> Request<Body> {
        let mut request = Request::builder()
            .method("POST")
            .uri("/login")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        request.body(Body::from(form.to_string())).unwrap()
    }

    /// `name=value` pair from the response's `Set-Cookie`, if any
    fn set_cookie(response: &Response) -> Option<String> {
        response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(state());
        let response = app.oneshot(get("/health", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["books"], 14);
        assert_eq!(json["matcher"], "weighted-ratio");
    }

    #[tokio::test]
    async fn test_gated_page_denied_without_cookie() {
        let app = router(state());
        let response = app
            .oneshot(get("/recommendations?title=Dune", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).unwrap().starts_with(SESSION_COOKIE));
        let html = body_text(response).await;
        assert!(html.contains(ACCESS_DENIED));
        assert!(!html.contains("Top Recommended Books"));
    }

    #[tokio::test]
    async fn test_login_then_gated_page() {
        let state = state();
        let app = router(state.clone());

        let response = app
            .clone()
            .oneshot(login("username=reader&password=secret", None))
            .await
            .unwrap();
        let cookie = set_cookie(&response).expect("login issues a session cookie");
        assert!(body_text(response).await.contains(LOGIN_SUCCESS));
        assert_eq!(state.sessions().len(), 1);

        let response = app
            .clone()
            .oneshot(get("/recommendations?title=Dune", Some(&cookie)))
            .await
            .unwrap();
        // known session: no new cookie
        assert!(set_cookie(&response).is_none());
        let html = body_text(response).await;
        assert!(html.contains("Top Recommended Books:"));
        assert!(html.contains("Dune Messiah"));

        // the login page now only shows the sidebar note
        let response = app.oneshot(get("/login", Some(&cookie))).await.unwrap();
        assert!(body_text(response).await.contains("You are already logged in."));
    }

    #[tokio::test]
    async fn test_failed_login_keeps_store_empty() {
        let state = state();
        let app = router(state.clone());

        let response = app.clone().oneshot(login("username=reader", None)).await.unwrap();
        assert!(body_text(response).await.contains("Please enter both username and password."));

        for _ in 0..10 {
            app.clone().oneshot(get("/home", None)).await.unwrap();
        }
        assert!(state.sessions().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_cookie_is_replaced() {
        let app = router(state());
        let stale = format!("{}={}", SESSION_COOKIE, uuid::Uuid::new_v4());

        let response = app.oneshot(get("/home", Some(&stale))).await.unwrap();
        let fresh = set_cookie(&response).unwrap();
        assert_ne!(fresh, stale);
        assert!(body_text(response).await.contains("Home Page"));
    }
}
