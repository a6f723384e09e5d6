//! HTTP server for the site, with optional live reload

mod livereload;

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Form, Path, Query, State},
    http::{header, Request, StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::broadcast;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::error::SiteError;
use crate::svg;
use crate::views::Site;
use crate::Folio;

/// Server state
pub struct AppState {
    site: Arc<Site>,
    reload_tx: broadcast::Sender<()>,
    live_reload: bool,
}

impl AppState {
    pub fn new(site: Arc<Site>, live_reload: bool) -> Self {
        let (reload_tx, _) = broadcast::channel::<()>(16);
        Self {
            site,
            reload_tx,
            live_reload,
        }
    }

    /// Turn a rendered view into a response
    fn respond(&self, result: crate::Result<String>) -> Response {
        match result {
            Ok(html) => self.html(StatusCode::OK, html),
            Err(e) => self.error(e),
        }
    }

    fn html(&self, status: StatusCode, html: String) -> Response {
        let html = if self.live_reload {
            livereload::inject(&html)
        } else {
            html
        };
        (status, Html(html)).into_response()
    }

    fn error(&self, err: SiteError) -> Response {
        match err {
            SiteError::NotFound(what) => {
                tracing::debug!("Not found: {}", what);
                self.not_found()
            }
            SiteError::InvalidName(name) => {
                tracing::debug!("Rejected name: {:?}", name);
                (StatusCode::BAD_REQUEST, "Bad request").into_response()
            }
            other => {
                tracing::error!("Request failed: {}", other);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
            }
        }
    }

    fn not_found(&self) -> Response {
        match self.site.not_found() {
            Ok(html) => self.html(StatusCode::NOT_FOUND, html),
            Err(e) => {
                tracing::error!("Failed to render 404 page: {}", e);
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
        }
    }
}

/// Build the application router
pub fn router(state: Arc<AppState>) -> Router {
    let mut app = Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/blog", get(|| async { Redirect::permanent("/blog/") }))
        .route("/blog/", get(blog))
        .route("/blog/search", post(search))
        .route("/post/*name", get(blog_post))
        .route("/projects", get(|| async { Redirect::permanent("/projects/") }))
        .route("/projects/", get(projects))
        .route("/projects/*name", get(project))
        .route("/static/images/:file", get(static_image));

    if state.live_reload {
        app = app.route("/__livereload", get(livereload::handler));
    }

    app.fallback(fallback_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16, watch: bool) -> Result<()> {
    let site = Arc::new(folio.site()?);
    let state = Arc::new(AppState::new(site.clone(), watch));
    let app = router(state.clone());

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    if watch {
        println!("Live reload enabled. Watching for changes...");
    }
    println!("Press Ctrl+C to stop.");

    if watch {
        let folio = folio.clone();
        let reload_tx = state.reload_tx.clone();
        tokio::task::spawn_blocking(move || {
            if let Err(e) = livereload::watch(&folio, &site, reload_tx) {
                tracing::error!("File watcher error: {}", e);
            }
        });
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home(State(state): State<Arc<AppState>>) -> Response {
    state.respond(state.site.home())
}

async fn about(State(state): State<Arc<AppState>>) -> Response {
    state.respond(state.site.about())
}

async fn blog(State(state): State<Arc<AppState>>) -> Response {
    state.respond(state.site.blog())
}

#[derive(Debug, Deserialize)]
struct SearchForm {
    query: Option<String>,
}

/// A request without a form body searches for nothing
async fn search(
    State(state): State<Arc<AppState>>,
    form: Option<Form<SearchForm>>,
) -> Response {
    let query = form.and_then(|Form(form)| form.query);
    state.respond(state.site.search(query.as_deref()))
}

/// `name` may span several segments (`2024/my-post/`)
async fn blog_post(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    uri: Uri,
) -> Response {
    match name.strip_suffix('/') {
        Some(name) => state.respond(state.site.post(name)),
        None => add_slash(&uri),
    }
}

async fn projects(State(state): State<Arc<AppState>>) -> Response {
    state.respond(state.site.projects())
}

async fn project(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    uri: Uri,
) -> Response {
    match name.strip_suffix('/') {
        Some(name) => state.respond(state.site.project(name)),
        None => add_slash(&uri),
    }
}

fn add_slash(uri: &Uri) -> Response {
    Redirect::permanent(&format!("{}/", uri.path())).into_response()
}

#[derive(Debug, Deserialize)]
struct SvgQuery {
    text: Option<String>,
}

/// `.svg` files get the text overlay, anything else is a plain static file
async fn static_image(
    State(state): State<Arc<AppState>>,
    Path(file): Path<String>,
    Query(query): Query<SvgQuery>,
) -> Response {
    if !file.ends_with(".svg") {
        return serve_static(&state, &format!("images/{}", file)).await;
    }

    let text = query.text.as_deref().unwrap_or("");
    match state.site.svg(&file, text) {
        Ok(body) => ([(header::CONTENT_TYPE, svg::CONTENT_TYPE)], body).into_response(),
        Err(e) => state.error(e),
    }
}

/// Serves `/static/*` from the static directory, 404 page for everything else
async fn fallback_handler(State(state): State<Arc<AppState>>, request: Request<Body>) -> Response {
    match request.uri().path().strip_prefix("/static/") {
        Some(rest) => serve_static(&state, rest).await,
        None => state.not_found(),
    }
}

async fn serve_static(state: &AppState, relative: &str) -> Response {
    let request = match Request::builder()
        .uri(format!("/{}", relative))
        .body(Body::empty())
    {
        Ok(request) => request,
        Err(_) => return (StatusCode::BAD_REQUEST, "Bad request").into_response(),
    };

    let mut service = ServeDir::new(&state.site.folio().static_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() == StatusCode::NOT_FOUND => state.not_found(),
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!("Static file error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
