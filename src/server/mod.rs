//! HTTP server: the blog pages rendered on request, static assets and demo API routes

mod api;

use anyhow::Result;
use axum::{
    body::Body,
    extract::{Path, State},
    http::{Request, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::content::{sort_posts, ContentLoader};
use crate::error::BlogError;
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Shared, read-only server state
pub struct AppState {
    blog: Blog,
    loader: ContentLoader,
    templates: TemplateRenderer,
    http: reqwest::Client,
}

impl AppState {
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            blog: blog.clone(),
            loader: blog.loader(),
            templates: TemplateRenderer::new()?,
            http: reqwest::Client::new(),
        })
    }

    fn not_found(&self) -> Response {
        match self.templates.render_not_found(&self.blog.config) {
            Ok(html) => (StatusCode::NOT_FOUND, Html(html)).into_response(),
            Err(e) => {
                tracing::error!("Failed to render 404 page: {}", e);
                (StatusCode::NOT_FOUND, "Not found").into_response()
            }
        }
    }

    fn page_response(&self, page: Result<String, PageError>) -> Response {
        match page {
            Ok(html) => Html(html).into_response(),
            Err(PageError::Content(e)) if e.is_not_found() => {
                tracing::debug!("{}", e);
                self.not_found()
            }
            Err(e) => {
                tracing::error!("Failed to render page: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error").into_response()
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum PageError {
    #[error(transparent)]
    Content(#[from] BlogError),
    /// The site itself is broken, e.g. the posts directory is gone
    #[error("cannot list posts: {0}")]
    Listing(#[source] BlogError),
    #[error(transparent)]
    Template(#[from] anyhow::Error),
}

/// Build the application router
pub fn router(blog: &Blog) -> Result<Router> {
    let state = Arc::new(AppState::new(blog)?);

    Ok(Router::new()
        .route("/", get(index_handler))
        .route("/posts/:id", get(post_handler))
        .nest("/api", api::router())
        .fallback(fallback_handler)
        .with_state(state)
        .layer(TraceLayer::new_for_http()))
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16) -> Result<()> {
    let app = router(blog)?;

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Home page, re-read from disk on every request
async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    let page = (|| -> Result<String, PageError> {
        let mut posts = state
            .loader
            .list_all_posts_metadata()
            .map_err(PageError::Listing)?;
        sort_posts(&mut posts, &state.blog.config.index_generator.order_by);
        Ok(state.templates.render_index(&state.blog.config, &posts)?)
    })();
    state.page_response(page)
}

/// A single post page
async fn post_handler(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> Response {
    let page = match state.loader.get_single_post(&id).await {
        Ok(post) => state
            .templates
            .render_post(&state.blog.config, &post)
            .map_err(PageError::from),
        Err(e) => Err(e.into()),
    };
    state.page_response(page)
}

/// Static assets, or the 404 page
async fn fallback_handler(State(state): State<Arc<AppState>>, request: Request<Body>) -> Response {
    if !state.blog.static_dir.is_dir() {
        return state.not_found();
    }

    let mut service = ServeDir::new(&state.blog.static_dir);
    match service.try_call(request).await {
        Ok(response) if response.status() == StatusCode::NOT_FOUND => state.not_found(),
        Ok(response) => response.into_response(),
        Err(e) => {
            tracing::error!("Failed to serve static file: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response()
        }
    }
}
