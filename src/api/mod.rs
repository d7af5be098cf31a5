// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

mod handlers;

pub use handlers::{
    EpisodeListResponse, EpisodeParams, PodcastParams, SearchParams, SearchResponse,
};

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::Method;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::directory::DirectoryClient;

/// Shared application context passed to all handlers
#[derive(Clone)]
pub struct AppContext {
    pub directory: Arc<DirectoryClient>,
}

/// Build the router with all routes and the CORS layer
pub fn create_router(ctx: AppContext) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/search", get(handlers::search))
        .route("/podcast", get(handlers::podcast_detail))
        .route("/episodes", get(handlers::episode_list))
        .with_state(ctx)
        .layer(cors)
}

/// Bind and serve the API until the process is stopped
pub async fn serve(ctx: AppContext, addr: SocketAddr) -> std::io::Result<()> {
    let app = create_router(ctx);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("listening on http://{addr}");

    axum::serve(listener, app).await
}
