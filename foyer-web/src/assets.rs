use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use rust_embed::Embed;

use foyer_core::error::FoyerError;
use foyer_core::resolver::Resolution;

use crate::error::ApiError;
use crate::proxy;
use crate::state::AppState;

#[derive(Embed)]
#[folder = "frontend/dist/"]
pub struct Assets;

/// Catch-all handler: everything the API router does not claim lands here.
pub async fn spa_handler(State(state): State<AppState>, req: Request) -> Response {
    match state.resolver.resolve(req.uri().path()) {
        // The API router is merged ahead of this fallback, so an API-prefixed
        // path arriving here was claimed by nobody.
        Resolution::Skip => StatusCode::NOT_FOUND.into_response(),
        Resolution::Proxy(target) => proxy::forward(&state.client, &target, req).await,
        Resolution::Asset(path) => match state.resolver.open(&path) {
            Some(content) => {
                let mime = mime_guess::from_path(&path).first_or_octet_stream();
                (
                    [(header::CONTENT_TYPE, mime.as_ref())],
                    content.into_owned(),
                )
                    .into_response()
            }
            None => read_failure(&path),
        },
        // SPA fallback: serve index.html for any unmatched path
        Resolution::Index => match state.resolver.open_index() {
            Some(content) => Html(content.into_owned()).into_response(),
            None => read_failure(state.resolver.index_file()),
        },
    }
}

/// The existence check passed but the read came back empty.
fn read_failure(path: &str) -> Response {
    let err = std::io::Error::new(
        std::io::ErrorKind::NotFound,
        format!("asset {path:?} vanished after lookup"),
    );
    ApiError(FoyerError::Io(err)).into_response()
}
