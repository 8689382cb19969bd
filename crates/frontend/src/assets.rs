use axum::{
    body::Body,
    extract::Path,
    http::{header, Response, StatusCode},
    response::IntoResponse,
};
use rust_embed::RustEmbed;
use tracing::debug;

#[derive(RustEmbed)]
#[folder = "static/"]
pub struct Assets;

pub async fn index() -> impl IntoResponse {
    embedded("index.html")
}

pub async fn static_file(Path(path): Path<String>) -> impl IntoResponse {
    embedded(&path)
}

fn embedded(path: &str) -> Response<Body> {
    match Assets::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            (
                [
                    (header::CONTENT_TYPE, mime.as_ref().to_string()),
                    (header::CACHE_CONTROL, "no-cache".to_string()),
                ],
                content.data.into_owned(),
            )
                .into_response()
        }
        None => {
            debug!(path, "asset not found");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
