//! Browser-backed track and typeface sources.

use constellation_core::{
    parse_track_names, DataFetchError, FontLoadError, FontSource, TrackSource, Typeface,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

enum FetchFailure {
    Transport(String),
    Status(u16),
}

async fn fetch_text(url: &str) -> Result<String, FetchFailure> {
    let window = web::window().ok_or_else(|| FetchFailure::Transport("no window".into()))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| FetchFailure::Transport(format!("{:?}", e)))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|_| FetchFailure::Transport("fetch did not yield a Response".into()))?;
    if !resp.ok() {
        return Err(FetchFailure::Status(resp.status()));
    }
    let body = resp
        .text()
        .map_err(|e| FetchFailure::Transport(format!("{:?}", e)))?;
    JsFuture::from(body)
        .await
        .map_err(|e| FetchFailure::Transport(format!("{:?}", e)))?
        .as_string()
        .ok_or_else(|| FetchFailure::Transport("response body is not text".into()))
}

/// Top tracks served as JSON by the listening-history endpoint.
pub struct HttpTracks {
    pub url: String,
}

impl TrackSource for HttpTracks {
    async fn fetch_track_names(&self) -> Result<Vec<String>, DataFetchError> {
        let body = fetch_text(&self.url).await.map_err(|e| match e {
            FetchFailure::Transport(m) => DataFetchError::Transport(m),
            FetchFailure::Status(s) => DataFetchError::Status(s),
        })?;
        let names = parse_track_names(&body)?;
        log::info!("[fetch] {} track names from {}", names.len(), self.url);
        Ok(names)
    }
}

/// Typeface JSON served alongside the page.
pub struct HttpFont {
    pub url: String,
}

impl FontSource for HttpFont {
    async fn load_font(&self) -> Result<Typeface, FontLoadError> {
        let body = fetch_text(&self.url).await.map_err(|e| match e {
            FetchFailure::Transport(m) => FontLoadError::Transport(m),
            FetchFailure::Status(s) => FontLoadError::Status(s),
        })?;
        Ok(Typeface::from_json(&body)?)
    }
}
