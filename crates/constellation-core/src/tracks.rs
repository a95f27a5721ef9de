use crate::constants::TRACK_COUNT;
use crate::error::{DataFetchError, FontLoadError};
use crate::font::Typeface;
use serde::Deserialize;

#[derive(Deserialize)]
struct TopTracksPayload {
    #[serde(alias = "tracks")]
    items: Vec<TrackEntry>,
}

#[derive(Deserialize)]
struct TrackEntry {
    name: String,
}

/// Ordered track names from a top-tracks payload, capped at `TRACK_COUNT`.
pub fn parse_track_names(json: &str) -> Result<Vec<String>, DataFetchError> {
    let payload: TopTracksPayload = serde_json::from_str(json)?;
    let names: Vec<String> = payload
        .items
        .into_iter()
        .map(|t| t.name)
        .take(TRACK_COUNT)
        .collect();
    if names.is_empty() {
        return Err(DataFetchError::Empty);
    }
    Ok(names)
}

/// Source of the listener's top track names.
#[allow(async_fn_in_trait)]
pub trait TrackSource {
    async fn fetch_track_names(&self) -> Result<Vec<String>, DataFetchError>;
}

/// Source of the label typeface.
#[allow(async_fn_in_trait)]
pub trait FontSource {
    async fn load_font(&self) -> Result<Typeface, FontLoadError>;
}

/// Fixed track list, for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticTracks(pub Vec<String>);

impl TrackSource for StaticTracks {
    async fn fetch_track_names(&self) -> Result<Vec<String>, DataFetchError> {
        if self.0.is_empty() {
            return Err(DataFetchError::Empty);
        }
        Ok(self.0.iter().take(TRACK_COUNT).cloned().collect())
    }
}

/// Typeface parsed from an in-memory JSON document.
#[derive(Clone, Debug)]
pub struct StaticFont(pub String);

impl FontSource for StaticFont {
    async fn load_font(&self) -> Result<Typeface, FontLoadError> {
        Ok(Typeface::from_json(&self.0)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_names_in_order() {
        let json = r#"{ "items": [ { "name": "One", "id": 1 }, { "name": "Two" } ] }"#;
        assert_eq!(parse_track_names(json).expect("names"), vec!["One", "Two"]);
    }

    #[test]
    fn accepts_tracks_alias_and_caps_count() {
        let entries: Vec<String> = (0..25).map(|i| format!(r#"{{ "name": "t{i}" }}"#)).collect();
        let json = format!(r#"{{ "tracks": [{}] }}"#, entries.join(","));
        let names = parse_track_names(&json).expect("names");
        assert_eq!(names.len(), TRACK_COUNT);
        assert_eq!(names[0], "t0");
    }

    #[test]
    fn empty_or_malformed_payloads_fail() {
        assert!(matches!(parse_track_names(r#"{ "items": [] }"#), Err(DataFetchError::Empty)));
        assert!(matches!(parse_track_names("null"), Err(DataFetchError::Parse(_))));
        assert!(matches!(
            parse_track_names(r#"{ "items": [ { "title": "x" } ] }"#),
            Err(DataFetchError::Parse(_))
        ));
    }
}
