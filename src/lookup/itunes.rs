use std::time::Duration;

use serde::Deserialize;

use crate::config::LookupSettings;

use super::types::{CancelToken, LookupClient, LookupError, TrackInfo};

/// Lookup client for the iTunes Search API.
pub struct ItunesClient {
    base_url: String,
    country: Option<String>,
    agent: ureq::Agent,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchResult {
    track_name: Option<String>,
    artist_name: Option<String>,
    collection_name: Option<String>,
    artwork_url100: Option<String>,
}

impl From<SearchResult> for TrackInfo {
    fn from(r: SearchResult) -> Self {
        Self {
            track_name: r.track_name,
            artist_name: r.artist_name,
            album_name: r.collection_name,
            artwork_url: r.artwork_url100,
        }
    }
}

impl ItunesClient {
    pub fn new(settings: &LookupSettings) -> Self {
        let mut builder = ureq::AgentBuilder::new().user_agent(&settings.user_agent);
        if let Some(ms) = settings.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }

        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            country: settings
                .country
                .as_deref()
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
            agent: builder.build(),
        }
    }
}

impl LookupClient for ItunesClient {
    fn search_one(&self, query: &str, cancel: &CancelToken) -> Result<Option<TrackInfo>, LookupError> {
        cancel.check()?;

        let mut request = self
            .agent
            .get(&self.base_url)
            .query("term", query)
            .query("media", "music")
            .query("entity", "song")
            .query("limit", "1");
        if let Some(country) = &self.country {
            request = request.query("country", country);
        }

        tracing::debug!(query, "searching remote catalog");
        let response = request.call().map_err(|e| match e {
            ureq::Error::Status(code, _) => LookupError::Status(code),
            ureq::Error::Transport(t) => LookupError::Transport(t.to_string()),
        })?;

        // The user may have moved on while we were waiting on the network.
        cancel.check()?;

        let body: SearchResponse = response
            .into_json()
            .map_err(|e| LookupError::Decode(e.to_string()))?;

        cancel.check()?;
        Ok(body.results.into_iter().next().map(TrackInfo::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_result_maps_itunes_field_names() {
        let body: SearchResponse = serde_json::from_str(
            r#"{
                "resultCount": 1,
                "results": [{
                    "wrapperType": "track",
                    "trackName": "Paranoid Android",
                    "artistName": "Radiohead",
                    "collectionName": "OK Computer",
                    "artworkUrl100": "https://is1.example.com/100x100bb.jpg"
                }]
            }"#,
        )
        .unwrap();

        let info: TrackInfo = body.results.into_iter().next().unwrap().into();
        assert_eq!(info.track_name.as_deref(), Some("Paranoid Android"));
        assert_eq!(info.artist_name.as_deref(), Some("Radiohead"));
        assert_eq!(info.album_name.as_deref(), Some("OK Computer"));
        assert_eq!(
            info.artwork_url.as_deref(),
            Some("https://is1.example.com/100x100bb.jpg")
        );
    }

    #[test]
    fn empty_results_decode() {
        let body: SearchResponse =
            serde_json::from_str(r#"{ "resultCount": 0, "results": [] }"#).unwrap();
        assert!(body.results.is_empty());
    }

    #[test]
    fn cancelled_token_short_circuits_before_network() {
        let client = ItunesClient::new(&LookupSettings {
            base_url: "http://127.0.0.1:9/unreachable".into(),
            ..LookupSettings::default()
        });
        let cancel = CancelToken::new();
        cancel.cancel();

        let err = client.search_one("anything", &cancel).unwrap_err();
        assert!(matches!(err, LookupError::Cancelled));
    }
}
