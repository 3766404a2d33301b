use reqwest::header::{HeaderValue, ACCEPT};
use serde_json::Value;
use url::Url;

use super::models::YoutubeEmbed;
use super::request::{OgRequest, WireRequest};
use crate::domain::DecodeError;
use crate::utils::extract_video_id;

/// Looks up a YouTube video through the oEmbed endpoint.
#[derive(Debug, Clone)]
pub struct YoutubeEmbedRequest {
    video_id: String,
    endpoint: Url,
}

impl YoutubeEmbedRequest {
    /// Returns `None` when no video id can be extracted from `url` or the
    /// endpoint is not a valid URL.
    pub fn new(url: &Url, oembed_endpoint: &str) -> Option<Self> {
        let video_id = extract_video_id(url)?;
        let endpoint = Url::parse(oembed_endpoint).ok()?;
        Some(Self { video_id, endpoint })
    }

    pub fn video_id(&self) -> &str {
        &self.video_id
    }
}

impl OgRequest for YoutubeEmbedRequest {
    type Response = YoutubeEmbed;

    fn wire_request(&self) -> WireRequest {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair(
                "url",
                &format!("https://www.youtube.com/watch?v={}", self.video_id),
            )
            .append_pair("format", "json");

        let mut request = WireRequest::get(url);
        request
            .headers
            .insert(ACCEPT, HeaderValue::from_static("application/json"));
        request
    }

    fn decode(&self, data: &[u8]) -> Result<YoutubeEmbed, DecodeError> {
        let json: Value = serde_json::from_slice(data)?;
        if !json.is_object() {
            return Err(DecodeError::CastFailed);
        }
        serde_json::from_value(json).map_err(|_| DecodeError::CastFailed)
    }
}
