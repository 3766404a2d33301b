use reqwest::header::HeaderMap;
use reqwest::Method;
use url::Url;

use crate::domain::DecodeError;

/// Description of the HTTP request a variant wants sent.
#[derive(Debug, Clone)]
pub struct WireRequest {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
}

impl WireRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            headers: HeaderMap::new(),
        }
    }
}

/// A URL category's strategy for building a request and decoding its payload.
///
/// Construction-time validation belongs in the variant's constructor, so both
/// operations here are pure.
pub trait OgRequest: Send + Sync + 'static {
    type Response: Send + 'static;

    fn wire_request(&self) -> WireRequest;

    fn decode(&self, data: &[u8]) -> Result<Self::Response, DecodeError>;
}
