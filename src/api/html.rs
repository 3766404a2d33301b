use std::sync::Arc;

use reqwest::header::{HeaderValue, ACCEPT};
use url::Url;

use super::models::HtmlDocument;
use super::request::{OgRequest, WireRequest};
use crate::domain::DecodeError;
use crate::parser::Parser;

/// Fetches a plain web page and scrapes its metadata.
#[derive(Clone)]
pub struct HtmlRequest {
    url: Url,
    parser: Arc<dyn Parser>,
}

impl HtmlRequest {
    pub fn new(url: Url, parser: Arc<dyn Parser>) -> Self {
        Self { url, parser }
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl OgRequest for HtmlRequest {
    type Response = HtmlDocument;

    fn wire_request(&self) -> WireRequest {
        let mut request = WireRequest::get(self.url.clone());
        request.headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml;q=0.9,*/*;q=0.8"),
        );
        request
    }

    fn decode(&self, data: &[u8]) -> Result<HtmlDocument, DecodeError> {
        let html = std::str::from_utf8(data).map_err(|_| DecodeError::MarkupDecodeFailed)?;
        self.parser.parse(html, self.url.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::MetaTagParser;

    fn request(url: &str) -> HtmlRequest {
        HtmlRequest::new(
            Url::parse(url).unwrap(),
            Arc::new(MetaTagParser::new().unwrap()),
        )
    }

    #[test]
    fn test_wire_request() {
        let wire = request("https://example.com/article").wire_request();
        assert_eq!(wire.method, reqwest::Method::GET);
        assert_eq!(wire.url.as_str(), "https://example.com/article");
        assert!(wire.headers.contains_key(ACCEPT));
    }

    #[test]
    fn test_decode_html() {
        let html = br#"<html><head><meta property="og:title" content="Hi"></head></html>"#;
        let doc = request("https://example.com/article").decode(html).unwrap();
        assert_eq!(doc.meta("og:title"), Some("Hi"));
        assert_eq!(doc.page_url, "https://example.com/article");
    }

    #[test]
    fn test_relative_image_resolves_against_request_url() {
        let html = br#"<html><head><meta property="og:image" content="thumb.png"></head></html>"#;
        let doc = request("https://example.com/blog/post").decode(html).unwrap();
        let data = crate::domain::OpenGraphData::from_html(doc, "https://example.com/blog/post");
        assert_eq!(
            data.image_url.as_deref(),
            Some("https://example.com/blog/thumb.png")
        );
    }

    #[test]
    fn test_decode_invalid_utf8() {
        let err = request("https://example.com/")
            .decode(&[0x3c, 0xff, 0xfe, 0x3e])
            .unwrap_err();
        assert!(matches!(err, DecodeError::MarkupDecodeFailed));
    }
}
